use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PhotoViewProps {
    pub src: Option<String>,
    /// Faded in once the round opens.
    pub shown: bool,
    pub on_loaded: Callback<()>,
}

#[function_component]
pub fn PhotoView(props: &PhotoViewProps) -> Html {
    let Some(src) = props.src.clone() else {
        return html! {};
    };
    let onload = {
        let cb = props.on_loaded.clone();
        Callback::from(move |_: Event| cb.emit(()))
    };
    // A broken image must not stall the game; the round opens anyway.
    let onerror = {
        let cb = props.on_loaded.clone();
        let src = src.clone();
        Callback::from(move |_: Event| {
            crate::util::cwarn(&format!("photo {} failed to load", src));
            cb.emit(())
        })
    };
    let opacity = if props.shown { 1 } else { 0 };
    html! {
        <img id="photo" key={src.clone()} src={src} {onload} {onerror} alt="Where was this taken?"
            style={format!("width:100%; height:100%; object-fit:cover; transition:opacity 0.5s; opacity:{};", opacity)} />
    }
}
