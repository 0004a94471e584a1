use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GuessButtonProps {
    pub label: String,
    pub enabled: bool,
    /// Map is expanded (hovered); the button follows its width.
    pub wide: bool,
    pub on_press: Callback<()>,
}

#[function_component]
pub fn GuessButton(props: &GuessButtonProps) -> Html {
    let press_cb = {
        let cb = props.on_press.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let background = match (props.enabled, props.label.as_str()) {
        (false, _) => "#2A3439",
        (true, "Submit!") => "#166088",
        (true, _) => "#660000",
    };
    let width = if props.wide { "50%" } else { "20%" };
    html! {
        <button id="submitbutton" onclick={press_cb} disabled={!props.enabled}
            style={format!("position:absolute; right:12px; bottom:12px; width:{}; padding:10px 0; border:none; border-radius:6px; color:#fff; font-weight:600; background:{}; transition:width 0.3s;", width, background)}>
            { props.label.clone() }
        </button>
    }
}
