use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimerBarProps {
    /// Remaining time, 0..=100.
    pub percent: f64,
}

#[function_component(TimerBar)]
pub fn timer_bar(props: &TimerBarProps) -> Html {
    let color = if props.percent > 25.0 { "#166088" } else { "#f85149" };
    html! {<div style="position:absolute; top:0; left:0; width:100%; height:6px; background:#161b22;">
        <div id="timer" style={format!("height:100%; width:{:.1}%; background:{};", props.percent, color)}></div>
    </div>}
}
