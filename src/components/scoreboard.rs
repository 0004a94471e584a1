use crate::presenter::Scoreboard;
use crate::util::format_tally;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ScoreboardPanelProps {
    pub board: Scoreboard,
    pub visible: bool,
}

#[function_component]
pub fn ScoreboardPanel(props: &ScoreboardPanelProps) -> Html {
    let b = &props.board;
    let opacity = if props.visible { 1 } else { 0 };
    html! {
        <div id="scoresheet" style={format!("position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:140px; font-size:15px; line-height:1.5; transition:opacity 0.5s; opacity:{};", opacity)}>
            <span style="font-weight:700;">{ format!("Round {}", b.round) }</span>
            { if let Some(delta) = b.delta { html!{ <div style="color:#2ea043; font-weight:600;">{ format!("+{}", delta) }</div> } } else { html!{} } }
            <div style="font-variant-numeric:tabular-nums;">{ format_tally(b.cumulative, b.maximum) }</div>
        </div>
    }
}
