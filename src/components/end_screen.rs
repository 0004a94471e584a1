use super::leaderboard::LeaderboardPanel;
use crate::net::spawn_upload;
use crate::util::format_tally;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct EndScreenProps {
    pub cumulative: u32,
    pub maximum: u32,
    pub round_scores: Vec<u32>,
    pub upload_url: Option<String>,
    pub leaderboard_url: Option<String>,
    pub play_again: Callback<()>,
}

fn upload_label(done: bool) -> &'static str {
    if done { "Score Uploaded" } else { "Upload Score" }
}

#[function_component]
pub fn EndScreen(props: &EndScreenProps) -> Html {
    let uploaded = use_state(|| false);
    let done = *uploaded;
    let upload_btn = props.upload_url.clone().map(|url| {
        let handle = uploaded.clone();
        let score = props.cumulative;
        let onclick = Callback::from(move |_| {
            if *handle {
                return;
            }
            handle.set(true);
            spawn_upload(url.clone(), score);
        });
        html! { <button id="uploadscorebutton" {onclick} disabled={done}>{ upload_label(done) }</button> }
    });
    let again_btn = {
        let cb = props.play_again.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div id="endscore" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #166088; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
            <h2 style="margin:0 0 12px 0; color:#58a6ff;">{"Final Score"}</h2>
            <p id="endscorevalue" style="margin:4px 0; font-size:28px; font-weight:700;">{ format_tally(props.cumulative, props.maximum) }</p>
            <div style="display:flex; gap:10px; justify-content:center; font-size:13px; opacity:0.8;">
                { for props.round_scores.iter().enumerate().map(|(i, s)| html!{ <span>{ format!("R{} +{}", i + 1, s) }</span> }) }
            </div>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                { upload_btn.unwrap_or_default() }
                <button onclick={again_btn}>{"Play Again"}</button>
            </div>
            { if let Some(url) = &props.leaderboard_url { html!{ <LeaderboardPanel url={url.clone()} /> } } else { html!{} } }
        </div>
    }
}
