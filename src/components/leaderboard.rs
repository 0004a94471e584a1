use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::net::{ScoreEntry, best_scores, fetch_leaderboard};
use crate::util::cerror;

const TOP_N: usize = 10;

#[derive(Properties, PartialEq, Clone)]
pub struct LeaderboardPanelProps {
    pub url: String,
}

#[function_component]
pub fn LeaderboardPanel(props: &LeaderboardPanelProps) -> Html {
    let rows = use_state(|| None::<Vec<ScoreEntry>>);
    {
        let rows = rows.clone();
        use_effect_with(props.url.clone(), move |url| {
            let url = url.clone();
            spawn_local(async move {
                match fetch_leaderboard(&url).await {
                    Ok(entries) => rows.set(Some(best_scores(&entries))),
                    Err(e) => {
                        cerror(&format!("leaderboard unavailable: {}", e));
                        rows.set(Some(Vec::new()));
                    }
                }
            });
            || ()
        });
    }
    let body = match &*rows {
        None => html! { <p style="opacity:0.7;">{"Loading leaderboard..."}</p> },
        Some(list) if list.is_empty() => html! { <p style="opacity:0.7;">{"No scores yet."}</p> },
        Some(list) => html! {
            <ol style="margin:0; padding-left:22px; text-align:left;">
                { for list.iter().take(TOP_N).map(|e| html!{
                    <li style="display:flex; justify-content:space-between; gap:16px;">
                        <span>{ e.username.clone() }</span>
                        <span style="font-variant-numeric:tabular-nums;">{ e.score }</span>
                    </li>
                }) }
            </ol>
        },
    };
    html! {
        <div style="margin-top:16px; border-top:1px solid #30363d; padding-top:12px;">
            <h3 style="margin:0 0 8px 0; font-size:16px;">{"Leaderboard"}</h3>
            { body }
        </div>
    }
}
