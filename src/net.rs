// Score upload and leaderboard fetch. Both are fire-and-forget from the game's point of view.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;

use crate::error::NetError;
use crate::util::{clog, cerror};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpload {
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadReply {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
}

pub async fn upload_score(url: &str, score: u32) -> Result<UploadReply, NetError> {
    let resp = Request::post(url).json(&ScoreUpload { score })?.send().await?;
    if !resp.ok() {
        return Err(NetError::Status(resp.status()));
    }
    let reply: UploadReply = resp.json().await?;
    if !reply.success {
        return Err(NetError::Rejected(reply.error.unwrap_or_default()));
    }
    Ok(reply)
}

/// Sends the final score in the background; the outcome is only logged.
pub fn spawn_upload(url: String, score: u32) {
    spawn_local(async move {
        match upload_score(&url, score).await {
            Ok(reply) => clog(&format!(
                "score {} uploaded: {}",
                score,
                reply.message.unwrap_or_default()
            )),
            Err(e) => cerror(&format!("score upload failed: {}", e)),
        }
    });
}

pub async fn fetch_leaderboard(url: &str) -> Result<Vec<ScoreEntry>, NetError> {
    let resp = Request::get(url).send().await?;
    if !resp.ok() {
        return Err(NetError::Status(resp.status()));
    }
    Ok(resp.json().await?)
}

/// Best score per player, highest first; ties ordered by name.
pub fn best_scores(entries: &[ScoreEntry]) -> Vec<ScoreEntry> {
    let mut best: HashMap<&str, u32> = HashMap::new();
    for e in entries {
        let slot = best.entry(e.username.as_str()).or_insert(e.score);
        *slot = (*slot).max(e.score);
    }
    let mut out: Vec<ScoreEntry> = best
        .into_iter()
        .map(|(username, score)| ScoreEntry { username: username.to_string(), score })
        .collect();
    out.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.username.cmp(&b.username)));
    out
}
