// Round feed: the page embeds the photo catalog as JSON, each game plays a shuffled slice of it.

use crate::error::FeedError;
use crate::model::{PhotoRecord, Round};

pub const CATALOG_ELEMENT_ID: &str = "photo-catalog";

/// Text of a `<script type="application/json" id=...>` element, if present.
pub fn read_script_json(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let text = document.get_element_by_id(id)?.text_content()?;
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

pub fn parse_catalog(raw: &str) -> Result<Vec<PhotoRecord>, FeedError> {
    Ok(serde_json::from_str(raw)?)
}

/// Shuffles the catalog (Fisher-Yates, `rng` in `[0, 1)`) and builds the first `count` rounds.
pub fn select_rounds(
    mut catalog: Vec<PhotoRecord>,
    count: usize,
    mut rng: impl FnMut() -> f64,
) -> Result<Vec<Round>, FeedError> {
    if catalog.len() < count {
        return Err(FeedError::NotEnoughPhotos { needed: count, available: catalog.len() });
    }
    for i in (1..catalog.len()).rev() {
        let j = ((rng() * (i + 1) as f64).floor() as usize).min(i);
        catalog.swap(i, j);
    }
    Ok(catalog
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, rec)| Round::new(i + 1, rec))
        .collect())
}

pub fn load_rounds_from_page(count: usize) -> Result<Vec<Round>, FeedError> {
    let raw = read_script_json(CATALOG_ELEMENT_ID).ok_or(FeedError::MissingCatalog)?;
    let catalog = parse_catalog(&raw)?;
    select_rounds(catalog, count, js_sys::Math::random)
}
