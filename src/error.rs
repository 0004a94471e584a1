use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("round {0} has already been scored")]
    AlreadyScored(usize),
    #[error("the session is complete and can no longer change")]
    Complete,
    #[error("round {index} is outside 1..={total}")]
    RoundOutOfRange { index: usize, total: usize },
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("no photo catalog found in the page")]
    MissingCatalog,
    #[error("the photo catalog is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    #[error("need {needed} photos for a game but the catalog has {available}")]
    NotEnoughPhotos { needed: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("the game config is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid game config: {0}")]
    Invalid(&'static str),
}

#[derive(Error, Debug)]
pub enum NetError {
    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("server answered with HTTP {0}")]
    Status(u16),
    #[error("server reported a failure: {0}")]
    Rejected(String),
}
