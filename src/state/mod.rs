pub mod countdown;
pub mod machine;
pub mod session;

pub use machine::{EndTrigger, Phase, RoundMachine};
