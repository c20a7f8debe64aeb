pub mod replay;
pub mod reports;
pub mod tester;

pub use replay::{ReplaySummary, load_script, replay};
pub use tester::*;
