//! Application services

pub mod guide;
pub mod loader;
pub mod navigator;

pub use guide::{DebugSnapshot, Guide, GuideState};
pub use loader::{Dataset, LoadService};
pub use navigator::{ClickOutcome, ClickResult, LevelItem, Navigator, Rejection};
