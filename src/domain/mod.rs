//! Domain layer: graph model and the pure reveal/ordering policies
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod graph;
pub mod label;
pub mod level_state;
pub mod ordering;
pub mod reveal;

pub use entities::*;
pub use error::DomainError;
pub use graph::{GraphResult, GraphStore};
pub use label::{split_heading, LabelStyle};
pub use level_state::LevelState;
pub use ordering::order_siblings;
pub use reveal::auto_reveal_candidate;
