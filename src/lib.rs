//! Guided questionnaire engine.
//!
//! A user starts at a root question and descends a graph of options level by
//! level. Options may start hidden (revealed by a click, or automatically when
//! they are the last hidden option of a fully confirmed level) and may require
//! confirmation before the user can pass through them or their siblings.
//!
//! Layers: [`domain`] (graph and pure policies), [`application`] (navigator,
//! loading, session lifecycle), [`infrastructure`] (data sources, input),
//! [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
