//! # Molecular
//!
//! Interactive front end for the molecular music generator. The generation
//! engine lives in `molecular-core`; this crate wraps it in a command shell
//! that edits composition sources, generates compositions and inspects them.
//!
//! ## Modules
//!
//! - `session`: The working source and the last generated composition,
//!   with JSON loading, saving and export.
//! - `commands`: The command registry and its handlers.
//! - `repl`: The interactive shell, including hot-reload of watched sources.

pub mod commands;
pub mod repl;
pub mod session;

pub use crate::session::Session;
pub use molecular_core::{generate, Composition, CompositionSource};
