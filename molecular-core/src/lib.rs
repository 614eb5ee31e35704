//! # Molecular Core
//!
//! Deterministic composition engine for "molecular" music: a melody walks up
//! and down a scale, and every finished pattern loops underneath the ones
//! that follow. Note lengths swap whenever a new note would eventually
//! coincide with a note of a looping pattern, which weaves the patterns into
//! evolving, self-overlapping rhythms without any randomness.
//!
//! ## Features
//!
//! - **serde**: Serialize/Deserialize for sources, compositions and MIDI tracks
//! - **colored**: Colored `Display` for patterns (default)
//!
//! ## Example
//!
//! ```
//! use molecular_core::{generate, presets};
//!
//! let source = presets::preset("4E3").unwrap();
//! let composition = generate(&source).unwrap();
//! assert_eq!(composition.tracks.len(), 1);
//! ```

pub mod engine;
pub mod midi;
pub mod presets;
pub mod types;

// Re-export commonly used types
pub use engine::{generate, generate_patterns, Generation, GenerationError};
pub use types::{Composition, CompositionSource, Note, Pattern, PitchName, TimeSignature, Track};
