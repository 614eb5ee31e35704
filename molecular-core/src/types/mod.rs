//! Value types shared by the engine and its callers.

pub mod composition;
pub mod note;
pub mod pattern;
pub mod pitch;
pub mod source;
pub mod time;

pub use composition::{Composition, TimeSignature, Track};
pub use note::Note;
pub use pattern::Pattern;
pub use pitch::PitchName;
pub use source::CompositionSource;
pub use time::{Span, Time};
