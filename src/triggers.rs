//! Immutable trigger tables built from a `SoundConfig`. Building a table
//! validates its entries.
//!
//! Tables are rebuilt wholesale on every `init`; runtime state such as
//! cooldown history lives elsewhere so a reload never has to re-derive it.

mod style;
mod text;

pub use style::{StyleTrigger, StyleTriggerTable};
pub use text::{TextTrigger, TextTriggerTable};
