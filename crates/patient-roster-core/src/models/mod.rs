//! Domain models for the patient roster.

mod patient;
mod view_state;

pub use patient::*;
pub use view_state::*;
