//! Patient data source for the roster.
//!
//! This crate stands at the boundary between the patient repository and the roster
//! pipeline: it parses the JSON feed, enforces unique patient ids, and turns source
//! failures into an empty collection.

pub mod feed;
pub mod source;

pub use feed::*;
pub use source::*;
