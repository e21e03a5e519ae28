//! Typed accessors for the keys Docket persists.

pub mod settings;
pub mod snapshot;
