//! Docket Core Library
//!
//! Domain models, the case store and its derived views for the Docket
//! legal case tracker.

pub mod case;
pub mod config;
pub mod dates;
pub mod error;
pub mod event;
pub mod notifier;
pub mod report;
pub mod store;
pub mod task;

pub use error::{DocketError, DocketResult};
pub use store::CaseStore;
