//! Pure domain logic for the atelier portfolio CMS.
//!
//! Everything in this crate is synchronous and free of I/O so it can be unit
//! tested without fixtures and reused by the API layer, the db layer, and any
//! future CLI tooling.

pub mod audit;
pub mod autolayout;
pub mod blocks;
pub mod editor;
pub mod error;
pub mod layout;
pub mod render;
pub mod roles;
pub mod types;
pub mod validation;
pub mod video;

pub use error::CoreError;
