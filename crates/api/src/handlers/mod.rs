//! HTTP request handlers, one module per resource.

pub mod audit;
pub mod auth;
pub mod layout;
pub mod page;
pub mod project;
pub mod upload;
