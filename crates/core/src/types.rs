//! Shared type aliases used across the workspace.

use chrono::{DateTime, Utc};

/// Primary key type for all entity tables.
pub type DbId = i64;

/// UTC timestamp as stored in `timestamptz` columns.
pub type Timestamp = DateTime<Utc>;
