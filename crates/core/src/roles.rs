//! Role names as stored in the `roles` table.
//!
//! Keep in sync with the seed rows in `20260301000001_create_roles.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
