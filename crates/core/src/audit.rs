//! Audit trail vocabulary and redaction.
//!
//! Lives in `core` so the API layer and any future CLI tooling share one
//! set of action and category names.

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known actions for audit log entries, `resource.verb` style.
pub mod actions {
    pub const PROJECT_CREATE: &str = "project.create";
    pub const PROJECT_UPDATE: &str = "project.update";
    pub const PROJECT_DELETE: &str = "project.delete";
    pub const LAYOUT_SAVE: &str = "layout.save";
    pub const FILE_UPLOAD: &str = "file.upload";
    pub const USER_LOGIN: &str = "user.login";
    pub const USER_LOGOUT: &str = "user.logout";
}

// ---------------------------------------------------------------------------
// Resource type constants
// ---------------------------------------------------------------------------

/// Known resource types referenced by audit log entries.
pub mod resources {
    pub const PROJECT: &str = "project";
    pub const FILE: &str = "file";
    pub const USER: &str = "user";
}

// ---------------------------------------------------------------------------
// Category mapping
// ---------------------------------------------------------------------------

/// Known log categories for filtering and retention grouping.
pub mod categories {
    pub const AUTHENTICATION: &str = "authentication";
    pub const CONTENT: &str = "content";
    pub const STORAGE: &str = "storage";
}

/// Map an action to its log category.
///
/// Unknown actions default to `"content"`.
pub fn action_to_category(action: &str) -> &'static str {
    match action {
        actions::USER_LOGIN | actions::USER_LOGOUT => categories::AUTHENTICATION,
        actions::FILE_UPLOAD => categories::STORAGE,
        _ => categories::CONTENT,
    }
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Fields that must be redacted from audit log details before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "access_token",
    "refresh_token",
    "authorization",
    "credential",
];

/// Redact sensitive fields from a JSON value before it is persisted.
///
/// Replaces the value of any key matching [`SENSITIVE_FIELDS`] with
/// `"[REDACTED]"`, recursing into nested objects and arrays.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}
