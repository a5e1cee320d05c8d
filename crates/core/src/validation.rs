//! Field validation, slug generation, and upload rules.
//!
//! Everything the API checks before touching the database lives here so that
//! handlers stay thin and the rules are unit tested in one place.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_CATEGORY_LEN: usize = 100;
pub const MAX_SLUG_LEN: usize = 100;

static SCRIPT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script").expect("valid regex"));

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s,&-]*$").expect("valid regex"));

/// Validate a project title (non-empty, <= 200 chars, no script tags).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(
            "Title must be at most 200 characters".into(),
        ));
    }
    if SCRIPT_TAG_RE.is_match(title) {
        return Err(CoreError::Validation(
            "Title contains disallowed content".into(),
        ));
    }
    Ok(())
}

/// Validate a project description (optional, <= 2000 chars, no script tags).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(
            "Description must be at most 2000 characters".into(),
        ));
    }
    if SCRIPT_TAG_RE.is_match(description) {
        return Err(CoreError::Validation(
            "Description contains disallowed content".into(),
        ));
    }
    Ok(())
}

/// Validate a project category (optional, <= 100 chars, restricted charset).
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if category.len() > MAX_CATEGORY_LEN {
        return Err(CoreError::Validation(
            "Category must be at most 100 characters".into(),
        ));
    }
    if !CATEGORY_RE.is_match(category) {
        return Err(CoreError::Validation(
            "Category may only contain letters, digits, spaces, commas, '&' and '-'".into(),
        ));
    }
    Ok(())
}

/// Categories are displayed uppercase throughout the site.
pub fn format_category(category: &str) -> String {
    category.trim().to_uppercase()
}

// ---------------------------------------------------------------------------
// Slug generation
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug from a project title.
///
/// Converts to lowercase, replaces special characters with hyphens, collapses
/// consecutive hyphens, trims leading/trailing hyphens, and caps the length.
pub fn generate_slug(title: &str) -> String {
    let mapped: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(mapped.len());
    let mut prev_hyphen = false;
    for c in mapped.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.truncate(MAX_SLUG_LEN);
    result.trim_matches('-').to_string()
}

/// Validate a slug (non-empty, <= 100 chars, lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(
            "Slug must be at most 100 characters".into(),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rich text sanitization
// ---------------------------------------------------------------------------

static SCRIPT_ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid regex"));

static STRAY_SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?script\b[^>]*>").expect("valid regex"));

static EVENT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\son\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid regex")
});

static JS_PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid regex"));

/// Strip active content from a stored rich-text fragment.
///
/// Applied once, when a layout is saved; the renderer then emits stored
/// markup as-is. Removes `<script>` elements, inline `on*=` handlers, and
/// `javascript:` URLs while leaving ordinary formatting markup alone.
pub fn sanitize_rich_text(html: &str) -> String {
    let cleaned = SCRIPT_ELEMENT_RE.replace_all(html, "");
    let cleaned = STRAY_SCRIPT_RE.replace_all(&cleaned, "");
    let cleaned = EVENT_ATTR_RE.replace_all(&cleaned, "");
    JS_PROTOCOL_RE.replace_all(&cleaned, "").into_owned()
}

// ---------------------------------------------------------------------------
// Upload rules
// ---------------------------------------------------------------------------

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;
pub const MAX_DOCUMENT_BYTES: usize = 25 * 1024 * 1024;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "svg"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi", "mkv"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "stl", "obj", "doc", "docx", "txt"];

static FOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]{1,64}$").expect("valid regex"));

/// Broad class of an uploaded file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Video,
    Document,
}

impl UploadKind {
    /// Size cap for this class of file, in bytes.
    pub fn max_bytes(&self) -> usize {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
            Self::Document => MAX_DOCUMENT_BYTES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

/// Lowercased extension of a filename, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Classify an extension into an upload kind, or `None` when unsupported.
pub fn classify_extension(ext: &str) -> Option<UploadKind> {
    let ext = ext.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(UploadKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(UploadKind::Video)
    } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        Some(UploadKind::Document)
    } else {
        None
    }
}

/// Validate an upload by filename and size, returning its kind.
pub fn validate_upload(filename: &str, size: usize) -> Result<UploadKind, CoreError> {
    let ext = file_extension(filename).ok_or_else(|| {
        CoreError::Validation(format!("File '{filename}' has no usable extension"))
    })?;
    let kind = classify_extension(&ext).ok_or_else(|| {
        CoreError::Validation(format!("File type '.{ext}' is not supported"))
    })?;
    if size > kind.max_bytes() {
        return Err(CoreError::Validation(format!(
            "{} files must be at most {} MB",
            kind.as_str(),
            kind.max_bytes() / (1024 * 1024)
        )));
    }
    Ok(kind)
}

/// Validate a destination folder name (lowercase alphanumeric + hyphens).
pub fn validate_folder(folder: &str) -> Result<(), CoreError> {
    if !FOLDER_RE.is_match(folder) {
        return Err(CoreError::Validation(
            "Folder must be 1-64 lowercase alphanumeric characters or hyphens".into(),
        ));
    }
    Ok(())
}
