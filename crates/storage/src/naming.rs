//! Object name generation for uploaded files.
//!
//! Client-supplied filenames are never used as object keys: they collide,
//! they carry unsafe characters, and they leak local paths. Every upload
//! gets a fresh `{unix_millis}-{random}.{ext}` name instead, keeping only
//! the original extension.

use rand::distr::{Alphanumeric, SampleString};

use atelier_core::validation::file_extension;

/// Length of the random suffix appended after the timestamp.
const RANDOM_SUFFIX_LEN: usize = 10;

/// Generate a unique object name for an uploaded file, preserving the
/// original extension when one exists.
pub fn object_name(original_filename: &str) -> String {
    let stamp = chrono::Utc::now().timestamp_millis();
    let random = Alphanumeric
        .sample_string(&mut rand::rng(), RANDOM_SUFFIX_LEN)
        .to_lowercase();
    match file_extension(original_filename) {
        Some(ext) => format!("{stamp}-{random}.{ext}"),
        None => format!("{stamp}-{random}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_extension() {
        let name = object_name("photo.JPG");
        assert!(name.ends_with(".jpg"), "got {name}");
    }

    #[test]
    fn no_extension_no_trailing_dot() {
        let name = object_name("README");
        assert!(!name.contains('.'), "got {name}");
    }

    #[test]
    fn names_are_unique() {
        let a = object_name("a.png");
        let b = object_name("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn drops_original_stem() {
        let name = object_name("../../etc/passwd.png");
        assert!(!name.contains("passwd"), "got {name}");
        assert!(!name.contains('/'), "got {name}");
    }

    #[test]
    fn shape_is_stamp_dash_random() {
        let name = object_name("clip.mp4");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "mp4");
        let (stamp, random) = stem.split_once('-').unwrap();
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(random.len(), RANDOM_SUFFIX_LEN);
        assert!(random.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
