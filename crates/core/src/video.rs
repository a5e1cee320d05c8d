//! Video URL normalization for video blocks.
//!
//! Admins paste whatever their browser shows: share pages, short links,
//! download pages. Normalization rewrites the well-known hosts into URLs the
//! renderer can actually play (embed players or direct files) and passes
//! everything else through untouched. Best effort only; unrecognized hosts
//! are never rejected.

use std::sync::LazyLock;

use regex::Regex;

static DIRECT_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg|mov|avi|mkv)$").expect("valid regex"));

static YOUTUBE_WATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]+)").expect("valid regex"));

static YOUTUBE_SHORT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").expect("valid regex"));

static YOUTUBE_SHORTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/shorts/([A-Za-z0-9_-]+)").expect("valid regex"));

static VIMEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("valid regex"));

static DRIVE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([^/]+)").expect("valid regex"));

/// Returns `true` when the URL points at an embeddable player host rather
/// than a direct video file. The renderer picks `<iframe>` vs `<video>`
/// based on this.
pub fn is_embed_url(url: &str) -> bool {
    url.contains("youtu.be") || url.contains("youtube.com") || url.contains("vimeo.com")
}

/// Normalize a pasted video URL into something the renderer can play.
///
/// Direct file URLs pass through. YouTube watch pages, short links and
/// shorts become `youtube.com/embed` URLs; Vimeo pages become
/// `player.vimeo.com` URLs (both muted and autoplaying, since they render
/// inline). Google Drive file pages become direct-download URLs and Dropbox
/// share links are switched to raw mode. Anything else is returned trimmed.
pub fn normalize_video_url(url: &str) -> String {
    let trimmed = url.trim();

    if DIRECT_FILE_RE.is_match(trimmed) {
        return trimmed.to_string();
    }

    if trimmed.contains("drive.google.com") {
        if let Some(caps) = DRIVE_FILE_RE.captures(trimmed) {
            return format!(
                "https://drive.google.com/uc?export=download&id={}",
                &caps[1]
            );
        }
        return trimmed.to_string();
    }

    // Google Photos links only resolve for the owner; keep them as pasted.
    if trimmed.contains("photos.google.com") {
        return trimmed.to_string();
    }

    if is_embed_url(trimmed) {
        return to_embed_url(trimmed);
    }

    if trimmed.contains("dropbox.com") && trimmed.contains("?dl=0") {
        return trimmed.replacen("?dl=0", "?raw=1", 1);
    }

    trimmed.to_string()
}

/// Convert a YouTube or Vimeo page URL to its embed-player form. URLs the
/// id cannot be read from are returned unchanged.
fn to_embed_url(url: &str) -> String {
    if url.contains("youtube.com") {
        if let Some(caps) = YOUTUBE_SHORTS_RE.captures(url) {
            return youtube_embed(&caps[1]);
        }
        if let Some(caps) = YOUTUBE_WATCH_RE.captures(url) {
            return youtube_embed(&caps[1]);
        }
        return url.to_string();
    }

    if url.contains("youtu.be") {
        if let Some(caps) = YOUTUBE_SHORT_LINK_RE.captures(url) {
            return youtube_embed(&caps[1]);
        }
        return url.to_string();
    }

    if let Some(caps) = VIMEO_RE.captures(url) {
        return format!(
            "https://player.vimeo.com/video/{}?autoplay=1&muted=1",
            &caps[1]
        );
    }

    url.to_string()
}

fn youtube_embed(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}?autoplay=1&mute=1")
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- direct files --------------------------------------------------------

    #[test]
    fn direct_file_urls_pass_through() {
        let url = "https://cdn.example.com/reel.mp4";
        assert_eq!(normalize_video_url(url), url);
    }

    #[test]
    fn direct_file_extension_is_case_insensitive() {
        let url = "https://cdn.example.com/REEL.MOV";
        assert_eq!(normalize_video_url(url), url);
    }

    // -- youtube -------------------------------------------------------------

    #[test]
    fn youtube_watch_url_becomes_embed() {
        assert_eq!(
            normalize_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&mute=1"
        );
    }

    #[test]
    fn youtube_watch_url_with_extra_params_becomes_embed() {
        assert_eq!(
            normalize_video_url("https://www.youtube.com/watch?t=30&v=abc123_-X"),
            "https://www.youtube.com/embed/abc123_-X?autoplay=1&mute=1"
        );
    }

    #[test]
    fn youtu_be_short_link_becomes_embed() {
        assert_eq!(
            normalize_video_url("https://youtu.be/dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&mute=1"
        );
    }

    #[test]
    fn youtube_shorts_url_becomes_embed() {
        assert_eq!(
            normalize_video_url("https://www.youtube.com/shorts/Zq9pWZXyyOs"),
            "https://www.youtube.com/embed/Zq9pWZXyyOs?autoplay=1&mute=1"
        );
    }

    #[test]
    fn youtube_url_without_video_id_is_unchanged() {
        let url = "https://www.youtube.com/feed/subscriptions";
        assert_eq!(normalize_video_url(url), url);
    }

    // -- vimeo ---------------------------------------------------------------

    #[test]
    fn vimeo_page_becomes_player_url() {
        assert_eq!(
            normalize_video_url("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871?autoplay=1&muted=1"
        );
    }

    // -- google drive / photos / dropbox -------------------------------------

    #[test]
    fn drive_file_page_becomes_download_url() {
        assert_eq!(
            normalize_video_url("https://drive.google.com/file/d/1AbC-xyz/view?usp=sharing"),
            "https://drive.google.com/uc?export=download&id=1AbC-xyz"
        );
    }

    #[test]
    fn drive_url_without_file_id_is_unchanged() {
        let url = "https://drive.google.com/drive/my-drive";
        assert_eq!(normalize_video_url(url), url);
    }

    #[test]
    fn google_photos_links_pass_through() {
        let url = "https://photos.google.com/share/AF1Qip";
        assert_eq!(normalize_video_url(url), url);
    }

    #[test]
    fn dropbox_share_link_switches_to_raw() {
        assert_eq!(
            normalize_video_url("https://www.dropbox.com/s/abc/clip.webm.html?dl=0"),
            "https://www.dropbox.com/s/abc/clip.webm.html?raw=1"
        );
    }

    // -- fallbacks -----------------------------------------------------------

    #[test]
    fn unknown_hosts_are_trimmed_and_kept() {
        assert_eq!(
            normalize_video_url("  https://example.com/somewhere  "),
            "https://example.com/somewhere"
        );
    }

    #[test]
    fn is_embed_url_matches_player_hosts_only() {
        assert!(is_embed_url("https://www.youtube.com/embed/x"));
        assert!(is_embed_url("https://youtu.be/x"));
        assert!(is_embed_url("https://player.vimeo.com/video/1"));
        assert!(!is_embed_url("https://cdn.example.com/reel.mp4"));
    }
}
