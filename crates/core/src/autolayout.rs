//! Initial layout synthesis for projects that never saved one.
//!
//! The public page and the layout editor both need something to show for a
//! project whose layout column is still empty. This module derives a starting
//! document from the project's own fields. The result is purely a function of
//! its inputs and is never persisted here; it only becomes durable when the
//! admin saves it from the editor.

use crate::blocks::{BlockAlignment, BlockKind, BlockSize, ContentBlock, GridImage};
use crate::layout::Layout;

/// Fixed ids for generated blocks, so repeated loads produce an identical
/// document.
pub const AUTO_TEXT_ID: &str = "auto-text";
pub const AUTO_SPACER_ID: &str = "auto-spacer";
pub const AUTO_CAROUSEL_ID: &str = "auto-carousel";

/// Derive a starting layout from the project description and gallery.
///
/// A non-blank description becomes one large left-aligned text block. The
/// cover image followed by the gallery images becomes one full-width
/// carousel. When both are present a default-height spacer separates them.
/// A project with neither yields an empty document.
pub fn generate_initial_layout(
    description: &str,
    cover_image: Option<&str>,
    images: &[String],
) -> Layout {
    let mut blocks = Vec::new();

    if !description.trim().is_empty() {
        blocks.push(ContentBlock {
            id: AUTO_TEXT_ID.to_string(),
            size: BlockSize::Large,
            alignment: BlockAlignment::Left,
            kind: BlockKind::Text {
                content: description.to_string(),
            },
        });
    }

    let mut all_images: Vec<GridImage> = Vec::new();
    if let Some(cover) = cover_image {
        if !cover.is_empty() {
            all_images.push(GridImage::bare(cover));
        }
    }
    all_images.extend(images.iter().filter(|u| !u.is_empty()).map(GridImage::bare));

    if !all_images.is_empty() {
        blocks.push(ContentBlock {
            id: AUTO_CAROUSEL_ID.to_string(),
            size: BlockSize::Full,
            alignment: BlockAlignment::Center,
            kind: BlockKind::Carousel { images: all_images },
        });
    }

    if blocks.len() > 1 {
        blocks.insert(
            1,
            ContentBlock {
                id: AUTO_SPACER_ID.to_string(),
                size: BlockSize::Medium,
                alignment: BlockAlignment::Center,
                kind: BlockKind::Spacer {
                    content: crate::blocks::DEFAULT_SPACER_HEIGHT.to_string(),
                },
            },
        );
    }

    Layout::from_blocks(blocks).expect("generated block ids are distinct")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(layout: &Layout) -> Vec<&'static str> {
        layout.blocks().iter().map(|b| b.kind.type_name()).collect()
    }

    #[test]
    fn description_and_media_produce_text_spacer_carousel() {
        let images = vec!["b.jpg".to_string(), "c.jpg".to_string()];
        let layout = generate_initial_layout("Hello", Some("a.jpg"), &images);

        assert_eq!(kinds(&layout), ["text", "spacer", "carousel"]);

        let text = &layout.blocks()[0];
        assert_eq!(text.id, AUTO_TEXT_ID);
        assert_eq!(text.size, BlockSize::Large);
        assert_eq!(text.alignment, BlockAlignment::Left);
        assert!(matches!(&text.kind, BlockKind::Text { content } if content == "Hello"));

        let spacer = &layout.blocks()[1];
        assert_eq!(spacer.id, AUTO_SPACER_ID);
        assert_eq!(spacer.spacer_height(), 40);
        assert_eq!(spacer.size, BlockSize::Medium);
        assert_eq!(spacer.alignment, BlockAlignment::Center);

        let carousel = &layout.blocks()[2];
        assert_eq!(carousel.id, AUTO_CAROUSEL_ID);
        assert_eq!(carousel.size, BlockSize::Full);
        assert_eq!(carousel.alignment, BlockAlignment::Center);
        let BlockKind::Carousel { images } = &carousel.kind else {
            panic!("expected carousel");
        };
        let urls: Vec<&str> = images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["a.jpg", "b.jpg", "c.jpg"]);
        assert!(images.iter().all(|i| i.alt.is_empty() && i.caption.is_empty()));
    }

    #[test]
    fn description_only_produces_one_text_block_and_no_spacer() {
        let layout = generate_initial_layout("Just words", None, &[]);
        assert_eq!(kinds(&layout), ["text"]);
    }

    #[test]
    fn media_only_produces_one_carousel_and_no_spacer() {
        let layout = generate_initial_layout("", Some("a.jpg"), &[]);
        assert_eq!(kinds(&layout), ["carousel"]);
    }

    #[test]
    fn gallery_without_cover_still_gets_a_carousel() {
        let images = vec!["b.jpg".to_string()];
        let layout = generate_initial_layout("", None, &images);
        assert_eq!(kinds(&layout), ["carousel"]);
    }

    #[test]
    fn empty_project_produces_empty_layout() {
        let layout = generate_initial_layout("", None, &[]);
        assert!(layout.is_empty());
    }

    #[test]
    fn blank_description_counts_as_empty() {
        let layout = generate_initial_layout("   \n", None, &[]);
        assert!(layout.is_empty());
    }

    #[test]
    fn empty_image_urls_are_skipped() {
        let images = vec![String::new()];
        let layout = generate_initial_layout("", Some(""), &images);
        assert!(layout.is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let images = vec!["b.jpg".to_string()];
        let first = generate_initial_layout("Hello", Some("a.jpg"), &images);
        let second = generate_initial_layout("Hello", Some("a.jpg"), &images);
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}
