//! Server-side HTML rendering for layout documents.
//!
//! Markup is written by hand with `html-escape` doing the escaping; attribute
//! values and plain text are always escaped, stored rich text is emitted
//! as-is (it was sanitized when the layout was saved). `Edit` mode renders
//! the editor preview: identical structure plus placeholders for blocks that
//! have no content yet.

use crate::blocks::{BlockKind, ContentBlock};
use crate::layout::Layout;
use crate::video::is_embed_url;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Which surface the markup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The public project page.
    View,
    /// The admin editor preview.
    Edit,
}

pub const PLACEHOLDER_TEXT: &str = "Click to edit text...";
pub const PLACEHOLDER_IMAGE: &str = "Click to add image";
pub const PLACEHOLDER_VIDEO: &str = "Click to add video";

/// Render one block to an HTML fragment.
pub fn block_to_html(block: &ContentBlock, mode: RenderMode) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<section class=\"content-block size-{} align-{}\" data-block-id=\"{}\">",
        block.size.as_str(),
        block.alignment.as_str(),
        attr(&block.id),
    ));

    match &block.kind {
        BlockKind::Text { content } => {
            if content.trim().is_empty() && mode == RenderMode::Edit {
                out.push_str(&format!(
                    "<div class=\"block-text placeholder\">{PLACEHOLDER_TEXT}</div>"
                ));
            } else {
                out.push_str("<div class=\"block-text\">");
                out.push_str(content);
                out.push_str("</div>");
            }
        }

        BlockKind::Image { url, alt, caption } => {
            if url.is_empty() && mode == RenderMode::Edit {
                out.push_str(&format!(
                    "<div class=\"block-image placeholder\">{PLACEHOLDER_IMAGE}</div>"
                ));
            } else if !url.is_empty() {
                out.push_str("<figure class=\"block-image\">");
                out.push_str(&format!("<img src=\"{}\" alt=\"{}\">", attr(url), attr(alt)));
                push_caption(&mut out, caption);
                out.push_str("</figure>");
            }
        }

        BlockKind::Video {
            url,
            poster,
            caption,
        } => {
            if url.is_empty() && mode == RenderMode::Edit {
                out.push_str(&format!(
                    "<div class=\"block-video placeholder\">{PLACEHOLDER_VIDEO}</div>"
                ));
            } else if !url.is_empty() {
                out.push_str("<figure class=\"block-video\">");
                if is_embed_url(url) {
                    out.push_str(&format!(
                        "<iframe src=\"{}\" allow=\"autoplay; fullscreen\" allowfullscreen></iframe>",
                        attr(url)
                    ));
                } else {
                    out.push_str(&format!("<video controls src=\"{}\"", attr(url)));
                    if let Some(poster) = poster {
                        out.push_str(&format!(" poster=\"{}\"", attr(poster)));
                    }
                    out.push_str("></video>");
                }
                push_caption(&mut out, caption);
                out.push_str("</figure>");
            }
        }

        BlockKind::PhotoGrid {
            images,
            grid_columns,
        } => {
            out.push_str(&format!(
                "<div class=\"block-photo-grid cols-{grid_columns}\">"
            ));
            for image in images {
                out.push_str("<figure class=\"grid-item\">");
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    attr(&image.url),
                    attr(&image.alt)
                ));
                push_caption(&mut out, &image.caption);
                out.push_str("</figure>");
            }
            out.push_str("</div>");
        }

        BlockKind::Spacer { .. } => {
            out.push_str(&format!(
                "<div class=\"block-spacer\" style=\"height: {}px\" aria-hidden=\"true\">",
                block.spacer_height()
            ));
            if mode == RenderMode::Edit {
                out.push_str("<span class=\"spacer-label\">Spacer</span>");
            }
            out.push_str("</div>");
        }

        BlockKind::Carousel { images } => {
            out.push_str(&format!(
                "<div class=\"block-carousel\" data-count=\"{}\">",
                images.len()
            ));
            out.push_str("<div class=\"carousel-track\">");
            for image in images {
                out.push_str("<figure class=\"carousel-slide\">");
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    attr(&image.url),
                    attr(&image.alt)
                ));
                push_caption(&mut out, &image.caption);
                out.push_str("</figure>");
            }
            out.push_str("</div>");
            if images.len() > 1 {
                out.push_str(
                    "<button class=\"carousel-prev\" type=\"button\" aria-label=\"Previous\">\u{2039}</button>",
                );
                out.push_str(
                    "<button class=\"carousel-next\" type=\"button\" aria-label=\"Next\">\u{203a}</button>",
                );
            }
            out.push_str("</div>");
        }
    }

    out.push_str("</section>");
    out
}

fn push_caption(out: &mut String, caption: &str) {
    if !caption.is_empty() {
        out.push_str(&format!("<figcaption>{}</figcaption>", text(caption)));
    }
}

/// Render a whole document, blocks in order.
pub fn layout_to_html(layout: &Layout, mode: RenderMode) -> String {
    layout
        .blocks()
        .iter()
        .map(|b| block_to_html(b, mode))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal stylesheet embedded in the public page so it renders standalone.
const PAGE_STYLES: &str = "\
body{margin:0;font-family:system-ui,sans-serif;color:#171717;background:#fff}\
main{padding:2rem 1rem;max-width:72rem;margin:0 auto}\
.project-header{margin-bottom:2rem}\
.project-header .category{letter-spacing:.1em;font-size:.8rem;color:#737373}\
.content-block{margin:0 auto 1.5rem}\
.content-block.size-small{max-width:28rem}\
.content-block.size-medium{max-width:42rem}\
.content-block.size-large{max-width:56rem}\
.content-block.size-full{max-width:100%}\
.content-block.align-left{margin-left:0}\
.content-block.align-right{margin-right:0}\
.content-block img,.content-block video,.content-block iframe{width:100%;display:block;border:0}\
.content-block iframe{aspect-ratio:16/9}\
figure{margin:0}\
figcaption{font-size:.85rem;color:#737373;margin-top:.35rem}\
.block-photo-grid{display:grid;gap:.75rem}\
.block-photo-grid.cols-2{grid-template-columns:repeat(2,1fr)}\
.block-photo-grid.cols-3{grid-template-columns:repeat(3,1fr)}\
.block-photo-grid.cols-4{grid-template-columns:repeat(4,1fr)}\
.block-carousel{position:relative;overflow:hidden}\
.carousel-track{display:flex;overflow-x:auto;scroll-snap-type:x mandatory}\
.carousel-slide{flex:0 0 100%;scroll-snap-align:start}\
.carousel-prev,.carousel-next{position:absolute;top:50%;transform:translateY(-50%);border:0;background:rgba(23,23,23,.55);color:#fff;width:2.5rem;height:2.5rem;border-radius:50%;cursor:pointer}\
.carousel-prev{left:.75rem}\
.carousel-next{right:.75rem}\
.placeholder{border:1px dashed #a3a3a3;color:#a3a3a3;padding:2.5rem;text-align:center;border-radius:.5rem}\
.block-spacer{position:relative}\
.spacer-label{position:absolute;inset:0;display:flex;align-items:center;justify-content:center;color:#a3a3a3;font-size:.75rem;border:1px dashed #d4d4d4;border-radius:.5rem}";

/// Render the complete public page for a project.
pub fn render_project_page(title: &str, category: &str, layout: &Layout) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", text(title)));
    out.push_str(&format!("<style>{PAGE_STYLES}</style>\n"));
    out.push_str("</head>\n<body>\n<main>\n");
    out.push_str("<header class=\"project-header\">\n");
    if !category.is_empty() {
        out.push_str(&format!("<p class=\"category\">{}</p>\n", text(category)));
    }
    out.push_str(&format!("<h1>{}</h1>\n", text(title)));
    out.push_str("</header>\n");
    out.push_str(&layout_to_html(layout, RenderMode::View));
    out.push_str("\n</main>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockAlignment, BlockSize, GridImage};

    fn block(kind: BlockKind) -> ContentBlock {
        ContentBlock {
            id: "b1".into(),
            size: BlockSize::default(),
            alignment: BlockAlignment::default(),
            kind,
        }
    }

    // -- text ----------------------------------------------------------------

    #[test]
    fn text_block_emits_stored_markup_verbatim() {
        let html = block_to_html(
            &block(BlockKind::Text {
                content: "<p>Some <strong>bold</strong> text</p>".into(),
            }),
            RenderMode::View,
        );
        assert!(html.contains("<p>Some <strong>bold</strong> text</p>"));
        assert!(html.contains("size-medium"));
        assert!(html.contains("align-center"));
    }

    #[test]
    fn empty_text_shows_placeholder_only_in_edit_mode() {
        let empty = block(BlockKind::Text {
            content: "  ".into(),
        });
        assert!(block_to_html(&empty, RenderMode::Edit).contains(PLACEHOLDER_TEXT));
        assert!(!block_to_html(&empty, RenderMode::View).contains(PLACEHOLDER_TEXT));
    }

    // -- image ---------------------------------------------------------------

    #[test]
    fn image_attributes_are_escaped() {
        let html = block_to_html(
            &block(BlockKind::Image {
                url: "https://cdn.example.com/a.jpg?x=\"1\"".into(),
                alt: "an \"odd\" alt".into(),
                caption: "with <angle> brackets".into(),
            }),
            RenderMode::View,
        );
        assert!(html.contains("&quot;odd&quot;"));
        assert!(!html.contains("alt=\"an \"odd\"\""));
        assert!(html.contains("&lt;angle&gt;"));
    }

    #[test]
    fn empty_image_shows_placeholder_in_edit_mode() {
        let empty = block(BlockKind::Image {
            url: String::new(),
            alt: String::new(),
            caption: String::new(),
        });
        assert!(block_to_html(&empty, RenderMode::Edit).contains(PLACEHOLDER_IMAGE));
        assert!(!block_to_html(&empty, RenderMode::View).contains("<img"));
    }

    // -- video ---------------------------------------------------------------

    #[test]
    fn embed_urls_render_an_iframe() {
        let html = block_to_html(
            &block(BlockKind::Video {
                url: "https://www.youtube.com/embed/abc?autoplay=1&mute=1".into(),
                poster: None,
                caption: String::new(),
            }),
            RenderMode::View,
        );
        assert!(html.contains("<iframe"));
        assert!(html.contains("allowfullscreen"));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn direct_files_render_a_video_element_with_poster() {
        let html = block_to_html(
            &block(BlockKind::Video {
                url: "https://cdn.example.com/reel.mp4".into(),
                poster: Some("https://cdn.example.com/poster.jpg".into()),
                caption: "Reel".into(),
            }),
            RenderMode::View,
        );
        assert!(html.contains("<video controls"));
        assert!(html.contains("poster=\"https://cdn.example.com/poster.jpg\""));
        assert!(html.contains("<figcaption>Reel</figcaption>"));
    }

    // -- grid, spacer, carousel ----------------------------------------------

    #[test]
    fn photo_grid_carries_its_column_class() {
        let html = block_to_html(
            &block(BlockKind::PhotoGrid {
                images: vec![GridImage::bare("a.jpg"), GridImage::bare("b.jpg")],
                grid_columns: 4,
            }),
            RenderMode::View,
        );
        assert!(html.contains("cols-4"));
        assert_eq!(html.matches("<img").count(), 2);
    }

    #[test]
    fn spacer_height_becomes_inline_style() {
        let html = block_to_html(
            &block(BlockKind::Spacer {
                content: "120".into(),
            }),
            RenderMode::View,
        );
        assert!(html.contains("height: 120px"));
        assert!(!html.contains("Spacer"));
    }

    #[test]
    fn unparsable_spacer_height_falls_back_to_default() {
        let html = block_to_html(
            &block(BlockKind::Spacer {
                content: "tall".into(),
            }),
            RenderMode::Edit,
        );
        assert!(html.contains("height: 40px"));
        assert!(html.contains("Spacer"));
    }

    #[test]
    fn carousel_nav_appears_only_with_multiple_slides() {
        let one = block(BlockKind::Carousel {
            images: vec![GridImage::bare("a.jpg")],
        });
        let two = block(BlockKind::Carousel {
            images: vec![GridImage::bare("a.jpg"), GridImage::bare("b.jpg")],
        });
        assert!(!block_to_html(&one, RenderMode::View).contains("carousel-prev"));
        assert!(block_to_html(&two, RenderMode::View).contains("carousel-prev"));
        assert!(block_to_html(&two, RenderMode::View).contains("data-count=\"2\""));
    }

    // -- page ----------------------------------------------------------------

    #[test]
    fn page_wraps_layout_and_escapes_the_title() {
        let layout = Layout::from_blocks(vec![block(BlockKind::Text {
            content: "<p>body</p>".into(),
        })])
        .unwrap();
        let html = render_project_page("Wood & Steel", "SCULPTURE", &layout);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Wood &amp; Steel</title>"));
        assert!(html.contains("<h1>Wood &amp; Steel</h1>"));
        assert!(html.contains("SCULPTURE"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn layout_to_html_preserves_block_order() {
        let layout = Layout::from_blocks(vec![
            ContentBlock {
                id: "first".into(),
                size: BlockSize::default(),
                alignment: BlockAlignment::default(),
                kind: BlockKind::Text {
                    content: "<p>one</p>".into(),
                },
            },
            ContentBlock {
                id: "second".into(),
                size: BlockSize::default(),
                alignment: BlockAlignment::default(),
                kind: BlockKind::Spacer {
                    content: "40".into(),
                },
            },
        ])
        .unwrap();
        let html = layout_to_html(&layout, RenderMode::View);
        let first = html.find("data-block-id=\"first\"").unwrap();
        let second = html.find("data-block-id=\"second\"").unwrap();
        assert!(first < second);
    }
}
