//! Content block model for project page layouts.
//!
//! A project page is an ordered list of typed blocks stored wholesale as a
//! JSON array in the project row. Blocks are serialized with an
//! internally-tagged `"type"` discriminator so that stored documents stay
//! readable and the frontend can route rendering by type string. Older
//! documents omit `size`/`alignment`/`gridColumns`; deserialization fills in
//! the defaults.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Spacer and grid constants
// ---------------------------------------------------------------------------

/// Spacer height used when a block carries no parseable height.
pub const DEFAULT_SPACER_HEIGHT: u32 = 40;
/// Smallest spacer height the editor accepts, in pixels.
pub const MIN_SPACER_HEIGHT: u32 = 10;
/// Largest spacer height the editor accepts, in pixels.
pub const MAX_SPACER_HEIGHT: u32 = 200;

/// Photo grid column count used when a block carries none.
pub const DEFAULT_GRID_COLUMNS: u8 = 3;
/// Column counts the photo grid supports.
pub const GRID_COLUMN_CHOICES: &[u8] = &[2, 3, 4];

/// Starter content for a freshly inserted text block.
pub const DEFAULT_TEXT_CONTENT: &str = "<p>Your text here...</p>";

// ---------------------------------------------------------------------------
// Size and alignment
// ---------------------------------------------------------------------------

/// Relative width of a block within the page column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockSize {
    Small,
    Medium,
    Large,
    Full,
}

impl BlockSize {
    /// Return the size name as stored in layout JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Full => "full",
        }
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::Medium
    }
}

/// Horizontal placement of a block within the page column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAlignment {
    Left,
    Center,
    Right,
}

impl BlockAlignment {
    /// Return the alignment name as stored in layout JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl Default for BlockAlignment {
    fn default() -> Self {
        Self::Center
    }
}

// ---------------------------------------------------------------------------
// Block kinds
// ---------------------------------------------------------------------------

/// One image entry in a photo grid or carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

impl GridImage {
    /// An image entry with empty alt text and caption.
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: String::new(),
            caption: String::new(),
        }
    }
}

/// The typed payload of a content block.
///
/// Tag values are the exact strings stored in layout JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Rich text, stored as an HTML fragment.
    #[serde(rename = "text")]
    Text { content: String },

    /// A single image with alt text and an optional visible caption.
    #[serde(rename = "image")]
    Image {
        url: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        caption: String,
    },

    /// A video, either a direct file URL or an embeddable player URL.
    #[serde(rename = "video")]
    Video {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        poster: Option<String>,
        #[serde(default)]
        caption: String,
    },

    /// A fixed-column grid of images.
    #[serde(rename = "photo-grid")]
    PhotoGrid {
        #[serde(default)]
        images: Vec<GridImage>,
        #[serde(rename = "gridColumns", default = "default_grid_columns")]
        grid_columns: u8,
    },

    /// Vertical whitespace. `content` is the height in pixels, kept
    /// string-encoded for compatibility with stored documents.
    #[serde(rename = "spacer")]
    Spacer {
        #[serde(default = "default_spacer_content")]
        content: String,
    },

    /// A sequential image carousel.
    #[serde(rename = "carousel")]
    Carousel {
        #[serde(default)]
        images: Vec<GridImage>,
    },
}

fn default_grid_columns() -> u8 {
    DEFAULT_GRID_COLUMNS
}

fn default_spacer_content() -> String {
    DEFAULT_SPACER_HEIGHT.to_string()
}

impl BlockKind {
    /// Return the type tag as stored in layout JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
            Self::PhotoGrid { .. } => "photo-grid",
            Self::Spacer { .. } => "spacer",
            Self::Carousel { .. } => "carousel",
        }
    }
}

// ---------------------------------------------------------------------------
// Content block
// ---------------------------------------------------------------------------

/// One block in a project layout.
///
/// `id` is opaque and stable for the block's lifetime; edits replace the
/// payload but never the id. `size` and `alignment` default when a stored
/// document omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(default)]
    pub size: BlockSize,
    #[serde(default)]
    pub alignment: BlockAlignment,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Generate a fresh opaque block id.
pub fn new_block_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ContentBlock {
    /// Wrap a payload in a block with a fresh id and default size/alignment.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: new_block_id(),
            size: BlockSize::default(),
            alignment: BlockAlignment::default(),
            kind,
        }
    }

    /// A new text block with the editor's starter content.
    pub fn new_text() -> Self {
        Self::new(BlockKind::Text {
            content: DEFAULT_TEXT_CONTENT.to_string(),
        })
    }

    /// A new image block with no image selected yet.
    pub fn new_image() -> Self {
        Self::new(BlockKind::Image {
            url: String::new(),
            alt: String::new(),
            caption: String::new(),
        })
    }

    /// A new video block with no source yet.
    pub fn new_video() -> Self {
        Self::new(BlockKind::Video {
            url: String::new(),
            poster: None,
            caption: String::new(),
        })
    }

    /// A new empty photo grid with the default column count.
    pub fn new_photo_grid() -> Self {
        Self::new(BlockKind::PhotoGrid {
            images: Vec::new(),
            grid_columns: DEFAULT_GRID_COLUMNS,
        })
    }

    /// A new spacer at the default height.
    pub fn new_spacer() -> Self {
        Self::new(BlockKind::Spacer {
            content: default_spacer_content(),
        })
    }

    /// A new empty carousel.
    pub fn new_carousel() -> Self {
        Self::new(BlockKind::Carousel { images: Vec::new() })
    }

    /// Spacer height in pixels, falling back to the default when the
    /// string content does not parse. Zero for non-spacer blocks.
    pub fn spacer_height(&self) -> u32 {
        match &self.kind {
            BlockKind::Spacer { content } => {
                content.trim().parse().unwrap_or(DEFAULT_SPACER_HEIGHT)
            }
            _ => 0,
        }
    }
}
