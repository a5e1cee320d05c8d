//! Draft state for the block editor modal.
//!
//! Opening a block for editing clones it into a [`BlockDraft`]; every control
//! in the modal maps to one setter here. Committing returns the edited block
//! (same id), cancelling is simply dropping the draft. The layout itself is
//! never touched until the caller feeds the committed block back through
//! [`crate::layout::Layout::update`].

use crate::blocks::{
    BlockAlignment, BlockKind, BlockSize, ContentBlock, GridImage, GRID_COLUMN_CHOICES,
    MAX_SPACER_HEIGHT, MIN_SPACER_HEIGHT,
};
use crate::error::CoreError;
use crate::video::normalize_video_url;

/// A working copy of one block being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDraft {
    block: ContentBlock,
}

impl BlockDraft {
    pub fn from_block(block: &ContentBlock) -> Self {
        Self {
            block: block.clone(),
        }
    }

    pub fn block(&self) -> &ContentBlock {
        &self.block
    }

    /// Consume the draft, yielding the edited block.
    pub fn commit(self) -> ContentBlock {
        self.block
    }

    // -- shared controls -----------------------------------------------------

    pub fn set_size(&mut self, size: BlockSize) {
        self.block.size = size;
    }

    pub fn set_alignment(&mut self, alignment: BlockAlignment) {
        self.block.alignment = alignment;
    }

    // -- per-kind controls ---------------------------------------------------
    //
    // Setters for controls a kind does not have are no-ops, matching the
    // modal, which only renders the controls for the block being edited.

    pub fn set_text_content(&mut self, new_content: &str) {
        if let BlockKind::Text { content } = &mut self.block.kind {
            *content = new_content.to_string();
        }
    }

    pub fn set_image(&mut self, new_url: &str, new_alt: &str, new_caption: &str) {
        if let BlockKind::Image { url, alt, caption } = &mut self.block.kind {
            *url = new_url.to_string();
            *alt = new_alt.to_string();
            *caption = new_caption.to_string();
        }
    }

    /// Set the video source, normalizing share-page URLs into playable ones.
    pub fn set_video_url(&mut self, new_url: &str) {
        if let BlockKind::Video { url, .. } = &mut self.block.kind {
            *url = normalize_video_url(new_url);
        }
    }

    pub fn set_video_poster(&mut self, new_poster: Option<&str>) {
        if let BlockKind::Video { poster, .. } = &mut self.block.kind {
            *poster = new_poster.map(str::to_string);
        }
    }

    pub fn set_caption(&mut self, new_caption: &str) {
        match &mut self.block.kind {
            BlockKind::Image { caption, .. } | BlockKind::Video { caption, .. } => {
                *caption = new_caption.to_string();
            }
            _ => {}
        }
    }

    /// Set the spacer height in pixels, clamped to the editor's range.
    pub fn set_spacer_height(&mut self, height: u32) {
        if let BlockKind::Spacer { content } = &mut self.block.kind {
            let clamped = height.clamp(MIN_SPACER_HEIGHT, MAX_SPACER_HEIGHT);
            *content = clamped.to_string();
        }
    }

    /// Set the photo grid column count. Only 2, 3 and 4 are supported.
    pub fn set_grid_columns(&mut self, columns: u8) -> Result<(), CoreError> {
        if !GRID_COLUMN_CHOICES.contains(&columns) {
            return Err(CoreError::Validation(format!(
                "Grid must have 2, 3 or 4 columns, not {columns}"
            )));
        }
        if let BlockKind::PhotoGrid { grid_columns, .. } = &mut self.block.kind {
            *grid_columns = columns;
        }
        Ok(())
    }

    // -- image list controls (photo grid and carousel) -----------------------

    pub fn add_grid_image(&mut self, image: GridImage) {
        if let Some(images) = self.images_mut() {
            images.push(image);
        }
    }

    pub fn remove_grid_image(&mut self, index: usize) -> Result<(), CoreError> {
        let Some(images) = self.images_mut() else {
            return Ok(());
        };
        if index >= images.len() {
            return Err(CoreError::Validation(format!(
                "No image at position {index}"
            )));
        }
        images.remove(index);
        Ok(())
    }

    /// Move an image within the list, shifting the ones in between.
    pub fn move_grid_image(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let Some(images) = self.images_mut() else {
            return Ok(());
        };
        let len = images.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(format!(
                "Image reorder out of bounds: {from} -> {to} of {len}"
            )));
        }
        let image = images.remove(from);
        images.insert(to, image);
        Ok(())
    }

    fn images_mut(&mut self) -> Option<&mut Vec<GridImage>> {
        match &mut self.block.kind {
            BlockKind::PhotoGrid { images, .. } | BlockKind::Carousel { images } => Some(images),
            _ => None,
        }
    }
}
