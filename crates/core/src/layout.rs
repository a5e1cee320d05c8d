//! Ordered layout document for a project page.
//!
//! A [`Layout`] is the unit of persistence: the whole block array is written
//! to the project row on every save (last writer wins, no merging). All
//! operations here are pure so the editor endpoints and the renderer share
//! one implementation.

use crate::blocks::{BlockKind, ContentBlock};
use crate::error::CoreError;

/// An ordered sequence of content blocks, unique by block id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    blocks: Vec<ContentBlock>,
}

impl Layout {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from blocks, rejecting duplicate ids.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Result<Self, CoreError> {
        for (i, block) in blocks.iter().enumerate() {
            if block.id.trim().is_empty() {
                return Err(CoreError::validation("Block id must not be empty"));
            }
            if blocks[..i].iter().any(|other| other.id == block.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate block id '{}'",
                    block.id
                )));
            }
        }
        Ok(Self { blocks })
    }

    /// Parse a stored layout value. JSON `null` and `[]` both mean "never
    /// saved" and yield an empty document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let blocks: Vec<ContentBlock> = serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("Malformed layout: {e}")))?;
        Self::from_blocks(blocks)
    }

    /// Serialize for storage in the project row.
    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(&self.blocks)
            .map_err(|e| CoreError::Internal(format!("Layout serialization failed: {e}")))
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Append a block at the end of the document.
    pub fn push(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    /// Replace the block carrying the same id, in place. Returns `false`
    /// (and leaves the document untouched) when no block has that id.
    pub fn update(&mut self, block: ContentBlock) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == block.id) {
            Some(slot) => {
                *slot = block;
                true
            }
            None => false,
        }
    }

    /// Delete the block with the given id. Returns `false` when absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        self.blocks.len() != before
    }

    /// Move the block at `from` to position `to`, shifting the blocks in
    /// between. Out-of-bounds indices are a validation error and leave the
    /// document untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.blocks.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(format!(
                "Reorder out of bounds: {from} -> {to} in a layout of {len} blocks"
            )));
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        Ok(())
    }

    /// Every image URL referenced by the document, in order, deduplicated.
    /// Feeds the editor's image picker.
    pub fn image_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for block in &self.blocks {
            match &block.kind {
                BlockKind::Image { url, .. } => {
                    if !url.is_empty() && !urls.contains(&url.as_str()) {
                        urls.push(url);
                    }
                }
                BlockKind::PhotoGrid { images, .. } | BlockKind::Carousel { images } => {
                    for image in images {
                        if !image.url.is_empty() && !urls.contains(&image.url.as_str()) {
                            urls.push(&image.url);
                        }
                    }
                }
                BlockKind::Text { .. } | BlockKind::Video { .. } | BlockKind::Spacer { .. } => {}
            }
        }
        urls
    }
}
