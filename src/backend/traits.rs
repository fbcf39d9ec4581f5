use std::path::Path;
use std::sync::Arc;

use crate::error::AppResult;

/// Painted page pixels, the content of the shared canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl RgbaFrame {
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels_to_vec(&self) -> Vec<u8> {
        self.pixels.as_ref().to_vec()
    }
}

/// Pixel-space rectangle a page occupies at a given scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageViewport {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

pub trait DocumentSource: Send + Sync {
    fn open(&self, path: &Path) -> AppResult<Box<dyn PdfDocument>>;
}

pub trait PdfDocument: Send {
    fn path(&self) -> &Path;
    fn doc_id(&self) -> u64;
    fn page_count(&self) -> usize;
    /// Looks up a 1-based page number.
    fn page(&self, number: usize) -> AppResult<Box<dyn PdfPage + '_>>;
}

pub trait PdfPage {
    fn viewport(&self, scale: f32) -> PageViewport;
    fn paint(&self, viewport: &PageViewport) -> AppResult<RgbaFrame>;
}
