use std::sync::Arc;

mod hayro;
mod traits;

pub use hayro::{HayroDocument, HayroSource, load_bytes};
pub use traits::{DocumentSource, PageViewport, PdfDocument, PdfPage, RgbaFrame};

pub fn default_source() -> Arc<dyn DocumentSource> {
    Arc::new(HayroSource)
}
