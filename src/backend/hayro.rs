use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hayro::hayro_interpret::InterpreterSettings;
use hayro::hayro_interpret::util::PageExt;
use hayro::hayro_syntax::Pdf;
use hayro::hayro_syntax::page::Page;
use hayro::vello_cpu::color::palette::css::WHITE;
use hayro::{RenderSettings, render};

use crate::error::{AppError, AppResult};

use super::traits::{DocumentSource, PageViewport, PdfDocument, PdfPage, RgbaFrame};

const PDF_HEADER: &[u8] = b"%PDF-";

#[derive(Debug, Default, Clone, Copy)]
pub struct HayroSource;

impl DocumentSource for HayroSource {
    fn open(&self, path: &Path) -> AppResult<Box<dyn PdfDocument>> {
        HayroDocument::open(path).map(|doc| Box::new(doc) as Box<dyn PdfDocument>)
    }
}

pub struct HayroDocument {
    path: PathBuf,
    doc_id: u64,
    pdf: Pdf,
}

impl HayroDocument {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = load_bytes(path).map_err(|err| AppError::load(path, err))?;
        Self::from_bytes(path, bytes)
    }

    pub fn from_bytes(path: impl AsRef<Path>, bytes: Arc<Vec<u8>>) -> AppResult<Self> {
        let path = path.as_ref();
        if !bytes.as_slice().starts_with(PDF_HEADER) {
            return Err(AppError::load(
                path,
                AppError::invalid_argument("input is not a valid PDF header"),
            ));
        }
        let doc_id = calculate_doc_id(path, bytes.len());
        let pdf = Pdf::new(bytes).map_err(|_| {
            AppError::load(
                path,
                AppError::invalid_argument("failed to parse PDF with hayro"),
            )
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            doc_id,
            pdf,
        })
    }

    fn page_ref(&self, number: usize) -> AppResult<&Page<'_>> {
        let index = number
            .checked_sub(1)
            .ok_or_else(|| AppError::fetch(number, AppError::invalid_argument("pages start at 1")))?;
        self.pdf.pages().get(index).ok_or_else(|| {
            AppError::fetch(
                number,
                AppError::invalid_argument(format!(
                    "page number is out of range (document has {} pages)",
                    self.page_count()
                )),
            )
        })
    }
}

impl PdfDocument for HayroDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn doc_id(&self) -> u64 {
        self.doc_id
    }

    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn page(&self, number: usize) -> AppResult<Box<dyn PdfPage + '_>> {
        let page = self.page_ref(number)?;
        Ok(Box::new(HayroPage { number, page }))
    }
}

struct HayroPage<'a> {
    number: usize,
    page: &'a Page<'a>,
}

impl PdfPage for HayroPage<'_> {
    fn viewport(&self, scale: f32) -> PageViewport {
        let (width_pt, height_pt) = self.page.render_dimensions();
        PageViewport {
            width: scaled_px(width_pt, scale),
            height: scaled_px(height_pt, scale),
            scale,
        }
    }

    fn paint(&self, viewport: &PageViewport) -> AppResult<RgbaFrame> {
        if !viewport.scale.is_finite() || viewport.scale <= 0.0 {
            return Err(AppError::paint(
                self.number,
                AppError::invalid_argument("scale must be a positive finite value"),
            ));
        }

        let render_settings = RenderSettings {
            x_scale: viewport.scale,
            y_scale: viewport.scale,
            bg_color: WHITE,
            ..Default::default()
        };
        let interpreter_settings = InterpreterSettings::default();
        let pixmap = render(self.page, &interpreter_settings, &render_settings);

        let width = pixmap.width() as u32;
        let height = pixmap.height() as u32;
        if width == 0 || height == 0 {
            return Err(AppError::paint(
                self.number,
                AppError::unsupported("renderer produced an empty pixmap"),
            ));
        }

        Ok(RgbaFrame {
            width,
            height,
            pixels: pixmap.data_as_u8_slice().to_vec().into(),
        })
    }
}

pub fn load_bytes(path: impl AsRef<Path>) -> AppResult<Arc<Vec<u8>>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(AppError::invalid_argument("pdf path must not be empty"));
    }
    if !path.exists() {
        return Err(AppError::io_with_context(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"),
            format!("pdf file not found: {}", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(AppError::invalid_argument("pdf path must be a regular file"));
    }

    let bytes = std::fs::read(path).map_err(|source| {
        AppError::io_with_context(source, format!("failed to read {}", path.display()))
    })?;
    Ok(Arc::new(bytes))
}

fn scaled_px(points: f32, scale: f32) -> u32 {
    let px = (points * scale).round();
    if px.is_finite() && px >= 1.0 {
        px as u32
    } else {
        1
    }
}

fn calculate_doc_id(path: &Path, byte_len: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    byte_len.hash(&mut hasher);
    hasher.finish()
}
