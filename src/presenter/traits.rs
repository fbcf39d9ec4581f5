use ratatui::Frame;
use ratatui::layout::Rect;

use crate::backend::RgbaFrame;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterKind {
    RatatuiImage,
}

/// Terminal cell rectangle the page is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl From<Rect> for Viewport {
    fn from(area: Rect) -> Self {
        Self {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PanOffset {
    pub cells_x: i32,
    pub cells_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenterCaps {
    pub backend_name: &'static str,
    pub cell_px: Option<(u16, u16)>,
}

/// The canvas: receives painted frames and blits the latest one.
pub trait ImagePresenter {
    fn initialize_terminal(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn status_label(&self) -> String {
        self.capabilities().backend_name.to_string()
    }

    /// Replaces the canvas content. Returns the pan clamped to the frame.
    fn prepare(
        &mut self,
        frame: &RgbaFrame,
        viewport: Viewport,
        pan: PanOffset,
    ) -> AppResult<PanOffset>;

    fn clear(&mut self);

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) -> AppResult<bool>;

    fn capabilities(&self) -> PresenterCaps;
}
