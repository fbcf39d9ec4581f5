use std::path::PathBuf;

use crate::render::scheduler::RenderTicket;

use super::state::DocumentVariant;

/// User intents, independent of the device that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    PrevPage,
    NextPage,
    ZoomIn,
    ZoomOut,
    SelectVariant(DocumentVariant),
    ToggleVariant,
    ToggleFullscreen,
    Scroll { dx: i32, dy: i32 },
    Resize { width_px: u32 },
    /// Copy the active variant's file to the export directory.
    ExportVariant,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintJob {
    pub ticket: RenderTicket,
    pub doc_id: u64,
    pub scale: f32,
}

impl PaintJob {
    pub fn page(&self) -> usize {
        self.ticket.page
    }
}

/// Work the controller asks the surrounding loop to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenDocument {
        request_id: u64,
        variant: DocumentVariant,
        path: PathBuf,
    },
    Paint(PaintJob),
    ExportDocument {
        variant: DocumentVariant,
        source: PathBuf,
        dest_dir: PathBuf,
    },
    /// Present the last painted frame again, e.g. after panning.
    Reframe,
    Quit,
}
