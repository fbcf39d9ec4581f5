use std::path::PathBuf;

use serde::Deserialize;

use crate::presenter::PanOffset;

use super::zoom::ZoomLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentVariant {
    #[default]
    Full,
    Condensed,
}

impl DocumentVariant {
    pub fn toggled(self) -> Self {
        match self {
            Self::Full => Self::Condensed,
            Self::Condensed => Self::Full,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Condensed => "condensed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Self::Full),
            "condensed" => Some(Self::Condensed),
            _ => None,
        }
    }
}

/// What the UI side knows about the document owned by the render worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub doc_id: u64,
    pub path: PathBuf,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub document: Option<DocumentInfo>,
    pub variant: DocumentVariant,
    /// 1-based; never exceeds the loaded document's page count.
    pub current_page: usize,
    /// Last page whose paint completed.
    pub displayed_page: Option<usize>,
    pub zoom: ZoomLevel,
    pub user_has_set_zoom: bool,
    pub fullscreen: bool,
    pub pan: PanOffset,
    pub load_state: LoadState,
    pub failure: Option<&'static str>,
    /// Outcome of the last export, shown until the next page change.
    pub notice: Option<String>,
}

impl ViewerState {
    pub fn new(variant: DocumentVariant, zoom: ZoomLevel) -> Self {
        Self {
            document: None,
            variant,
            current_page: 1,
            displayed_page: None,
            zoom,
            user_has_set_zoom: false,
            fullscreen: false,
            pan: PanOffset::default(),
            load_state: LoadState::Loading,
            failure: None,
            notice: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, |doc| doc.page_count)
    }

    pub fn doc_id(&self) -> Option<u64> {
        self.document.as_ref().map(|doc| doc.doc_id)
    }
}
