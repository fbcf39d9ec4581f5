use tracing::{debug, error, info, warn};

use crate::backend::RgbaFrame;
use crate::config::{Config, DocumentsConfig};
use crate::error::DOCUMENT_FAILURE_MESSAGE;
use crate::presenter::PanOffset;
use crate::render::scheduler::{RenderDecision, RenderScheduler, RenderTicket};
use crate::render::worker::{ExportOutcome, OpenOutcome, PaintOutcome};

use super::action::{Effect, PaintJob, ViewerAction};
use super::nav::{clamp_page, next_page, previous_page};
use super::state::{DocumentVariant, LoadState, ViewerState};
use super::view::{ObservableView, ViewSnapshot};
use super::zoom::{ZoomLevel, ZoomPolicy};

pub const EXPORT_FAILURE_MESSAGE: &str = "export failed";

/// Result of feeding a paint completion back into the viewer.
#[derive(Debug, Default)]
pub struct PaintResolution {
    /// Frame to put on the canvas, if it still belongs to the open document.
    pub frame: Option<RgbaFrame>,
    pub effects: Vec<Effect>,
}

/// Owns the viewer state and the render scheduler. Performs no I/O: every
/// operation returns the effects the event loop has to execute.
#[derive(Debug)]
pub struct Viewer {
    state: ViewerState,
    scheduler: RenderScheduler,
    zoom_policy: ZoomPolicy,
    documents: DocumentsConfig,
    view: ObservableView,
    next_open_id: u64,
    pending_open: Option<u64>,
}

impl Viewer {
    pub fn new(config: &Config, width_px: u32) -> Self {
        let zoom_policy = ZoomPolicy::from_config(&config.zoom);
        let state = ViewerState::new(
            config.documents.initial,
            zoom_policy.default_for_width(width_px),
        );
        let view = ObservableView::new(ViewSnapshot::from_state(&state, false));
        Self {
            state,
            scheduler: RenderScheduler::new(),
            zoom_policy,
            documents: config.documents.clone(),
            view,
            next_open_id: 0,
            pending_open: None,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.view.current()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ViewSnapshot> {
        self.view.subscribe()
    }

    /// Opens the configured initial variant.
    pub fn start(&mut self) -> Vec<Effect> {
        self.open_variant(self.state.variant)
    }

    pub fn apply(&mut self, action: ViewerAction) -> Vec<Effect> {
        match action {
            ViewerAction::PrevPage => {
                let Some(page) = previous_page(self.state.current_page, self.state.page_count())
                else {
                    return Vec::new();
                };
                self.go_to_page(page)
            }
            ViewerAction::NextPage => {
                let Some(page) = next_page(self.state.current_page, self.state.page_count()) else {
                    return Vec::new();
                };
                self.go_to_page(page)
            }
            ViewerAction::ZoomIn => {
                let next = self.zoom_policy.zoom_in(self.state.zoom);
                self.set_user_zoom(next)
            }
            ViewerAction::ZoomOut => {
                let next = self.zoom_policy.zoom_out(self.state.zoom);
                self.set_user_zoom(next)
            }
            ViewerAction::SelectVariant(variant) => {
                if variant == self.state.variant && self.state.load_state != LoadState::Failed {
                    return Vec::new();
                }
                self.open_variant(variant)
            }
            ViewerAction::ToggleVariant => self.open_variant(self.state.variant.toggled()),
            ViewerAction::ToggleFullscreen => {
                self.state.fullscreen = !self.state.fullscreen;
                self.publish();
                self.rerender_current()
            }
            ViewerAction::Scroll { dx, dy } => {
                if self.state.displayed_page.is_none() {
                    return Vec::new();
                }
                let pan = &mut self.state.pan;
                pan.cells_x = pan.cells_x.saturating_add(dx).max(0);
                pan.cells_y = pan.cells_y.saturating_add(dy).max(0);
                vec![Effect::Reframe]
            }
            ViewerAction::Resize { width_px } => {
                if self.state.document.is_none() {
                    return Vec::new();
                }
                if !self.state.user_has_set_zoom {
                    self.state.zoom = self.zoom_policy.default_for_width(width_px);
                }
                self.publish();
                self.rerender_current()
            }
            ViewerAction::ExportVariant => {
                let variant = self.state.variant;
                let source = self.documents.path_for(variant).to_path_buf();
                let dest_dir = self.documents.resolved_export_dir();
                info!(
                    variant = variant.as_str(),
                    source = %source.display(),
                    dest = %dest_dir.display(),
                    "exporting document"
                );
                vec![Effect::ExportDocument {
                    variant,
                    source,
                    dest_dir,
                }]
            }
            ViewerAction::Quit => vec![Effect::Quit],
        }
    }

    pub fn on_document_opened(&mut self, outcome: OpenOutcome) -> Vec<Effect> {
        if self.pending_open != Some(outcome.request_id) {
            debug!(
                request_id = outcome.request_id,
                "ignoring superseded document load"
            );
            return Vec::new();
        }
        self.pending_open = None;

        match outcome.result {
            Ok(info) => {
                info!(
                    variant = outcome.variant.as_str(),
                    path = %info.path.display(),
                    pages = info.page_count,
                    "document loaded"
                );
                self.state.current_page = clamp_page(self.state.current_page, info.page_count);
                self.state.document = Some(info);
                self.state.load_state = LoadState::Ready;
                self.state.failure = None;
                self.publish();
                self.rerender_current()
            }
            Err(err) => {
                if err.is_document_failure() {
                    warn!(
                        variant = outcome.variant.as_str(),
                        error = %err,
                        "document failed to load"
                    );
                } else {
                    error!(
                        variant = outcome.variant.as_str(),
                        error = %err,
                        "document load aborted"
                    );
                }
                self.state.document = None;
                self.state.displayed_page = None;
                self.state.load_state = LoadState::Failed;
                self.state.failure = Some(DOCUMENT_FAILURE_MESSAGE);
                self.publish();
                Vec::new()
            }
        }
    }

    pub fn on_paint_finished(&mut self, outcome: PaintOutcome) -> PaintResolution {
        let ticket = outcome.job.ticket;
        if self.scheduler.in_flight() != Some(ticket) {
            debug!(ticket = ticket.id, "ignoring completion for a ticket not in flight");
            return PaintResolution::default();
        }
        // Released first, on success and failure alike.
        let follow_up = self.scheduler.on_render_complete(ticket);
        // A pending open replaces the document in the worker before any
        // paint queued behind it runs.
        let current_doc =
            self.pending_open.is_none() && self.state.doc_id() == Some(outcome.job.doc_id);

        let mut frame = None;
        match outcome.result {
            Ok(painted) if current_doc => {
                debug!(
                    page = ticket.page,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "page painted"
                );
                self.state.displayed_page = Some(ticket.page);
                self.state.failure = None;
                frame = Some(painted);
            }
            Ok(_) => {
                debug!(page = ticket.page, "discarding frame of a replaced document");
            }
            Err(err) if current_doc => {
                self.scheduler.record_failure();
                warn!(page = ticket.page, error = %err, "page render failed");
                if err.is_document_failure() {
                    self.state.failure = Some(DOCUMENT_FAILURE_MESSAGE);
                }
            }
            Err(err) => {
                debug!(
                    page = ticket.page,
                    error = %err,
                    "dropping failure of a replaced document"
                );
            }
        }

        let effects = follow_up
            .map(|ticket| self.start_paint(ticket))
            .unwrap_or_default();
        self.publish();
        PaintResolution { frame, effects }
    }

    pub fn on_document_exported(&mut self, outcome: ExportOutcome) {
        match outcome.result {
            Ok(dest) => {
                info!(
                    variant = outcome.variant.as_str(),
                    dest = %dest.display(),
                    "document exported"
                );
                self.state.notice = Some(format!("saved {}", dest.display()));
            }
            Err(err) => {
                warn!(variant = outcome.variant.as_str(), error = %err, "export failed");
                self.state.notice = Some(EXPORT_FAILURE_MESSAGE.to_string());
            }
        }
        self.publish();
    }

    /// Stores the pan after the presenter clamped it to the frame bounds.
    pub fn clamp_pan(&mut self, pan: PanOffset) {
        self.state.pan = pan;
    }

    fn go_to_page(&mut self, page: usize) -> Vec<Effect> {
        self.state.current_page = page;
        self.state.pan = PanOffset::default();
        self.state.notice = None;
        self.request_render(page)
    }

    fn set_user_zoom(&mut self, next: Option<ZoomLevel>) -> Vec<Effect> {
        if self.state.document.is_none() {
            return Vec::new();
        }
        let Some(next) = next else {
            return Vec::new();
        };
        self.state.zoom = next;
        self.state.user_has_set_zoom = true;
        self.publish();
        self.rerender_current()
    }

    fn open_variant(&mut self, variant: DocumentVariant) -> Vec<Effect> {
        self.next_open_id = self.next_open_id.wrapping_add(1);
        let request_id = self.next_open_id;
        self.pending_open = Some(request_id);

        self.state.variant = variant;
        self.state.current_page = 1;
        self.state.pan = PanOffset::default();
        self.state.load_state = LoadState::Loading;
        self.state.notice = None;
        self.publish();

        let path = self.documents.path_for(variant).to_path_buf();
        info!(variant = variant.as_str(), path = %path.display(), "loading document");
        vec![Effect::OpenDocument {
            request_id,
            variant,
            path,
        }]
    }

    fn rerender_current(&mut self) -> Vec<Effect> {
        if self.state.document.is_none() {
            return Vec::new();
        }
        self.request_render(self.state.current_page)
    }

    fn request_render(&mut self, page: usize) -> Vec<Effect> {
        let effects = match self.scheduler.request_render(page) {
            RenderDecision::Dispatch(ticket) => self.start_paint(ticket),
            RenderDecision::Coalesced { .. } => Vec::new(),
        };
        self.publish();
        effects
    }

    /// Scale is read here, at dispatch time, so a coalesced request renders
    /// with the freshest zoom.
    fn start_paint(&mut self, mut ticket: RenderTicket) -> Vec<Effect> {
        loop {
            if let Some(doc_id) = self.state.doc_id() {
                return vec![Effect::Paint(PaintJob {
                    ticket,
                    doc_id,
                    scale: self.state.zoom.scale(),
                })];
            }
            debug!(page = ticket.page, "no document to paint, releasing ticket");
            match self.scheduler.on_render_complete(ticket) {
                Some(next) => ticket = next,
                None => return Vec::new(),
            }
        }
    }

    fn publish(&self) {
        self.view.publish(ViewSnapshot::from_state(
            &self.state,
            self.scheduler.is_rendering(),
        ));
    }
}
