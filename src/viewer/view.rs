use std::path::PathBuf;

use tokio::sync::watch;

use super::state::{DocumentVariant, LoadState, ViewerState};

/// Everything a display needs: page indicator, page total, zoom text, mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub variant: DocumentVariant,
    pub current_page: usize,
    pub displayed_page: Option<usize>,
    pub total_pages: usize,
    pub zoom_percent: u16,
    pub fullscreen: bool,
    pub load_state: LoadState,
    pub document_path: Option<PathBuf>,
    pub failure: Option<&'static str>,
    /// A page render is in flight.
    pub rendering: bool,
    pub notice: Option<String>,
}

impl ViewSnapshot {
    pub fn from_state(state: &ViewerState, rendering: bool) -> Self {
        Self {
            variant: state.variant,
            current_page: state.current_page,
            displayed_page: state.displayed_page,
            total_pages: state.page_count(),
            zoom_percent: state.zoom.percent(),
            fullscreen: state.fullscreen,
            load_state: state.load_state,
            document_path: state.document.as_ref().map(|doc| doc.path.clone()),
            failure: state.failure,
            rendering,
            notice: state.notice.clone(),
        }
    }

    pub fn file_name(&self) -> Option<String> {
        self.document_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// Single source of truth for displays; each subscriber sees only changes.
#[derive(Debug)]
pub struct ObservableView {
    tx: watch::Sender<ViewSnapshot>,
}

impl ObservableView {
    pub fn new(initial: ViewSnapshot) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ViewSnapshot {
        self.tx.borrow().clone()
    }

    /// Returns whether subscribers were notified.
    pub fn publish(&self, next: ViewSnapshot) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ObservableView, ViewSnapshot};
    use crate::viewer::state::{DocumentVariant, ViewerState};
    use crate::viewer::zoom::ZoomLevel;

    fn snapshot() -> ViewSnapshot {
        ViewSnapshot::from_state(
            &ViewerState::new(DocumentVariant::Full, ZoomLevel::from_percent(150)),
            false,
        )
    }

    #[test]
    fn publish_notifies_every_subscriber_once_per_change() {
        let view = ObservableView::new(snapshot());
        let mut status_bar = view.subscribe();
        let mut log_sink = view.subscribe();

        let mut next = snapshot();
        next.zoom_percent = 160;
        assert!(view.publish(next.clone()));

        assert!(status_bar.has_changed().expect("sender alive"));
        assert!(log_sink.has_changed().expect("sender alive"));
        assert_eq!(status_bar.borrow_and_update().zoom_percent, 160);
        assert_eq!(log_sink.borrow_and_update().zoom_percent, 160);

        assert!(!view.publish(next));
        assert!(!status_bar.has_changed().expect("sender alive"));
    }

    #[test]
    fn snapshot_reports_file_name_once_loaded() {
        let mut snap = snapshot();
        assert_eq!(snap.file_name(), None);
        snap.document_path = Some("docs/resume.pdf".into());
        assert_eq!(snap.file_name().as_deref(), Some("resume.pdf"));
    }
}
