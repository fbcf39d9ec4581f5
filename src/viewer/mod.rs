mod action;
mod controller;
mod nav;
mod state;
mod view;
mod zoom;

pub use action::{Effect, PaintJob, ViewerAction};
pub use controller::{EXPORT_FAILURE_MESSAGE, PaintResolution, Viewer};
pub use nav::{clamp_page, next_page, previous_page};
pub use state::{DocumentInfo, DocumentVariant, LoadState, ViewerState};
pub use view::{ObservableView, ViewSnapshot};
pub use zoom::{ZoomLevel, ZoomPolicy};
