mod factory;
mod image_ops;
mod ratatui;
mod terminal_cell;
mod traits;

#[cfg(test)]
mod tests;

pub use factory::create_presenter;
pub use ratatui::RatatuiImagePresenter;
pub use terminal_cell::{DEFAULT_CELL_PX, cell_size_from_window_metrics, viewport_width_px};
pub use traits::{ImagePresenter, PanOffset, PresenterCaps, PresenterKind, Viewport};
