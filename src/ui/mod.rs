mod chrome;
mod layout;
mod overlay;

pub use chrome::{draw_chrome, status_text};
pub use layout::{UiLayout, split_layout};
pub use overlay::{draw_error_overlay, draw_loading_overlay};
