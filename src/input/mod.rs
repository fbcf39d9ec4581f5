mod handler;
mod keymap;

pub use handler::{InputContext, map_event_to_action};
pub use keymap::{KeymapPreset, map_key_to_action_with_preset};
