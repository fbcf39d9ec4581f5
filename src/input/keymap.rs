use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::viewer::{DocumentVariant, ViewerAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeymapPreset {
    #[default]
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_action_with_preset(
    key: KeyEvent,
    preset: KeymapPreset,
    scroll_step: i32,
) -> Option<ViewerAction> {
    match preset {
        KeymapPreset::Default => map_key_default(key, scroll_step),
        KeymapPreset::Emacs => map_key_emacs(key, scroll_step),
    }
}

fn map_key_default(key: KeyEvent, step: i32) -> Option<ViewerAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ViewerAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('k') => Some(ViewerAction::PrevPage),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('j') => Some(ViewerAction::NextPage),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(ViewerAction::ZoomIn),
        KeyCode::Char('-') => Some(ViewerAction::ZoomOut),
        KeyCode::Char('v') | KeyCode::Tab => Some(ViewerAction::ToggleVariant),
        KeyCode::Char('1') => Some(ViewerAction::SelectVariant(DocumentVariant::Full)),
        KeyCode::Char('2') => Some(ViewerAction::SelectVariant(DocumentVariant::Condensed)),
        KeyCode::Char('f') => Some(ViewerAction::ToggleFullscreen),
        KeyCode::Char('d') => Some(ViewerAction::ExportVariant),
        KeyCode::Char('h') => Some(ViewerAction::Scroll { dx: -step, dy: 0 }),
        KeyCode::Char('l') => Some(ViewerAction::Scroll { dx: step, dy: 0 }),
        KeyCode::Up => Some(ViewerAction::Scroll { dx: 0, dy: -step }),
        KeyCode::Down => Some(ViewerAction::Scroll { dx: 0, dy: step }),
        KeyCode::Char('q') | KeyCode::Esc => Some(ViewerAction::Quit),
        _ => None,
    }
}

fn map_key_emacs(key: KeyEvent, step: i32) -> Option<ViewerAction> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(ViewerAction::PrevPage),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') | KeyCode::Char('v') => Some(ViewerAction::NextPage),
            KeyCode::Char('p') => Some(ViewerAction::PrevPage),
            _ => map_key_default(key, step),
        };
    }

    map_key_default(key, step)
}
