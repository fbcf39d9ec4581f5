use crossterm::event::{Event, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::presenter::viewport_width_px;
use crate::viewer::ViewerAction;

use super::keymap::{KeymapPreset, map_key_to_action_with_preset};

/// What the translation of a terminal event depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    pub preset: KeymapPreset,
    pub scroll_step: i32,
    pub cell_px: Option<(u16, u16)>,
}

pub fn map_event_to_action(event: &Event, ctx: &InputContext) -> Option<ViewerAction> {
    match event {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            map_key_to_action_with_preset(*key, ctx.preset, ctx.scroll_step)
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(columns, _) => Some(ViewerAction::Resize {
            width_px: viewport_width_px(*columns, ctx.cell_px),
        }),
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<ViewerAction> {
    let zoom = mouse.modifiers.contains(KeyModifiers::CONTROL);
    match (mouse.kind, zoom) {
        (MouseEventKind::ScrollUp, true) => Some(ViewerAction::ZoomIn),
        (MouseEventKind::ScrollDown, true) => Some(ViewerAction::ZoomOut),
        (MouseEventKind::ScrollUp, false) => Some(ViewerAction::PrevPage),
        (MouseEventKind::ScrollDown, false) => Some(ViewerAction::NextPage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseEvent,
        MouseEventKind,
    };

    use crate::input::KeymapPreset;
    use crate::viewer::ViewerAction;

    use super::{InputContext, map_event_to_action};

    fn ctx() -> InputContext {
        InputContext {
            preset: KeymapPreset::Default,
            scroll_step: 2,
            cell_px: Some((10, 20)),
        }
    }

    fn wheel(kind: MouseEventKind, modifiers: KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers,
        })
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event_to_action(&release, &ctx()), None);

        let press = Event::Key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(
            map_event_to_action(&press, &ctx()),
            Some(ViewerAction::NextPage)
        );
    }

    #[test]
    fn ctrl_wheel_zooms_and_plain_wheel_turns_pages() {
        assert_eq!(
            map_event_to_action(
                &wheel(MouseEventKind::ScrollUp, KeyModifiers::CONTROL),
                &ctx()
            ),
            Some(ViewerAction::ZoomIn)
        );
        assert_eq!(
            map_event_to_action(
                &wheel(MouseEventKind::ScrollDown, KeyModifiers::CONTROL),
                &ctx()
            ),
            Some(ViewerAction::ZoomOut)
        );
        assert_eq!(
            map_event_to_action(&wheel(MouseEventKind::ScrollDown, KeyModifiers::NONE), &ctx()),
            Some(ViewerAction::NextPage)
        );
        assert_eq!(
            map_event_to_action(&wheel(MouseEventKind::Moved, KeyModifiers::NONE), &ctx()),
            None
        );
    }

    #[test]
    fn resize_reports_width_in_pixels() {
        assert_eq!(
            map_event_to_action(&Event::Resize(80, 24), &ctx()),
            Some(ViewerAction::Resize { width_px: 800 })
        );
    }
}
