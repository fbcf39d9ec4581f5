use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub viewer: Rect,
    /// Zero-height in fullscreen.
    pub status: Rect,
}

pub fn split_layout(area: Rect, fullscreen: bool) -> UiLayout {
    let status_height = if fullscreen { 0 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(status_height)])
        .split(area);

    UiLayout {
        viewer: chunks[0],
        status: chunks[1],
    }
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::split_layout;

    #[test]
    fn split_layout_reserves_status_bar() {
        let layout = split_layout(Rect::new(0, 0, 120, 40), false);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.viewer.height, 39);
    }

    #[test]
    fn fullscreen_gives_the_whole_area_to_the_page() {
        let layout = split_layout(Rect::new(0, 0, 120, 40), true);
        assert_eq!(layout.status.height, 0);
        assert_eq!(layout.viewer, Rect::new(0, 0, 120, 40));
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(10, 5, 20, 8);
        assert_eq!(super::centered_rect(area, 99, 99), area);
    }
}
