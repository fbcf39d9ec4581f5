use crossterm::terminal;
use ratatui_image::picker::{Capability, Picker, ProtocolType};

/// Fallback cell size when the terminal reports no pixel metrics.
pub const DEFAULT_CELL_PX: (u16, u16) = (8, 16);

pub(crate) fn picker_with_resolved_cell_size(
    picker: Picker,
    protocol_type: ProtocolType,
) -> Picker {
    let current = picker.font_size();
    let resolved = cell_size_from_window_size()
        .or_else(|| cell_size_from_capabilities(picker.capabilities()))
        .unwrap_or(current);
    if resolved == current {
        return picker;
    }

    #[allow(deprecated)]
    let mut rebuilt = Picker::from_fontsize(resolved);
    rebuilt.set_protocol_type(protocol_type);
    rebuilt
}

fn cell_size_from_capabilities(capabilities: &[Capability]) -> Option<(u16, u16)> {
    capabilities.iter().find_map(|cap| match cap {
        Capability::CellSize(Some((width, height))) if *width > 0 && *height > 0 => {
            Some((*width, *height))
        }
        _ => None,
    })
}

fn cell_size_from_window_size() -> Option<(u16, u16)> {
    let window = terminal::window_size().ok()?;
    cell_size_from_window_metrics(window.width, window.height, window.columns, window.rows)
}

pub fn cell_size_from_window_metrics(
    width_px: u16,
    height_px: u16,
    columns: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if width_px == 0 || height_px == 0 || columns == 0 || rows == 0 {
        return None;
    }
    let cell = (width_px / columns, height_px / rows);
    (cell.0 > 0 && cell.1 > 0).then_some(cell)
}

/// Pixel width of `columns` terminal cells. This is the width the zoom
/// breakpoint is compared against.
pub fn viewport_width_px(columns: u16, cell_px: Option<(u16, u16)>) -> u32 {
    let cell_width = cell_px.unwrap_or(DEFAULT_CELL_PX).0.max(1);
    u32::from(columns) * u32::from(cell_width)
}

pub(crate) fn protocol_type_label(protocol: ProtocolType) -> &'static str {
    match protocol {
        ProtocolType::Halfblocks => "halfblocks",
        ProtocolType::Sixel => "sixel",
        ProtocolType::Kitty => "kitty",
        ProtocolType::Iterm2 => "iterm2",
    }
}

#[cfg(test)]
mod tests {
    use ratatui_image::picker::Capability;

    use super::{cell_size_from_capabilities, cell_size_from_window_metrics, viewport_width_px};

    #[test]
    fn window_metrics_divide_into_cells() {
        assert_eq!(cell_size_from_window_metrics(1600, 900, 200, 50), Some((8, 18)));
        assert_eq!(cell_size_from_window_metrics(0, 900, 200, 50), None);
        assert_eq!(cell_size_from_window_metrics(100, 40, 200, 50), None);
    }

    #[test]
    fn capabilities_report_cell_size() {
        let caps = [Capability::CellSize(None), Capability::CellSize(Some((9, 20)))];
        assert_eq!(cell_size_from_capabilities(&caps), Some((9, 20)));
        assert_eq!(cell_size_from_capabilities(&[]), None);
    }

    #[test]
    fn viewport_width_uses_fallback_cell() {
        assert_eq!(viewport_width_px(100, None), 800);
        assert_eq!(viewport_width_px(100, Some((10, 20))), 1000);
    }
}
