use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use ratatui_image::FilterType;
use ratatui_image::Resize;
use ratatui_image::StatefulImage;
use ratatui_image::picker::Picker;
use ratatui_image::picker::ProtocolType;
use ratatui_image::protocol::StatefulProtocol;
use tracing::{debug, warn};

use crate::backend::RgbaFrame;
use crate::error::{AppError, AppResult};

use super::image_ops::{create_protocol_with_picker, crop_frame_for_viewport};
use super::terminal_cell::{picker_with_resolved_cell_size, protocol_type_label};
use super::traits::{ImagePresenter, PanOffset, PresenterCaps, Viewport};

pub(crate) const ENCODE_FAILURE_MESSAGE: &str = "failed to encode terminal image";
const RESIZE_FILTER: FilterType = FilterType::Nearest;

pub struct RatatuiImagePresenter {
    picker: Picker,
    protocol_label: &'static str,
    terminal_initialized: bool,
    current: Option<StatefulProtocol>,
}

impl Default for RatatuiImagePresenter {
    fn default() -> Self {
        Self {
            picker: Picker::halfblocks(),
            protocol_label: protocol_type_label(ProtocolType::Halfblocks),
            terminal_initialized: false,
            current: None,
        }
    }
}

impl RatatuiImagePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_px(&self) -> (u16, u16) {
        self.picker.font_size()
    }

    #[cfg(test)]
    pub(crate) fn has_frame(&self) -> bool {
        self.current.is_some()
    }

    fn draw_protocol(
        frame: &mut Frame<'_>,
        area: Rect,
        protocol: &mut StatefulProtocol,
    ) -> AppResult<()> {
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(
            StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(Some(RESIZE_FILTER))),
            area,
            protocol,
        );

        if let Some(result) = protocol.last_encoding_result() {
            result.map_err(|_| AppError::unsupported(ENCODE_FAILURE_MESSAGE))?;
        }
        Ok(())
    }
}

impl ImagePresenter for RatatuiImagePresenter {
    fn initialize_terminal(&mut self) -> AppResult<()> {
        if self.terminal_initialized {
            return Ok(());
        }

        match Picker::from_query_stdio() {
            Ok(picker) => {
                let protocol_type = picker.protocol_type();
                self.protocol_label = protocol_type_label(protocol_type);
                self.picker = picker_with_resolved_cell_size(picker, protocol_type);
                self.current = None;
                debug!(
                    protocol = self.protocol_label,
                    cell_px = ?self.picker.font_size(),
                    "graphics protocol detected"
                );
            }
            Err(err) => warn!(error = %err, "terminal query failed; using halfblocks"),
        }

        self.terminal_initialized = true;
        Ok(())
    }

    fn status_label(&self) -> String {
        format!("ratatui-image/{}", self.protocol_label)
    }

    fn prepare(
        &mut self,
        frame: &RgbaFrame,
        viewport: Viewport,
        pan: PanOffset,
    ) -> AppResult<PanOffset> {
        let mut pan = pan;
        let visible = crop_frame_for_viewport(frame, viewport, &mut pan, self.cell_px());
        self.current = Some(create_protocol_with_picker(&self.picker, visible)?);
        Ok(pan)
    }

    fn clear(&mut self) {
        self.current = None;
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) -> AppResult<bool> {
        if area.width == 0 || area.height == 0 {
            return Ok(false);
        }
        let Some(protocol) = self.current.as_mut() else {
            return Ok(false);
        };

        let target_size = protocol.size_for(Resize::Fit(Some(RESIZE_FILTER)), area);
        let render_area = center_rect_within(area, target_size.width, target_size.height);
        if let Err(err) = Self::draw_protocol(frame, render_area, protocol) {
            self.current = None;
            return Err(err);
        }
        Ok(true)
    }

    fn capabilities(&self) -> PresenterCaps {
        PresenterCaps {
            backend_name: "ratatui-image",
            cell_px: Some(self.picker.font_size()),
        }
    }
}

fn center_rect_within(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::center_rect_within;

    #[test]
    fn center_rect_within_places_rect_in_the_middle() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(center_rect_within(area, 8, 4), Rect::new(16, 8, 8, 4));
    }

    #[test]
    fn center_rect_within_never_exceeds_the_area() {
        let area = Rect::new(0, 0, 6, 3);
        assert_eq!(center_rect_within(area, 50, 0), Rect::new(0, 1, 6, 1));
    }
}
