use image::{DynamicImage, RgbaImage};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::backend::RgbaFrame;
use crate::error::{AppError, AppResult};

use super::traits::{PanOffset, Viewport};

pub(crate) fn create_protocol_with_picker(
    picker: &Picker,
    frame: RgbaFrame,
) -> AppResult<StatefulProtocol> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.pixels_to_vec()).ok_or(
        AppError::invalid_argument("rgba frame pixels length does not match dimensions"),
    )?;
    Ok(picker.new_resize_protocol(DynamicImage::ImageRgba8(image)))
}

/// Cuts the part of `frame` visible through `viewport` at `pan`, the way a
/// scrolled container shows an oversized canvas. `pan` is clamped in place.
pub(crate) fn crop_frame_for_viewport(
    frame: &RgbaFrame,
    viewport: Viewport,
    pan: &mut PanOffset,
    cell_px: (u16, u16),
) -> RgbaFrame {
    let cell_width_px = u32::from(cell_px.0.max(1));
    let cell_height_px = u32::from(cell_px.1.max(1));
    let target_width = u32::from(viewport.width.max(1)).saturating_mul(cell_width_px);
    let target_height = u32::from(viewport.height.max(1)).saturating_mul(cell_height_px);

    let max_x = frame.width.saturating_sub(target_width);
    let max_y = frame.height.saturating_sub(target_height);
    pan.cells_x = pan.cells_x.clamp(0, max_cells(max_x, cell_width_px));
    pan.cells_y = pan.cells_y.clamp(0, max_cells(max_y, cell_height_px));

    if max_x == 0 && max_y == 0 {
        return frame.clone();
    }

    let origin_x = (pan.cells_x as u32 * cell_width_px).min(max_x);
    let origin_y = (pan.cells_y as u32 * cell_height_px).min(max_y);
    let out_width = target_width.min(frame.width - origin_x).max(1);
    let out_height = target_height.min(frame.height - origin_y).max(1);

    let src_stride = frame.width as usize * 4;
    let row_bytes = out_width as usize * 4;
    let mut pixels = Vec::with_capacity(row_bytes * out_height as usize);
    for row in 0..out_height as usize {
        let start = (origin_y as usize + row) * src_stride + origin_x as usize * 4;
        pixels.extend_from_slice(&frame.pixels[start..start + row_bytes]);
    }

    RgbaFrame {
        width: out_width,
        height: out_height,
        pixels: pixels.into(),
    }
}

fn max_cells(max_px: u32, cell_px: u32) -> i32 {
    // Round up so the last partial cell of the page is reachable.
    i32::try_from(max_px.div_ceil(cell_px)).unwrap_or(i32::MAX)
}
