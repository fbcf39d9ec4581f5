use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::backend::RgbaFrame;

use super::factory::create_presenter;
use super::ratatui::RatatuiImagePresenter;
use super::traits::{ImagePresenter, PanOffset, PresenterKind, Viewport};

fn frame(width: u32, height: u32) -> RgbaFrame {
    RgbaFrame {
        width,
        height,
        pixels: vec![200; (width * height * 4) as usize].into(),
    }
}

fn viewport(width: u16, height: u16) -> Viewport {
    Viewport {
        x: 0,
        y: 0,
        width,
        height,
    }
}

fn draw(presenter: &mut RatatuiImagePresenter, area: Rect) -> bool {
    let backend = TestBackend::new(20, 10);
    let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
    let mut drawn = false;
    terminal
        .draw(|frame| {
            drawn = presenter.render(frame, area).expect("render should pass");
        })
        .expect("draw should pass");
    drawn
}

#[test]
fn select_ratatui_presenter() {
    let presenter = create_presenter(PresenterKind::RatatuiImage)
        .expect("ratatui presenter should be selectable");
    assert_eq!(presenter.capabilities().backend_name, "ratatui-image");
    assert!(presenter.status_label().starts_with("ratatui-image/"));
}

#[test]
fn render_without_frame_draws_nothing() {
    let mut presenter = RatatuiImagePresenter::new();
    assert!(!presenter.has_frame());
    assert!(!draw(&mut presenter, Rect::new(1, 1, 12, 7)));
}

#[test]
fn presenter_renders_after_prepare() {
    let mut presenter = RatatuiImagePresenter::new();
    presenter
        .prepare(&frame(4, 4), viewport(12, 7), PanOffset::default())
        .expect("prepare should pass");

    assert!(presenter.has_frame());
    assert!(draw(&mut presenter, Rect::new(1, 1, 12, 7)));
}

#[test]
fn render_skips_empty_areas() {
    let mut presenter = RatatuiImagePresenter::new();
    presenter
        .prepare(&frame(4, 4), viewport(12, 7), PanOffset::default())
        .expect("prepare should pass");
    assert!(!draw(&mut presenter, Rect::new(0, 0, 0, 5)));
}

#[test]
fn clear_drops_the_current_frame() {
    let mut presenter = RatatuiImagePresenter::new();
    presenter
        .prepare(&frame(4, 4), viewport(12, 7), PanOffset::default())
        .expect("prepare should pass");
    presenter.clear();
    assert!(!presenter.has_frame());
}

#[test]
fn prepare_returns_clamped_pan() {
    let mut presenter = RatatuiImagePresenter::new();
    let (cell_w, cell_h) = presenter.cell_px();
    let big = frame(u32::from(cell_w) * 30, u32::from(cell_h) * 20);

    let pan = presenter
        .prepare(
            &big,
            viewport(10, 10),
            PanOffset {
                cells_x: 100,
                cells_y: -3,
            },
        )
        .expect("prepare should pass");
    assert_eq!(
        pan,
        PanOffset {
            cells_x: 20,
            cells_y: 0
        }
    );
}

#[test]
fn prepare_rejects_corrupt_frames_and_keeps_nothing() {
    let mut presenter = RatatuiImagePresenter::new();
    let corrupt = RgbaFrame {
        width: 5,
        height: 5,
        pixels: vec![0; 8].into(),
    };
    assert!(
        presenter
            .prepare(&corrupt, viewport(12, 7), PanOffset::default())
            .is_err()
    );
    assert!(!presenter.has_frame());
}
