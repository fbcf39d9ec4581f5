use ratatui::widgets::Clear;
use tracing::warn;

use crate::error::AppResult;
use crate::presenter::Viewport;
use crate::ui;
use crate::viewer::LoadState;

use super::core::App;
use super::event_loop::LoopRuntime;
use super::terminal_session::TerminalSurface;

impl App {
    pub(super) fn current_viewport<S: TerminalSurface>(
        session: &S,
        fullscreen: bool,
    ) -> Option<Viewport> {
        let area = session.size().ok()?.into();
        let layout = ui::split_layout(area, fullscreen);
        if layout.viewer.width == 0 || layout.viewer.height == 0 {
            return None;
        }
        Some(layout.viewer.into())
    }

    pub(super) fn draw(
        &mut self,
        runtime: &mut LoopRuntime,
        session: &mut impl TerminalSurface,
    ) -> AppResult<()> {
        if runtime.needs_clear {
            session.clear()?;
            runtime.needs_clear = false;
        }

        let view = &runtime.status;
        let label = self.presenter.status_label();
        let presenter = self.presenter.as_mut();
        let mut render_error = None;

        session.draw(|frame| {
            let layout = ui::split_layout(frame.area(), view.fullscreen);
            frame.render_widget(Clear, layout.viewer);
            ui::draw_chrome(frame, layout, view, &label);

            match presenter.render(frame, layout.viewer) {
                Ok(true) => {}
                Ok(false) if view.load_state != LoadState::Failed => {
                    ui::draw_loading_overlay(frame, layout.viewer, view.current_page);
                }
                Ok(false) => {}
                Err(err) => render_error = Some(err),
            }

            if let Some(message) = view.failure {
                ui::draw_error_overlay(frame, layout.viewer, message);
            }
        })?;

        if let Some(err) = render_error {
            warn!(error = %err, "failed to draw page");
        }
        runtime.needs_redraw = false;
        Ok(())
    }
}
