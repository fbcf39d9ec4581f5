use tracing::{debug, warn};

use crate::error::AppResult;
use crate::viewer::Effect;

use super::core::App;
use super::event_loop::{LoopControl, LoopRuntime};
use super::terminal_session::TerminalSurface;

impl App {
    pub(super) fn execute_effects(
        &mut self,
        runtime: &mut LoopRuntime,
        session: &mut impl TerminalSurface,
        effects: Vec<Effect>,
    ) -> AppResult<LoopControl> {
        for effect in effects {
            match effect {
                Effect::OpenDocument {
                    request_id,
                    variant,
                    path,
                } => {
                    debug!(
                        request_id,
                        variant = variant.as_str(),
                        path = %path.display(),
                        "opening document"
                    );
                    runtime.worker.open(request_id, variant, path)?;
                }
                Effect::Paint(job) => {
                    debug!(
                        ticket = job.ticket.id,
                        page = job.page(),
                        scale = job.scale,
                        "dispatching paint"
                    );
                    runtime.worker.paint(job)?;
                }
                Effect::ExportDocument {
                    variant,
                    source,
                    dest_dir,
                } => {
                    debug!(
                        variant = variant.as_str(),
                        source = %source.display(),
                        "queueing export"
                    );
                    runtime.worker.export(variant, source, dest_dir)?;
                }
                Effect::Reframe => self.present_last_frame(runtime, &*session),
                Effect::Quit => return Ok(LoopControl::Break),
            }
            runtime.needs_redraw = true;
        }
        Ok(LoopControl::Continue)
    }

    /// Crops the last painted frame to the current viewport and hands it to
    /// the presenter. The clamped pan is written back to the viewer.
    pub(super) fn present_last_frame(
        &mut self,
        runtime: &mut LoopRuntime,
        session: &impl TerminalSurface,
    ) {
        let Some(frame) = self.last_frame.as_ref() else {
            return;
        };
        let Some(viewport) = Self::current_viewport(session, runtime.viewer.state().fullscreen)
        else {
            return;
        };

        match self
            .presenter
            .prepare(frame, viewport, runtime.viewer.state().pan)
        {
            Ok(pan) => runtime.viewer.clamp_pan(pan),
            Err(err) => {
                warn!(error = %err, "failed to present frame");
                self.presenter.clear();
            }
        }
        runtime.needs_redraw = true;
    }
}
