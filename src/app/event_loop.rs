use std::time::Duration;

use ratatui::layout::Size;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::input::{InputContext, map_event_to_action};
use crate::presenter::viewport_width_px;
use crate::render::worker::{RenderWorker, WorkerEvent};
use crate::viewer::{ViewSnapshot, Viewer, ViewerAction};

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

pub(super) struct LoopRuntime {
    pub(super) viewer: Viewer,
    pub(super) worker: RenderWorker,
    /// What the status bar last received from the observable view.
    pub(super) status: ViewSnapshot,
    pub(super) input: InputContext,
    pub(super) last_size: Size,
    pub(super) needs_redraw: bool,
    pub(super) needs_clear: bool,
    wake_timeout: Duration,
}

pub(super) enum LoopControl {
    Continue,
    Break,
}

pub(crate) struct EventChannels {
    pub(crate) tx: UnboundedSender<DomainEvent>,
    pub(crate) rx: UnboundedReceiver<DomainEvent>,
    pub(crate) bus: EventBusRuntime,
}

impl EventChannels {
    fn spawn() -> Self {
        let (tx, rx, bus) = EventBusRuntime::spawn();
        Self { tx, rx, bus }
    }
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        self.presenter.initialize_terminal()?;

        let size = session.size()?;
        let width_px = viewport_width_px(size.width, self.presenter.capabilities().cell_px);
        let viewer = Viewer::new(&self.config, width_px);
        info!(
            presenter = %self.presenter.status_label(),
            width_px,
            "viewer started"
        );

        let result = self
            .run_with(&mut session, viewer, RenderWorker::spawn(), EventChannels::spawn())
            .await;
        let restored = session.restore();
        result?;
        restored?;
        Ok(())
    }

    pub(crate) async fn run_with(
        &mut self,
        session: &mut impl TerminalSurface,
        viewer: Viewer,
        worker: RenderWorker,
        channels: EventChannels,
    ) -> AppResult<()> {
        let EventChannels { tx, mut rx, mut bus } = channels;
        bus.attach_view(tx, viewer.subscribe(), viewer.subscribe());

        let mut runtime = LoopRuntime {
            status: viewer.snapshot(),
            viewer,
            worker,
            input: self.input_context(),
            last_size: session.size()?,
            needs_redraw: true,
            needs_clear: false,
            wake_timeout: Duration::from_millis(self.config.render.input_poll_timeout_ms),
        };

        let effects = runtime.viewer.start();
        let mut control = self.execute_effects(&mut runtime, session, effects)?;
        while matches!(control, LoopControl::Continue) {
            if runtime.needs_redraw {
                self.draw(&mut runtime, session)?;
            }

            let wake_timeout = runtime.wake_timeout;
            let event = tokio::select! {
                maybe_event = rx.recv() => match maybe_event {
                    Some(event) => event,
                    None => break,
                },
                maybe_worker = runtime.worker.recv() => match maybe_worker {
                    Some(event) => DomainEvent::Worker(event),
                    None => break,
                },
                _ = time::sleep(wake_timeout) => DomainEvent::Wake,
            };
            control = self.handle_event(&mut runtime, session, event)?;
        }

        let stats = runtime.viewer.scheduler().stats();
        info!(
            dispatched = stats.dispatched,
            coalesced = stats.coalesced,
            dropped = stats.dropped,
            failed = stats.failed,
            "render stats"
        );
        bus.shutdown();
        Ok(())
    }

    fn handle_event(
        &mut self,
        runtime: &mut LoopRuntime,
        session: &mut impl TerminalSurface,
        event: DomainEvent,
    ) -> AppResult<LoopControl> {
        match event {
            DomainEvent::Input(event) => {
                if let crossterm::event::Event::Resize(columns, rows) = event {
                    runtime.last_size = Size::new(columns, rows);
                    runtime.needs_clear = true;
                }
                let Some(action) = map_event_to_action(&event, &runtime.input) else {
                    return Ok(LoopControl::Continue);
                };
                self.apply_action(runtime, session, action)
            }
            DomainEvent::InputError(message) => {
                warn!(error = %message, "terminal input error");
                Ok(LoopControl::Continue)
            }
            DomainEvent::Worker(WorkerEvent::Opened(outcome)) => {
                let effects = runtime.viewer.on_document_opened(outcome);
                self.execute_effects(runtime, session, effects)
            }
            DomainEvent::Worker(WorkerEvent::Painted(outcome)) => {
                let resolution = runtime.viewer.on_paint_finished(outcome);
                if let Some(frame) = resolution.frame {
                    self.last_frame = Some(frame);
                    self.present_last_frame(runtime, &*session);
                }
                self.execute_effects(runtime, session, resolution.effects)
            }
            DomainEvent::Worker(WorkerEvent::Exported(outcome)) => {
                runtime.viewer.on_document_exported(outcome);
                Ok(LoopControl::Continue)
            }
            DomainEvent::ViewChanged(view) => {
                if view.fullscreen != runtime.status.fullscreen {
                    runtime.needs_clear = true;
                }
                runtime.status = view;
                runtime.needs_redraw = true;
                Ok(LoopControl::Continue)
            }
            DomainEvent::Wake => {
                let size = session.size()?;
                if size == runtime.last_size {
                    return Ok(LoopControl::Continue);
                }
                debug!(columns = size.width, rows = size.height, "terminal size changed");
                runtime.last_size = size;
                runtime.needs_clear = true;
                let width_px = viewport_width_px(size.width, runtime.input.cell_px);
                self.apply_action(runtime, session, ViewerAction::Resize { width_px })
            }
        }
    }

    fn apply_action(
        &mut self,
        runtime: &mut LoopRuntime,
        session: &mut impl TerminalSurface,
        action: ViewerAction,
    ) -> AppResult<LoopControl> {
        debug!(?action, "viewer action");
        let effects = runtime.viewer.apply(action);
        runtime.needs_redraw = true;
        self.execute_effects(runtime, session, effects)
    }
}
