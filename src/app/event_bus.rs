use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::event::DomainEvent;
use crate::viewer::ViewSnapshot;

pub(crate) struct EventBusRuntime {
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn() -> (
        UnboundedSender<DomainEvent>,
        UnboundedReceiver<DomainEvent>,
        Self,
    ) {
        let (tx, rx) = unbounded_channel();
        let tasks = vec![spawn_input_task(tx.clone())];
        (tx, rx, Self { tasks })
    }

    #[cfg(test)]
    pub(crate) fn without_input() -> (
        UnboundedSender<DomainEvent>,
        UnboundedReceiver<DomainEvent>,
        Self,
    ) {
        let (tx, rx) = unbounded_channel();
        (tx, rx, Self { tasks: Vec::new() })
    }

    /// Adds the display subscribers of the observable view.
    pub(crate) fn attach_view(
        &mut self,
        tx: UnboundedSender<DomainEvent>,
        status_rx: watch::Receiver<ViewSnapshot>,
        log_rx: watch::Receiver<ViewSnapshot>,
    ) {
        self.tasks.push(spawn_status_task(tx, status_rx));
        self.tasks.push(spawn_view_log_task(log_rx));
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for EventBusRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}

fn spawn_status_task(
    tx: UnboundedSender<DomainEvent>,
    mut rx: watch::Receiver<ViewSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let view = rx.borrow_and_update().clone();
            if tx.send(DomainEvent::ViewChanged(view)).is_err() {
                return;
            }
        }
    })
}

fn spawn_view_log_task(mut rx: watch::Receiver<ViewSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let view = rx.borrow_and_update().clone();
            info!(
                variant = view.variant.as_str(),
                page = view.current_page,
                displayed = ?view.displayed_page,
                total = view.total_pages,
                zoom = view.zoom_percent,
                fullscreen = view.fullscreen,
                state = ?view.load_state,
                "view updated"
            );
        }
    })
}
