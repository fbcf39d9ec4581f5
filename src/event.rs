use crossterm::event::Event;

use crate::render::worker::WorkerEvent;
use crate::viewer::ViewSnapshot;

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    Worker(WorkerEvent),
    /// Snapshot forwarded by the status-bar subscriber.
    ViewChanged(ViewSnapshot),
    Wake,
}
