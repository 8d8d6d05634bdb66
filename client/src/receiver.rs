use anyhow::Result;
use tokio::sync::mpsc;

use crate::handler::Handler;
use crate::session::SessionEvent;

/// Receives session events and dispatches them to a handler.
pub struct Receiver {
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Receiver {
    pub(crate) fn new(events: mpsc::UnboundedReceiver<SessionEvent>) -> Self {
        Self { events }
    }

    /// Run the event loop, dispatching events to the handler.
    ///
    /// This will run until the session ends.
    pub async fn run<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        while let Some(event) = self.events.recv().await {
            Self::dispatch(handler, event).await;
        }
        Ok(())
    }

    /// Next raw event, for hosts that do not use a [`Handler`]
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    async fn dispatch<H: Handler>(handler: &mut H, event: SessionEvent) {
        match event {
            SessionEvent::Action(report) => {
                handler.on_action(&report).await;
            }
            SessionEvent::Phase { phase, turn } => {
                handler.on_phase(phase, turn).await;
            }
            SessionEvent::Rejected { command, error } => {
                handler.on_rejected(&command, &error).await;
            }
            SessionEvent::Finished { winner, turn } => {
                handler.on_finished(winner, turn).await;
            }
            SessionEvent::Reset(state) => {
                handler.on_reset(&state).await;
            }
            SessionEvent::Snapshot(state) => {
                handler.on_snapshot(&state).await;
            }
        }
    }
}
