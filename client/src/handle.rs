use std::sync::{Arc, RwLock};

use anyhow::{Context, Result, anyhow};
use outlaw_battle::{BattleCommand, BattleState, Phase, UnitId};
use tokio::sync::{mpsc, watch};

/// Cloneable control surface for a running session
///
/// Commands are queued and applied in order by the session task. Reads go to
/// the last snapshot the session published, never to the live battle.
#[derive(Clone)]
pub struct BattleHandle {
    commands: mpsc::UnboundedSender<BattleCommand>,
    shutdown: Arc<watch::Sender<bool>>,
    snapshot: Arc<RwLock<BattleState>>,
}

impl BattleHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<BattleCommand>,
        shutdown: Arc<watch::Sender<bool>>,
        snapshot: Arc<RwLock<BattleState>>,
    ) -> Self {
        Self {
            commands,
            shutdown,
            snapshot,
        }
    }

    pub fn send(&self, command: BattleCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("Session closed"))
    }

    pub fn attack(&self, attacker: UnitId, target: UnitId) -> Result<()> {
        self.send(BattleCommand::Attack { attacker, target })
    }

    pub fn reset(&self) -> Result<()> {
        self.send(BattleCommand::Reset)
    }

    pub fn status(&self) -> Result<()> {
        self.send(BattleCommand::Status)
    }

    /// Ask the session to stop
    ///
    /// An enemy sweep in progress is aborted or flushed according to the
    /// session's pacing policy. Queued commands after this point are dropped.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    pub fn snapshot(&self) -> Option<BattleState> {
        self.snapshot.read().ok().map(|state| state.clone())
    }

    pub fn phase(&self) -> Option<Phase> {
        Some(self.snapshot.read().ok()?.phase)
    }

    pub fn turn(&self) -> Option<u32> {
        Some(self.snapshot.read().ok()?.turn)
    }

    /// Last published snapshot as JSON, for web hosts
    pub fn snapshot_json(&self) -> Result<String> {
        let state = self
            .snapshot()
            .ok_or_else(|| anyhow!("Snapshot lock poisoned"))?;
        serde_json::to_string(&state).context("Failed to serialize battle snapshot")
    }
}
