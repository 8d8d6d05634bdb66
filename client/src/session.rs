//! The session task: single writer for one battle
//!
//! Commands are applied strictly in order. When a player action opens the
//! enemy phase the task steps the sweep itself, sleeping between steps so a
//! presentation layer can animate each action. Commands sent meanwhile queue
//! behind the sweep.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use outlaw_battle::{
    ActionReport, Battle, BattleCommand, BattleState, InvalidAction, Phase, Side,
};
use rand::rngs::StdRng;
use tokio::sync::{mpsc, watch};

use crate::config::{CancelBehavior, PacingPolicy};

/// Everything a session reports back to its host
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// An applied player or enemy action
    Action(ActionReport),
    /// The battle entered `phase`
    Phase { phase: Phase, turn: u32 },
    /// A command the battle refused; nothing changed
    Rejected {
        command: BattleCommand,
        error: InvalidAction,
    },
    Finished { winner: Side, turn: u32 },
    Reset(BattleState),
    /// Reply to a status request
    Snapshot(BattleState),
}

pub(crate) struct Session {
    battle: Battle,
    rng: StdRng,
    pacing: PacingPolicy,
    commands: mpsc::UnboundedReceiver<BattleCommand>,
    shutdown: watch::Receiver<bool>,
    events: mpsc::UnboundedSender<SessionEvent>,
    snapshot: Arc<RwLock<BattleState>>,
}

impl Session {
    pub(crate) fn new(
        battle: Battle,
        rng: StdRng,
        pacing: PacingPolicy,
        commands: mpsc::UnboundedReceiver<BattleCommand>,
        shutdown: watch::Receiver<bool>,
        events: mpsc::UnboundedSender<SessionEvent>,
        snapshot: Arc<RwLock<BattleState>>,
    ) -> Self {
        Self {
            battle,
            rng,
            pacing,
            commands,
            shutdown,
            events,
            snapshot,
        }
    }

    /// Main session loop
    ///
    /// Ends on shutdown, or once every handle is dropped and the queue drained.
    pub(crate) async fn run(mut self) {
        loop {
            let command = tokio::select! {
                biased;
                _ = shutdown_requested(&mut self.shutdown) => None,
                command = self.commands.recv() => command,
            };

            let Some(command) = command else { break };
            if !self.handle_command(command).await {
                break;
            }
        }

        tracing::debug!(
            turn = self.battle.turn(),
            phase = %self.battle.phase(),
            "battle session ended"
        );
    }

    /// Apply one command; returns false when the session must stop
    async fn handle_command(&mut self, command: BattleCommand) -> bool {
        match self.battle.apply(&command, &mut self.rng) {
            Ok(Some(report)) => {
                let transition = report.transition;
                self.publish();
                self.emit(SessionEvent::Action(report));

                if let Some(phase) = transition {
                    self.emit_transition(phase);
                    if phase == Phase::Enemy {
                        return self.enemy_sweep().await;
                    }
                }
            }
            Ok(None) => match command {
                BattleCommand::Reset => {
                    self.publish();
                    self.emit(SessionEvent::Reset(self.battle.snapshot()));
                }
                _ => self.emit(SessionEvent::Snapshot(self.battle.snapshot())),
            },
            Err(error) => {
                self.emit(SessionEvent::Rejected { command, error });
            }
        }
        true
    }

    async fn enemy_sweep(&mut self) -> bool {
        while self.battle.phase() == Phase::Enemy {
            if !self.pace(self.pacing.wind_up).await {
                self.cancel_sweep();
                return false;
            }

            let Some(report) = self.battle.step_enemy(&mut self.rng) else {
                self.publish();
                self.emit_transition(self.battle.phase());
                break;
            };

            let transition = report.transition;
            self.publish();
            self.emit(SessionEvent::Action(report));

            if let Some(phase) = transition {
                self.emit_transition(phase);
                break;
            }

            if !self.pace(self.pacing.recover).await {
                self.cancel_sweep();
                return false;
            }
        }
        true
    }

    /// Sleep for `delay`; false if a shutdown arrived first
    async fn pace(&mut self, delay: Duration) -> bool {
        if *self.shutdown.borrow() {
            return false;
        }
        if delay.is_zero() {
            return true;
        }

        tokio::select! {
            biased;
            _ = shutdown_requested(&mut self.shutdown) => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }

    fn cancel_sweep(&mut self) {
        match self.pacing.cancel {
            CancelBehavior::Abort => {
                tracing::info!(
                    remaining = self.battle.pending_enemy_actions(),
                    turn = self.battle.turn(),
                    "enemy sweep aborted"
                );
            }
            CancelBehavior::Flush => {
                let reports = self.battle.run_enemy_phase(&mut self.rng);
                tracing::info!(
                    flushed = reports.len(),
                    turn = self.battle.turn(),
                    "enemy sweep flushed"
                );

                self.publish();
                let mut transitioned = false;
                for report in reports {
                    let transition = report.transition;
                    self.emit(SessionEvent::Action(report));
                    if let Some(phase) = transition {
                        self.emit_transition(phase);
                        transitioned = true;
                    }
                }
                if !transitioned && self.battle.phase() != Phase::Enemy {
                    self.emit_transition(self.battle.phase());
                }
            }
        }
    }

    fn emit_transition(&self, phase: Phase) {
        let turn = self.battle.turn();
        self.emit(SessionEvent::Phase { phase, turn });

        if phase == Phase::Finished
            && let Some(winner) = self.battle.winner()
        {
            tracing::info!(%winner, turn, "battle finished");
            self.emit(SessionEvent::Finished { winner, turn });
        }
    }

    fn emit(&self, event: SessionEvent) {
        // Hosts may drop the receiver and keep driving the battle
        let _ = self.events.send(event);
    }

    fn publish(&self) {
        match self.snapshot.write() {
            Ok(mut snapshot) => *snapshot = self.battle.snapshot(),
            Err(_) => tracing::warn!("snapshot lock poisoned, skipping publish"),
        }
    }
}

/// Resolves once shutdown is requested
///
/// Never resolves if every handle is gone; the command channel closing ends
/// the session in that case.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
