//! Async battle sessions for the Outlaw card battler.
//!
//! A session owns one [`outlaw_battle::Battle`] on a Tokio task. Hosts drive it
//! through a cloneable [`BattleHandle`] and observe it through a [`Receiver`]
//! that feeds a [`Handler`]. Enemy turns are stepped with configurable pauses
//! so each counterattack can be animated; the pauses never change outcomes.

mod config;
mod handle;
mod handler;
mod receiver;
mod session;

use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use outlaw_battle::{Battle, Card};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, watch};

pub use config::{CancelBehavior, PacingPolicy, SessionConfig};
pub use handle::BattleHandle;
pub use handler::Handler;
pub use receiver::Receiver;
pub use session::SessionEvent;

pub use outlaw_battle::{ActionReport, BattleCommand, BattleState, Phase, Side, UnitId};

use session::Session;

/// Entry point for starting battle sessions
pub struct BattleClient;

impl BattleClient {
    /// Build a battle from `cards` and spawn its session task
    ///
    /// Must be called from within a Tokio runtime. Fails without spawning
    /// anything if the battle cannot be built.
    pub fn start(cards: &[Card], config: SessionConfig) -> Result<(BattleHandle, Receiver)> {
        let battle = Battle::new(cards, config.battle_config())
            .context("Failed to start battle session")?;

        let rng = match config.seed {
            Some(seed) => outlaw_battle::rng::seeded(seed),
            None => StdRng::from_entropy(),
        };

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let snapshot = Arc::new(RwLock::new(battle.snapshot()));

        tracing::debug!(
            seed = ?config.seed,
            players = cards.len(),
            enemies = config.enemies.len(),
            "starting battle session"
        );

        let session = Session::new(
            battle,
            rng,
            config.pacing,
            command_rx,
            shutdown_rx,
            event_tx,
            Arc::clone(&snapshot),
        );
        tokio::spawn(session.run());

        let handle = BattleHandle::new(command_tx, Arc::new(shutdown_tx), snapshot);
        Ok((handle, Receiver::new(event_rx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use outlaw_battle::InvalidAction;
    use std::time::Duration;

    fn cards() -> Vec<Card> {
        vec![
            Card::new("1", "Billy the Kid", "DPS", 60, 360),
            Card::new("2", "Calamity Jane", "DPS", 60, 360),
            Card::new("3", "Wyatt Earp", "DPS", 60, 360),
        ]
    }

    fn start(pacing: PacingPolicy) -> (BattleHandle, Receiver) {
        let config = SessionConfig::default().with_seed(7).with_pacing(pacing);
        BattleClient::start(&cards(), config).unwrap()
    }

    /// Queue one full player turn against the bruiser (320 HP survives it)
    fn attack_all(handle: &BattleHandle) {
        for slot in 1..=3 {
            handle.attack(UnitId::player(slot), UnitId::enemy(2)).unwrap();
        }
    }

    async fn wait_for_phase(receiver: &mut Receiver, phase: Phase) -> Vec<SessionEvent> {
        let mut seen = Vec::new();
        while let Some(event) = receiver.next_event().await {
            let done = matches!(&event, SessionEvent::Phase { phase: p, .. } if *p == phase);
            seen.push(event);
            if done {
                return seen;
            }
        }
        panic!("session ended before reaching {} phase", phase);
    }

    async fn drain(receiver: &mut Receiver) -> Vec<SessionEvent> {
        let mut rest = Vec::new();
        while let Some(event) = receiver.next_event().await {
            rest.push(event);
        }
        rest
    }

    fn actions(events: &[SessionEvent]) -> Vec<&ActionReport> {
        events
            .iter()
            .filter_map(|event| match event {
                SessionEvent::Action(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_start_refuses_short_roster() {
        let Err(err) = BattleClient::start(&cards()[..2], SessionConfig::default()) else {
            panic!("expected an insufficient roster error");
        };
        assert!(err.to_string().contains("Failed to start battle session"));
    }

    #[tokio::test]
    async fn test_full_turn_round_trip() {
        let (handle, mut receiver) = start(PacingPolicy::instant());
        assert_eq!(handle.turn(), Some(1));

        attack_all(&handle);

        let to_enemy = wait_for_phase(&mut receiver, Phase::Enemy).await;
        assert_eq!(actions(&to_enemy).len(), 3);
        assert_eq!(
            to_enemy.last(),
            Some(&SessionEvent::Phase { phase: Phase::Enemy, turn: 1 })
        );

        let to_player = wait_for_phase(&mut receiver, Phase::Player).await;
        let enemy_actions = actions(&to_player);
        assert_eq!(enemy_actions.len(), 3);
        assert!(enemy_actions.iter().all(|r| r.actor.side == Side::Enemy));
        assert_eq!(
            enemy_actions[2].log.last().map(String::as_str),
            Some("Your turn starts.")
        );
        assert_eq!(
            to_player.last(),
            Some(&SessionEvent::Phase { phase: Phase::Player, turn: 2 })
        );

        let snapshot = handle.snapshot().unwrap();
        assert_eq!(snapshot.turn, 2);
        assert_eq!(snapshot.phase, Phase::Player);
        assert!(snapshot.players.units.iter().all(|u| !u.acted));
    }

    #[tokio::test]
    async fn test_rejected_command_changes_nothing() {
        let (handle, mut receiver) = start(PacingPolicy::instant());
        let before = handle.snapshot().unwrap();

        handle.attack(UnitId::enemy(1), UnitId::player(1)).unwrap();

        let event = receiver.next_event().await.unwrap();
        assert_eq!(
            event,
            SessionEvent::Rejected {
                command: BattleCommand::Attack {
                    attacker: UnitId::enemy(1),
                    target: UnitId::player(1),
                },
                error: InvalidAction::NotPlayerUnit(UnitId::enemy(1)),
            }
        );
        assert_eq!(handle.snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn test_status_and_reset() {
        let (handle, mut receiver) = start(PacingPolicy::instant());

        handle.attack(UnitId::player(1), UnitId::enemy(1)).unwrap();
        handle.status().unwrap();
        handle.reset().unwrap();

        let Some(SessionEvent::Action(report)) = receiver.next_event().await else {
            panic!("expected the attack report");
        };
        assert!(report.damage > 0);

        let Some(SessionEvent::Snapshot(status)) = receiver.next_event().await else {
            panic!("expected a status snapshot");
        };
        assert!(status.players.units[0].acted);

        let Some(SessionEvent::Reset(fresh)) = receiver.next_event().await else {
            panic!("expected a reset");
        };
        assert_eq!(fresh.turn, 1);
        assert!(fresh.enemies.units.iter().all(|u| u.hp == u.max_hp));
        assert!(!fresh.players.units[0].acted);
        assert_eq!(handle.snapshot().unwrap(), fresh);
    }

    #[tokio::test]
    async fn test_shutdown_aborts_paced_sweep() {
        let pacing = PacingPolicy::uniform(Duration::from_secs(60));
        let (handle, mut receiver) = start(pacing);

        attack_all(&handle);
        wait_for_phase(&mut receiver, Phase::Enemy).await;

        handle.shutdown();
        let rest = drain(&mut receiver).await;

        assert!(actions(&rest).is_empty());
        let snapshot = handle.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Enemy);
        assert!(snapshot.players.units.iter().all(|u| u.hp == u.max_hp));
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_shutdown_flushes_paced_sweep() {
        let pacing =
            PacingPolicy::uniform(Duration::from_secs(60)).with_cancel(CancelBehavior::Flush);
        let (handle, mut receiver) = start(pacing);

        attack_all(&handle);
        wait_for_phase(&mut receiver, Phase::Enemy).await;

        handle.shutdown();
        let rest = drain(&mut receiver).await;

        assert_eq!(actions(&rest).len(), 3);
        assert_eq!(
            rest.last(),
            Some(&SessionEvent::Phase { phase: Phase::Player, turn: 2 })
        );
        assert_eq!(handle.snapshot().unwrap().turn, 2);
    }

    #[tokio::test]
    async fn test_same_seed_same_battle() {
        let (first, mut first_rx) = start(PacingPolicy::instant());
        let (second, mut second_rx) = start(PacingPolicy::instant());

        attack_all(&first);
        attack_all(&second);
        wait_for_phase(&mut first_rx, Phase::Player).await;
        wait_for_phase(&mut second_rx, Phase::Player).await;

        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[tokio::test]
    async fn test_snapshot_json() {
        let (handle, _receiver) = start(PacingPolicy::instant());
        let json: serde_json::Value = serde_json::from_str(&handle.snapshot_json().unwrap()).unwrap();
        assert_eq!(json["turn"], 1);
        assert_eq!(json["phase"], "player");
    }

    #[derive(Default)]
    struct Tally {
        actions: usize,
        phases: Vec<Phase>,
    }

    #[async_trait]
    impl Handler for Tally {
        async fn on_action(&mut self, _report: &ActionReport) {
            self.actions += 1;
        }

        async fn on_phase(&mut self, phase: Phase, _turn: u32) {
            self.phases.push(phase);
        }
    }

    #[tokio::test]
    async fn test_receiver_runs_until_handles_drop() {
        let (handle, mut receiver) = start(PacingPolicy::instant());
        attack_all(&handle);
        drop(handle);

        let mut tally = Tally::default();
        receiver.run(&mut tally).await.unwrap();

        assert_eq!(tally.actions, 6);
        assert_eq!(tally.phases, vec![Phase::Enemy, Phase::Player]);
    }
}
