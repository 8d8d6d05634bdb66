//! The battle engine
//!
//! [`Battle`] owns one [`BattleState`] and is its only writer. Player actions
//! go through the resolver, enemy counterattacks through the scheduler, and
//! every applied action comes back as an [`ActionReport`]. Nothing in here
//! sleeps or animates; pacing belongs to the host.
//!
//! ```text
//!            attack (all living acted)        enemy sweep survived
//!   Player ───────────────────────────► Enemy ─────────────────────► Player
//!     │                                   │
//!     │ last enemy defeated               │ last player defeated
//!     ▼                                   ▼
//!  Finished (winner = player)          Finished (winner = enemy)
//! ```

mod resolver;
mod scheduler;

use outlaw_protocol::{BattleCommand, Side};

use crate::abilities::AbilityTable;
use crate::config::{BattleConfig, BattleRules, EnemyTemplate};
use crate::error::{BattleError, InvalidAction};
use crate::log::BattleLog;
use crate::rng::BattleRng;
use crate::roster::{Roster, build_enemy_side};
use crate::types::{ActionReport, BattleState, Card, Phase};

/// A single battle between a player loadout and the enemy template
#[derive(Debug, Clone)]
pub struct Battle {
    state: BattleState,
    roster: Roster,
    config: BattleConfig,
    abilities: AbilityTable,

    /// Index of the next enemy to consider during the enemy phase
    enemy_cursor: usize,
}

impl Battle {
    /// Start a battle with the standard ability table
    pub fn new(cards: &[Card], config: BattleConfig) -> Result<Self, BattleError> {
        Self::with_abilities(cards, config, AbilityTable::standard())
    }

    /// Start a battle with a custom ability table
    pub fn with_abilities(
        cards: &[Card],
        config: BattleConfig,
        abilities: AbilityTable,
    ) -> Result<Self, BattleError> {
        let roster = Roster::new(cards)?;
        if config.enemies.is_empty() {
            return Err(BattleError::EmptyEnemyTemplate);
        }

        let state = fresh_state(&roster, &config);
        tracing::debug!(
            players = state.players.units.len(),
            enemies = state.enemies.units.len(),
            "battle created"
        );

        Ok(Self {
            state,
            roster,
            config,
            abilities,
            enemy_cursor: 0,
        })
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Owned copy of the current state for rendering elsewhere
    pub fn snapshot(&self) -> BattleState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn rules(&self) -> &BattleRules {
        &self.config.rules
    }

    pub fn enemy_template(&self) -> &EnemyTemplate {
        &self.config.enemies
    }

    pub fn abilities(&self) -> &AbilityTable {
        &self.abilities
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Rebuild both sides and restart at turn 1
    ///
    /// Valid in any phase, including mid-sweep.
    pub fn reset(&mut self) {
        self.state = fresh_state(&self.roster, &self.config);
        self.enemy_cursor = 0;
        tracing::debug!("battle reset");
    }

    /// Route a protocol command
    ///
    /// Attacks return their report; reset and status return `None`.
    pub fn apply<R>(
        &mut self,
        command: &BattleCommand,
        rng: &mut R,
    ) -> Result<Option<ActionReport>, InvalidAction>
    where
        R: BattleRng + ?Sized,
    {
        match command {
            BattleCommand::Attack { attacker, target } => self
                .resolve_player_attack(attacker, target, rng)
                .map(Some),
            BattleCommand::Reset => {
                self.reset();
                Ok(None)
            }
            BattleCommand::Status => Ok(None),
        }
    }
}

fn fresh_state(roster: &Roster, config: &BattleConfig) -> BattleState {
    BattleState {
        players: roster.player_side(),
        enemies: build_enemy_side(&config.enemies),
        phase: Phase::Player,
        turn: 1,
        winner: None,
        log: BattleLog::with_starter(config.rules.log_retention),
    }
}
