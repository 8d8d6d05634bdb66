//! Enemy phase scheduling
//!
//! The enemy sweep is a sequence of discrete steps. Each call to
//! [`Battle::step_enemy`] applies exactly one enemy action in full, so a host
//! that stops stepping (for example when its view is torn down mid-animation)
//! leaves the battle in a consistent state and can resume or flush later.

use outlaw_protocol::Side;

use super::Battle;
use crate::config::BattleRules;
use crate::rng::BattleRng;
use crate::types::{ActionKind, ActionReport, Phase};

impl Battle {
    /// Apply the next enemy action
    ///
    /// Returns `None` outside the enemy phase. The action that ends the sweep
    /// carries the resulting transition (back to the player, or a loss).
    pub fn step_enemy<R>(&mut self, rng: &mut R) -> Option<ActionReport>
    where
        R: BattleRng + ?Sized,
    {
        if self.state.phase != Phase::Enemy {
            return None;
        }

        let Some(enemy_idx) = self.next_living_enemy() else {
            // Nothing left to act; close the sweep without an action
            self.end_enemy_phase();
            return None;
        };

        let living = self.state.players.living_indices();
        if living.is_empty() {
            self.finish(Side::Enemy);
            return None;
        }

        let rules = &self.config.rules;
        let enemy = &self.state.enemies.units[enemy_idx];
        let target_idx = living[rng.pick(living.len())];
        let jitter = rng.roll(rules.enemy_jitter.min, rules.enemy_jitter.max);
        let damage = BattleRules::floored(enemy.attack, jitter, rules.enemy_damage_floor);
        let kind = ActionKind::for_enemy(&enemy.class);
        let actor = enemy.id;
        let enemy_name = enemy.name.clone();

        let target = &mut self.state.players.units[target_idx];
        target.take_damage(damage);
        let target_id = target.id;
        let target_hp = target.hp;
        let target_defeated = target.is_defeated();

        let mut log = vec![format!(
            "[{}] {} hits {} for {}.",
            kind, enemy_name, target.name, damage
        )];
        self.enemy_cursor = enemy_idx + 1;

        tracing::debug!(
            actor = %actor,
            target = %target_id,
            %kind,
            damage,
            target_hp,
            "enemy action resolved"
        );

        let transition = if self.state.players.all_defeated() {
            log.push("Loss! Your team was defeated.".to_string());
            Some(Phase::Finished)
        } else if self.next_living_enemy().is_none() {
            log.push("Your turn starts.".to_string());
            Some(Phase::Player)
        } else {
            None
        };

        self.state.log.extend(log.iter().cloned());
        match transition {
            Some(Phase::Finished) => self.finish(Side::Enemy),
            Some(Phase::Player) => self.start_player_phase(),
            _ => {}
        }

        debug_assert!(
            !(self.state.players.all_defeated() && self.state.enemies.all_defeated()),
            "both sides defeated"
        );

        Some(ActionReport {
            actor,
            target: target_id,
            kind,
            damage,
            target_hp,
            target_defeated,
            log,
            transition,
        })
    }

    /// Apply every remaining enemy action synchronously
    ///
    /// Returns the reports in order; empty outside the enemy phase.
    pub fn run_enemy_phase<R>(&mut self, rng: &mut R) -> Vec<ActionReport>
    where
        R: BattleRng + ?Sized,
    {
        let mut reports = Vec::new();
        while let Some(report) = self.step_enemy(rng) {
            reports.push(report);
        }
        reports
    }

    /// Enemy actions still queued in the current sweep
    pub fn pending_enemy_actions(&self) -> usize {
        if self.state.phase != Phase::Enemy {
            return 0;
        }
        self.state
            .enemies
            .units
            .iter()
            .skip(self.enemy_cursor)
            .filter(|u| u.is_alive())
            .count()
    }

    fn next_living_enemy(&self) -> Option<usize> {
        self.state
            .enemies
            .units
            .iter()
            .enumerate()
            .skip(self.enemy_cursor)
            .find(|(_, u)| u.is_alive())
            .map(|(idx, _)| idx)
    }

    fn end_enemy_phase(&mut self) {
        self.state.log.push("Your turn starts.");
        self.start_player_phase();
    }

    fn start_player_phase(&mut self) {
        let decay = self.config.rules.bonus_decay;
        for unit in self.state.players.units.iter_mut().filter(|u| u.is_alive()) {
            unit.acted = false;
            unit.bonus_attack = unit.bonus_attack.saturating_sub(decay);
        }
        self.state.turn += 1;
        self.state.phase = Phase::Player;
        self.enemy_cursor = 0;
        tracing::debug!(turn = self.state.turn, "player phase started");
    }

    fn finish(&mut self, winner: Side) {
        self.state.phase = Phase::Finished;
        self.state.winner = Some(winner);
        self.enemy_cursor = 0;
        tracing::debug!(%winner, turn = self.state.turn, "battle finished");
    }
}
