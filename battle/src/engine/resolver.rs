//! Player attack resolution

use outlaw_protocol::{Side, UnitId};

use super::Battle;
use crate::abilities::AbilityContext;
use crate::config::BattleRules;
use crate::error::InvalidAction;
use crate::rng::BattleRng;
use crate::types::{ActionReport, Phase};

impl Battle {
    /// Resolve one player attack
    ///
    /// On success the attacker is marked as acted and the report carries any
    /// phase transition the action caused. On rejection nothing changes.
    pub fn resolve_player_attack<R>(
        &mut self,
        attacker: &UnitId,
        target: &UnitId,
        rng: &mut R,
    ) -> Result<ActionReport, InvalidAction>
    where
        R: BattleRng + ?Sized,
    {
        let (attacker_idx, target_idx) = match self.validate_attack(attacker, target) {
            Ok(indices) => indices,
            Err(err) => {
                tracing::warn!(%attacker, %target, error = %err, "rejected player action");
                return Err(err);
            }
        };

        let rules = &self.config.rules;
        let state = &mut self.state;

        let actor = &state.players.units[attacker_idx];
        let jitter = rng.roll(rules.player_jitter.min, rules.player_jitter.max);
        let mut base_damage =
            BattleRules::floored(actor.effective_attack(), jitter, rules.player_damage_floor);
        if state.enemies.units[target_idx].is_vulnerable() {
            base_damage = BattleRules::scale_pct(base_damage, rules.vulnerable_bonus_pct);
        }

        let ability = self.abilities.get(&actor.class);
        let ctx = AbilityContext {
            attacker: attacker_idx,
            target: target_idx,
            base_damage,
            turn: state.turn,
            rules,
        };
        let outcome = ability(&ctx, &mut state.players.units, &state.enemies.units);

        let attacker_name = state.players.units[attacker_idx].name.clone();
        let target_unit = &mut state.enemies.units[target_idx];
        let mut log = Vec::with_capacity(outcome.log.len() + 2);

        let damage = match outcome.damage {
            Some(damage) => {
                target_unit.take_damage(damage);
                target_unit.consume_vulnerability();
                log.push(format!(
                    "[{}] {} hits {} for {}.",
                    outcome.kind, attacker_name, target_unit.name, damage
                ));
                damage
            }
            None => 0,
        };
        if let Some(mark) = outcome.mark {
            target_unit.vulnerable_turns = target_unit.vulnerable_turns.max(mark);
        }
        log.extend(outcome.log);

        let target_hp = target_unit.hp;
        let target_defeated = target_unit.is_defeated();
        state.players.units[attacker_idx].acted = true;

        let transition = if state.enemies.all_defeated() {
            state.phase = Phase::Finished;
            state.winner = Some(Side::Player);
            log.push("Victory! Enemy team eliminated.".to_string());
            Some(Phase::Finished)
        } else if state.players.all_living_acted() {
            state.phase = Phase::Enemy;
            self.enemy_cursor = 0;
            log.push("Enemy turn starts.".to_string());
            Some(Phase::Enemy)
        } else {
            None
        };

        tracing::debug!(
            %attacker,
            %target,
            kind = %outcome.kind,
            damage,
            target_hp,
            "player action resolved"
        );

        state.log.extend(log.iter().cloned());

        Ok(ActionReport {
            actor: *attacker,
            target: *target,
            kind: outcome.kind,
            damage,
            target_hp,
            target_defeated,
            log,
            transition,
        })
    }

    /// Check preconditions, returning (attacker index, target index)
    fn validate_attack(
        &self,
        attacker: &UnitId,
        target: &UnitId,
    ) -> Result<(usize, usize), InvalidAction> {
        let state = &self.state;

        if state.is_finished() || state.winner.is_some() {
            return Err(InvalidAction::BattleFinished);
        }
        if state.phase != Phase::Player {
            return Err(InvalidAction::WrongPhase(state.phase));
        }

        if attacker.side != Side::Player {
            return Err(InvalidAction::NotPlayerUnit(*attacker));
        }
        let attacker_idx = state
            .players
            .position(attacker)
            .ok_or(InvalidAction::UnknownUnit(*attacker))?;
        let unit = &state.players.units[attacker_idx];
        if unit.is_defeated() {
            return Err(InvalidAction::AttackerDefeated(*attacker));
        }
        if unit.acted {
            return Err(InvalidAction::AlreadyActed(*attacker));
        }

        if target.side != Side::Enemy {
            return Err(InvalidAction::NotEnemyUnit(*target));
        }
        let target_idx = state
            .enemies
            .position(target)
            .ok_or(InvalidAction::UnknownUnit(*target))?;
        if state.enemies.units[target_idx].is_defeated() {
            return Err(InvalidAction::TargetDefeated(*target));
        }

        Ok((attacker_idx, target_idx))
    }
}
