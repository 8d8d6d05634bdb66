//! Class ability table
//!
//! Each class maps to a plain function that receives the already-rolled base
//! damage and decides what the action actually does. The resolver only knows
//! about [`AbilityOutcome`]; adding a class means adding a table entry.
//!
//! | Class | Effect | Damage |
//! |---|---|---|
//! | Healer | heal lowest-HP living ally | none |
//! | Support | raise living allies' bonus attack | none |
//! | Debuffer | mark target vulnerable | base |
//! | Tank | heal self | reduced |
//! | DPS / Sub-DPS | positional critical strike | base or amplified |

use std::collections::HashMap;

use crate::config::BattleRules;
use crate::types::{ActionKind, BattleUnit, UnitClass, lowest_hp_living};

/// Inputs shared by every ability
#[derive(Debug, Clone, Copy)]
pub struct AbilityContext<'a> {
    /// Index of the acting unit among the player units
    pub attacker: usize,

    /// Index of the chosen target among the enemy units
    pub target: usize,

    /// Rolled damage, already amplified if the target is vulnerable
    pub base_damage: u32,

    pub turn: u32,

    pub rules: &'a BattleRules,
}

/// What an ability decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityOutcome {
    pub kind: ActionKind,

    /// Damage to deal to the target; `None` means the unit does not attack
    pub damage: Option<u32>,

    /// Vulnerability stacks the target keeps at minimum once the hit lands
    pub mark: Option<u32>,

    /// Extra log lines describing side effects
    pub log: Vec<String>,
}

impl AbilityOutcome {
    fn strike(kind: ActionKind, damage: u32) -> Self {
        Self {
            kind,
            damage: Some(damage),
            mark: None,
            log: Vec::new(),
        }
    }

    fn support(kind: ActionKind, line: String) -> Self {
        Self {
            kind,
            damage: None,
            mark: None,
            log: vec![line],
        }
    }
}

/// Ability implementation: may mutate allies, never touches enemies directly
pub type AbilityFn = fn(&AbilityContext<'_>, &mut [BattleUnit], &[BattleUnit]) -> AbilityOutcome;

/// Heals the living ally with the lowest current HP.
pub fn heal_pulse(
    ctx: &AbilityContext<'_>,
    allies: &mut [BattleUnit],
    _enemies: &[BattleUnit],
) -> AbilityOutcome {
    let name = allies[ctx.attacker].name.clone();

    match lowest_hp_living(allies) {
        Some(idx) => {
            allies[idx].heal(ctx.rules.heal_amount);
            AbilityOutcome::support(
                ActionKind::HealPulse,
                format!(
                    "[{}] {} restores {} HP.",
                    ActionKind::HealPulse,
                    name,
                    ctx.rules.heal_amount
                ),
            )
        }
        None => AbilityOutcome {
            kind: ActionKind::HealPulse,
            damage: None,
            mark: None,
            log: Vec::new(),
        },
    }
}

/// Raises every living ally's bonus attack up to the cap.
pub fn buff_aura(
    ctx: &AbilityContext<'_>,
    allies: &mut [BattleUnit],
    _enemies: &[BattleUnit],
) -> AbilityOutcome {
    for unit in allies.iter_mut().filter(|u| u.is_alive()) {
        unit.add_bonus_attack(ctx.rules.support_bonus_step, ctx.rules.support_bonus_cap);
    }

    AbilityOutcome::support(
        ActionKind::BuffAura,
        format!(
            "[{}] {} raises ally attack.",
            ActionKind::BuffAura,
            allies[ctx.attacker].name
        ),
    )
}

/// Deals base damage and leaves the target vulnerable.
pub fn vulnerable_mark(
    ctx: &AbilityContext<'_>,
    _allies: &mut [BattleUnit],
    enemies: &[BattleUnit],
) -> AbilityOutcome {
    let mut outcome = AbilityOutcome::strike(ActionKind::VulnerableMark, ctx.base_damage);
    outcome.mark = Some(ctx.rules.vulnerable_mark_turns);
    outcome.log.push(format!(
        "[{}] {} is exposed.",
        ActionKind::VulnerableMark,
        enemies[ctx.target].name
    ));
    outcome
}

/// Trades damage for a self-heal.
pub fn shield_bash(
    ctx: &AbilityContext<'_>,
    allies: &mut [BattleUnit],
    _enemies: &[BattleUnit],
) -> AbilityOutcome {
    let damage = BattleRules::scale_pct(ctx.base_damage, ctx.rules.tank_damage_pct);
    let tank = &mut allies[ctx.attacker];
    tank.heal(ctx.rules.tank_self_heal);

    let mut outcome = AbilityOutcome::strike(ActionKind::ShieldBash, damage);
    outcome.log.push(format!(
        "[{}] {} braces and counter-slams.",
        ActionKind::ShieldBash,
        tank.name
    ));
    outcome
}

/// Amplifies damage when `(turn + attacker slot + target index) % modulus == 0`.
///
/// The trigger is positional and never rolls.
pub fn critical_burst(
    ctx: &AbilityContext<'_>,
    allies: &mut [BattleUnit],
    _enemies: &[BattleUnit],
) -> AbilityOutcome {
    let attacker = &allies[ctx.attacker];
    let trigger = ctx.turn as usize + attacker.id.slot + ctx.target;
    let modulus = ctx.rules.crit_modulus.max(1) as usize;

    if trigger % modulus != 0 {
        return AbilityOutcome::strike(ActionKind::QuickSlash, ctx.base_damage);
    }

    let damage = BattleRules::scale_pct(ctx.base_damage, ctx.rules.crit_damage_pct);
    let mut outcome = AbilityOutcome::strike(ActionKind::CriticalBurst, damage);
    outcome.log.push(format!(
        "[{}] {} lands a critical strike.",
        ActionKind::CriticalBurst,
        attacker.name
    ));
    outcome
}

/// Base damage, no side effects.
pub fn plain_strike(
    ctx: &AbilityContext<'_>,
    allies: &mut [BattleUnit],
    _enemies: &[BattleUnit],
) -> AbilityOutcome {
    let kind = ActionKind::for_player(&allies[ctx.attacker].class);
    AbilityOutcome::strike(kind, ctx.base_damage)
}

/// Mapping from class to ability implementation
#[derive(Debug, Clone)]
pub struct AbilityTable {
    entries: HashMap<UnitClass, AbilityFn>,
    fallback: AbilityFn,
}

impl AbilityTable {
    /// An empty table where every class falls back to [`plain_strike`]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: plain_strike,
        }
    }

    /// The standard class abilities
    pub fn standard() -> Self {
        Self::empty()
            .with(UnitClass::Healer, heal_pulse)
            .with(UnitClass::Support, buff_aura)
            .with(UnitClass::Debuffer, vulnerable_mark)
            .with(UnitClass::Tank, shield_bash)
            .with(UnitClass::Dps, critical_burst)
            .with(UnitClass::SubDps, critical_burst)
    }

    /// Register or replace an ability (builder style)
    pub fn with(mut self, class: UnitClass, ability: AbilityFn) -> Self {
        self.insert(class, ability);
        self
    }

    pub fn insert(&mut self, class: UnitClass, ability: AbilityFn) -> Option<AbilityFn> {
        self.entries.insert(class, ability)
    }

    /// Ability for a class, or the fallback for unlisted classes
    pub fn get(&self, class: &UnitClass) -> AbilityFn {
        self.entries.get(class).copied().unwrap_or(self.fallback)
    }

    pub fn contains(&self, class: &UnitClass) -> bool {
        self.entries.contains_key(class)
    }
}

impl Default for AbilityTable {
    fn default() -> Self {
        Self::standard()
    }
}
