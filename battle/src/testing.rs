//! Test helpers shared across the crate

use std::collections::VecDeque;

use crate::rng::BattleRng;
use crate::types::Card;

/// RNG that replays queued values
///
/// Rolls default to 0 jitter and picks to the first candidate once the
/// queues run dry. Values are clamped into the requested range.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<i32>,
    picks: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl BattleRng for ScriptedRng {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        self.rolls.pop_front().unwrap_or(0).clamp(min, max.max(min))
    }

    fn pick(&mut self, len: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        if len == 0 { 0 } else { pick % len }
    }
}

/// Three cards of the given classes, attack 60 / hp 360, named after outlaws
pub fn loadout(classes: [&str; 3]) -> Vec<Card> {
    const NAMES: [&str; 3] = ["Billy the Kid", "Calamity Jane", "Doc Holiday"];
    classes
        .iter()
        .zip(NAMES)
        .enumerate()
        .map(|(idx, (class, name))| Card::new((idx + 1).to_string(), name, *class, 60, 360))
        .collect()
}
