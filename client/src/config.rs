use std::time::Duration;

use anyhow::{Context, Result};
use outlaw_battle::{BattleConfig, BattleRules, EnemyTemplate};

/// What a shutdown does to an enemy sweep that is still being paced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelBehavior {
    /// Stop before the next enemy action; the battle stays mid-sweep
    #[default]
    Abort,
    /// Apply every remaining enemy action immediately, then stop
    Flush,
}

/// Delays between animated enemy actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Pause before each enemy action
    pub wind_up: Duration,
    /// Pause after each enemy action that does not end the sweep
    pub recover: Duration,
    pub cancel: CancelBehavior,
}

impl PacingPolicy {
    /// No delays at all; useful for tests and headless hosts
    pub fn instant() -> Self {
        Self {
            wind_up: Duration::ZERO,
            recover: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Same delay before and after every step
    pub fn uniform(step: Duration) -> Self {
        Self {
            wind_up: step,
            recover: step,
            ..Default::default()
        }
    }

    pub fn with_cancel(mut self, cancel: CancelBehavior) -> Self {
        self.cancel = cancel;
        self
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            wind_up: Duration::from_millis(360),
            recover: Duration::from_millis(260),
            cancel: CancelBehavior::Abort,
        }
    }
}

/// Everything needed to start a session apart from the loadout
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Seed for the session RNG; entropy when unset
    pub seed: Option<u64>,
    pub rules: BattleRules,
    pub enemies: EnemyTemplate,
    pub pacing: PacingPolicy,
}

impl SessionConfig {
    /// Defaults overridden by `OUTLAW_SEED` and `OUTLAW_PACING_MS`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(seed) = read_env("OUTLAW_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(ms) = read_env::<u64>("OUTLAW_PACING_MS")? {
            config.pacing = PacingPolicy::uniform(Duration::from_millis(ms));
        }

        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    pub(crate) fn battle_config(&self) -> BattleConfig {
        BattleConfig {
            rules: self.rules.clone(),
            enemies: self.enemies.clone(),
        }
    }
}

fn read_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}
