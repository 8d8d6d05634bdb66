//! Banner summons
//!
//! A summon draws first and pays second: the card is picked, then a single
//! conditional update debits the cost and adds the card to the owned set. If
//! the balance is short the update is refused and nothing changes.

use chrono::{DateTime, Utc};
use outlaw_team::{CardDefinition, Catalogue};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;

use crate::store::{ProfileStore, StoreError};

/// Price of one draw
pub const SINGLE_SUMMON_COST: u64 = 1000;

/// A themed pool of summonable card ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub id: &'static str,
    pub title: &'static str,
    pub pool: &'static [&'static str],
}

/// Every banner currently open
pub const BANNERS: &[Banner] = &[Banner {
    id: "outlaw-legend",
    title: "Frontier Legends",
    pool: &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"],
}];

impl Banner {
    pub fn find(id: &str) -> Option<&'static Banner> {
        BANNERS.iter().find(|banner| banner.id == id)
    }
}

#[derive(Error, Debug)]
pub enum SummonError {
    #[error("not enough coins: need {cost}, have {balance}")]
    InsufficientCoins { cost: u64, balance: u64 },

    #[error("unknown banner: {0}")]
    UnknownBanner(String),

    #[error("banner {0} has an empty pool")]
    EmptyBanner(String),

    #[error("user profile not found: {0}")]
    UserNotFound(String),

    #[error("card id {0} is missing from the catalogue")]
    MissingCard(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Card as revealed to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonCard {
    pub id: String,
    pub name: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub class: String,
    pub description: String,
    pub image_src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_line_path: Option<String>,
}

impl From<&CardDefinition> for SummonCard {
    fn from(card: &CardDefinition) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            rarity: card.rarity.to_string(),
            class: card.class.clone(),
            description: card.description.clone(),
            image_src: card.image_src().to_string(),
            voice_line_path: card.voice_line_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonReceipt {
    pub card: SummonCard,
    pub remaining_coins: u64,
    pub cost: u64,
}

/// Draw one card uniformly from a banner's pool
pub fn pick_card<'a, R>(
    banner: &Banner,
    catalogue: &'a Catalogue,
    rng: &mut R,
) -> Result<&'a CardDefinition, SummonError>
where
    R: Rng + ?Sized,
{
    let id = banner
        .pool
        .choose(rng)
        .ok_or_else(|| SummonError::EmptyBanner(banner.id.to_string()))?;

    catalogue
        .get(id)
        .ok_or_else(|| SummonError::MissingCard(id.to_string()))
}

/// Draw a card and charge the user for it
pub fn run_single_summon<S, R>(
    store: &S,
    user_id: &str,
    banner_id: &str,
    catalogue: &Catalogue,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<SummonReceipt, SummonError>
where
    S: ProfileStore + ?Sized,
    R: Rng + ?Sized,
{
    let banner =
        Banner::find(banner_id).ok_or_else(|| SummonError::UnknownBanner(banner_id.to_string()))?;
    let card = pick_card(banner, catalogue, rng)?;

    let result = store.update_if(
        user_id,
        &|profile| profile.coins >= SINGLE_SUMMON_COST,
        &mut |profile| {
            profile.coins -= SINGLE_SUMMON_COST;
            profile.owned_card_ids.insert(card.id.clone());
            profile.updated_at = Some(now);
        },
    );

    let profile = match result {
        Ok(profile) => profile,
        Err(StoreError::NotFound(_)) => {
            tracing::warn!(user = user_id, banner = banner_id, "summon for unknown user");
            return Err(SummonError::UserNotFound(user_id.to_string()));
        }
        Err(StoreError::ConditionFailed(_)) => {
            let balance = store.get(user_id)?.map(|p| p.coins).unwrap_or(0);
            tracing::warn!(user = user_id, balance, cost = SINGLE_SUMMON_COST, "summon refused");
            return Err(SummonError::InsufficientCoins {
                cost: SINGLE_SUMMON_COST,
                balance,
            });
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        user = user_id,
        banner = banner_id,
        card = %card.id,
        remaining = profile.coins,
        "summon completed"
    );

    Ok(SummonReceipt {
        card: SummonCard::from(card),
        remaining_coins: profile.coins,
        cost: SINGLE_SUMMON_COST,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{NewUser, bootstrap_profile};
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn setup(coins: u64) -> (MemoryStore, Catalogue) {
        let store = MemoryStore::new();
        bootstrap_profile(&store, &NewUser::new("auth|1"), now()).unwrap();
        store
            .update_if("auth|1", &|_| true, &mut |p| p.coins = coins)
            .unwrap();
        (store, Catalogue::bundled().unwrap())
    }

    #[test]
    fn test_banner_lookup() {
        let banner = Banner::find("outlaw-legend").unwrap();
        assert_eq!(banner.pool.len(), 10);
        assert!(Banner::find("gold-rush").is_none());
    }

    #[test]
    fn test_pick_card_covers_pool() {
        let catalogue = Catalogue::bundled().unwrap();
        let banner = Banner::find("outlaw-legend").unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let card = pick_card(banner, &catalogue, &mut rng).unwrap();
            assert!(banner.pool.iter().any(|id| *id == card.id));
        }
    }

    #[test]
    fn test_pick_card_missing_from_catalogue() {
        let catalogue = Catalogue::default();
        let banner = Banner::find("outlaw-legend").unwrap();
        let err = pick_card(banner, &catalogue, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, SummonError::MissingCard(_)));
    }

    #[test]
    fn test_summon_debits_and_grants() {
        let (store, catalogue) = setup(2500);
        let mut rng = StdRng::seed_from_u64(3);

        let receipt =
            run_single_summon(&store, "auth|1", "outlaw-legend", &catalogue, &mut rng, now()).unwrap();

        assert_eq!(receipt.cost, 1000);
        assert_eq!(receipt.remaining_coins, 1500);
        let profile = store.get("auth|1").unwrap().unwrap();
        assert_eq!(profile.coins, 1500);
        assert!(profile.owns(&receipt.card.id));
        assert_eq!(profile.updated_at, Some(now()));
    }

    #[test]
    fn test_summon_with_exact_balance() {
        let (store, catalogue) = setup(1000);
        let receipt = run_single_summon(
            &store,
            "auth|1",
            "outlaw-legend",
            &catalogue,
            &mut StdRng::seed_from_u64(4),
            now(),
        )
        .unwrap();
        assert_eq!(receipt.remaining_coins, 0);
    }

    #[test]
    fn test_insufficient_coins_changes_nothing() {
        let (store, catalogue) = setup(999);
        let before = store.get("auth|1").unwrap();

        let err = run_single_summon(
            &store,
            "auth|1",
            "outlaw-legend",
            &catalogue,
            &mut StdRng::seed_from_u64(5),
            now(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SummonError::InsufficientCoins { cost: 1000, balance: 999 }
        ));
        assert_eq!(store.get("auth|1").unwrap(), before);
    }

    #[test]
    fn test_unknown_banner_and_user() {
        let (store, catalogue) = setup(5000);
        let mut rng = StdRng::seed_from_u64(6);

        let err = run_single_summon(&store, "auth|1", "gold-rush", &catalogue, &mut rng, now())
            .unwrap_err();
        assert!(matches!(err, SummonError::UnknownBanner(id) if id == "gold-rush"));

        let err = run_single_summon(&store, "nobody", "outlaw-legend", &catalogue, &mut rng, now())
            .unwrap_err();
        assert!(matches!(err, SummonError::UserNotFound(_)));
    }

    #[test]
    fn test_receipt_json_shape() {
        let (store, catalogue) = setup(1000);
        let receipt = run_single_summon(
            &store,
            "auth|1",
            "outlaw-legend",
            &catalogue,
            &mut StdRng::seed_from_u64(7),
            now(),
        )
        .unwrap();

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["cost"], 1000);
        assert_eq!(json["remainingCoins"], 0);
        assert!(json["card"]["type"].is_string());
        assert!(json["card"]["imageSrc"].is_string());
    }
}
