//! Coin shop

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::store::{ProfileStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPack {
    pub name: &'static str,
    pub price_usd: &'static str,
    pub base_coins: u64,
    pub bonus_coins: u64,
    pub featured: bool,
}

impl CoinPack {
    /// Coins credited for one purchase
    pub const fn total(&self) -> u64 {
        self.base_coins + self.bonus_coins
    }
}

pub const COIN_PACKS: &[CoinPack] = &[
    CoinPack {
        name: "Starter Pouch",
        price_usd: "$0.99",
        base_coins: 100,
        bonus_coins: 0,
        featured: false,
    },
    CoinPack {
        name: "Trailblazer Stash",
        price_usd: "$4.99",
        base_coins: 500,
        bonus_coins: 0,
        featured: false,
    },
    CoinPack {
        name: "Sheriff Bundle",
        price_usd: "$9.99",
        base_coins: 1000,
        bonus_coins: 100,
        featured: true,
    },
    CoinPack {
        name: "Legendary Cache",
        price_usd: "$49.99",
        base_coins: 5000,
        bonus_coins: 500,
        featured: false,
    },
    CoinPack {
        name: "Mythic Vault",
        price_usd: "$99.99",
        base_coins: 10000,
        bonus_coins: 1000,
        featured: false,
    },
];

/// Pack whose total matches `amount`
pub fn find_pack(amount: u64) -> Option<&'static CoinPack> {
    COIN_PACKS.iter().find(|pack| pack.total() == amount)
}

/// Whether `amount` is the total of some pack
pub fn is_allowed_amount(amount: u64) -> bool {
    find_pack(amount).is_some()
}

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("invalid coin pack amount: {0}")]
    InvalidPack(u64),

    #[error("user profile not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub added_coins: u64,
    pub coins: u64,
}

/// Credit a coin pack to an existing profile
///
/// Payment is assumed to have cleared; only pack totals are accepted.
pub fn purchase_coins<S>(
    store: &S,
    user_id: &str,
    amount: u64,
    now: DateTime<Utc>,
) -> Result<PurchaseReceipt, ShopError>
where
    S: ProfileStore + ?Sized,
{
    let Some(pack) = find_pack(amount) else {
        tracing::warn!(user = user_id, amount, "rejected purchase of unknown pack");
        return Err(ShopError::InvalidPack(amount));
    };

    let profile = store
        .update_if(user_id, &|_| true, &mut |profile| {
            profile.coins = profile.coins.saturating_add(amount);
            profile.updated_at = Some(now);
        })
        .map_err(|err| match err {
            StoreError::NotFound(id) => ShopError::UserNotFound(id),
            other => ShopError::Store(other),
        })?;

    tracing::info!(
        user = user_id,
        pack = pack.name,
        amount,
        coins = profile.coins,
        "coins purchased"
    );

    Ok(PurchaseReceipt {
        added_coins: amount,
        coins: profile.coins,
    })
}
