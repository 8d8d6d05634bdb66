//! Profiles, summons and the coin shop for the Outlaw card battler.
//!
//! Every balance change goes through a single conditional update on a
//! [`ProfileStore`], so a debit either fully applies or reports why it did not.
//! The store is a trait; [`MemoryStore`] is the in-process implementation used
//! by tests and local hosts.
//!
//! ```text
//! identity claims ──> bootstrap_profile ──> ProfileStore
//!                                              ▲      ▲
//!                        run_single_summon ────┘      └──── purchase_coins
//! ```

pub mod profile;
pub mod shop;
pub mod store;
pub mod summon;

pub use profile::{
    DEFAULT_USERNAME, NavProfile, NewUser, Profile, STARTING_COINS, bootstrap_profile, nav_profile,
};
pub use shop::{
    COIN_PACKS, CoinPack, PurchaseReceipt, ShopError, find_pack, is_allowed_amount, purchase_coins,
};
pub use store::{MemoryStore, ProfileStore, StoreError};
pub use summon::{
    BANNERS, Banner, SINGLE_SUMMON_COST, SummonCard, SummonError, SummonReceipt, pick_card,
    run_single_summon,
};
