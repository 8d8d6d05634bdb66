//! Player profiles

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{self, ProfileStore};

/// Coins granted to a freshly bootstrapped profile
pub const STARTING_COINS: u64 = 1000;

/// Name used when the identity provider supplies none
pub const DEFAULT_USERNAME: &str = "New Recruit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub coins: u64,
    pub owned_card_ids: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Identity claims for a signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Stable subject id; users without one are never stored
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub picture: Option<String>,
}

impl NewUser {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            ..Default::default()
        }
    }

    /// Nickname first, then name
    pub fn username(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(DEFAULT_USERNAME)
    }

    /// Name first, then nickname
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.nickname.as_deref())
            .unwrap_or(DEFAULT_USERNAME)
    }
}

impl Profile {
    /// Fresh profile for a first sign-in
    pub fn bootstrap(user: &NewUser, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user.sub.clone(),
            username: user.username().to_string(),
            display_name: user.display_name().to_string(),
            email: user.email.clone(),
            picture: user.picture.clone(),
            coins: STARTING_COINS,
            owned_card_ids: BTreeSet::new(),
            created_at: now,
            updated_at: None,
        }
    }

    pub fn owns(&self, card_id: &str) -> bool {
        self.owned_card_ids.contains(card_id)
    }
}

/// Create the user's profile unless one exists
///
/// Returns `true` when a profile was created. Existing profiles are never
/// touched, so calling this on every request is safe.
pub fn bootstrap_profile<S>(store: &S, user: &NewUser, now: DateTime<Utc>) -> store::Result<bool>
where
    S: ProfileStore + ?Sized,
{
    if user.sub.is_empty() {
        tracing::debug!("skipping profile bootstrap for user without subject id");
        return Ok(false);
    }

    let created = store.insert_if_absent(Profile::bootstrap(user, now))?;
    if created {
        tracing::info!(user = %user.sub, coins = STARTING_COINS, "profile created");
    }
    Ok(created)
}

/// What the navigation bar shows for a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavProfile {
    pub username: String,
    pub coins: u64,
    pub owned_card_ids: Vec<String>,
}

/// Summarize a user for the navigation bar
///
/// Falls back to identity claims when no profile is stored. Email-like names
/// are cut at the `@`.
pub fn nav_profile<S>(store: &S, user: &NewUser) -> store::Result<NavProfile>
where
    S: ProfileStore + ?Sized,
{
    let profile = if user.sub.is_empty() {
        None
    } else {
        store.get(&user.sub)?
    };

    let raw = match &profile {
        Some(profile) => profile.username.clone(),
        None => user
            .nickname
            .clone()
            .or_else(|| user.name.clone())
            .or_else(|| {
                user.email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
    };

    let username = match raw.split_once('@') {
        Some(("", _)) => DEFAULT_USERNAME.to_string(),
        Some((local, _)) => local.to_string(),
        None => raw,
    };

    let (coins, owned_card_ids) = match profile {
        Some(profile) => (
            profile.coins,
            profile
                .owned_card_ids
                .into_iter()
                .filter(|id| !id.is_empty())
                .collect(),
        ),
        None => (0, Vec::new()),
    };

    Ok(NavProfile {
        username,
        coins,
        owned_card_ids,
    })
}
