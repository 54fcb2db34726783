//! Identity provider: one opaque user id per session.
//!
//! Sign-in is either token-based (a pre-issued uid from the config file) or
//! anonymous, in which case a uuid is generated once and persisted so the
//! same local user keeps their documents across runs.

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::store::SqliteStore;

const ANON_UID_KEY: &str = "anon_uid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: String,
}

impl UserIdentity {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
        }
    }
}

/// Establish the session identity. A configured token wins; otherwise the
/// persisted anonymous uid is reused or minted on first run.
pub fn sign_in(store: &SqliteStore, token: Option<&str>) -> Result<UserIdentity> {
    if let Some(token) = token {
        let token = token.trim();
        if !token.is_empty() {
            log::debug!("signed in with configured token");
            return Ok(UserIdentity::new(token));
        }
    }

    if let Some(uid) = store.meta_get(ANON_UID_KEY).context("Reading anonymous uid")? {
        log::debug!("resumed anonymous session {}", uid);
        return Ok(UserIdentity::new(&uid));
    }

    let uid = Uuid::new_v4().to_string();
    store
        .meta_set(ANON_UID_KEY, &uid)
        .context("Persisting anonymous uid")?;
    log::info!("created anonymous session {}", uid);
    Ok(UserIdentity::new(&uid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_uid_is_stable_across_sign_ins() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = sign_in(&store, None).unwrap();
        let second = sign_in(&store, None).unwrap();
        assert_eq!(first, second);
        assert!(!first.uid.is_empty());
    }

    #[test]
    fn token_overrides_anonymous() {
        let store = SqliteStore::open_in_memory().unwrap();
        let anon = sign_in(&store, None).unwrap();
        let tokened = sign_in(&store, Some("user-abc")).unwrap();
        assert_eq!(tokened.uid, "user-abc");
        assert_ne!(anon, tokened);
    }

    #[test]
    fn blank_token_falls_back_to_anonymous() {
        let store = SqliteStore::open_in_memory().unwrap();
        let identity = sign_in(&store, Some("   ")).unwrap();
        assert_ne!(identity.uid.trim(), "");
        assert_ne!(identity.uid, "   ");
    }
}
