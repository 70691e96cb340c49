use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{domain::UserId, errors::Error, Result};

/// Last-known profile of a user who interacted with the bot.
///
/// Created on first interaction, refreshed on every subsequent one, never
/// deleted.
#[derive(Clone, Debug)]
pub struct UserProfile {
    pub user_id: UserId,
    pub display_name: String,
    pub handle: Option<String>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// A reply/broadcast target after specifier resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub user_id: UserId,
    /// Best-effort display label for operator-facing confirmations.
    pub label: String,
}

/// In-memory user registry.
///
/// Profiles are kept in insertion order; `@handle` resolution scans in that
/// order and the first case-insensitive match wins. Duplicate handles are
/// not rejected (platform handles are unique in practice).
#[derive(Debug, Default)]
pub struct UserRegistry {
    profiles: Vec<UserProfile>,
    index: HashMap<i64, usize>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a profile. `first_seen` is set only on insert;
    /// `last_seen`, `display_name` and `handle` are always refreshed.
    pub fn upsert(
        &mut self,
        user_id: UserId,
        display_name: &str,
        handle: Option<&str>,
        now: DateTime<Utc>,
    ) {
        match self.index.get(&user_id.0) {
            Some(&pos) => {
                let profile = &mut self.profiles[pos];
                profile.display_name = display_name.to_string();
                profile.handle = handle.map(str::to_owned);
                profile.last_seen = now;
            }
            None => {
                self.index.insert(user_id.0, self.profiles.len());
                self.profiles.push(UserProfile {
                    user_id,
                    display_name: display_name.to_string(),
                    handle: handle.map(str::to_owned),
                    first_seen: now,
                    last_seen: now,
                });
            }
        }
    }

    pub fn get(&self, user_id: UserId) -> Option<&UserProfile> {
        self.index.get(&user_id.0).map(|&pos| &self.profiles[pos])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Snapshot of all user ids in insertion order (broadcast recipient
    /// list; users added after the snapshot are not included).
    pub fn user_ids(&self) -> Vec<UserId> {
        self.profiles.iter().map(|p| p.user_id).collect()
    }

    /// Resolve an operator-supplied target specifier.
    ///
    /// `@handle` does a case-insensitive scan over known handles; a numeric
    /// specifier is accepted even when no profile exists (the id is still a
    /// usable send target — the profile write may simply have raced).
    pub fn resolve(&self, specifier: &str) -> Result<ResolvedTarget> {
        let specifier = specifier.trim();

        if let Some(wanted) = specifier.strip_prefix('@') {
            let wanted = wanted.to_lowercase();
            return self
                .profiles
                .iter()
                .find(|p| {
                    p.handle
                        .as_deref()
                        .map(|h| h.to_lowercase() == wanted)
                        .unwrap_or(false)
                })
                .map(|p| ResolvedTarget {
                    user_id: p.user_id,
                    label: format!(
                        "@{} ({})",
                        p.handle.as_deref().unwrap_or_default(),
                        p.display_name
                    ),
                })
                .ok_or_else(|| Error::NotFound(specifier.to_string()));
        }

        let user_id = specifier
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| Error::NotFound(specifier.to_string()))?;

        let label = match self.get(user_id) {
            Some(profile) => format!("{} (ID: {})", profile.display_name, user_id.0),
            None => format!("User ID: {}", user_id.0),
        };

        Ok(ResolvedTarget { user_id, label })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn upsert_tracks_first_and_last_seen() {
        let mut reg = UserRegistry::new();
        reg.upsert(UserId(1), "Ann", Some("ann"), ts(100));
        reg.upsert(UserId(1), "Ann", Some("ann"), ts(200));
        reg.upsert(UserId(1), "Annie", Some("annie"), ts(300));

        let profile = reg.get(UserId(1)).unwrap();
        assert_eq!(profile.first_seen, ts(100));
        assert_eq!(profile.last_seen, ts(300));
        assert_eq!(profile.display_name, "Annie");
        assert_eq!(profile.handle.as_deref(), Some("annie"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn resolve_handle_is_case_insensitive() {
        let mut reg = UserRegistry::new();
        reg.upsert(UserId(7), "Alice", Some("Alice"), ts(1));

        let a = reg.resolve("@Alice").unwrap();
        let b = reg.resolve("@alice").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.user_id, UserId(7));
        assert_eq!(a.label, "@Alice (Alice)");
    }

    #[test]
    fn resolve_handle_first_match_wins_in_insertion_order() {
        let mut reg = UserRegistry::new();
        reg.upsert(UserId(1), "First", Some("dup"), ts(1));
        reg.upsert(UserId(2), "Second", Some("DUP"), ts(2));

        assert_eq!(reg.resolve("@dup").unwrap().user_id, UserId(1));
    }

    #[test]
    fn resolve_numeric_falls_back_to_bare_id() {
        let mut reg = UserRegistry::new();
        reg.upsert(UserId(42), "Bob", None, ts(1));

        let known = reg.resolve("42").unwrap();
        assert_eq!(known.label, "Bob (ID: 42)");

        let unknown = reg.resolve("999").unwrap();
        assert_eq!(unknown.user_id, UserId(999));
        assert_eq!(unknown.label, "User ID: 999");
    }

    #[test]
    fn resolve_rejects_garbage_and_unknown_handles() {
        let reg = UserRegistry::new();
        assert!(matches!(reg.resolve("@ghost"), Err(Error::NotFound(_))));
        assert!(matches!(reg.resolve("not-a-number"), Err(Error::NotFound(_))));
    }
}
