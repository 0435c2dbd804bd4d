//! The household snapshot on disk and the store it is loaded into.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use chrono_tz::Tz;
use homecal_core::store::{
    AuthUser, EventStore, IdentityProvider, LinkStore, ProfileStore, ensure_profile,
};
use homecal_core::{Event, EventColor, HomecalConfig, MemoryStore, SharedLink, UserProfile};
use serde::{Deserialize, Serialize};

/// What is kept in the data file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub links: Vec<SharedLink>,
}

impl Snapshot {
    /// Read the snapshot at `path`; a missing file is an empty household.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Snapshot::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Whoever runs the CLI: the snapshot's owner, or the OS user on first use.
struct LocalIdentity {
    user: AuthUser,
}

impl LocalIdentity {
    fn new(owner: Option<&UserProfile>, display_name: Option<&str>) -> Self {
        let user = match owner {
            Some(profile) => AuthUser {
                uid: profile.uid.clone(),
                display_name: Some(profile.display_name.clone()),
                email: None,
            },
            None => {
                let login = std::env::var("USER")
                    .or_else(|_| std::env::var("USERNAME"))
                    .unwrap_or_else(|_| "local".to_string());
                AuthUser {
                    display_name: Some(display_name.unwrap_or(&login).to_string()),
                    uid: login,
                    email: None,
                }
            }
        };
        LocalIdentity { user }
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<AuthUser> {
        Some(self.user.clone())
    }
}

/// Everything a command needs: settings, the signed-in profile and the
/// loaded store.
pub struct Session {
    pub zone: Tz,
    pub first_day: Weekday,
    pub default_color: EventColor,
    /// The profile commands act as; its household may be overridden by config.
    pub profile: UserProfile,
    pub store: MemoryStore,
    account: UserProfile,
    path: PathBuf,
}

impl Session {
    pub fn open(config: &HomecalConfig) -> Result<Self> {
        let path = config.data_path();
        let snapshot = Snapshot::read(&path)?;

        let store = MemoryStore::new();
        if let Some(owner) = &snapshot.profile {
            store.save_profile(owner)?;
        }

        let identity = LocalIdentity::new(snapshot.profile.as_ref(), config.display_name.as_deref());
        let account = ensure_profile(&identity, &store)?;

        let mut profile = account.clone();
        profile.household_code = config
            .household()
            .unwrap_or_else(|| account.effective_household())
            .to_string();

        store.load_events(&profile.household_code, snapshot.events);
        store.load_links(&profile.household_code, snapshot.links);

        tracing::debug!(
            path = %path.display(),
            household = %profile.household_code,
            "opened household"
        );

        Ok(Session {
            zone: config.zone()?,
            first_day: config.first_day_of_week()?,
            default_color: config.default_color()?,
            profile,
            store,
            account,
            path,
        })
    }

    /// The household's current events, ordered by start.
    pub fn events(&self) -> Vec<Event> {
        self.store.subscribe_events(&self.profile.household_code).current()
    }

    /// The household's current links, newest first.
    pub fn links(&self) -> Vec<SharedLink> {
        self.store.subscribe_links(&self.profile).current()
    }

    pub fn find_event(&self, id: &str) -> Option<Event> {
        self.events().into_iter().find(|e| e.id == id)
    }

    /// Write the household back to the data file.
    pub fn save(&self) -> Result<()> {
        let snapshot = Snapshot {
            profile: Some(self.account.clone()),
            events: self.events(),
            links: self.links(),
        };
        snapshot.write(&self.path)?;
        tracing::debug!(path = %self.path.display(), "saved household");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn config(path: &Path) -> HomecalConfig {
        HomecalConfig {
            data_file: path.to_path_buf(),
            time_zone: Some("Europe/Berlin".into()),
            ..HomecalConfig::default()
        }
    }

    fn owner() -> UserProfile {
        UserProfile {
            uid: "uid-12345".into(),
            display_name: "Sam".into(),
            household_code: "home42".into(),
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&config(&dir.path().join("household.json"))).unwrap();

        assert!(session.events().is_empty());
        assert!(session.links().is_empty());
        assert!(!session.profile.household_code.is_empty());
        assert_eq!(session.zone, chrono_tz::Europe::Berlin);
    }

    #[test]
    fn saved_changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("household.json");
        Snapshot {
            profile: Some(owner()),
            ..Snapshot::default()
        }
        .write(&path)
        .unwrap();

        let session = Session::open(&config(&path)).unwrap();
        assert_eq!(session.profile, owner());

        let start = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let stored = session
            .store
            .upsert_event(&session.profile, Event::timed("Dentist", start, start + Duration::hours(1)))
            .unwrap();
        session.save().unwrap();

        let reopened = Session::open(&config(&path)).unwrap();
        assert_eq!(reopened.find_event(&stored.id), Some(stored));
        assert_eq!(reopened.profile.uid, "uid-12345");
    }

    #[test]
    fn household_override_keeps_account() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("household.json");
        Snapshot {
            profile: Some(owner()),
            ..Snapshot::default()
        }
        .write(&path)
        .unwrap();

        let mut cfg = config(&path);
        cfg.household = Some("FAMILY".into());
        let session = Session::open(&cfg).unwrap();
        assert_eq!(session.profile.household_code, "FAMILY");

        session.save().unwrap();
        let snapshot = Snapshot::read(&path).unwrap();
        assert_eq!(snapshot.profile, Some(owner()));
    }
}
