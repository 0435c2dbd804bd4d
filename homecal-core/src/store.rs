//! Seams to the persistence and identity collaborators.
//!
//! The layout functions never talk to a store; the presentation layer
//! subscribes here and feeds each fresh snapshot back into them.
//! `MemoryStore` is the in-process implementation used by the CLI and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::event::Event;
use crate::link::{LinkComment, SharedLink};
use crate::profile::UserProfile;

/// A live view of a collection. Holds the latest snapshot and can wait for
/// the next one; dropping it (or calling [`Subscription::cancel`]) ends it.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    fn new(receiver: watch::Receiver<T>) -> Self {
        Subscription { receiver }
    }

    /// A subscription that only ever yields `value`.
    fn fixed(value: T) -> Self {
        let (_, receiver) = watch::channel(value);
        Subscription { receiver }
    }

    /// The latest snapshot.
    pub fn current(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. `None` once the source has gone away.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn cancel(self) {}
}

pub trait EventStore {
    /// Live events of `household`, ordered by start. A blank household
    /// yields an empty subscription.
    fn subscribe_events(&self, household: &str) -> Subscription<Vec<Event>>;

    /// Insert or replace an event. A blank id gets a fresh one; the stored
    /// event is returned.
    fn upsert_event(&self, profile: &UserProfile, event: Event) -> CoreResult<Event>;

    /// Remove an event. Blank household or id is a no-op.
    fn delete_event(&self, profile: &UserProfile, event: &Event) -> CoreResult<()>;
}

pub trait LinkStore {
    /// Live links of the profile's household, newest first.
    fn subscribe_links(&self, profile: &UserProfile) -> Subscription<Vec<SharedLink>>;

    fn share_link(&self, profile: &UserProfile, link: SharedLink) -> CoreResult<SharedLink>;

    fn update_link_category(
        &self,
        profile: &UserProfile,
        link_id: &str,
        category: &str,
    ) -> CoreResult<()>;

    /// Append a comment. The message is trimmed and blank messages are
    /// dropped.
    fn add_link_comment(
        &self,
        profile: &UserProfile,
        link_id: &str,
        comment: LinkComment,
    ) -> CoreResult<()>;
}

pub trait ProfileStore {
    fn load_profile(&self, uid: &str) -> Option<UserProfile>;

    fn save_profile(&self, profile: &UserProfile) -> CoreResult<()>;
}

/// What the identity provider knows about the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

pub trait IdentityProvider {
    fn current_user(&self) -> Option<AuthUser>;
}

/// The stored profile of the signed-in user, created on first use.
pub fn ensure_profile(
    identity: &dyn IdentityProvider,
    profiles: &dyn ProfileStore,
) -> CoreResult<UserProfile> {
    let user = identity.current_user().ok_or(CoreError::NotSignedIn)?;

    if let Some(profile) = profiles.load_profile(&user.uid) {
        return Ok(profile);
    }

    let profile = UserProfile::for_new_user(
        &user.uid,
        user.display_name.as_deref(),
        user.email.as_deref(),
    );
    profiles.save_profile(&profile)?;
    tracing::debug!(uid = %profile.uid, household = %profile.household_code, "created profile");
    Ok(profile)
}

#[derive(Default)]
struct Collections {
    events: HashMap<String, watch::Sender<Vec<Event>>>,
    links: HashMap<String, watch::Sender<Vec<SharedLink>>>,
    profiles: HashMap<String, UserProfile>,
}

/// Everything held in memory, one watch channel per household collection.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

fn household_of(profile: &UserProfile) -> Option<&str> {
    let code = profile.household_code.trim();
    (!code.is_empty()).then_some(code)
}

fn sort_events(events: &mut [Event]) {
    events.sort_by_key(|e| e.start_epoch_millis);
}

fn sort_links(links: &mut [SharedLink]) {
    links.sort_by(|a, b| b.shared_at.cmp(&a.shared_at));
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace a household's events wholesale, e.g. from a saved snapshot.
    pub fn load_events(&self, household: &str, mut events: Vec<Event>) {
        sort_events(&mut events);
        let mut inner = self.lock();
        let sender = inner
            .events
            .entry(household.trim().to_string())
            .or_insert_with(|| watch::Sender::new(Vec::new()));
        sender.send_replace(events);
    }

    /// Replace a household's links wholesale.
    pub fn load_links(&self, household: &str, mut links: Vec<SharedLink>) {
        sort_links(&mut links);
        let mut inner = self.lock();
        let sender = inner
            .links
            .entry(household.trim().to_string())
            .or_insert_with(|| watch::Sender::new(Vec::new()));
        sender.send_replace(links);
    }

    /// Current events of a household.
    pub fn events(&self, household: &str) -> Vec<Event> {
        self.lock()
            .events
            .get(household.trim())
            .map(|s| s.borrow().clone())
            .unwrap_or_default()
    }

    /// Current links of a household.
    pub fn links(&self, household: &str) -> Vec<SharedLink> {
        self.lock()
            .links
            .get(household.trim())
            .map(|s| s.borrow().clone())
            .unwrap_or_default()
    }

    fn modify_links<R>(
        &self,
        household: &str,
        link_id: &str,
        f: impl FnOnce(&mut SharedLink) -> R,
    ) -> CoreResult<R> {
        let inner = self.lock();
        let sender = inner
            .links
            .get(household)
            .ok_or_else(|| CoreError::LinkNotFound(link_id.to_string()))?;

        let mut result = None;
        sender.send_if_modified(|links| match links.iter_mut().find(|l| l.id == link_id) {
            Some(link) => {
                result = Some(f(link));
                true
            }
            None => false,
        });

        result.ok_or_else(|| CoreError::LinkNotFound(link_id.to_string()))
    }
}

impl EventStore for MemoryStore {
    fn subscribe_events(&self, household: &str) -> Subscription<Vec<Event>> {
        let household = household.trim();
        if household.is_empty() {
            return Subscription::fixed(Vec::new());
        }

        let mut inner = self.lock();
        let sender = inner
            .events
            .entry(household.to_string())
            .or_insert_with(|| watch::Sender::new(Vec::new()));
        Subscription::new(sender.subscribe())
    }

    fn upsert_event(&self, profile: &UserProfile, mut event: Event) -> CoreResult<Event> {
        let household = household_of(profile).ok_or(CoreError::NoHousehold)?;
        if !event.is_persisted() {
            event.id = Uuid::new_v4().to_string();
        }

        let mut inner = self.lock();
        let sender = inner
            .events
            .entry(household.to_string())
            .or_insert_with(|| watch::Sender::new(Vec::new()));

        let stored = event.clone();
        sender.send_modify(|events| {
            match events.iter_mut().find(|e| e.id == stored.id) {
                Some(existing) => *existing = stored,
                None => events.push(stored),
            }
            sort_events(events);
        });

        tracing::debug!(household, id = %event.id, title = %event.title, "upserted event");
        Ok(event)
    }

    fn delete_event(&self, profile: &UserProfile, event: &Event) -> CoreResult<()> {
        let Some(household) = household_of(profile) else {
            return Ok(());
        };
        if !event.is_persisted() {
            return Ok(());
        }

        let inner = self.lock();
        if let Some(sender) = inner.events.get(household) {
            let removed = sender.send_if_modified(|events| {
                let before = events.len();
                events.retain(|e| e.id != event.id);
                events.len() != before
            });
            tracing::debug!(household, id = %event.id, removed, "deleted event");
        }
        Ok(())
    }
}

impl LinkStore for MemoryStore {
    fn subscribe_links(&self, profile: &UserProfile) -> Subscription<Vec<SharedLink>> {
        let Some(household) = household_of(profile) else {
            return Subscription::fixed(Vec::new());
        };

        let mut inner = self.lock();
        let sender = inner
            .links
            .entry(household.to_string())
            .or_insert_with(|| watch::Sender::new(Vec::new()));
        Subscription::new(sender.subscribe())
    }

    fn share_link(&self, profile: &UserProfile, mut link: SharedLink) -> CoreResult<SharedLink> {
        let household = household_of(profile).ok_or(CoreError::NoHousehold)?;
        if link.id.trim().is_empty() {
            link.id = Uuid::new_v4().to_string();
        }
        if link.shared_by_uid.is_empty() {
            link.shared_by_uid = profile.uid.clone();
            link.shared_by_name = profile.display_name.clone();
        }

        let mut inner = self.lock();
        let sender = inner
            .links
            .entry(household.to_string())
            .or_insert_with(|| watch::Sender::new(Vec::new()));

        let stored = link.clone();
        sender.send_modify(|links| {
            links.retain(|l| l.id != stored.id);
            links.push(stored);
            sort_links(links);
        });

        tracing::debug!(household, id = %link.id, url = %link.url, "shared link");
        Ok(link)
    }

    fn update_link_category(
        &self,
        profile: &UserProfile,
        link_id: &str,
        category: &str,
    ) -> CoreResult<()> {
        let Some(household) = household_of(profile) else {
            return Ok(());
        };
        if link_id.trim().is_empty() {
            return Ok(());
        }

        let category = category.trim().to_string();
        self.modify_links(household, link_id, |link| link.category = category)?;
        tracing::debug!(household, id = link_id, "updated link category");
        Ok(())
    }

    fn add_link_comment(
        &self,
        profile: &UserProfile,
        link_id: &str,
        comment: LinkComment,
    ) -> CoreResult<()> {
        let Some(household) = household_of(profile) else {
            return Ok(());
        };
        let message = comment.message.trim();
        if link_id.trim().is_empty() || message.is_empty() {
            return Ok(());
        }

        let comment = LinkComment {
            id: if comment.id.trim().is_empty() {
                Uuid::new_v4().to_string()
            } else {
                comment.id.clone()
            },
            message: message.to_string(),
            ..comment
        };

        self.modify_links(household, link_id, |link| link.comments.push(comment))?;
        tracing::debug!(household, id = link_id, "added link comment");
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    fn load_profile(&self, uid: &str) -> Option<UserProfile> {
        self.lock().profiles.get(uid).cloned()
    }

    fn save_profile(&self, profile: &UserProfile) -> CoreResult<()> {
        self.lock()
            .profiles
            .insert(profile.uid.clone(), profile.clone());
        Ok(())
    }
}
