//! Authenticated identity of this browser instance, persisted across reloads.

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::types::AuthResponse;
use crate::config::{TOKEN_KEY, USER_KEY};
use crate::observe::{Observers, Subscription};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub has_resume: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_name: Option<String>,
}

/// Token and profile always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub profile: Profile,
}

/// What views render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub session: Option<Session>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.session.as_ref().map(|s| &s.profile)
    }
}

pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    current: RefCell<Option<Session>>,
    loading: Cell<bool>,
    observers: Observers<SessionSnapshot>,
}

impl SessionStore {
    /// A store that has not yet read durable storage; `loading()` is true.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            current: RefCell::new(None),
            loading: Cell::new(true),
            observers: Observers::default(),
        }
    }

    /// Construct and immediately rehydrate.
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        let store = Self::new(storage);
        store.rehydrate();
        store
    }

    /// Read the persisted session. Missing or corrupt entries mean "signed out".
    pub fn rehydrate(&self) {
        let restored = match (self.storage.get(TOKEN_KEY), self.storage.get(USER_KEY)) {
            (Some(token), Some(user)) if !token.is_empty() => {
                match serde_json::from_str::<Profile>(&user) {
                    Ok(profile) => Some(Session { token, profile }),
                    Err(e) => {
                        warn!("Discarding unreadable stored profile: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };
        if let Some(ref s) = restored {
            info!("Restored session for {}", s.profile.email);
        }
        *self.current.borrow_mut() = restored;
        self.loading.set(false);
        self.publish();
    }

    pub fn login(&self, response: &AuthResponse) {
        let session = Session {
            token: response.token.clone(),
            profile: Profile {
                full_name: response.full_name.clone(),
                email: response.email.clone(),
                has_resume: response.has_resume,
                resume_name: None,
            },
        };
        info!("Signed in as {}", session.profile.email);
        self.persist(&session);
        *self.current.borrow_mut() = Some(session);
        self.publish();
    }

    pub fn logout(&self) {
        info!("Signed out");
        *self.current.borrow_mut() = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("{}", e);
            }
        }
        self.publish();
    }

    /// Merge resume state into the profile. `None` keeps the previous name.
    pub fn update_resume_status(&self, has_resume: bool, resume_name: Option<String>) {
        let updated = {
            let mut current = self.current.borrow_mut();
            let Some(session) = current.as_mut() else {
                return;
            };
            session.profile.has_resume = has_resume;
            if resume_name.is_some() {
                session.profile.resume_name = resume_name;
            }
            session.clone()
        };
        self.persist(&updated);
        self.publish();
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn profile(&self) -> Option<Profile> {
        self.current.borrow().as_ref().map(|s| s.profile.clone())
    }

    pub fn has_resume(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .map(|s| s.profile.has_resume)
            .unwrap_or(false)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.loading.get(),
            session: self.current.borrow().clone(),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&SessionSnapshot) + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.observers.unsubscribe(subscription);
    }

    fn persist(&self, session: &Session) {
        let user = match serde_json::to_string(&session.profile) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize profile: {}", e);
                return;
            }
        };
        let written = self
            .storage
            .set(TOKEN_KEY, &session.token)
            .and_then(|_| self.storage.set(USER_KEY, &user));
        if let Err(e) = written {
            warn!("Session not persisted: {}", e);
        }
    }

    fn publish(&self) {
        self.observers.emit(&self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    /// Shares one MemoryStore between the session under test and the assertions.
    struct Shared(Rc<MemoryStore>);

    impl KeyValueStore for Shared {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    fn auth(has_resume: bool) -> AuthResponse {
        AuthResponse {
            token: "jwt-123".to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "a@b.com".to_string(),
            has_resume,
        }
    }

    #[test]
    fn test_new_store_is_loading_until_rehydrated() {
        let store = SessionStore::new(Box::new(MemoryStore::new()));
        assert!(store.loading());
        store.rehydrate();
        assert!(!store.loading());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_persists_both_keys() {
        let backing = Rc::new(MemoryStore::new());
        let store = SessionStore::open(Box::new(Shared(backing.clone())));

        store.login(&auth(false));

        assert_eq!(store.token().as_deref(), Some("jwt-123"));
        assert_eq!(backing.get(TOKEN_KEY).as_deref(), Some("jwt-123"));
        let user: serde_json::Value =
            serde_json::from_str(&backing.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(user["fullName"], "Ada Lovelace");
        assert_eq!(user["hasResume"], false);
    }

    #[test]
    fn test_rehydrate_restores_session() {
        let backing = MemoryStore::with_entries([
            (TOKEN_KEY, "jwt-9"),
            (USER_KEY, r#"{"fullName":"Grace","email":"g@h.io","hasResume":true,"resumeName":"cv.pdf"}"#),
        ]);
        let store = SessionStore::open(Box::new(backing));

        let profile = store.profile().unwrap();
        assert_eq!(store.token().as_deref(), Some("jwt-9"));
        assert!(profile.has_resume);
        assert_eq!(profile.resume_name.as_deref(), Some("cv.pdf"));
    }

    #[test]
    fn test_corrupt_storage_means_no_session() {
        let backing = MemoryStore::with_entries([(TOKEN_KEY, "jwt-9"), (USER_KEY, "{not json")]);
        let store = SessionStore::open(Box::new(backing));
        assert!(!store.loading());
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_token_without_profile_means_no_session() {
        let backing = MemoryStore::with_entries([(TOKEN_KEY, "jwt-9")]);
        let store = SessionStore::open(Box::new(backing));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_logout_clears_storage() {
        let backing = Rc::new(MemoryStore::new());
        let store = SessionStore::open(Box::new(Shared(backing.clone())));
        store.login(&auth(true));
        store.logout();

        assert!(!store.is_authenticated());
        assert!(backing.is_empty());
    }

    #[test]
    fn test_update_resume_status_merges() {
        let backing = Rc::new(MemoryStore::new());
        let store = SessionStore::open(Box::new(Shared(backing.clone())));
        store.login(&auth(false));

        store.update_resume_status(true, Some("resume.docx".to_string()));
        store.update_resume_status(true, None);

        let profile = store.profile().unwrap();
        assert!(profile.has_resume);
        assert_eq!(profile.resume_name.as_deref(), Some("resume.docx"));
        assert!(backing.get(USER_KEY).unwrap().contains("resume.docx"));
    }

    #[test]
    fn test_update_resume_status_without_session_is_noop() {
        let store = SessionStore::open(Box::new(MemoryStore::new()));
        store.update_resume_status(true, Some("cv.pdf".to_string()));
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let store = SessionStore::new(Box::new(MemoryStore::new()));
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |snap| sink.borrow_mut().push((snap.loading, snap.is_authenticated())));

        store.rehydrate();
        store.login(&auth(false));
        store.logout();

        assert_eq!(*seen.borrow(), vec![(false, false), (false, true), (false, false)]);
    }

    #[test]
    fn test_unsubscribed_callback_stops_seeing_changes() {
        let store = SessionStore::open(Box::new(MemoryStore::new()));
        let seen = Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        let sub = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.login(&auth(false));
        store.unsubscribe(sub);
        store.logout();

        assert_eq!(seen.get(), 1);
    }
}
