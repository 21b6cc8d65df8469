//! Process-local store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, NewLink, NewUser, User};
use crate::domain::errors::StoreError;
use crate::domain::store::Store;

/// In-memory store with the same uniqueness and atomicity guarantees as
/// [`super::PgStore`].
///
/// Every operation runs under one mutex, so a check-and-insert or an
/// increment is atomic with respect to all other calls. Data lives only as
/// long as the value; used by tests and local experiments.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    links: HashMap<String, Link>,
    next_user_id: i64,
    next_link_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::backend(anyhow::anyhow!("in-memory store lock poisoned")))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock()?;

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::EmailExists);
        }

        inner.next_user_id += 1;
        let now = Utc::now();
        let user = User::new(inner.next_user_id, new_user.email, now, now);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError> {
        self.lock()?
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_short_link(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut inner = self.lock()?;

        if inner.links.contains_key(&new_link.short_code) {
            return Err(StoreError::CodeExists);
        }

        inner.next_link_id += 1;
        let now = Utc::now();
        let link = Link::new(
            inner.next_link_id,
            new_link.user_id,
            new_link.short_code,
            new_link.original_url,
            0,
            now,
            now,
        );
        inner.links.insert(link.short_code.clone(), link.clone());

        Ok(link)
    }

    async fn get_by_short_code(&self, code: &str) -> Result<Link, StoreError> {
        self.lock()?
            .links
            .get(code)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_original_url(&self, user_id: i64, url: &str) -> Result<Link, StoreError> {
        self.lock()?
            .links
            .values()
            .filter(|l| l.user_id == user_id && l.original_url == url)
            .min_by_key(|l| l.id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let link = inner.links.get_mut(code).ok_or(StoreError::NotFound)?;
        link.clicks += 1;
        Ok(())
    }

    async fn get_links_by_user_id(&self, user_id: i64) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self
            .lock()?
            .links
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
