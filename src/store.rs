//! Process-local storage backing the resolvers.
//!
//! Nothing here survives a restart. Messages live in an [`InMemoryMessageStore`]
//! behind the [`MessageRepository`] trait so the resolvers never depend on a
//! concrete map; users come from a fixed, read-only [`UserDirectory`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::Error;

/// The content/author pair stored for a message identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRecord {
    pub content: Option<String>,
    pub author: Option<String>,
}

pub trait MessageRepository: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<MessageRecord>, Error>;

    /// Stores `record` under a freshly generated identifier and returns it.
    fn insert(&self, record: MessageRecord) -> Result<String, Error>;

    /// Overwrites the record for `id` in full. Fails with `NotFound` if `id`
    /// was never issued.
    fn replace(&self, id: &str, record: MessageRecord) -> Result<(), Error>;
}

const ID_BYTES: usize = 10;

fn generate_id() -> String {
    hex::encode(rand::random::<[u8; ID_BYTES]>())
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::Internal("message store lock poisoned".into())
}

#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<String, MessageRecord>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageRepository for InMemoryMessageStore {
    fn get(&self, id: &str) -> Result<Option<MessageRecord>, Error> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.get(id).cloned())
    }

    fn insert(&self, record: MessageRecord) -> Result<String, Error> {
        let mut messages = self.messages.write().map_err(poisoned)?;
        let mut id = generate_id();
        while messages.contains_key(&id) {
            id = generate_id();
        }
        messages.insert(id.clone(), record);
        log::debug!("Stored message {}", id);
        Ok(id)
    }

    fn replace(&self, id: &str, record: MessageRecord) -> Result<(), Error> {
        let mut messages = self.messages.write().map_err(poisoned)?;
        match messages.get_mut(id) {
            Some(existing) => {
                *existing = record;
                log::debug!("Replaced message {}", id);
                Ok(())
            }
            None => Err(Error::not_found(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    pub fn new<I>(users: I) -> Self
    where
        I: IntoIterator<Item = UserRecord>,
    {
        UserDirectory {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    /// The two users every fresh server knows about.
    pub fn seeded() -> Self {
        Self::new(vec![
            UserRecord {
                id: "a".into(),
                name: "alice".into(),
            },
            UserRecord {
                id: "b".into(),
                name: "bob".into(),
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.users.get(id)
    }
}
