use std::net::IpAddr;
use std::sync::Arc;

use crate::store::{InMemoryMessageStore, MessageRepository, UserDirectory};

pub mod schema;

/// Long-lived handles shared by every request. Managed by Rocket.
#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageRepository>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    pub fn new(messages: Arc<dyn MessageRepository>, users: Arc<UserDirectory>) -> Self {
        AppState { messages, users }
    }

    /// Builds the context for a single GraphQL request.
    pub fn context(&self, client_ip: Option<IpAddr>) -> Context {
        Context {
            messages: Arc::clone(&self.messages),
            users: Arc::clone(&self.users),
            client_ip,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(
            Arc::new(InMemoryMessageStore::new()),
            Arc::new(UserDirectory::seeded()),
        )
    }
}

/// Per-request data every resolver can reach.
pub struct Context {
    pub messages: Arc<dyn MessageRepository>,
    pub users: Arc<UserDirectory>,
    pub client_ip: Option<IpAddr>,
}

// To make our context usable by Juniper, we have to implement a marker trait.
impl juniper::Context for Context {}
