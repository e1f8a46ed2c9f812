use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Client, ClientStatus, Tier};

/// A client record before the directory has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    pub vise_club_member: bool,
    pub card_tier: Tier,
    pub status: ClientStatus,
}

/// Storage port for client records.
///
/// Implementations must hand out unique, strictly increasing ids even under
/// concurrent `create` calls.
pub trait ClientDirectory: Send + Sync {
    fn create(&self, client: NewClient) -> Client;
    fn get(&self, id: u64) -> Option<Client>;
    fn list(&self) -> Vec<Client>;
}

#[derive(Debug)]
struct Store {
    next_id: u64,
    clients: Vec<Client>,
}

/// Process-local client directory.
///
/// Id allocation and insertion share one lock, so ids are strictly
/// increasing in insertion order, starting at 1.
#[derive(Debug)]
pub struct InMemoryClientDirectory {
    store: Mutex<Store>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 1,
                clients: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryClientDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientDirectory for InMemoryClientDirectory {
    fn create(&self, client: NewClient) -> Client {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let id = store.next_id;
        store.next_id += 1;
        let record = Client {
            id,
            name: client.name,
            country: client.country,
            monthly_income: client.monthly_income,
            vise_club_member: client.vise_club_member,
            card_tier: client.card_tier,
            status: client.status,
        };
        store.clients.push(record.clone());
        tracing::info!(client_id = id, tier = %record.card_tier, "client stored");
        record
    }

    fn get(&self, id: u64) -> Option<Client> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.clients.iter().find(|c| c.id == id).cloned()
    }

    fn list(&self) -> Vec<Client> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.clients.clone()
    }
}
