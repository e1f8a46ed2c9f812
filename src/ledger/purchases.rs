use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Purchase, PurchaseStatus};

/// A purchase record before the ledger has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub client_id: u64,
    pub original_amount: Decimal,
    pub currency: String,
    pub purchase_date: NaiveDate,
    pub purchase_country: String,
    pub discount_applied: Decimal,
    pub final_amount: Decimal,
    pub benefit_label: Option<String>,
    pub status: PurchaseStatus,
    pub rejection_reason: Option<String>,
}

/// Storage port for purchase records.
///
/// Same id contract as [`ClientDirectory`](super::ClientDirectory).
pub trait PurchaseLedger: Send + Sync {
    fn create(&self, purchase: NewPurchase) -> Purchase;
    fn get(&self, id: u64) -> Option<Purchase>;
    fn list(&self) -> Vec<Purchase>;

    /// Purchases of one client, oldest first.
    fn list_by_client(&self, client_id: u64) -> Vec<Purchase> {
        self.list()
            .into_iter()
            .filter(|p| p.client_id == client_id)
            .collect()
    }
}

#[derive(Debug)]
struct Store {
    next_id: u64,
    purchases: Vec<Purchase>,
}

/// Process-local purchase ledger.
#[derive(Debug)]
pub struct InMemoryPurchaseLedger {
    store: Mutex<Store>,
}

impl InMemoryPurchaseLedger {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 1,
                purchases: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryPurchaseLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseLedger for InMemoryPurchaseLedger {
    fn create(&self, purchase: NewPurchase) -> Purchase {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let id = store.next_id;
        store.next_id += 1;
        let record = Purchase {
            id,
            client_id: purchase.client_id,
            original_amount: purchase.original_amount,
            currency: purchase.currency,
            purchase_date: purchase.purchase_date,
            purchase_country: purchase.purchase_country,
            discount_applied: purchase.discount_applied,
            final_amount: purchase.final_amount,
            benefit_label: purchase.benefit_label,
            status: purchase.status,
            rejection_reason: purchase.rejection_reason,
        };
        store.purchases.push(record.clone());
        tracing::info!(
            purchase_id = id,
            client_id = record.client_id,
            status = ?record.status,
            "purchase stored"
        );
        record
    }

    fn get(&self, id: u64) -> Option<Purchase> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.purchases.iter().find(|p| p.id == id).cloned()
    }

    fn list(&self) -> Vec<Purchase> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.purchases.clone()
    }

    fn list_by_client(&self, client_id: u64) -> Vec<Purchase> {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store
            .purchases
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect()
    }
}
