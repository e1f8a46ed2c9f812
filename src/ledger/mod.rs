//! Client directory and purchase ledger ports, in-memory adapters, and the
//! service that runs registrations and purchases through the card rules.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use vise_benefits::core::*;
//! use vise_benefits::ledger::*;
//!
//! let service = CardService::in_memory(TierCatalog::standard());
//! let client = service
//!     .register_client(&ClientApplication::new("Ana Gomez", "Colombia", dec!(800), false, "Gold"))
//!     .unwrap();
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let purchase = service
//!     .process_purchase(
//!         &PurchaseRequest {
//!             client_id: client.id,
//!             amount: dec!(120),
//!             currency: "USD".into(),
//!             purchase_date: monday,
//!             purchase_country: "Colombia".into(),
//!         },
//!         monday,
//!     )
//!     .unwrap();
//!
//! assert_eq!(purchase.final_amount, dec!(102.00));
//! ```

mod directory;
mod purchases;
mod service;

pub use directory::{ClientDirectory, InMemoryClientDirectory, NewClient};
pub use purchases::{InMemoryPurchaseLedger, NewPurchase, PurchaseLedger};
pub use service::CardService;
