//! # vise-benefits
//!
//! Eligibility, purchase restriction, and discount rules for VISE payment
//! cards (Classic, Gold, Platinum, Black, White).
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Every rule is driven by a [`TierCatalog`](crate::core::TierCatalog): the
//! standard table, a builder-made one, or one loaded from JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vise_benefits::core::*;
//! use rust_decimal_macros::dec;
//!
//! let catalog = TierCatalog::standard();
//!
//! let decision = evaluate(
//!     &catalog,
//!     &ClientApplication::new("Ana Gomez", "Colombia", dec!(2500), true, "Platinum"),
//! );
//! assert!(decision.accepted);
//!
//! // 2024-06-15 is a Saturday: 30% weekend window plus 5% international.
//! let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let benefit =
//!     calculate(&catalog, Tier::Platinum, dec!(250), saturday, "Spain", "Colombia").unwrap();
//! assert_eq!(benefit.discount_applied, dec!(87.50));
//! assert_eq!(benefit.final_amount, dec!(162.50));
//! assert_eq!(benefit.benefit_label.as_deref(), Some("Saturday – 30% off + International 5%"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Tier catalog, eligibility, purchase restrictions, benefit calculation |
//! | `json` | Load and dump tier catalogs as JSON |
//! | `ledger` | Client directory / purchase ledger ports, in-memory adapters, card service |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "ledger")]
pub mod ledger;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
