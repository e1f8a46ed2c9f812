//! Card tier rules and the decisions driven by them.
//!
//! Everything here is pure: no I/O, no clock reads, no shared mutable
//! state. Each function can be called from any number of threads.

mod benefits;
mod builder;
mod catalog;
mod eligibility;
mod error;
mod restriction;
mod types;

pub use benefits::*;
pub use builder::*;
pub use catalog::*;
pub use eligibility::*;
pub use error::*;
pub use restriction::*;
pub use types::*;
