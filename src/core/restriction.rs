//! Purchase-time country veto.
//!
//! Re-checked on every purchase against the country the purchase is made
//! in, independently of the client's registered country.

use serde::{Deserialize, Serialize};

use super::catalog::TierCatalog;
use super::error::CardError;
use super::types::Tier;

/// `{allowed, message}` answer of the restriction checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionDecision {
    pub allowed: bool,
    /// `"allowed"`, or why the purchase was vetoed.
    pub message: String,
}

/// Decide whether a card of `tier` may be used in `purchase_country`.
///
/// `client_country` is accepted for interface symmetry but never affects
/// the outcome. Tiers with an empty restricted set always pass.
pub fn check_purchase(
    catalog: &TierCatalog,
    tier: Tier,
    client_country: &str,
    purchase_country: &str,
) -> Result<RestrictionDecision, CardError> {
    match ensure_purchase_allowed(catalog, tier, client_country, purchase_country) {
        Ok(()) => Ok(RestrictionDecision {
            allowed: true,
            message: "allowed".to_string(),
        }),
        Err(err @ CardError::Restriction { .. }) => Ok(RestrictionDecision {
            allowed: false,
            message: err.to_string(),
        }),
        Err(err) => Err(err),
    }
}

/// Error-returning form of [`check_purchase`].
pub fn ensure_purchase_allowed(
    catalog: &TierCatalog,
    tier: Tier,
    _client_country: &str,
    purchase_country: &str,
) -> Result<(), CardError> {
    let rule = catalog.rule_for(tier)?;
    if rule.restricts(purchase_country) {
        tracing::warn!(%tier, country = purchase_country.trim(), "purchase vetoed");
        return Err(CardError::Restriction {
            tier,
            country: purchase_country.trim().to_string(),
        });
    }
    Ok(())
}
