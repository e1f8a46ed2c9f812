//! Registration-time eligibility of a client for a requested tier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::TierCatalog;
use super::error::{CardError, EligibilityError, ValidationError};
use super::types::*;

/// Minimum length, in characters, of the name and country fields.
pub const MIN_FIELD_LEN: usize = 2;

/// `{accepted, message}` answer of the eligibility evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub accepted: bool,
    /// `"eligible"` on success, otherwise the rejection reason.
    pub message: String,
    pub rejection: Option<RejectionKind>,
}

/// Category of an eligibility rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionKind {
    Validation { field: String },
    Income,
    Club,
    Country,
    UnknownTier,
    /// An error the eligibility rules never raise, such as a restriction
    /// veto or a missing client.
    Other,
}

/// Evaluate an application and answer with `{accepted, message}`.
///
/// Pure: identical inputs always give identical decisions.
pub fn evaluate(catalog: &TierCatalog, application: &ClientApplication) -> EligibilityDecision {
    match check_eligibility(catalog, application) {
        Ok(tier) => {
            tracing::debug!(%tier, "application eligible");
            EligibilityDecision {
                accepted: true,
                message: "eligible".to_string(),
                rejection: None,
            }
        }
        Err(err) => {
            let rejection = match &err {
                CardError::Validation(v) => RejectionKind::Validation {
                    field: v.field.clone(),
                },
                CardError::Eligibility(EligibilityError::Income { .. }) => RejectionKind::Income,
                CardError::Eligibility(EligibilityError::Club { .. }) => RejectionKind::Club,
                CardError::Eligibility(EligibilityError::Country { .. }) => RejectionKind::Country,
                CardError::UnknownTier(_) => RejectionKind::UnknownTier,
                CardError::Restriction { .. }
                | CardError::Catalog(_)
                | CardError::ClientNotFound(_) => RejectionKind::Other,
            };
            tracing::debug!(reason = %err, "application rejected");
            EligibilityDecision {
                accepted: false,
                message: err.to_string(),
                rejection: Some(rejection),
            }
        }
    }
}

/// Check an application, returning the granted tier or the first failure.
///
/// Order: field validation, income, club membership, country of residence.
pub fn check_eligibility(
    catalog: &TierCatalog,
    application: &ClientApplication,
) -> Result<Tier, CardError> {
    let tier = validate_application(application)?;
    let rule = catalog.rule_for(tier)?;

    if application.monthly_income < rule.min_income {
        return Err(EligibilityError::Income {
            tier,
            income: application.monthly_income,
            minimum: rule.min_income.normalize(),
        }
        .into());
    }

    if rule.requires_club && !application.vise_club_member {
        return Err(EligibilityError::Club { tier }.into());
    }

    if rule.restricts(&application.country) {
        return Err(EligibilityError::Country {
            tier,
            country: application.country.trim().to_string(),
        }
        .into());
    }

    Ok(tier)
}

/// Field-shape checks that run before any business rule.
fn validate_application(application: &ClientApplication) -> Result<Tier, ValidationError> {
    check_min_len("name", &application.name)?;
    check_min_len("country", &application.country)?;

    if application.monthly_income < Decimal::ZERO {
        return Err(ValidationError::new(
            "monthly_income",
            "monthly income must not be negative",
        ));
    }

    application.requested_tier.parse::<Tier>().map_err(|_| {
        let known: Vec<&str> = Tier::ALL.iter().map(|t| t.name()).collect();
        ValidationError::new(
            "requested_tier",
            format!(
                "unknown card tier '{}'; expected one of {}",
                application.requested_tier.trim(),
                known.join(", ")
            ),
        )
    })
}

fn check_min_len(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_FIELD_LEN {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at least {MIN_FIELD_LEN} characters"),
        ));
    }
    Ok(())
}
