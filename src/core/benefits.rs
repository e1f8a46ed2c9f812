//! Purchase-time discount calculation.
//!
//! A purchase earns at most one day-based window discount (the larger of
//! the tier's weekday and weekend windows, weekend on a tie) plus the
//! tier's international discount when it is made outside the client's
//! country. The two are added, then clamped to the purchase amount.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::catalog::TierCatalog;
use super::error::{CardError, ValidationError};
use super::types::*;

/// The window discount chosen for a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedWindow {
    pub kind: WindowKind,
    /// Day of the purchase.
    pub day: Weekday,
    pub percent: Decimal,
    /// Unrounded discount amount.
    pub amount: Decimal,
}

impl AppliedWindow {
    /// Label such as `"Monday – 25% off"`.
    pub fn label(&self) -> String {
        format!("{} – {}% off", day_name(self.day), self.percent.normalize())
    }
}

/// Result of the benefit calculation for one purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitBreakdown {
    /// Total discount; always `original_amount - final_amount`.
    pub discount_applied: Decimal,
    /// Amount charged, rounded half-up to 2 decimals.
    pub final_amount: Decimal,
    /// `None` when the rounded discount is zero.
    pub benefit_label: Option<String>,
    pub window: Option<AppliedWindow>,
    /// Unrounded international discount (zero for domestic purchases).
    pub international_discount: Decimal,
    pub is_international: bool,
}

/// Compute the discount, final amount, and benefit label of a purchase.
///
/// `original_amount` must be positive and carry no fraction of a cent.
/// Amounts too large to take a percentage of are rejected rather than
/// overflowing. Country comparison ignores case, accents and surrounding
/// whitespace.
pub fn calculate(
    catalog: &TierCatalog,
    tier: Tier,
    original_amount: Decimal,
    purchase_date: NaiveDate,
    purchase_country: &str,
    client_country: &str,
) -> Result<BenefitBreakdown, CardError> {
    validate_amount("original_amount", original_amount)?;

    let rule = catalog.rule_for(tier)?;
    let day = purchase_date.weekday();
    let is_international =
        normalize_country(purchase_country) != normalize_country(client_country);

    let window = best_window(rule, day, original_amount)?;
    let window_discount = window.as_ref().map_or(Decimal::ZERO, |w| w.amount);

    let international_discount = if is_international {
        percent_of(original_amount, rule.international_percent)?
    } else {
        Decimal::ZERO
    };

    let total = window_discount
        .checked_add(international_discount)
        .ok_or_else(|| overflow("original_amount", original_amount))?
        .max(Decimal::ZERO)
        .min(original_amount);
    let final_amount = round_money(original_amount - total);
    let discount_applied = original_amount - final_amount;

    let benefit_label = if discount_applied.is_zero() {
        None
    } else {
        let intl = (!international_discount.is_zero())
            .then(|| format!("International {}%", rule.international_percent.normalize()));
        match (&window, intl) {
            (Some(w), Some(intl)) => Some(format!("{} + {intl}", w.label())),
            (Some(w), None) => Some(w.label()),
            (None, intl) => intl,
        }
    };

    tracing::debug!(
        %tier,
        %original_amount,
        %discount_applied,
        %final_amount,
        is_international,
        "benefit calculated"
    );

    Ok(BenefitBreakdown {
        discount_applied,
        final_amount,
        benefit_label,
        window,
        international_discount,
        is_international,
    })
}

/// The larger of the applicable window discounts; never their sum.
/// On a tie the weekend window wins.
fn best_window(
    rule: &TierRule,
    day: Weekday,
    amount: Decimal,
) -> Result<Option<AppliedWindow>, CardError> {
    let candidate = |kind: WindowKind,
                     window: &Option<DiscountWindow>|
     -> Result<Option<AppliedWindow>, CardError> {
        let Some(w) = window.as_ref().filter(|w| w.applies(day, amount)) else {
            return Ok(None);
        };
        let discount = percent_of(amount, w.percent)?;
        Ok((!discount.is_zero()).then(|| AppliedWindow {
            kind,
            day,
            percent: w.percent,
            amount: discount,
        }))
    };

    let weekday = candidate(WindowKind::Weekday, &rule.weekday_window)?;
    let weekend = candidate(WindowKind::Weekend, &rule.weekend_window)?;

    Ok(match (weekday, weekend) {
        (Some(wd), Some(we)) => Some(if we.amount >= wd.amount { we } else { wd }),
        (wd, we) => wd.or(we),
    })
}

/// Reject amounts that are not positive or that carry a fraction of a cent.
///
/// Trailing zeros are ignored, so `10.500` is accepted as `10.50`.
pub(crate) fn validate_amount(field: &str, amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::new(
            field,
            format!("amount must be positive, got {amount}"),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new(
            field,
            format!("amount {amount} has more than 2 decimal places"),
        ));
    }
    Ok(())
}

fn percent_of(amount: Decimal, percent: Decimal) -> Result<Decimal, CardError> {
    amount
        .checked_mul(percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow("original_amount", amount))
}

fn overflow(field: &str, amount: Decimal) -> CardError {
    ValidationError::new(field, format!("amount {amount} is too large")).into()
}

/// Round to cents, half-up, always carrying two decimal places.
fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
