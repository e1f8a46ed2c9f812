//! Tier catalog: the per-tier rule table every decision is driven by.

use std::collections::BTreeMap;

use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::builder::TierRuleBuilder;
use super::error::CardError;
use super::types::*;

/// Countries whose residents cannot hold Black or White cards.
pub const HIGH_TIER_RESTRICTED_COUNTRIES: &[&str] = &["China", "Vietnam", "India", "Iran"];

const MON_TO_WED: [Weekday; 3] = [Weekday::Mon, Weekday::Tue, Weekday::Wed];
const MON_TO_FRI: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Read-only lookup table from tier to its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierCatalog {
    rules: BTreeMap<Tier, TierRule>,
}

impl TierCatalog {
    /// The canonical VISE tier table.
    pub fn standard() -> Self {
        let rules = [
            TierRuleBuilder::new(Tier::Classic).build(),
            TierRuleBuilder::new(Tier::Gold)
                .min_income(dec!(500))
                .weekday_window(MON_TO_WED, dec!(15), dec!(100))
                .build(),
            TierRuleBuilder::new(Tier::Platinum)
                .min_income(dec!(1000))
                .requires_club()
                .weekday_window(MON_TO_WED, dec!(20), dec!(100))
                .weekend_window([Weekday::Sat], dec!(30), dec!(200))
                .international_percent(dec!(5))
                .build(),
            TierRuleBuilder::new(Tier::Black)
                .min_income(dec!(2000))
                .requires_club()
                .restricted_countries(HIGH_TIER_RESTRICTED_COUNTRIES.iter().copied())
                .weekday_window(MON_TO_WED, dec!(25), dec!(100))
                .weekend_window([Weekday::Sat], dec!(35), dec!(200))
                .international_percent(dec!(5))
                .build(),
            TierRuleBuilder::new(Tier::White)
                .min_income(dec!(2000))
                .requires_club()
                .restricted_countries(HIGH_TIER_RESTRICTED_COUNTRIES.iter().copied())
                .weekday_window(MON_TO_FRI, dec!(25), dec!(100))
                .weekend_window([Weekday::Sat, Weekday::Sun], dec!(35), dec!(200))
                .international_percent(dec!(5))
                .build(),
        ];

        Self {
            rules: rules.into_iter().map(|r| (r.tier, r)).collect(),
        }
    }

    /// Build a catalog from custom rules.
    ///
    /// Fails on duplicate tiers, negative amounts, percentages outside
    /// 0..=100, and windows without days.
    pub fn from_rules(rules: impl IntoIterator<Item = TierRule>) -> Result<Self, CardError> {
        let mut map = BTreeMap::new();
        for rule in rules {
            check_rule(&rule)?;
            let tier = rule.tier;
            if map.insert(tier, rule).is_some() {
                return Err(CardError::Catalog(format!("duplicate rule for tier {tier}")));
            }
        }
        if map.is_empty() {
            return Err(CardError::Catalog("catalog must contain at least one tier".into()));
        }
        tracing::debug!(tiers = map.len(), "tier catalog built");
        Ok(Self { rules: map })
    }

    /// Rules for `tier`, or [`CardError::UnknownTier`] if not configured.
    pub fn rule_for(&self, tier: Tier) -> Result<&TierRule, CardError> {
        self.rules
            .get(&tier)
            .ok_or_else(|| CardError::UnknownTier(tier.to_string()))
    }

    /// Configured tiers, entry level first.
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.rules.keys().copied()
    }

    /// All configured rules, entry level first.
    pub fn rules(&self) -> impl Iterator<Item = &TierRule> {
        self.rules.values()
    }

    /// Parse a catalog from a JSON array of tier rules.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, CardError> {
        let rules: Vec<TierRule> =
            serde_json::from_str(json).map_err(|e| CardError::Catalog(e.to_string()))?;
        Self::from_rules(rules)
    }

    /// Serialize the catalog as a pretty-printed JSON array of tier rules.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, CardError> {
        let rules: Vec<&TierRule> = self.rules.values().collect();
        serde_json::to_string_pretty(&rules).map_err(|e| CardError::Catalog(e.to_string()))
    }
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_rule(rule: &TierRule) -> Result<(), CardError> {
    let tier = rule.tier;
    if rule.min_income < Decimal::ZERO {
        return Err(CardError::Catalog(format!(
            "{tier}: minimum income must not be negative"
        )));
    }
    check_percent(tier, "international percent", rule.international_percent)?;
    for (label, window) in [
        ("weekday window", &rule.weekday_window),
        ("weekend window", &rule.weekend_window),
    ] {
        let Some(window) = window else { continue };
        if window.days.is_empty() {
            return Err(CardError::Catalog(format!("{tier}: {label} has no days")));
        }
        if window.min_purchase < Decimal::ZERO {
            return Err(CardError::Catalog(format!(
                "{tier}: {label} minimum purchase must not be negative"
            )));
        }
        check_percent(tier, label, window.percent)?;
    }
    Ok(())
}

fn check_percent(tier: Tier, label: &str, percent: Decimal) -> Result<(), CardError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(CardError::Catalog(format!(
            "{tier}: {label} {percent}% is outside 0..=100"
        )));
    }
    Ok(())
}

impl TierRule {
    /// Human-readable registration requirements of this tier.
    pub fn describe_restrictions(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.min_income > Decimal::ZERO {
            lines.push(format!(
                "Minimum income of ${} USD monthly",
                self.min_income.normalize()
            ));
        }
        if self.requires_club {
            lines.push("VISE CLUB subscription required".to_string());
        }
        if !self.restricted_countries.is_empty() {
            lines.push(format!(
                "Not available for residents of: {}",
                self.restricted_countries.join(", ")
            ));
        }
        lines
    }

    /// Human-readable purchase benefits of this tier.
    pub fn describe_benefits(&self) -> Vec<String> {
        let mut lines: Vec<String> = [&self.weekday_window, &self.weekend_window]
            .into_iter()
            .flatten()
            .map(|w| {
                let days: Vec<String> = w.days.iter().map(|d| d.to_string()).collect();
                format!(
                    "{}: {}% off purchases over ${}",
                    days.join(", "),
                    w.percent.normalize(),
                    w.min_purchase.normalize()
                )
            })
            .collect();
        if self.international_percent > Decimal::ZERO {
            lines.push(format!(
                "International purchases: {}% off",
                self.international_percent.normalize()
            ));
        }
        lines
    }
}
