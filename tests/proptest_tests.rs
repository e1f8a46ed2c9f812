//! Property-based tests for the benefit and eligibility rules.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vise_benefits::core::*;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a whole-cent purchase amount (0.01 to 99999.99), written with
/// 0 to 4 trailing zeros past the cents (`12.5`, `12.50`, `12.5000`).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64, 0u32..=4).prop_map(|(cents, extra)| {
        let scaled = Decimal::new(cents * 10i64.pow(extra), 2 + extra);
        if extra == 0 && cents % 100 == 0 {
            Decimal::new(cents / 100, 0)
        } else {
            scaled
        }
    })
}

/// Any positive amount at scale 0 to 6, including fractions of a cent.
fn arb_raw_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000_000i64, 0u32..=6)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn has_sub_cents(amount: Decimal) -> bool {
    amount.normalize().scale() > 2
}

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop::sample::select(Tier::ALL.to_vec())
}

/// Any date in a ~5 year span, covering every weekday many times.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..2000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn arb_country() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["USA", " usa", "Colombia", "COLOMBIA ", "France", "Japan"])
}

fn arb_weekdays() -> impl Strategy<Value = Vec<Weekday>> {
    prop::sample::subsequence(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        1..=7,
    )
}

fn arb_percent() -> impl Strategy<Value = Decimal> {
    (0u32..=60).prop_map(Decimal::from)
}

/// A custom Gold rule with random, possibly overlapping windows.
fn arb_rule() -> impl Strategy<Value = TierRule> {
    (
        arb_weekdays(),
        arb_percent(),
        arb_weekdays(),
        arb_percent(),
        (0u32..=20).prop_map(Decimal::from),
        (0u32..300).prop_map(Decimal::from),
    )
        .prop_map(|(wd_days, wd_pct, we_days, we_pct, intl, min)| {
            TierRuleBuilder::new(Tier::Gold)
                .weekday_window(wd_days, wd_pct, min)
                .weekend_window(we_days, we_pct, min)
                .international_percent(intl)
                .build()
        })
}

fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / dec!(100)
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn calculation_is_pure(
        tier in arb_tier(),
        amount in arb_amount(),
        day in arb_date(),
        pc in arb_country(),
        cc in arb_country(),
    ) {
        let catalog = TierCatalog::standard();
        let first = calculate(&catalog, tier, amount, day, pc, cc).unwrap();
        let second = calculate(&catalog, tier, amount, day, pc, cc).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn discount_is_bounded_and_consistent(
        tier in arb_tier(),
        amount in arb_raw_amount(),
        day in arb_date(),
        pc in arb_country(),
        cc in arb_country(),
    ) {
        let result = calculate(&TierCatalog::standard(), tier, amount, day, pc, cc);
        if has_sub_cents(amount) {
            prop_assert!(
                matches!(result, Err(CardError::Validation(ref v)) if v.field == "original_amount"),
                "{} was not rejected",
                amount
            );
            return Ok(());
        }

        let b = result.unwrap();
        prop_assert!(b.discount_applied >= Decimal::ZERO);
        prop_assert!(b.discount_applied <= amount);
        prop_assert_eq!(b.final_amount, amount - b.discount_applied);
        prop_assert_eq!(b.final_amount.scale(), 2);
        prop_assert_eq!(b.benefit_label.is_none(), b.discount_applied.is_zero());
    }

    #[test]
    fn windows_never_stack(rule in arb_rule(), amount in arb_amount(), day in arb_date()) {
        let catalog = TierCatalog::from_rules([rule.clone()]).unwrap();
        let b = calculate(&catalog, Tier::Gold, amount, day, "USA", "USA").unwrap();

        let wd = rule.weekday_window.as_ref().unwrap();
        let we = rule.weekend_window.as_ref().unwrap();
        let candidate = |w: &DiscountWindow| {
            if w.applies(day.weekday(), amount) {
                percent_of(amount, w.percent)
            } else {
                Decimal::ZERO
            }
        };
        let best = candidate(wd).max(candidate(we));

        let chosen = b.window.as_ref().map_or(Decimal::ZERO, |w| w.amount);
        prop_assert_eq!(chosen, best);
    }

    #[test]
    fn international_discount_is_additive(
        rule in arb_rule(),
        amount in arb_amount(),
        day in arb_date(),
    ) {
        let catalog = TierCatalog::from_rules([rule.clone()]).unwrap();
        let b = calculate(&catalog, Tier::Gold, amount, day, "France", "USA").unwrap();

        let window = b.window.as_ref().map_or(Decimal::ZERO, |w| w.amount);
        prop_assert_eq!(b.international_discount, percent_of(amount, rule.international_percent));

        let total = (window + b.international_discount).min(amount);
        let diff = (b.discount_applied - total).abs();
        prop_assert!(diff <= dec!(0.005), "discount {} vs total {}", b.discount_applied, total);
    }

    #[test]
    fn equal_windows_resolve_to_weekend(
        days in arb_weekdays(),
        pct in (1u32..=60).prop_map(Decimal::from),
        amount in arb_amount(),
        day in arb_date(),
    ) {
        let catalog = TierCatalog::from_rules([TierRuleBuilder::new(Tier::Gold)
            .weekday_window(days.clone(), pct, Decimal::ZERO)
            .weekend_window(days.clone(), pct, Decimal::ZERO)
            .build()])
        .unwrap();
        let b = calculate(&catalog, Tier::Gold, amount, day, "USA", "USA").unwrap();
        if let Some(w) = b.window {
            prop_assert_eq!(w.kind, WindowKind::Weekend);
        } else {
            prop_assert!(!days.contains(&day.weekday()) || percent_of(amount, pct).is_zero());
        }
    }

    #[test]
    fn classic_is_always_full_price(
        amount in arb_amount(),
        day in arb_date(),
        pc in arb_country(),
        cc in arb_country(),
    ) {
        let b = calculate(&TierCatalog::standard(), Tier::Classic, amount, day, pc, cc).unwrap();
        prop_assert!(b.discount_applied.is_zero());
        prop_assert_eq!(b.final_amount, amount);
        prop_assert!(b.benefit_label.is_none());
    }

    #[test]
    fn more_income_never_hurts(
        tier in arb_tier(),
        cents in 0u64..1_000_000u64,
        raise in 0u64..500_000u64,
        club in any::<bool>(),
    ) {
        let catalog = TierCatalog::standard();
        let income = Decimal::new(cents as i64, 2);
        let low = ClientApplication::new("Ana Gomez", "Colombia", income, club, tier.name());
        let high = ClientApplication {
            monthly_income: income + Decimal::new(raise as i64, 2),
            ..low.clone()
        };
        if evaluate(&catalog, &low).accepted {
            prop_assert!(evaluate(&catalog, &high).accepted);
        }
    }
}
