use chrono::NaiveDate;
use rust_decimal_macros::dec;
use vise_benefits::core::*;

fn main() {
    let catalog = TierCatalog::standard();

    // ── 1. Tier table ─────────────────────────────────────────────────
    println!("=== Tiers ===");
    for rule in catalog.rules() {
        println!("{}", rule.tier);
        for line in rule.describe_restrictions() {
            println!("  requires: {line}");
        }
        for line in rule.describe_benefits() {
            println!("  benefit:  {line}");
        }
    }

    // ── 2. Discounts for one purchase across tiers ────────────────────
    println!("\n=== $250 on Saturday 2024-06-15, Spain, client from Colombia ===");
    let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    for tier in catalog.tiers() {
        match calculate(&catalog, tier, dec!(250), saturday, "Spain", "Colombia") {
            Ok(b) => println!(
                "  {tier:<9} discount {:>7}  final {:>7}  {}",
                b.discount_applied,
                b.final_amount,
                b.benefit_label.as_deref().unwrap_or("-")
            ),
            Err(e) => println!("  {tier:<9} error: {e}"),
        }
    }

    // ── 3. Purchase-time restriction ──────────────────────────────────
    println!("\n=== Restrictions ===");
    for country in ["France", "China"] {
        let d = check_purchase(&catalog, Tier::Black, "Canada", country).unwrap();
        println!("  Black card in {country}: {}", d.message);
    }
}
