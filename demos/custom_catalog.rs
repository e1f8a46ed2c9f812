use chrono::NaiveDate;
use rust_decimal_macros::dec;
use vise_benefits::core::*;

fn main() {
    // ── 1. Dump the standard table as JSON ────────────────────────────
    let standard = TierCatalog::standard();
    match standard.to_json() {
        Ok(json) => println!("=== Standard catalog ===\n{json}"),
        Err(e) => println!("failed to serialize catalog: {e}"),
    }

    // ── 2. Load a custom table ────────────────────────────────────────
    let json = r#"[
        { "tier": "Classic", "min_income": "0", "requires_club": false },
        {
            "tier": "Gold",
            "min_income": "300",
            "requires_club": false,
            "weekday_window": { "days": ["Mon", "Tue"], "percent": "12", "min_purchase": "40" },
            "weekend_window": { "days": ["Sat", "Sun"], "percent": "12", "min_purchase": "40" }
        }
    ]"#;
    let catalog = match TierCatalog::from_json(json) {
        Ok(c) => c,
        Err(e) => {
            println!("invalid catalog: {e}");
            return;
        }
    };

    println!("\n=== Custom catalog ===");
    let sunday = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
    for tier in Tier::ALL {
        match calculate(&catalog, tier, dec!(75), sunday, "Peru", "Peru") {
            Ok(b) => println!(
                "  {tier}: final {} ({})",
                b.final_amount,
                b.benefit_label.as_deref().unwrap_or("no benefit")
            ),
            Err(e) => println!("  {tier}: {e}"),
        }
    }
}
