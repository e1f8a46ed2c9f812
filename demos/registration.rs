use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;
use vise_benefits::core::*;
use vise_benefits::ledger::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let service = CardService::in_memory(TierCatalog::standard());

    // ── 1. Registrations ──────────────────────────────────────────────
    println!("=== Registrations ===");
    let applications = [
        ClientApplication::new("Ana Gomez", "Colombia", dec!(499), false, "Gold"),
        ClientApplication::new("Ana Gomez", "Colombia", dec!(500), false, "Gold"),
        ClientApplication::new("Li Wei", "China", dec!(5000), true, "Black"),
        ClientApplication::new("Mark Stone", "Canada", dec!(5000), true, "Black"),
        ClientApplication::new("X", "Peru", dec!(100), false, "Classic"),
    ];
    for app in &applications {
        match service.register_client(app) {
            Ok(c) => println!("  registered #{} {} ({})", c.id, c.name, c.card_tier),
            Err(e) => println!("  rejected {} for {}: {e}", app.name, app.requested_tier),
        }
    }

    // ── 2. Purchases ──────────────────────────────────────────────────
    println!("\n=== Purchases ===");
    let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
    let requests = [
        (1, dec!(120), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), "Colombia"),
        (2, dec!(250), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), "USA"),
        (2, dec!(300), NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(), "China"),
    ];
    for (client_id, amount, purchase_date, country) in requests {
        let request = PurchaseRequest {
            client_id,
            amount,
            currency: "USD".into(),
            purchase_date,
            purchase_country: country.into(),
        };
        match service.process_purchase(&request, today) {
            Ok(p) => println!(
                "  #{} client {} paid {} (saved {}) {}",
                p.id,
                p.client_id,
                p.final_amount,
                p.discount_applied,
                p.benefit_label.as_deref().unwrap_or("")
            ),
            Err(e) => println!("  client {client_id}: {e}"),
        }
    }

    // ── 3. Ledger ─────────────────────────────────────────────────────
    println!("\n=== Ledger ===");
    for p in service.purchases() {
        println!("  #{} {:?} {} {}", p.id, p.status, p.original_amount, p.currency);
    }
}
