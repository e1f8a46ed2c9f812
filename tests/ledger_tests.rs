#![cfg(feature = "ledger")]

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vise_benefits::core::*;
use vise_benefits::ledger::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 6, 20)
}

fn service() -> CardService<InMemoryClientDirectory, InMemoryPurchaseLedger> {
    CardService::in_memory(TierCatalog::standard())
}

fn purchase(client_id: u64, amount: Decimal, day: NaiveDate, country: &str) -> PurchaseRequest {
    PurchaseRequest {
        client_id,
        amount,
        currency: "USD".into(),
        purchase_date: day,
        purchase_country: country.into(),
    }
}

// --- Registration ---

#[test]
fn register_gold_without_club() {
    let service = service();
    let client = service
        .register_client(&ClientApplication::new(
            " Ana Gomez ",
            "Colombia",
            dec!(500),
            false,
            "Gold",
        ))
        .unwrap();

    assert_eq!(client.id, 1);
    assert_eq!(client.name, "Ana Gomez");
    assert_eq!(client.card_tier, Tier::Gold);
    assert_eq!(client.status, ClientStatus::Registered);
    assert_eq!(service.client(1).unwrap(), client);
}

#[test]
fn rejected_registration_is_not_stored() {
    let service = service();
    let err = service
        .register_client(&ClientApplication::new(
            "Ana Gomez",
            "Colombia",
            dec!(499),
            false,
            "Gold",
        ))
        .unwrap_err();
    assert!(matches!(err, CardError::Eligibility(e) if e.rule() == "income"));
    assert!(service.clients().is_empty());
}

#[test]
fn concurrent_registrations_get_unique_ids() {
    let service = Arc::new(service());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..20)
                    .map(|i| {
                        service
                            .register_client(&ClientApplication::new(
                                format!("client {t}-{i}"),
                                "Chile",
                                dec!(100),
                                false,
                                "Classic",
                            ))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 80);
    assert_eq!(service.clients().len(), 80);
}

// --- Purchases ---

#[test]
fn approved_purchase_is_recorded_with_benefit() {
    let service = service();
    let client = service
        .register_client(&ClientApplication::new(
            "Carla", "Colombia", dec!(1500), true, "Platinum",
        ))
        .unwrap();

    // 2024-06-15 is a Saturday.
    let p = service
        .process_purchase(&purchase(client.id, dec!(250), date(2024, 6, 15), "Spain"), today())
        .unwrap();

    assert_eq!(p.id, 1);
    assert_eq!(p.status, PurchaseStatus::Approved);
    assert_eq!(p.discount_applied, dec!(87.50));
    assert_eq!(p.final_amount, dec!(162.50));
    assert_eq!(
        p.benefit_label.as_deref(),
        Some("Saturday – 30% off + International 5%")
    );
    assert_eq!(service.purchases_for_client(client.id).unwrap(), vec![p]);
}

#[test]
fn restricted_purchase_is_recorded_as_rejected() {
    let service = service();
    let client = service
        .register_client(&ClientApplication::new(
            "Mark", "Canada", dec!(3000), true, "Black",
        ))
        .unwrap();

    let err = service
        .process_purchase(&purchase(client.id, dec!(500), date(2024, 6, 10), "China"), today())
        .unwrap_err();
    assert_eq!(
        err,
        CardError::Restriction {
            tier: Tier::Black,
            country: "China".into()
        }
    );

    let recorded = service.purchases();
    assert_eq!(recorded.len(), 1);
    let p = &recorded[0];
    assert_eq!(p.status, PurchaseStatus::Rejected);
    assert_eq!(p.discount_applied, dec!(0));
    assert_eq!(p.final_amount, dec!(500));
    assert!(p.benefit_label.is_none());
    assert!(p.rejection_reason.as_deref().unwrap().contains("China"));
}

#[test]
fn future_purchase_is_refused_without_record() {
    let service = service();
    let client = service
        .register_client(&ClientApplication::new("Ana", "Peru", dec!(0), false, "Classic"))
        .unwrap();

    let err = service
        .process_purchase(&purchase(client.id, dec!(10), date(2024, 6, 21), "Peru"), today())
        .unwrap_err();
    assert!(matches!(err, CardError::Validation(v) if v.field == "purchase_date"));
    assert!(service.purchases().is_empty());
}

#[test]
fn sub_cent_purchase_is_refused_without_record() {
    let service = service();
    let client = service
        .register_client(&ClientApplication::new("Mark", "Canada", dec!(3000), true, "Black"))
        .unwrap();

    // Restricted country too: the amount check runs first, so nothing is recorded.
    let err = service
        .process_purchase(&purchase(client.id, dec!(10.005), date(2024, 6, 13), "China"), today())
        .unwrap_err();
    assert!(matches!(err, CardError::Validation(v) if v.field == "amount"));
    assert!(service.purchases().is_empty());
}

#[test]
fn purchases_for_unknown_client() {
    assert_eq!(
        service().purchases_for_client(7).unwrap_err(),
        CardError::ClientNotFound(7)
    );
}

#[test]
fn purchases_are_listed_per_client() {
    let service = service();
    let a = service
        .register_client(&ClientApplication::new("Ana", "Peru", dec!(600), false, "Gold"))
        .unwrap();
    let b = service
        .register_client(&ClientApplication::new("Bea", "Peru", dec!(600), false, "Gold"))
        .unwrap();

    for (client, amount) in [(a.id, dec!(150)), (b.id, dec!(20)), (a.id, dec!(30))] {
        service
            .process_purchase(&purchase(client, amount, date(2024, 6, 11), "Peru"), today())
            .unwrap();
    }

    let mine = service.purchases_for_client(a.id).unwrap();
    assert_eq!(mine.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
    // Tuesday, over 100: Gold weekday window.
    assert_eq!(mine[0].final_amount, dec!(127.50));
    assert_eq!(mine[1].final_amount, dec!(30.00));
    assert_eq!(service.purchases().len(), 3);
}
