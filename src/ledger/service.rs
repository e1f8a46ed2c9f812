use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::directory::{ClientDirectory, InMemoryClientDirectory, NewClient};
use super::purchases::{InMemoryPurchaseLedger, NewPurchase, PurchaseLedger};
use crate::core::*;

/// Runs client registrations and purchases through the card rules and
/// records the results.
///
/// The service never reads the clock: purchase dates are checked against
/// the `today` passed by the caller.
#[derive(Debug)]
pub struct CardService<D, L> {
    catalog: TierCatalog,
    clients: D,
    purchases: L,
}

impl CardService<InMemoryClientDirectory, InMemoryPurchaseLedger> {
    /// Service backed by process-local storage.
    pub fn in_memory(catalog: TierCatalog) -> Self {
        Self::new(
            catalog,
            InMemoryClientDirectory::new(),
            InMemoryPurchaseLedger::new(),
        )
    }
}

impl<D: ClientDirectory, L: PurchaseLedger> CardService<D, L> {
    pub fn new(catalog: TierCatalog, clients: D, purchases: L) -> Self {
        Self {
            catalog,
            clients,
            purchases,
        }
    }

    pub fn catalog(&self) -> &TierCatalog {
        &self.catalog
    }

    /// Register a client if eligible for the requested tier.
    ///
    /// Rejected applications are not stored.
    pub fn register_client(&self, application: &ClientApplication) -> Result<Client, CardError> {
        let tier = check_eligibility(&self.catalog, application).inspect_err(|err| {
            tracing::warn!(
                tier = application.requested_tier.trim(),
                reason = %err,
                "registration rejected"
            );
        })?;

        Ok(self.clients.create(NewClient {
            name: application.name.trim().to_string(),
            country: application.country.trim().to_string(),
            monthly_income: application.monthly_income,
            vise_club_member: application.vise_club_member,
            card_tier: tier,
            status: ClientStatus::Registered,
        }))
    }

    /// Evaluate and record a purchase.
    ///
    /// A purchase vetoed by the restriction checker is recorded as
    /// `Rejected` (no discount) and the restriction error is returned.
    pub fn process_purchase(
        &self,
        request: &PurchaseRequest,
        today: NaiveDate,
    ) -> Result<Purchase, CardError> {
        let currency = validate_request(request, today)?;
        let client = self.registered_client(request.client_id)?;

        match ensure_purchase_allowed(
            &self.catalog,
            client.card_tier,
            &client.country,
            &request.purchase_country,
        ) {
            Ok(()) => {}
            Err(err @ CardError::Restriction { .. }) => {
                self.purchases.create(NewPurchase {
                    client_id: client.id,
                    original_amount: request.amount,
                    currency,
                    purchase_date: request.purchase_date,
                    purchase_country: request.purchase_country.trim().to_string(),
                    discount_applied: Decimal::ZERO,
                    final_amount: request.amount,
                    benefit_label: None,
                    status: PurchaseStatus::Rejected,
                    rejection_reason: Some(err.to_string()),
                });
                return Err(err);
            }
            Err(err) => return Err(err),
        }

        let benefit = calculate(
            &self.catalog,
            client.card_tier,
            request.amount,
            request.purchase_date,
            &request.purchase_country,
            &client.country,
        )?;

        Ok(self.purchases.create(NewPurchase {
            client_id: client.id,
            original_amount: request.amount,
            currency,
            purchase_date: request.purchase_date,
            purchase_country: request.purchase_country.trim().to_string(),
            discount_applied: benefit.discount_applied,
            final_amount: benefit.final_amount,
            benefit_label: benefit.benefit_label,
            status: PurchaseStatus::Approved,
            rejection_reason: None,
        }))
    }

    pub fn clients(&self) -> Vec<Client> {
        self.clients.list()
    }

    pub fn client(&self, id: u64) -> Result<Client, CardError> {
        self.clients.get(id).ok_or(CardError::ClientNotFound(id))
    }

    pub fn purchases(&self) -> Vec<Purchase> {
        self.purchases.list()
    }

    /// Purchases of one client; fails if the client does not exist.
    pub fn purchases_for_client(&self, client_id: u64) -> Result<Vec<Purchase>, CardError> {
        self.client(client_id)?;
        Ok(self.purchases.list_by_client(client_id))
    }

    fn registered_client(&self, id: u64) -> Result<Client, CardError> {
        let client = self.client(id)?;
        if client.status != ClientStatus::Registered {
            return Err(ValidationError::new(
                "client_id",
                format!("client {id} is not registered"),
            )
            .into());
        }
        Ok(client)
    }
}

/// Boundary checks on a purchase request. Returns the normalized currency.
fn validate_request(request: &PurchaseRequest, today: NaiveDate) -> Result<String, CardError> {
    validate_amount("amount", request.amount)?;

    let currency = request.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new(
            "currency",
            format!("'{currency}' is not a 3-letter currency code"),
        )
        .into());
    }

    if request.purchase_date > today {
        return Err(ValidationError::new(
            "purchase_date",
            format!(
                "purchase date {} is in the future (today is {today})",
                request.purchase_date
            ),
        )
        .into());
    }

    if request.purchase_country.trim().chars().count() < MIN_FIELD_LEN {
        return Err(ValidationError::new(
            "purchase_country",
            format!("purchase_country must be at least {MIN_FIELD_LEN} characters"),
        )
        .into());
    }

    Ok(currency.to_ascii_uppercase())
}
