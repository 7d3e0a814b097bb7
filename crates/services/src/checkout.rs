use std::time::Duration;

use serde::Serialize;
use study_core::model::SubscriptionTier;
use tracing::info;

use crate::error::CheckoutError;
use crate::subscription_service::SubscriptionService;

/// Simulated processing time before the upgrade is applied.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

const CARD_NUMBER_MAX: usize = 19;
const EXPIRY_MAX: usize = 5;
const CVV_MAX: usize = 3;

/// The single paid plan on offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumPlan {
    pub name: &'static str,
    pub price_cents: u32,
    pub features: &'static [&'static str],
}

impl PremiumPlan {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            name: "Premium",
            price_cents: 999,
            features: &[
                "Unlimited notes and flashcards",
                "Advanced study analytics",
                "Custom study schedules",
                "Priority support",
                "Export to PDF",
                "Offline access",
            ],
        }
    }

    /// Monthly price formatted as dollars, e.g. `$9.99`.
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Card fields as typed into the checkout form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    #[must_use]
    pub fn new(
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Only presence and length are checked.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` for a blank field and
    /// `CheckoutError::FieldTooLong` when a field exceeds its input limit.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        check_field("card number", &self.card_number, CARD_NUMBER_MAX)?;
        check_field("expiry date", &self.expiry, EXPIRY_MAX)?;
        check_field("CVV", &self.cvv, CVV_MAX)
    }

    /// Last four digits of the card number, for receipts.
    #[must_use]
    pub fn card_last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

// Card data never reaches logs.
impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_last_four", &self.card_last_four())
            .finish_non_exhaustive()
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CheckoutError::MissingField { field });
    }
    if value.chars().count() > max {
        return Err(CheckoutError::FieldTooLong { field, max });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub plan: &'static str,
    pub amount_cents: u32,
    pub card_last_four: String,
    pub tier: SubscriptionTier,
}

/// Simulated premium checkout. No payment is ever taken.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    subscription: SubscriptionService,
    plan: PremiumPlan,
    delay: Duration,
}

impl CheckoutService {
    #[must_use]
    pub fn new(subscription: SubscriptionService, delay: Duration) -> Self {
        Self {
            subscription,
            plan: PremiumPlan::standard(),
            delay,
        }
    }

    #[must_use]
    pub fn plan(&self) -> &PremiumPlan {
        &self.plan
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validate the form, wait out the processing delay, then upgrade.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` for invalid fields, when the subscription is
    /// already premium, or when the upgraded tier cannot be persisted.
    pub async fn checkout(&self, details: &PaymentDetails) -> Result<CheckoutReceipt, CheckoutError> {
        details.validate()?;
        if self.subscription.is_premium() {
            return Err(CheckoutError::AlreadyPremium);
        }

        info!(
            plan = self.plan.name,
            delay_ms = self.delay.as_millis(),
            "processing payment"
        );
        tokio::time::sleep(self.delay).await;
        self.subscription.upgrade_to_premium().await?;

        Ok(CheckoutReceipt {
            plan: self.plan.name,
            amount_cents: self.plan.price_cents,
            card_last_four: details.card_last_four(),
            tier: self.subscription.get(),
        })
    }
}
