use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("payment processor unreachable after {0} attempts")]
    Unreachable(u32),
}

/// Settlement record returned to callers and echoed into responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub reference: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub memo: String,
    pub settled_at: DateTime<Utc>,
}

/// Simulated payment processor.
///
/// Charges settle after a fixed delay and always succeed, but the call site
/// shape — awaited charge, typed error, capped exponential-backoff retry —
/// matches what a real processor integration needs, so swapping one in
/// changes only `attempt_charge`.
#[derive(Clone)]
pub struct PaymentGateway {
    settle_delay: Duration,
    max_attempts: u32,
    base_backoff: Duration,
}

impl PaymentGateway {
    pub fn new(settle_delay: Duration, max_attempts: u32) -> Self {
        Self {
            settle_delay,
            max_attempts: max_attempts.max(1),
            base_backoff: Duration::from_millis(200),
        }
    }

    /// `PAYMENT_SETTLE_MS` controls the simulated settlement delay;
    /// `PAYMENT_MAX_ATTEMPTS` caps the retry loop.
    pub fn from_env() -> Self {
        let settle_ms = std::env::var("PAYMENT_SETTLE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(750);
        let max_attempts = std::env::var("PAYMENT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);
        Self::new(Duration::from_millis(settle_ms), max_attempts)
    }

    /// Charge with retries: exponential backoff, capped at `max_attempts`.
    pub async fn charge(
        &self,
        amount: Decimal,
        currency: &str,
        memo: &str,
    ) -> Result<PaymentReceipt, PaymentError> {
        let mut backoff = self.base_backoff;

        for attempt in 1..=self.max_attempts {
            match self.attempt_charge(amount, currency, memo).await {
                Ok(receipt) => {
                    info!(
                        reference = %receipt.reference,
                        %amount,
                        currency,
                        memo,
                        "payment settled"
                    );
                    return Ok(receipt);
                }
                // A decline is an answer, not an outage — no retry.
                Err(PaymentError::Declined(reason)) => {
                    return Err(PaymentError::Declined(reason));
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(attempt, %amount, "payment attempt failed: {e}; retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(_) => return Err(PaymentError::Unreachable(self.max_attempts)),
            }
        }

        Err(PaymentError::Unreachable(self.max_attempts))
    }

    /// One settlement round-trip against the (simulated) processor.
    async fn attempt_charge(
        &self,
        amount: Decimal,
        currency: &str,
        memo: &str,
    ) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.settle_delay).await;

        Ok(PaymentReceipt {
            reference: Uuid::new_v4(),
            amount,
            currency: currency.to_string(),
            memo: memo.to_string(),
            settled_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn charge_settles_with_receipt() {
        let gateway = PaymentGateway::new(Duration::from_millis(1), 3);
        let receipt = gateway
            .charge(Decimal::from(1000), "USD", "Milestone escrow")
            .await
            .unwrap();
        assert_eq!(receipt.amount, Decimal::from(1000));
        assert_eq!(receipt.currency, "USD");
    }
}
