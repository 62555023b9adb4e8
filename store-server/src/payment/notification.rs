//! Webhook notification handling
//!
//! Maps the provider's status vocabulary onto [`PaymentStatus`] and applies
//! the result under the idempotence rules: terminal statuses are never
//! overwritten, duplicate and unrecognized callbacks are acknowledged as
//! no-ops so the gateway stops retrying.

use shared::models::NotificationPayload;
use shared::order::{PaymentStatus, payment_transition};
use shared::AppResult;
use sqlx::SqlitePool;

use crate::db::repository::order;

/// What a callback did, for response text and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Status written
    Applied(PaymentStatus),
    /// Recognized but nothing to change (duplicate, terminal, or unmapped)
    Ignored,
    /// Transaction reference matches no order
    UnknownOrder,
}

/// Map a provider status pair to our internal vocabulary.
///
/// | transaction_status          | fraud_status | result  |
/// |-----------------------------|--------------|---------|
/// | capture                     | accept       | success |
/// | settlement                  | *            | success |
/// | cancel / deny / expire      | *            | failure |
/// | pending                     | *            | pending |
/// | anything else               | *            | no-op   |
pub fn map_provider_status(
    transaction_status: &str,
    fraud_status: Option<&str>,
) -> Option<PaymentStatus> {
    match transaction_status {
        "capture" => match fraud_status {
            Some("accept") => Some(PaymentStatus::Success),
            _ => None,
        },
        "settlement" => Some(PaymentStatus::Success),
        "cancel" | "deny" | "expire" => Some(PaymentStatus::Failure),
        "pending" => Some(PaymentStatus::Pending),
        _ => None,
    }
}

/// Apply one webhook notification.
///
/// Every outcome short of a database failure is `Ok`: the webhook endpoint
/// must acknowledge with 200 or the provider keeps retrying.
pub async fn apply_notification(
    pool: &SqlitePool,
    payload: &NotificationPayload,
) -> AppResult<CallbackOutcome> {
    let Some(reported) = map_provider_status(
        &payload.transaction_status,
        payload.fraud_status.as_deref(),
    ) else {
        tracing::info!(
            order_id = %payload.order_id,
            status = %payload.transaction_status,
            "Unmapped gateway status, ignoring"
        );
        return Ok(CallbackOutcome::Ignored);
    };

    let Some(existing) = order::find_by_transaction(pool, &payload.order_id).await? else {
        tracing::warn!(order_id = %payload.order_id, "Notification for unknown order");
        return Ok(CallbackOutcome::UnknownOrder);
    };

    let Some(next) = payment_transition(existing.payment_status, reported) else {
        return Ok(CallbackOutcome::Ignored);
    };

    // The SQL guard re-checks terminality; a concurrent callback that won the
    // race turns this write into a no-op
    if order::set_payment_status(pool, &payload.order_id, next).await? {
        tracing::info!(
            order_id = %payload.order_id,
            from = existing.payment_status.as_str(),
            to = next.as_str(),
            "Payment status updated"
        );
        Ok(CallbackOutcome::Applied(next))
    } else {
        Ok(CallbackOutcome::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_requires_accept() {
        assert_eq!(
            map_provider_status("capture", Some("accept")),
            Some(PaymentStatus::Success)
        );
        assert_eq!(map_provider_status("capture", Some("challenge")), None);
        assert_eq!(map_provider_status("capture", None), None);
    }

    #[test]
    fn test_settlement_is_success() {
        assert_eq!(
            map_provider_status("settlement", None),
            Some(PaymentStatus::Success)
        );
    }

    #[test]
    fn test_failure_family() {
        for status in ["cancel", "deny", "expire"] {
            assert_eq!(
                map_provider_status(status, None),
                Some(PaymentStatus::Failure),
                "{status} should map to failure"
            );
        }
    }

    #[test]
    fn test_pending_and_unknown() {
        assert_eq!(
            map_provider_status("pending", None),
            Some(PaymentStatus::Pending)
        );
        assert_eq!(map_provider_status("refund", None), None);
        assert_eq!(map_provider_status("", None), None);
    }
}
