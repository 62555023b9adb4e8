//! Order status types and transition rules

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment status as reported by the gateway, mapped to our internal vocabulary
///
/// `Success` and `Failure` are terminal: once reached they are never
/// overwritten, no matter what later callbacks claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failure,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Administrative shipment-progress state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    #[default]
    Placed,
    Processing,
    Shipping,
    Delivered,
    Cancel,
}

impl FulfillmentStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancel)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Processing => "processing",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Cancel => "cancel",
        }
    }
}

/// Events that drive fulfillment transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentEvent {
    /// Admin confirms the order (decrements inventory)
    Confirm,
    /// Admin attaches a carrier tracking code
    Ship,
    /// Carrier delivered the parcel
    Deliver,
    /// Admin cancels the order
    Cancel,
}

impl FulfillmentEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Ship => "ship",
            Self::Deliver => "deliver",
            Self::Cancel => "cancel",
        }
    }
}

/// Rejected state/event pair
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot apply '{event}' to order in '{from}' state", event = .event.as_str(), from = .from.as_str())]
pub struct TransitionError {
    pub from: FulfillmentStatus,
    pub event: FulfillmentEvent,
}

/// Compute the next payment status for a gateway-reported status.
///
/// Returns `None` when the callback is a no-op: the current status is
/// terminal, or the reported status equals the current one (duplicate
/// delivery). Non-terminal statuses are last-write-wins.
pub fn payment_transition(current: PaymentStatus, reported: PaymentStatus) -> Option<PaymentStatus> {
    if current.is_terminal() || current == reported {
        return None;
    }
    Some(reported)
}

/// Compute the next fulfillment status for an event.
///
/// The full transition table; any pair not listed is illegal:
///
/// | from       | event   | to         |
/// |------------|---------|------------|
/// | placed     | confirm | processing |
/// | processing | ship    | shipping   |
/// | shipping   | deliver | delivered  |
/// | non-terminal | cancel | cancel    |
pub fn fulfillment_transition(
    current: FulfillmentStatus,
    event: FulfillmentEvent,
) -> Result<FulfillmentStatus, TransitionError> {
    use FulfillmentEvent as E;
    use FulfillmentStatus as S;

    match (current, event) {
        (S::Placed, E::Confirm) => Ok(S::Processing),
        (S::Processing, E::Ship) => Ok(S::Shipping),
        (S::Shipping, E::Deliver) => Ok(S::Delivered),
        (from, E::Cancel) if !from.is_terminal() => Ok(S::Cancel),
        (from, event) => Err(TransitionError { from, event }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_last_write_wins_until_terminal() {
        assert_eq!(
            payment_transition(PaymentStatus::Pending, PaymentStatus::Success),
            Some(PaymentStatus::Success)
        );
        assert_eq!(
            payment_transition(PaymentStatus::Pending, PaymentStatus::Failure),
            Some(PaymentStatus::Failure)
        );
        // duplicate callback is a no-op
        assert_eq!(payment_transition(PaymentStatus::Pending, PaymentStatus::Pending), None);
    }

    #[test]
    fn test_payment_terminal_is_monotonic() {
        assert_eq!(payment_transition(PaymentStatus::Success, PaymentStatus::Failure), None);
        assert_eq!(payment_transition(PaymentStatus::Success, PaymentStatus::Pending), None);
        assert_eq!(payment_transition(PaymentStatus::Failure, PaymentStatus::Success), None);
    }

    #[test]
    fn test_happy_path_chain() {
        let s = fulfillment_transition(FulfillmentStatus::Placed, FulfillmentEvent::Confirm)
            .expect("placed -> processing");
        assert_eq!(s, FulfillmentStatus::Processing);
        let s = fulfillment_transition(s, FulfillmentEvent::Ship).expect("processing -> shipping");
        assert_eq!(s, FulfillmentStatus::Shipping);
        let s = fulfillment_transition(s, FulfillmentEvent::Deliver).expect("shipping -> delivered");
        assert_eq!(s, FulfillmentStatus::Delivered);
    }

    #[test]
    fn test_cancel_from_any_non_terminal() {
        for from in [
            FulfillmentStatus::Placed,
            FulfillmentStatus::Processing,
            FulfillmentStatus::Shipping,
        ] {
            assert_eq!(
                fulfillment_transition(from, FulfillmentEvent::Cancel),
                Ok(FulfillmentStatus::Cancel)
            );
        }
    }

    #[test]
    fn test_cancel_from_terminal_rejected() {
        for from in [FulfillmentStatus::Delivered, FulfillmentStatus::Cancel] {
            assert!(fulfillment_transition(from, FulfillmentEvent::Cancel).is_err());
        }
    }

    #[test]
    fn test_undefined_pairs_rejected() {
        // ship before confirm
        let err = fulfillment_transition(FulfillmentStatus::Placed, FulfillmentEvent::Ship)
            .expect_err("ship from placed must fail");
        assert_eq!(err.from, FulfillmentStatus::Placed);
        assert_eq!(err.event, FulfillmentEvent::Ship);

        // double confirm
        assert!(
            fulfillment_transition(FulfillmentStatus::Processing, FulfillmentEvent::Confirm)
                .is_err()
        );
        // deliver before shipping
        assert!(
            fulfillment_transition(FulfillmentStatus::Processing, FulfillmentEvent::Deliver)
                .is_err()
        );
    }
}
