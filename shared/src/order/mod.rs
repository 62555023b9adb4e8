//! Order state machine
//!
//! Payment and fulfillment status are governed by explicit transition
//! functions rather than ad hoc status writes. Every mutation path (webhook
//! handler, admin endpoints) goes through [`payment_transition`] /
//! [`fulfillment_transition`] so that illegal pairs are rejected in exactly
//! one place.

mod status;

pub use status::{
    FulfillmentEvent, FulfillmentStatus, PaymentStatus, TransitionError, fulfillment_transition,
    payment_transition,
};
