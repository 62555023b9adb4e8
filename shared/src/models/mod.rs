//! Domain models
//!
//! Row types and request/view DTOs. Row types derive `sqlx::FromRow` behind
//! the `db` feature so non-database consumers don't pull sqlx in.

mod cart;
mod order;
mod product;
mod user;

pub use cart::{Cart, CartCreate, CartItem, CartItemInput, CartLineView, CartView};
pub use order::{
    NotificationPayload, Order, OrderAddressView, OrderCreate, OrderItem, OrderItemInput,
    OrderLineView, OrderUserView, OrderView,
};
pub use product::{Product, ProductCreate};
pub use user::{Address, User};
