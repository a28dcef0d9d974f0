//! Client-side pieces: building and submitting orders, and following the
//! active orders as they change.

pub mod api;
pub mod cart;
pub mod feed;

pub use api::{ClientError, OrderApi};
pub use cart::{Cart, CartLine};
pub use feed::{ConnectionState, FeedUpdate, HubFeed, LocalOrders, OrderFeed, PollingFeed};
