pub mod events;
pub mod hub;
pub mod ws;

pub use events::{ClientEvent, ServerEvent};
pub use hub::OrderHub;
