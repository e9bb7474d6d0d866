pub mod listing;
pub mod order;

pub use listing::{Listing, NewListing};
pub use order::{GpsPoint, Order, OrderDetails, PaymentCallback};
