pub mod controller;
pub mod structs;

pub use controller::ListingController;
pub use structs::{FilterComposition, ListingOptions, ListingSnapshot};
