//! Back-office services.

pub mod dashboard;
pub mod orders;
pub mod products;
pub mod search;
pub mod settings;
pub mod users;
