//! User record stores.

pub mod users;

pub use users::InMemoryUserStore;
