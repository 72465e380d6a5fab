pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use controllers::{BillsController, NewBillController};
pub use error::{BilledError, StoreError};
pub use store::{BillStore, InMemoryStore};
