pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::Transaction;
pub use router::init_transactions_router;
