pub mod auth;
pub mod classes;
pub mod courses;
pub mod health;
pub mod students;
pub mod transactions;
pub mod users;
