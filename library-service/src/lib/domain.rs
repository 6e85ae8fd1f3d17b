pub mod account;
pub mod auth;
pub mod book;
pub mod deadline;
pub mod errors;
pub mod hashing;
pub mod query;
pub mod repository;
