pub mod action;
pub mod file;
pub mod query;
pub mod session;
pub mod usage;
pub mod user;
