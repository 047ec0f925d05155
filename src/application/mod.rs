pub mod dto;
pub mod error;
pub mod repositories;
pub mod services;
pub mod use_cases;
