pub mod auth_dto;
pub mod file_document_dto;
pub mod file_dto;
pub mod usage_dto;
pub mod user_dto;
