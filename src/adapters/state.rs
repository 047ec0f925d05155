use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::use_cases::{AuthUseCase, FileUseCase},
    domain::config::settings::Settings,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub auth: Arc<AuthUseCase>,
    pub files: Arc<FileUseCase>,
}
