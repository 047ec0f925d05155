use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    adapters::{
        dto::usage_dto::{
            DashboardResponse, RouteVersionQuery, RouteVersionResponse, UsageResponse,
        },
        extractors::CurrentUser,
    },
    application::{error::ApplicationError, use_cases::FileUseCase},
};

pub struct UsageController;

impl UsageController {
    /// GET /api/v1/usage
    pub async fn get_usage(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
    ) -> Result<Json<UsageResponse>, ApplicationError> {
        let total = files.total_space_used(&user).await?;
        Ok(Json(UsageResponse::from(total)))
    }

    /// GET /api/v1/dashboard
    pub async fn get_dashboard(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
    ) -> Result<Json<DashboardResponse>, ApplicationError> {
        let (recent, total) = files.dashboard(&user).await?;
        Ok(Json(DashboardResponse {
            files: recent.into(),
            usage: total.into(),
        }))
    }

    /// GET /api/v1/routes/version?path=
    pub async fn get_route_version(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(_user): CurrentUser,
        Query(query): Query<RouteVersionQuery>,
    ) -> Result<Json<RouteVersionResponse>, ApplicationError> {
        let version = files.route_version(&query.path).await?;
        Ok(Json(RouteVersionResponse {
            path: query.path,
            version,
        }))
    }
}
