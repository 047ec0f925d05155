use serde::{Deserialize, Serialize};

use crate::{
    adapters::dto::file_dto::FileListResponse,
    domain::models::usage::{format_size, TotalSpace, UsageSummary},
};

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    #[serde(flatten)]
    pub total: TotalSpace,
    #[serde(rename = "usedLabel")]
    pub used_label: String,
    #[serde(rename = "percentageUsed")]
    pub percentage_used: f64,
    pub summary: Vec<UsageSummary>,
}

impl From<TotalSpace> for UsageResponse {
    fn from(total: TotalSpace) -> Self {
        Self {
            used_label: format_size(total.used),
            percentage_used: total.percentage_used(),
            summary: total.summary(),
            total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub files: FileListResponse,
    pub usage: UsageResponse,
}

#[derive(Debug, Deserialize)]
pub struct RouteVersionQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteVersionResponse {
    pub path: String,
    pub version: u64,
}
