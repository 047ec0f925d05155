use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::domain::config::settings::{Provider, Settings};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "publicUrl")]
    pub public_url: String,
    pub provider: Provider,
    #[serde(rename = "mailConfigured")]
    pub mail_configured: bool,
    pub config: HealthConfigInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

#[derive(Debug, Serialize)]
pub struct HealthConfigInfo {
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: u64,
    #[serde(rename = "storageQuota")]
    pub storage_quota: u64,
    #[serde(rename = "otpTtlSeconds")]
    pub otp_ttl_seconds: u64,
    #[serde(rename = "sessionTtlSeconds")]
    pub session_ttl_seconds: u64,
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health, operator only
    pub async fn health_check(State(settings): State<Arc<Settings>>) -> Json<HealthResponse> {
        info!("Health check requested");

        let config_info = HealthConfigInfo {
            max_upload_size: settings.max_upload_size,
            storage_quota: settings.storage_quota,
            otp_ttl_seconds: settings.otp_ttl_seconds,
            session_ttl_seconds: settings.session_ttl_seconds,
        };

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let cpu_usage = sys.global_cpu_usage();
        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        let metrics = SystemMetrics {
            cpu_usage_percent: cpu_usage,
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            public_url: settings.public_url.clone(),
            provider: settings.provider.clone(),
            mail_configured: settings.mail.is_some(),
            config: config_info,
            metrics,
        })
    }
}
