use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OTP_TTL_SECONDS: u64 = 15 * 60;
const DEFAULT_SESSION_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;
const DEFAULT_MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;
const DEFAULT_STORAGE_QUOTA: u64 = 2 * 1024 * 1024 * 1024;
const DEFAULT_AVATAR: &str = "https://avatars.githubusercontent.com/u/141593846?v=4";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Provider {
    #[serde(rename = "s3")]
    S3,
    #[serde(rename = "supabase")]
    Supabase,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct S3Settings {
    pub endpoint: Option<String>,
    pub region: String,
    #[serde(rename = "accessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "secretAccessKey")]
    pub secret_access_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseSettings {
    #[serde(rename = "storageUrl")]
    pub storage_url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MailSettings {
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    pub public_url: String,
    pub service_secret: String,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub provider: Provider,
    pub s3: Option<S3Settings>,
    pub supabase: Option<SupabaseSettings>,
    pub mail: Option<MailSettings>,
    pub otp_ttl_seconds: u64,
    pub session_ttl_seconds: u64,
    pub max_upload_size: u64,
    pub storage_quota: u64,
    pub default_avatar: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let provider = match lookup("STORAGE_PROVIDER").as_deref().map(str::trim) {
            None | Some("s3") => Provider::S3,
            Some("supabase") => Provider::Supabase,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        let s3 = match provider {
            Provider::S3 => Some(S3Settings {
                endpoint: lookup("S3_ENDPOINT").filter(|v| !v.trim().is_empty()),
                region: lookup("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: required("S3_ACCESS_KEY_ID")?,
                secret_access_key: required("S3_SECRET_ACCESS_KEY")?,
                bucket_name: required("S3_BUCKET")?,
            }),
            Provider::Supabase => None,
        };

        let supabase = match provider {
            Provider::Supabase => Some(SupabaseSettings {
                storage_url: required("SUPABASE_STORAGE_URL")?,
                api_key: required("SUPABASE_API_KEY")?,
                bucket_name: required("SUPABASE_BUCKET")?,
            }),
            Provider::S3 => None,
        };

        let mail = match lookup("MAIL_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(api_url) => Some(MailSettings {
                api_url,
                api_key: required("MAIL_API_KEY")?,
                from: required("MAIL_FROM")?,
            }),
            None => None,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            public_url: lookup("PUBLIC_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            service_secret: required("SERVICE_SECRET")?,
            cors_allowed_origins,
            provider,
            s3,
            supabase,
            mail,
            otp_ttl_seconds: parse_or(&lookup, "OTP_TTL_SECONDS", DEFAULT_OTP_TTL_SECONDS)?,
            session_ttl_seconds: parse_or(
                &lookup,
                "SESSION_TTL_SECONDS",
                DEFAULT_SESSION_TTL_SECONDS,
            )?,
            max_upload_size: parse_or(&lookup, "MAX_UPLOAD_SIZE", DEFAULT_MAX_UPLOAD_SIZE)?,
            storage_quota: parse_or(&lookup, "STORAGE_QUOTA", DEFAULT_STORAGE_QUOTA)?,
            default_avatar: lookup("DEFAULT_AVATAR").unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: value.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/storeit"),
        ("REDIS_URL", "redis://localhost"),
        ("SERVICE_SECRET", "s3cret"),
        ("S3_ACCESS_KEY_ID", "key"),
        ("S3_SECRET_ACCESS_KEY", "secret"),
        ("S3_BUCKET", "files"),
    ];

    #[test]
    fn applies_defaults() {
        let settings = Settings::from_lookup(lookup(BASE)).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.provider, Provider::S3);
        assert_eq!(settings.max_upload_size, 50 * 1024 * 1024);
        assert_eq!(settings.storage_quota, 2 * 1024 * 1024 * 1024);
        assert!(settings.mail.is_none());
        assert!(settings.cors_allowed_origins.is_none());
    }

    #[test]
    fn reports_missing_and_invalid_variables() {
        let err = Settings::from_lookup(lookup(&BASE[1..])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));

        let mut vars = BASE.to_vec();
        vars.push(("PORT", "eighty"));
        let err = Settings::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn supabase_provider_needs_its_own_variables() {
        let mut vars = BASE.to_vec();
        vars.push(("STORAGE_PROVIDER", "supabase"));
        let err = Settings::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_STORAGE_URL")));
    }
}
