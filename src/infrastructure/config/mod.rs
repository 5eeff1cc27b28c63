use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::speaker_id::{AllocatorSettings, CorruptCounterPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Identity provider
    pub identity_backend: IdentityBackend,
    pub firebase_api_key: String,
    pub identity_base_url: String,
    // Recording storage
    pub aws_region: String,
    pub recordings_bucket: String,
    pub recordings_prefix: String,
    pub max_upload_bytes: usize,
    // Phrase generation
    pub openai_api_key: String,
    pub phrase_model: String,
    // Admin review
    pub admin_emails: Vec<String>,
    // Speaker ID allocation
    pub speaker_id_starting_value: i64,
    pub speaker_id_max_attempts: u32,
    pub speaker_id_backoff_base_ms: u64,
    pub speaker_id_backoff_max_ms: u64,
    pub speaker_id_corrupt_policy: CorruptCounterPolicy,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum IdentityBackend {
    Firebase,
    Memory,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            _ => StorageBackend::Postgres,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err("DATABASE_URL is required when STORAGE_BACKEND=postgres".into());
        }

        let identity_backend = match env::var("IDENTITY_BACKEND")
            .unwrap_or_else(|_| "firebase".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => IdentityBackend::Memory,
            _ => IdentityBackend::Firebase,
        };

        let firebase_api_key = match identity_backend {
            IdentityBackend::Firebase => env::var("FIREBASE_API_KEY")
                .map_err(|_| "FIREBASE_API_KEY is required when IDENTITY_BACKEND=firebase")?,
            IdentityBackend::Memory => env::var("FIREBASE_API_KEY").unwrap_or_default(),
        };

        let config = Config {
            storage_backend,
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            identity_backend,
            firebase_api_key,
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-south-1".to_string()),
            recordings_bucket: env::var("RECORDINGS_BUCKET")?,
            recordings_prefix: env::var("RECORDINGS_PREFIX")
                .unwrap_or_else(|_| "recordings/".to_string()),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".to_string())
                .parse()?,
            openai_api_key: env::var("OPENAI_API_KEY")?,
            phrase_model: env::var("PHRASE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            admin_emails: parse_email_list(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            speaker_id_starting_value: env::var("SPEAKER_ID_STARTING_VALUE")
                .unwrap_or_else(|_| "90000".to_string())
                .parse()?,
            speaker_id_max_attempts: env::var("SPEAKER_ID_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "8".to_string())
                .parse::<u32>()?
                .max(1),
            speaker_id_backoff_base_ms: env::var("SPEAKER_ID_BACKOFF_BASE_MS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            speaker_id_backoff_max_ms: env::var("SPEAKER_ID_BACKOFF_MAX_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()?,
            speaker_id_corrupt_policy: parse_corrupt_policy(
                &env::var("SPEAKER_ID_CORRUPT_POLICY").unwrap_or_else(|_| "clamp".to_string()),
            )?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Admin access is granted by email, compared case-insensitively
    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }

    pub fn allocator_settings(&self) -> AllocatorSettings {
        AllocatorSettings {
            starting_value: self.speaker_id_starting_value,
            max_attempts: self.speaker_id_max_attempts.max(1),
            backoff_base: Duration::from_millis(self.speaker_id_backoff_base_ms),
            backoff_max: Duration::from_millis(
                self.speaker_id_backoff_max_ms.max(self.speaker_id_backoff_base_ms),
            ),
            corrupt_policy: self.speaker_id_corrupt_policy,
        }
    }
}

/// Unknown policy names are a configuration error
fn parse_corrupt_policy(raw: &str) -> Result<CorruptCounterPolicy, String> {
    match raw.trim().to_lowercase().as_str() {
        "clamp" => Ok(CorruptCounterPolicy::Clamp),
        "fail" => Ok(CorruptCounterPolicy::Fail),
        other => Err(format!(
            "SPEAKER_ID_CORRUPT_POLICY must be 'clamp' or 'fail', got {:?}",
            other
        )),
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
