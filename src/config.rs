//! Configuration management

use anyhow::{self, Context, Result};

use crate::services::itinerary::SuggestionParams;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// JWT secret key for token validation
    pub jwt_secret: String,

    /// Itinerary engine constants, with environment overrides applied
    pub suggestion: SuggestionParams,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let nats_url = std::env::var("NATS_URL")
            .unwrap_or_else(|_| "nats://localhost:4222".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set")?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set — generate one with: openssl rand -base64 48")?;

        if jwt_secret.len() < 32 {
            anyhow::bail!(
                "JWT_SECRET must be at least 32 bytes (current: {} bytes)",
                jwt_secret.len()
            );
        }

        let suggestion = suggestion_params_from_env()?;

        Ok(Self {
            nats_url,
            database_url,
            jwt_secret,
            suggestion,
        })
    }
}

/// Engine constants only; usable without database or NATS settings
pub fn suggestion_params_from_env() -> Result<SuggestionParams> {
    dotenvy::dotenv().ok();

    let mut params = SuggestionParams::default();

    if let Some(v) = env_positive("SUGGEST_CLUSTER_RADIUS_KM")? {
        params.cluster_radius_km = v;
    }
    if let Some(v) = env_positive("SUGGEST_TRAVEL_SPEED_KMH")? {
        params.travel_speed_kmh = v;
    }
    if let Some(v) = env_positive("SUGGEST_MISSING_COORDS_TRAVEL_HOURS")? {
        params.missing_coords_travel_hours = v;
    }

    Ok(params)
}

fn env_positive(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(raw) => parse_positive(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number (got {:?})", name, raw))?;

    if !value.is_finite() || value <= 0.0 {
        anyhow::bail!("{} must be a positive number (got {})", name, value);
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_accepts_decimal() {
        assert_eq!(parse_positive("SUGGEST_TRAVEL_SPEED_KMH", " 42.5 ").unwrap(), 42.5);
    }

    #[test]
    fn test_parse_positive_rejects_zero_and_negative() {
        assert!(parse_positive("SUGGEST_CLUSTER_RADIUS_KM", "0").is_err());
        assert!(parse_positive("SUGGEST_CLUSTER_RADIUS_KM", "-3").is_err());
    }

    #[test]
    fn test_parse_positive_rejects_garbage() {
        let err = parse_positive("SUGGEST_TRAVEL_SPEED_KMH", "fast").unwrap_err();
        assert!(err.to_string().contains("SUGGEST_TRAVEL_SPEED_KMH"));
        assert!(parse_positive("SUGGEST_TRAVEL_SPEED_KMH", "NaN").is_err());
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_suggestion_params_override_from_env() {
        std::env::set_var("SUGGEST_CLUSTER_RADIUS_KM", "7.5");
        std::env::remove_var("SUGGEST_TRAVEL_SPEED_KMH");

        let params = suggestion_params_from_env().unwrap();
        assert_eq!(params.cluster_radius_km, 7.5);
        assert_eq!(params.travel_speed_kmh, 30.0);

        std::env::remove_var("SUGGEST_CLUSTER_RADIUS_KM");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_rejects_short_jwt_secret() {
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("JWT_SECRET", "too-short");

        assert!(Config::from_env().is_err());

        std::env::remove_var("JWT_SECRET");
    }
}
