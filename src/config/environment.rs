//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno, los intervalos de los jobs
//! periódicos y la semilla opcional de la simulación.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub database_url: Option<String>,
    pub telemetry_interval: Duration,
    pub health_interval: Duration,
    pub seed_check_interval: Duration,
    pub seed_sample_fleet: bool,
    pub simulation_seed: Option<u64>,
    pub history_limit: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            database_url: None,
            telemetry_interval: Duration::from_secs(30),
            health_interval: Duration::from_secs(86_400),
            seed_check_interval: Duration::from_secs(86_400),
            seed_sample_fleet: true,
            simulation_seed: None,
            history_limit: 20,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno; un valor numérico inválido es un error
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or(&get, "PORT", defaults.port)?,
            host: get("HOST").unwrap_or(defaults.host),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            database_url: get("DATABASE_URL"),
            telemetry_interval: secs_or(&get, "TELEMETRY_INTERVAL_SECS", defaults.telemetry_interval)?,
            health_interval: secs_or(&get, "HEALTH_INTERVAL_SECS", defaults.health_interval)?,
            seed_check_interval: secs_or(&get, "SEED_CHECK_INTERVAL_SECS", defaults.seed_check_interval)?,
            seed_sample_fleet: parse_or(&get, "SEED_SAMPLE_FLEET", defaults.seed_sample_fleet)?,
            simulation_seed: get("SIMULATION_SEED")
                .map(|v| v.parse().with_context(|| format!("SIMULATION_SEED must be a valid number, got '{}'", v)))
                .transpose()?,
            history_limit: parse_or(&get, "HISTORY_LIMIT", defaults.history_limit)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// DEBUG en desarrollo, INFO en el resto
    pub fn log_level(&self) -> tracing::Level {
        if self.is_development() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", key, raw)),
        None => Ok(default),
    }
}

fn secs_or<G>(get: &G, key: &str, default: Duration) -> Result<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(get, key, default.as_secs())?;
    anyhow::ensure!(secs > 0, "{} must be greater than zero", key);
    Ok(Duration::from_secs(secs))
}
