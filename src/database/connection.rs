//! Conexión a PostgreSQL
//! 
//! Crea el pool y aplica las migraciones de `migrations/`.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Crear el pool de conexiones y aplicar las migraciones pendientes
pub async fn connect(database_url: &str) -> Result<PgPool> {
    log::info!("🐘 Conectando a PostgreSQL en {}", mask_database_url(database_url));

    let pool = DatabaseConfig::new(database_url)
        .create_pool()
        .await
        .context("no se pudo conectar a PostgreSQL")?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("error ejecutando migraciones")?;
    log::info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
