use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_telemetry::config::EnvironmentConfig;
use fleet_telemetry::database;
use fleet_telemetry::repositories::{FleetStore, InMemoryFleetStore, PgFleetStore};
use fleet_telemetry::services::fleet_seeder::seed_sample_fleet;
use fleet_telemetry::services::scheduler::spawn_periodic;
use fleet_telemetry::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    info!("🚚 Fleet Telemetry - Simulación, rutas y mantenimiento");
    info!("=====================================================");
    info!("⚙️ Entorno: {} (log {})", config.environment, config.log_level());

    // Almacenamiento: PostgreSQL si hay DATABASE_URL, memoria si no
    let store: Arc<dyn FleetStore> = match config.database_url.as_deref() {
        Some(url) => match database::connect(url).await {
            Ok(pool) => Arc::new(PgFleetStore::new(pool)),
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                return Err(e);
            }
        },
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando almacenamiento en memoria");
            Arc::new(InMemoryFleetStore::new())
        }
    };

    if config.seed_sample_fleet {
        seed_sample_fleet(store.as_ref(), Utc::now().date_naive()).await?;
    }

    let state = AppState::new(config.clone(), store.clone());

    // Jobs periódicos
    let telemetry = state.telemetry.clone();
    spawn_periodic("telemetry", config.telemetry_interval, move || {
        let telemetry = telemetry.clone();
        async move { telemetry.tick().await }
    });

    let health = state.health.clone();
    spawn_periodic("health", config.health_interval, move || {
        let health = health.clone();
        async move { health.tick().await }
    });

    if config.seed_sample_fleet {
        let seed_store = store.clone();
        spawn_periodic("seed-check", config.seed_check_interval, move || {
            let store = seed_store.clone();
            async move {
                match seed_sample_fleet(store.as_ref(), Utc::now().date_naive()).await {
                    Ok(inserted) => format!("{} vehículos insertados", inserted),
                    Err(e) => format!("error: {}", e),
                }
            }
        });
    }

    let app = create_app(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Banner");
    info!("   GET  /health - Health check");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("🧭 Rutas:");
    info!("   POST /api/routes/optimize - Optimizar ruta");
    info!("🩺 Mantenimiento:");
    info!("   GET  /api/maintenance/analytics - Dashboard de la flota");
    info!("   GET  /api/maintenance/history/:vehicleId - Histórico de salud");
    info!("   POST /api/maintenance/simulate - Lanzar tick de salud");
    info!("📡 Telemetría:");
    info!("   POST /api/telemetry/simulate - Lanzar tick de telemetría");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
