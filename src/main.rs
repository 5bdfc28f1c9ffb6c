use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_registry::config::{EnvironmentConfig, StorageBackend};
use vehicle_registry::database;
use vehicle_registry::middleware::cors::cors_middleware;
use vehicle_registry::repositories::{
    InMemoryVehicleRepository, PgVehicleRepository, VehicleRepository,
};
use vehicle_registry::routes::create_router;
use vehicle_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Vehicle Registry");
    info!("==================");

    let repository: Arc<dyn VehicleRepository> = match (&config.storage, &config.database) {
        (StorageBackend::Postgres, Some(db_config)) => {
            let pool = database::connect(db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                e
            })?;
            Arc::new(PgVehicleRepository::new(pool))
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("postgres storage selected without database configuration")
        }
        (StorageBackend::Memory, _) => {
            info!("🧠 Usando almacenamiento en memoria (los datos no persisten)");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let app = create_router(AppState::new(repository)).layer(cors_middleware(&config.cors_origins));

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health         - Health check");
    info!("   GET    /vehicles       - Listar vehículos");
    info!("   POST   /vehicles       - Crear vehículo");
    info!("   GET    /vehicles/:vin  - Obtener vehículo");
    info!("   PUT    /vehicles/:vin  - Actualizar vehículo");
    info!("   DELETE /vehicles/:vin  - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
