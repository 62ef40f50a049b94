use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};

use wavespsai_backend::infrastructure::database::{AccountStore, Database, MemoryAccountStore};
use wavespsai_backend::infrastructure::ml::ModelStore;
use wavespsai_backend::utils::{ensure_directory_exists, init_tracing, AccountStoreKind};
use wavespsai_backend::{api, AppState, Config, NAME, VERSION};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Chargement de la configuration (.env compris) avant le logging qui en dépend
    let config = Config::from_env()?;

    // Initialisation du logging
    init_tracing(&config.log_level, &config.logging_format);
    info!("🚀 Démarrage de {} v{}", NAME, VERSION);
    info!("✅ Configuration chargée avec succès");
    config.log_warnings();
    info!("🔧 Mode: {}", config.run_mode);

    ensure_directory_exists(&config.datasets_dir)?;

    // Initialisation des services
    let store = connect_account_store(&config).await?;
    let models = ModelStore::load_from_dir(&config.models_dir);

    // Création de l'état de l'application
    let app_state = web::Data::new(AppState::new(config.clone(), store, models));

    let static_dir = config.static_dir.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(app_state.clone())
            .configure(api::config)
            .service(actix_files::Files::new("/static", &static_dir))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.workers)
    .shutdown_timeout(10);

    info!("✅ Backend démarré avec succès!");
    info!("🔗 API disponible sur http://{}:{}", config.server_host, config.server_port);

    server.run().await?;
    Ok(())
}

/// Construit le stockage des comptes
///
/// Une base injoignable est signalée mais ne bloque pas le démarrage: les
/// prédictions restent servies, les routes de compte renverront une erreur 500.
async fn connect_account_store(config: &Config) -> anyhow::Result<Arc<dyn AccountStore>> {
    match config.account_store {
        AccountStoreKind::Memory => {
            warn!("⚠️  Stockage en mémoire: les comptes seront perdus à l'arrêt");
            Ok(Arc::new(MemoryAccountStore::new()))
        }
        AccountStoreKind::Postgres => {
            let db = Database::connect_lazy(
                &config.database_url,
                config.database_max_connections,
                config.database_connection_timeout,
            )?;

            if let Err(e) = db.initialize().await {
                error!("❌ Erreur de connexion à PostgreSQL: {}", e);
                warn!("Vérifiez que le serveur PostgreSQL est démarré (DATABASE_URL)");
            }

            Ok(Arc::new(db))
        }
    }
}
