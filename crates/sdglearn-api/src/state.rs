//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. Services are generic over repository traits, but AppState pins them
//! to the SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use sdglearn_core::service::module::ModuleService;
use sdglearn_core::service::progress::ProgressService;
use sdglearn_core::service::sdg::SdgService;
use sdglearn_core::service::section::SectionService;
use sdglearn_infra::auth::oauth::{OAuthClient, OAuthConfig};
use sdglearn_infra::auth::state_store::StateStore;
use sdglearn_infra::config::{load_global_config, resolve_data_dir};
use sdglearn_infra::sqlite::module::SqliteModuleRepository;
use sdglearn_infra::sqlite::pool::DatabasePool;
use sdglearn_infra::sqlite::progress::SqliteProgressRepository;
use sdglearn_infra::sqlite::sdg::SqliteSdgRepository;
use sdglearn_infra::sqlite::section::SqliteSectionRepository;
use sdglearn_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to SQLite.
pub type ConcreteSdgService = SdgService<SqliteSdgRepository>;

pub type ConcreteModuleService = ModuleService<SqliteModuleRepository, SqliteSdgRepository>;

pub type ConcreteSectionService = SectionService<SqliteSectionRepository, SqliteModuleRepository>;

pub type ConcreteProgressService =
    ProgressService<SqliteProgressRepository, SqliteModuleRepository, SqliteSdgRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub sdg_service: Arc<ConcreteSdgService>,
    pub module_service: Arc<ConcreteModuleService>,
    pub section_service: Arc<ConcreteSectionService>,
    pub progress_service: Arc<ConcreteProgressService>,
    /// None when the OAuth environment variables are not set; the auth
    /// endpoints then answer 503.
    pub oauth: Option<Arc<OAuthClient>>,
    pub state_store: Arc<StateStore>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("sdglearn.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let sdg_service = SdgService::new(SqliteSdgRepository::new(db_pool.clone()));
        let module_service = ModuleService::new(
            SqliteModuleRepository::new(db_pool.clone()),
            SqliteSdgRepository::new(db_pool.clone()),
        );
        let section_service = SectionService::new(
            SqliteSectionRepository::new(db_pool.clone()),
            SqliteModuleRepository::new(db_pool.clone()),
        );
        let progress_service = ProgressService::new(
            SqliteProgressRepository::new(db_pool.clone()),
            SqliteModuleRepository::new(db_pool.clone()),
            SqliteSdgRepository::new(db_pool.clone()),
            config.free_navigation,
        );

        // OAuth is optional: content editing works without it, the learner
        // login endpoints just answer 503 until it is configured.
        let oauth = match OAuthConfig::from_env() {
            Ok(oauth_config) => Some(Arc::new(OAuthClient::new(oauth_config))),
            Err(e) => {
                tracing::debug!("oauth disabled: {e}");
                None
            }
        };

        Ok(Self {
            sdg_service: Arc::new(sdg_service),
            module_service: Arc::new(module_service),
            section_service: Arc::new(section_service),
            progress_service: Arc::new(progress_service),
            oauth,
            state_store: Arc::new(StateStore::new()),
            config,
            data_dir,
            db_pool,
        })
    }
}
