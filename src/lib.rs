use std::{sync::Arc, time::Duration};

mod domain;
mod infrastructure;
mod interfaces;
pub mod background_task;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, password, use_cases};
pub use infrastructure::{auth, db, limiter, media, utils};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use constants::SUBMISSION_WINDOW_SECS;
use errors::AppError;
use limiter::rate_limiter::SubmissionLimiter;
use media::cloudinary::CloudinaryStore;
use repositories::{
    media_store::MediaStore,
    sqlx_repo::{
        SqlxContactRepo, SqlxEventRepo, SqlxGalleryRepo, SqlxMembershipRepo, SqlxStatsRepo, SqlxTeamRepo,
        SqlxUserRepo,
    },
};
use settings::AppConfig;
use use_cases::{
    auth::AuthHandler,
    contact::ContactHandler,
    events::EventHandler,
    gallery::GalleryHandler,
    media::{MediaLifecycle, MediaPolicy},
    membership::MembershipHandler,
    stats::StatsHandler,
    team::TeamHandler,
    upload_gate::UploadLimits,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;
pub type AppEventHandler = EventHandler<SqlxEventRepo>;
pub type AppTeamHandler = TeamHandler<SqlxTeamRepo>;
pub type AppGalleryHandler = GalleryHandler<SqlxGalleryRepo>;
pub type AppMembershipHandler = MembershipHandler<SqlxMembershipRepo>;
pub type AppContactHandler = ContactHandler<SqlxContactRepo>;
pub type AppStatsHandler = StatsHandler<SqlxStatsRepo>;

pub struct AppState {
    pub config: AppConfig,
    pub auth_handler: AppAuthHandler,
    pub event_handler: AppEventHandler,
    pub team_handler: AppTeamHandler,
    pub gallery_handler: AppGalleryHandler,
    pub membership_handler: AppMembershipHandler,
    pub contact_handler: AppContactHandler,
    pub stats_handler: AppStatsHandler,
    pub media_store: Arc<dyn MediaStore>,
    pub submission_limiter: SubmissionLimiter,
}

impl AppState {
    /// Builds the state with the Cloudinary store described by `config.media`.
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let store = CloudinaryStore::new(&config.media)?;
        if !store.is_configured() {
            tracing::warn!("Cloudinary credentials missing, image uploads are disabled (URL-only mode)");
        }
        Ok(Self::with_media_store(config, pool, Arc::new(store)))
    }

    pub fn with_media_store(config: &AppConfig, pool: sqlx::PgPool, media_store: Arc<dyn MediaStore>) -> Self {
        let policy = MediaPolicy {
            folder_root: config.media.folder_root.clone(),
            limits: UploadLimits {
                max_bytes: config.media.max_upload_bytes,
            },
            purge_replaced_on_url_change: config.media.purge_replaced_on_url_change,
        };
        let media = MediaLifecycle::new(Arc::clone(&media_store), policy);

        AppState {
            config: config.clone(),
            auth_handler: AuthHandler::new(SqlxUserRepo::new(pool.clone()), JwtService::new(config)),
            event_handler: EventHandler::new(SqlxEventRepo::new(pool.clone()), media.clone()),
            team_handler: TeamHandler::new(SqlxTeamRepo::new(pool.clone()), media.clone()),
            gallery_handler: GalleryHandler::new(SqlxGalleryRepo::new(pool.clone()), media),
            membership_handler: MembershipHandler::new(SqlxMembershipRepo::new(pool.clone())),
            contact_handler: ContactHandler::new(SqlxContactRepo::new(pool.clone())),
            stats_handler: StatsHandler::new(SqlxStatsRepo::new(pool)),
            media_store,
            submission_limiter: SubmissionLimiter::new(
                config.submission_limit_per_hour,
                Duration::from_secs(SUBMISSION_WINDOW_SECS),
            ),
        }
    }
}
