//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{AllowList, Authenticator, HttpIdentityProvider};
use crate::config::AppConfig;
use crate::proposals::ProposalLifecycle;
use crate::repositories::{
    CalculationRepository, DocumentRepository, InstructionRepository, ProductRepository,
    ProposalRepository, ProposalStore, SessionRepository, SettingsRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Authenticator,
    pub lifecycle: ProposalLifecycle,
    pub proposals: Arc<dyn ProposalStore>,
    pub products: ProductRepository,
    pub calculations: CalculationRepository,
    pub documents: DocumentRepository,
    pub instructions: InstructionRepository,
    pub settings: SettingsRepository,
}

impl AppState {
    /// Wire the production state over a PostgreSQL pool
    pub fn new(pool: PgPool, config: &AppConfig) -> Result<Self, reqwest::Error> {
        let identity = HttpIdentityProvider::new(
            config.upstream_auth_url.clone(),
            config.upstream_timeout,
        )?;

        let authenticator = Authenticator::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(SessionRepository::new(pool.clone())),
            Arc::new(identity),
            AllowList::new(&config.allowed_emails),
        );

        let proposals: Arc<dyn ProposalStore> = Arc::new(ProposalRepository::new(pool.clone()));

        Ok(Self {
            authenticator,
            lifecycle: ProposalLifecycle::new(proposals.clone()),
            proposals,
            products: ProductRepository::new(pool.clone()),
            calculations: CalculationRepository::new(pool.clone()),
            documents: DocumentRepository::new(pool.clone()),
            instructions: InstructionRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool),
        })
    }
}
