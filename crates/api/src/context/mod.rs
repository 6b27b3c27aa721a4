//! Application context - dependency injection container

use std::sync::Arc;

use leavesync_core::{
    CalendarProvider, CalendarProviderGateway, ConflictDetectionService, LeaveRecordService,
    LeaveWindowCache, LeaveWindowCacheConfig, LoggingNotificationHandler, NotificationDispatcher,
    NotificationEndpoint, NotificationHandler,
};
use leavesync_domain::{Config, Result};
use leavesync_infra::{GoogleCalendarProvider, StaticTokenProvider, SuccessFactorsClient};
use tracing::{info, warn};

/// Application context - holds all services shared by the HTTP handlers
pub struct AppContext {
    pub config: Config,
    pub cache: Arc<LeaveWindowCache>,
    pub endpoint: Arc<NotificationEndpoint>,
    pub conflicts: Arc<ConflictDetectionService>,
}

impl AppContext {
    /// Wire the production adapters described by `config`.
    ///
    /// # Errors
    /// Fails when an adapter cannot be built (bad base URL, TLS setup).
    pub fn new(config: Config) -> Result<Self> {
        let records: Arc<dyn LeaveRecordService> =
            Arc::new(SuccessFactorsClient::new(&config.successfactors)?);

        let mut providers: Vec<Arc<dyn CalendarProvider>> = Vec::new();
        match &config.google {
            Some(google) => {
                let tokens = Arc::new(StaticTokenProvider::new(google.access_token.clone()));
                providers.push(Arc::new(GoogleCalendarProvider::new(google, tokens)?));
            }
            None => warn!("No calendar provider configured; notifications are acknowledged only"),
        }

        Ok(Self::from_parts(config, records, providers))
    }

    /// Assemble the pipeline around already-built adapters.
    pub fn from_parts(
        config: Config,
        records: Arc<dyn LeaveRecordService>,
        providers: Vec<Arc<dyn CalendarProvider>>,
    ) -> Self {
        let cache = Arc::new(LeaveWindowCache::new(LeaveWindowCacheConfig::from(config.cache)));
        let gateway = Arc::new(CalendarProviderGateway::new(providers));

        let dispatcher =
            NotificationDispatcher::new(records.clone(), cache.clone(), gateway.clone());
        let handlers: Vec<Arc<dyn NotificationHandler>> =
            vec![Arc::new(LoggingNotificationHandler), Arc::new(dispatcher)];
        let endpoint = Arc::new(NotificationEndpoint::new(handlers));
        let conflicts = Arc::new(ConflictDetectionService::new(records, cache.clone(), gateway.clone()));

        info!(providers = gateway.provider_count(), "application context ready");

        Self { config, cache, endpoint, conflicts }
    }
}
