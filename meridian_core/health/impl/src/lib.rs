use std::{sync::Arc, time::Duration};

use meridian_core_health_contracts::{HealthFeatureService, HealthStatus};
use meridian_email_contracts::EmailService;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email> {
    email: Email,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email> HealthFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    fn fresh(&self, cached: Option<&CachedStatus>, now: Instant) -> Option<HealthStatus> {
        cached
            .filter(|cached| now.duration_since(cached.timestamp) < self.config.cache_ttl)
            .map(|cached| cached.status)
    }

    async fn check(&self) -> HealthStatus {
        let email = match self.email.ping().await {
            Ok(()) => true,
            Err(err) => {
                error!("SMTP server is not reachable: {err:#}");
                false
            }
        };

        HealthStatus { email }
    }
}

impl<Email> HealthFeatureService for HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        if let Some(status) = self.fresh(self.state.cache.read().await.as_ref(), now) {
            return status;
        }

        // Only one request pings the server, the others wait for the write lock
        // and reuse its result.
        let mut cache = self.state.cache.write().await;
        if let Some(status) = self.fresh(cache.as_ref(), now) {
            return status;
        }

        let status = self.check().await;
        *cache = Some(CachedStatus {
            status,
            timestamp: Instant::now(),
        });
        status
    }
}
