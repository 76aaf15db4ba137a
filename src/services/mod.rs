//! Business logic services

pub mod accounts;
pub mod catalog;
pub mod dashboards;
pub mod sessions;

use crate::{
    config::{AuthConfig, DashboardConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService,
    pub catalog: catalog::CatalogService,
    pub dashboards: dashboards::DashboardsService,
    pub sessions: sessions::SessionStore,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        dashboard_config: DashboardConfig,
        sessions: sessions::SessionStore,
    ) -> Self {
        Self {
            accounts: accounts::AccountsService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            dashboards: dashboards::DashboardsService::new(repository, dashboard_config),
            sessions,
        }
    }
}
