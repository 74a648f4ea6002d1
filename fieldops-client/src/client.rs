//! 统一客户端 - one handle over auth, work orders and faults

use std::sync::Arc;

use crate::auth::{AuthService, Session};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::fault::FaultService;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::store::{FileStore, KeyValueStore};
use crate::work_order::{DashboardSummary, Locale, WorkOrderListing, WorkOrderService};

/// Field-service API client
///
/// # Example
///
/// ```no_run
/// use fieldops_client::{ClientConfig, FieldOpsClient, Locale};
///
/// # async fn run() -> fieldops_client::ClientResult<()> {
/// let client = FieldOpsClient::from_config(&ClientConfig::from_env()?)?;
/// let summary = client.load_dashboard().await?;
/// println!("total: {}", summary.counts.total);
/// let listing = client.load_listing(Locale::Zh).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FieldOpsClient<C = NetworkHttpClient> {
    store: Arc<dyn KeyValueStore>,
    auth: AuthService<C>,
    work_orders: WorkOrderService<C>,
    faults: FaultService<C>,
}

impl FieldOpsClient<NetworkHttpClient> {
    /// Network client backed by the file credential store
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path)?);
        let http = NetworkHttpClient::new(config, store.clone())?;
        tracing::info!(
            base_url = %http.base_url(),
            storage = %config.storage_path.display(),
            "Field-service client ready"
        );
        Ok(Self::with_http(Arc::new(http), store, config))
    }
}

impl<C: HttpClient> FieldOpsClient<C> {
    /// Assemble the client over any transport and store
    pub fn with_http(http: Arc<C>, store: Arc<dyn KeyValueStore>, config: &ClientConfig) -> Self {
        Self {
            auth: AuthService::new(http.clone(), store.clone()),
            work_orders: WorkOrderService::new(http.clone(), config.count_extraction),
            faults: FaultService::new(http),
            store,
        }
    }

    pub fn auth(&self) -> &AuthService<C> {
        &self.auth
    }

    pub fn work_orders(&self) -> &WorkOrderService<C> {
        &self.work_orders
    }

    pub fn faults(&self) -> &FaultService<C> {
        &self.faults
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// 首页汇总 for the signed-in user
    pub async fn load_dashboard(&self) -> ClientResult<DashboardSummary> {
        let Session {
            login_name,
            permissions,
        } = self.auth.session()?;
        Ok(self
            .work_orders
            .fetch_all_pending_counts(&permissions, &login_name)
            .await)
    }

    /// Permission-scoped listing for the signed-in user
    pub async fn load_listing(&self, locale: Locale) -> ClientResult<WorkOrderListing> {
        let session = self.auth.session()?;
        Ok(self
            .work_orders
            .fetch_work_orders_by_permission(&session.permissions, &session.login_name, locale)
            .await)
    }
}
