use crate::domain::directory::DirectoryFacade;
use crate::domain::models::{CustomerSummary, DeviceSummary};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Identity of one search cycle. Monotonic for the lifetime of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleId(pub u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteResults {
    pub customers: Vec<CustomerSummary>,
    pub devices: Vec<DeviceSummary>,
}

impl RemoteResults {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.devices.is_empty()
    }
}

/// Runs both keyword searches side by side. A failing source contributes an
/// empty list and never affects the other.
pub async fn fan_out(directory: &dyn DirectoryFacade, query: &str, page_size: u32) -> RemoteResults {
    let (customers, devices) = futures::future::join(
        directory.search_customers(query, 0, page_size),
        directory.search_devices(query, 0, page_size),
    )
    .await;

    let customers = customers.map(|page| page.content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, query, "customer search failed");
        Vec::new()
    });
    let devices = devices.map(|page| page.content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, query, "device search failed");
        Vec::new()
    });

    RemoteResults { customers, devices }
}

/// Remote half of a search cycle, carrying the cycle's cancellation token.
#[derive(Debug, Clone)]
pub struct FanoutRequest {
    pub cycle: CycleId,
    pub query: String,
    pub page_size: u32,
    token: CancellationToken,
}

impl FanoutRequest {
    pub(crate) fn new(
        cycle: CycleId,
        query: String,
        page_size: u32,
        token: CancellationToken,
    ) -> Self {
        Self {
            cycle,
            query,
            page_size,
            token,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// `None` when the cycle was superseded or the palette closed before the
    /// results could be handed back.
    pub async fn run(self, directory: Arc<dyn DirectoryFacade>) -> Option<RemoteResults> {
        let results = tokio::select! {
            _ = self.token.cancelled() => None,
            results = fan_out(directory.as_ref(), &self.query, self.page_size) => Some(results),
        };
        results.filter(|_| !self.token.is_cancelled())
    }
}
