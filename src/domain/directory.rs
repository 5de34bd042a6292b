use crate::domain::models::{CustomerSummary, DeviceSummary, Page};
use anyhow::Result;
use async_trait::async_trait;

/// Keyword search over the backend's customer and device resources.
/// Callers never pass an empty keyword.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryFacade: Send + Sync {
    async fn search_customers(
        &self,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<CustomerSummary>>;

    async fn search_devices(&self, keyword: &str, page: u32, size: u32)
        -> Result<Page<DeviceSummary>>;
}
