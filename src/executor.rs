use crate::traits::{FetchError, TabSource};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, instrument};

/// Outcome of fetching one configured tab.
#[derive(Debug)]
pub struct TabFetch {
    pub tab: String,
    pub result: Result<String, FetchError>,
}

pub struct TabFetchExecutor {
    semaphore: Arc<Semaphore>,
}

impl TabFetchExecutor {
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(concurrency_limit.max(1))),
        }
    }

    /// Fetches every tab concurrently, bounded by the semaphore.
    ///
    /// The returned list is in the same order as `tabs`, whatever order the
    /// fetches complete in.
    #[instrument(skip(self, source), fields(source = %source.source_id()))]
    pub async fn fetch_all<S>(&self, source: Arc<S>, tabs: &[String]) -> Vec<TabFetch>
    where
        S: TabSource + 'static,
    {
        let handles: Vec<_> = tabs
            .iter()
            .cloned()
            .map(|tab| {
                let source = Arc::clone(&source);
                let semaphore = Arc::clone(&self.semaphore);
                let task_tab = tab.clone();
                let handle = tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| FetchError::Join(format!("Semaphore error: {}", e)))?;
                    source.fetch_tab(&task_tab).await
                });
                (tab, handle)
            })
            .collect();

        let mut fetches = Vec::with_capacity(handles.len());
        for (tab, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(FetchError::Join(e.to_string())),
            };
            if let Ok(body) = &result {
                info!(tab = %tab, bytes = body.len(), "Fetched tab");
            }
            fetches.push(TabFetch { tab, result });
        }
        fetches
    }
}
