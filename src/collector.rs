use crate::error::{Result, StarsManagerError};
use std::future::Future;
use tracing::{debug, warn};

/// What a pagination run produced, plus the failure that cut it short, if
/// any. A failed page request terminates the loop but never discards the
/// pages that were already accumulated.
#[derive(Debug)]
pub struct Collected<T> {
    pub items: Vec<T>,
    pub failure: Option<StarsManagerError>,
}

impl<T> Collected<T> {
    /// Keep whatever was accumulated and drop the failure. This matches the
    /// silent-truncation behavior of treating a failed fetch the same as an
    /// exhausted list.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Strict view: a truncated run is an error even when partial pages were
    /// collected.
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.failure.is_some()
    }
}

/// Drive `fetch_page` from page 1 upward until it returns an empty page
/// (exhausted) or an error (truncated). Items are accumulated in request
/// order; within a page, source order is preserved. No deduplication and no
/// retries.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Collected<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        match fetch_page(page).await {
            Ok(batch) => {
                if batch.is_empty() {
                    break;
                }
                debug!(page, count = batch.len(), "collected page");
                items.extend(batch);
                page += 1;
            }
            Err(err) => {
                warn!(page, error = %err, "page fetch failed, keeping partial results");
                return Collected {
                    items,
                    failure: Some(err),
                };
            }
        }
    }

    Collected {
        items,
        failure: None,
    }
}
