use region_matrix_core::contract::ParameterEntry;
use region_matrix_core::retry::RetryPolicy;
use tracing::debug;

use crate::adapters::parameter_store::ParameterStore;
use crate::error::StoreError;
use crate::retry::with_backoff;

/// Lists every entry under `path`, following continuation tokens until the
/// store stops returning one. Each page request is retried on its own, so a
/// throttled page does not restart the listing.
pub async fn fetch_all_by_path<S>(
    store: &S,
    path: &str,
    policy: &RetryPolicy,
) -> Result<Vec<ParameterEntry>, StoreError>
where
    S: ParameterStore + ?Sized,
{
    let mut entries = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let token = next_token.take();
        let page = with_backoff(policy, path, || store.list_by_path(path, token.as_deref())).await?;
        pages += 1;
        entries.extend(page.entries);

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!(path, pages, entries = entries.len(), "listed parameters");
    Ok(entries)
}
