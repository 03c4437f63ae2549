use std::collections::HashSet;
use std::time::Duration;

use crate::common::errors::ApiError;

/// One page of a paginated collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// URL of the following page, taken from the `Link` header
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
///
/// Entries look like `<https://host/api/v1/...>; rel="next"`. `rel` may be
/// bare or quoted and may carry several space-separated relation types.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });

        (is_next && !url.is_empty()).then(|| url.to_string())
    })
}

/// Walk a collection page by page until there is no `next` link.
///
/// Errors are logged and end the walk early; whatever was collected up to
/// that point is returned. A `next` URL seen before also ends the walk.
/// `delay` is slept after every successful request.
pub fn fetch_all<T, F>(first_url: String, delay: Duration, mut fetch_page: F) -> Vec<T>
where
    F: FnMut(&str) -> Result<Page<T>, ApiError>,
{
    let mut results = Vec::new();
    let mut next = Some(first_url);
    let mut pages = 0usize;
    let mut visited = HashSet::new();

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            tracing::warn!(
                "Stopping pagination after {} page(s): {} was already fetched",
                pages,
                url
            );
            break;
        }
        match fetch_page(&url) {
            Ok(page) => {
                pages += 1;
                tracing::debug!(url = %url, items = page.items.len(), "fetched page");
                results.extend(page.items);
                next = page.next;
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
            Err(e) => {
                tracing::warn!("Stopping pagination after {} page(s): {}", pages, e);
                break;
            }
        }
    }

    results
}
