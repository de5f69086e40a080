//! Cursor pagination
//!
//! AWS listing APIs return one page of results plus an optional cursor
//! (`NextMarker`, `nextToken`). [`collect_pages`] drives such an API until
//! the cursor runs out.

use anyhow::Result;
use std::future::Future;

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items returned on this page, in service order
    pub items: Vec<T>,
    /// Cursor for the next page, `None` on the last page
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A page with no successor
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// A page followed by another one fetched with `next_token`
    pub fn with_next(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

/// Fetch every page of a listing and concatenate the items in page order.
///
/// `fetch` receives `None` for the first page and afterwards the cursor
/// returned by the previous page. An empty cursor is treated as the end of
/// the listing. The first error aborts the walk and is returned as-is.
///
/// # Example
/// ```ignore
/// let names = collect_pages(|token| lister.list_functions_page(50, token)).await?;
/// ```
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = fetch(token.take()).await?;
        items.extend(page.items);

        match page.next_token {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serve `pages` in order, recording the token each call received.
    fn paged(pages: Vec<Vec<u32>>) -> (Vec<Page<u32>>, Mutex<Vec<Option<String>>>) {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, items)| {
                if i + 1 < count {
                    Page::with_next(items, format!("token-{}", i + 1))
                } else {
                    Page::last(items)
                }
            })
            .collect();
        (pages, Mutex::new(Vec::new()))
    }

    #[tokio::test]
    async fn test_single_empty_page() {
        let result: Vec<u32> = collect_pages(|_| async { Ok(Page::last(Vec::new())) })
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let (pages, seen) = paged(vec![
            (0..50).collect(),
            (50..100).collect(),
            (100..120).collect(),
        ]);

        let result = collect_pages(|token| {
            seen.lock().unwrap().push(token.clone());
            let index = token
                .as_deref()
                .and_then(|t| t.strip_prefix("token-"))
                .map(|n| n.parse::<usize>().unwrap())
                .unwrap_or(0);
            let page = pages[index].clone();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(result, (0..120).collect::<Vec<_>>());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                None,
                Some("token-1".to_string()),
                Some("token-2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_token_ends_listing() {
        let mut calls = 0;
        let result = collect_pages(|_| {
            calls += 1;
            async { Ok(Page::with_next(vec![1, 2], "")) }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![1, 2]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_error_aborts_enumeration() {
        let mut calls = 0;
        let result: Result<Vec<u32>> = collect_pages(|token| {
            calls += 1;
            async move {
                match token {
                    None => Ok(Page::with_next(vec![1], "next")),
                    Some(_) => anyhow::bail!("listing failed"),
                }
            }
        })
        .await;

        assert!(result.unwrap_err().to_string().contains("listing failed"));
        assert_eq!(calls, 2);
    }
}
