// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! List operations return results one page at a time. Each page carries a
//! continuation token (a `nextLink` URL for Key Vault, a `NextMarker` value
//! for Storage) identifying the next page. An empty token means there are no
//! more pages.
//!
//! [Paginator] converts this protocol into a [Stream] of pages, and
//! [ItemPaginator] into a [Stream] of items. Both are lazy, no request is
//! made until the application polls the stream.
//!
//! To resume an interrupted listing, save the continuation token of the last
//! page received and create a new paginator seeded with it, see
//! [PageSettings].

use futures::stream::unfold;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

/// Describes a type that can be iterated over asyncly when used with [Paginator].
pub trait PageableResponse {
    type PageItem: Send;

    /// Consumes the page and returns its items.
    fn items(self) -> Vec<Self::PageItem>;

    /// The continuation token, empty if this is the last page.
    fn next_page_token(&self) -> String;
}

/// Controls where a listing starts and how large the pages are.
///
/// # Example
/// ```
/// # use azure_sdk_core::paginator::PageSettings;
/// let settings = PageSettings::new()
///     .set_continuation_token("saved-token")
///     .set_max_page_size(25);
/// assert_eq!(settings.continuation_token.as_deref(), Some("saved-token"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct PageSettings {
    /// Resume the listing from this continuation token.
    pub continuation_token: Option<String>,
    /// A hint for the maximum number of items per page. The service may
    /// return fewer items.
    pub max_page_size: Option<i32>,
}

impl PageSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [continuation_token][PageSettings::continuation_token].
    pub fn set_continuation_token<T: Into<String>>(mut self, v: T) -> Self {
        self.continuation_token = Some(v.into());
        self
    }

    /// Sets the value of [max_page_size][PageSettings::max_page_size].
    pub fn set_max_page_size(mut self, v: i32) -> Self {
        self.max_page_size = Some(v);
        self
    }
}

/// An adapter that converts list operations into a [futures::Stream] of
/// pages.
///
/// The first page is always fetched, even if the seed token is empty. The
/// stream ends after a page with an empty continuation token, or after the
/// first error.
#[pin_project]
pub struct Paginator<T, E> {
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>,
}

type ControlFlow = std::ops::ControlFlow<(), String>;

impl<T, E> Paginator<T, E>
where
    T: PageableResponse + Send + 'static,
    E: Send + 'static,
{
    /// Creates a new [Paginator] given the initial page token and a function
    /// to fetch the next [PageableResponse].
    pub fn new<F>(
        seed_token: String,
        execute: impl Fn(String) -> F + Clone + Send + 'static,
    ) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let stream = unfold(ControlFlow::Continue(seed_token), move |state| {
            let execute = execute.clone();
            async move {
                let token = match state {
                    ControlFlow::Continue(token) => token,
                    ControlFlow::Break(_) => return None,
                };
                match execute(token).await {
                    Ok(page) => {
                        let tok = page.next_page_token();
                        let next_state = if tok.is_empty() {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(tok)
                        };
                        Some((Ok(page), next_state))
                    }
                    Err(e) => Some((Err(e), ControlFlow::Break(()))),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Returns the next page.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }

    /// Converts the paginator into a stream of items.
    pub fn items(self) -> ItemPaginator<T, E> {
        ItemPaginator::new(self)
    }
}

impl<T, E> Stream for Paginator<T, E> {
    type Item = Result<T, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

/// An adapter that converts a [Paginator] into a stream of individual
/// items.
#[pin_project]
pub struct ItemPaginator<T, E>
where
    T: PageableResponse,
{
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<T::PageItem, E>> + Send>>,
}

impl<T, E> ItemPaginator<T, E>
where
    T: PageableResponse + Send + 'static,
    E: Send + 'static,
{
    fn new(pages: Paginator<T, E>) -> Self {
        let state = (pages, VecDeque::<T::PageItem>::new());
        let stream = unfold(state, |(mut pages, mut buffer)| async move {
            loop {
                if let Some(item) = buffer.pop_front() {
                    return Some((Ok(item), (pages, buffer)));
                }
                match pages.next().await {
                    None => return None,
                    Some(Err(e)) => return Some((Err(e), (pages, buffer))),
                    Some(Ok(page)) => buffer.extend(page.items()),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Returns the next item.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }
}

impl<T, E> Stream for ItemPaginator<T, E>
where
    T: PageableResponse,
{
    type Item = Result<T::PageItem, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type TestError = Box<dyn std::error::Error + Send + Sync>;

    #[derive(Debug)]
    struct TestPage {
        items: Vec<String>,
        next_link: String,
    }

    impl PageableResponse for TestPage {
        type PageItem = String;
        fn items(self) -> Vec<String> {
            self.items
        }
        fn next_page_token(&self) -> String {
            self.next_link.clone()
        }
    }

    fn page(items: &[&str], next: &str) -> TestPage {
        TestPage {
            items: items.iter().map(|s| s.to_string()).collect(),
            next_link: next.to_string(),
        }
    }

    #[tokio::test]
    async fn pages() {
        let responses = Arc::new(Mutex::new(VecDeque::from([
            page(&["k1", "k2"], "token2"),
            page(&["k3"], ""),
        ])));
        let tokens = Arc::new(Mutex::new(Vec::new()));

        let captured = tokens.clone();
        let execute = move |token: String| {
            captured.lock().unwrap().push(token);
            let resp = responses.lock().unwrap().pop_front();
            async move { resp.ok_or_else(|| TestError::from("no more responses")) }
        };

        let mut pages = Vec::new();
        let mut stream = Paginator::new(String::new(), execute);
        while let Some(resp) = stream.next().await {
            pages.push(resp.unwrap());
        }
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items, vec!["k1", "k2"]);
        assert_eq!(pages[1].items, vec!["k3"]);
        assert_eq!(*tokens.lock().unwrap(), vec!["", "token2"]);
    }

    #[tokio::test]
    async fn empty_first_page_is_fetched() {
        let count = Arc::new(Mutex::new(0));
        let captured = count.clone();
        let execute = move |_| {
            *captured.lock().unwrap() += 1;
            async { Ok::<_, TestError>(page(&[], "")) }
        };
        let mut stream = Paginator::new(String::new(), execute);
        let first = stream.next().await;
        assert!(matches!(first, Some(Ok(ref p)) if p.items.is_empty()), "{first:?}");
        assert!(stream.next().await.is_none());
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn stops_after_error() {
        let execute = |_| async { Err::<TestPage, TestError>("err".into()) };

        let mut paginator = Paginator::new(String::new(), execute);
        let mut count = 0;
        while let Some(resp) = paginator.next().await {
            match resp {
                Ok(_) => panic!("Should not succeed"),
                Err(e) => {
                    assert_eq!(e.to_string(), "err");
                    count += 1;
                }
            }
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn resume_from_token() {
        let execute = |token: String| async move {
            match token.as_str() {
                "token2" => Ok::<_, TestError>(page(&["k3", "k4"], "token3")),
                "token3" => Ok(page(&["k5"], "")),
                _ => Err(format!("unexpected token {token}").into()),
            }
        };
        let mut items = Vec::new();
        let mut stream = Paginator::new("token2".to_string(), execute).items();
        while let Some(item) = stream.next().await {
            items.push(item.unwrap());
        }
        assert_eq!(items, vec!["k3", "k4", "k5"]);
    }

    #[tokio::test]
    async fn items_skip_empty_pages() {
        let execute = |token: String| async move {
            match token.as_str() {
                "" => Ok::<_, TestError>(page(&[], "t1")),
                "t1" => Ok(page(&["a"], "t2")),
                "t2" => Ok(page(&[], "t3")),
                "t3" => Ok(page(&["b", "c"], "")),
                _ => Err("unexpected".into()),
            }
        };
        let items: Vec<String> = Paginator::new(String::new(), execute)
            .items()
            .map(|r| r.unwrap())
            .collect()
            .await;
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn items_error() {
        let execute = |token: String| async move {
            match token.as_str() {
                "" => Ok::<_, TestError>(page(&["a"], "t1")),
                _ => Err("broken".into()),
            }
        };
        let mut stream = Paginator::new(String::new(), execute).items();
        let first = stream.next().await;
        assert!(matches!(first, Some(Ok(ref s)) if s == "a"), "{first:?}");
        let second = stream.next().await;
        assert!(matches!(second, Some(Err(ref e)) if e.to_string() == "broken"));
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn page_settings() {
        let settings = PageSettings::new();
        assert_eq!(settings.continuation_token, None);
        assert_eq!(settings.max_page_size, None);
        let settings = settings.set_continuation_token("abc").set_max_page_size(5);
        assert_eq!(settings.continuation_token.as_deref(), Some("abc"));
        assert_eq!(settings.max_page_size, Some(5));
    }
}
