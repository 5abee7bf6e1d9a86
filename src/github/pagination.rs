//! Lazy page-number pagination over GitHub collection endpoints.
//!
//! [`Pages`] fetches one page at a time with the maximum page size GitHub
//! allows and yields the items as a single sequence. Iteration stops after
//! a short or empty page, or after the first error.
//!
//! Pages are fetched from a live collection, so an item created or removed
//! between two page requests can shift entries across the boundary. The
//! sequence is not deduplicated.

use std::iter::FusedIterator;
use std::vec;

use http::Method;
use serde::de::DeserializeOwned;

use super::client::ApiClient;
use super::error::HeraldError;
use super::transport::Transport;

/// Items requested per page (GitHub's maximum).
pub const PAGE_SIZE: usize = 100;

/// Single-pass iterator over every item of a paged collection.
///
/// Callers that need more than one pass must collect it first.
pub struct Pages<'client, T, Item> {
    client: &'client ApiClient<T>,
    path: String,
    next_page: Option<u32>,
    buffered: vec::IntoIter<Item>,
}

impl<'client, T, Item> Pages<'client, T, Item>
where
    T: Transport,
    Item: DeserializeOwned,
{
    pub(crate) fn new(client: &'client ApiClient<T>, path: &str) -> Self {
        Self {
            client,
            path: path.to_owned(),
            next_page: Some(1),
            buffered: Vec::new().into_iter(),
        }
    }

    fn page_path(&self, page: u32) -> String {
        let separator = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{separator}per_page={PAGE_SIZE}&page={page}", self.path)
    }

    fn fetch(&self, page: u32) -> Result<Vec<Item>, HeraldError> {
        let path = self.page_path(page);
        let Some(value) = self.client.call(Method::GET, &path, None)? else {
            return Ok(Vec::new());
        };
        serde_json::from_value(value).map_err(|error| HeraldError::Decode {
            path,
            message: error.to_string(),
        })
    }
}

impl<T, Item> Iterator for Pages<'_, T, Item>
where
    T: Transport,
    Item: DeserializeOwned,
{
    type Item = Result<Item, HeraldError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(Ok(item));
            }

            let page = self.next_page?;
            match self.fetch(page) {
                Ok(items) => {
                    tracing::debug!(
                        "fetched {} items from page {page} of {}",
                        items.len(),
                        self.path
                    );
                    self.next_page = if items.len() < PAGE_SIZE {
                        None
                    } else {
                        page.checked_add(1)
                    };
                    self.buffered = items.into_iter();
                }
                Err(error) => {
                    self.next_page = None;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl<T, Item> FusedIterator for Pages<'_, T, Item>
where
    T: Transport,
    Item: DeserializeOwned,
{
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use mockall::Sequence;
    use mockall::predicate::function;
    use serde_json::json;

    use super::PAGE_SIZE;
    use crate::github::client::ApiClient;
    use crate::github::error::HeraldError;
    use crate::github::transport::{ApiRequest, MockTransport, RawResponse, RetryPolicy};

    fn page_of(range: std::ops::Range<u64>) -> RawResponse {
        let items: Vec<_> = range.map(|id| json!({ "id": id })).collect();
        RawResponse {
            status: StatusCode::OK,
            body: serde_json::to_string(&items).expect("page should serialise"),
        }
    }

    fn expect_page(
        transport: &mut MockTransport,
        sequence: &mut Sequence,
        expected_path: &'static str,
        reply: RawResponse,
    ) {
        transport
            .expect_send()
            .with(function(move |request: &ApiRequest| {
                request.path == expected_path
            }))
            .times(1)
            .in_sequence(sequence)
            .return_once(move |_| Ok(reply));
    }

    #[derive(Debug, serde::Deserialize, PartialEq, Eq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn traverses_partial_final_page_without_gaps() {
        let mut transport = MockTransport::new();
        let mut sequence = Sequence::new();
        expect_page(&mut transport, &mut sequence, "/items?per_page=100&page=1", page_of(0..100));
        expect_page(&mut transport, &mut sequence, "/items?per_page=100&page=2", page_of(100..200));
        expect_page(&mut transport, &mut sequence, "/items?per_page=100&page=3", page_of(200..250));
        let client = ApiClient::new(transport, RetryPolicy::without_delay(1));

        let items = client
            .pages::<Item>("/items")
            .collect::<Result<Vec<_>, _>>()
            .expect("all pages should load");

        assert_eq!(items.len(), 250);
        let ids: Vec<u64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, (0..250).collect::<Vec<_>>());
    }

    #[test]
    fn full_last_page_is_followed_by_an_empty_probe() {
        let mut transport = MockTransport::new();
        let mut sequence = Sequence::new();
        expect_page(&mut transport, &mut sequence, "/items?state=open&per_page=100&page=1", page_of(0..100));
        expect_page(&mut transport, &mut sequence, "/items?state=open&per_page=100&page=2", page_of(0..0));
        let client = ApiClient::new(transport, RetryPolicy::without_delay(1));

        let count = client
            .pages::<Item>("/items?state=open")
            .filter(Result::is_ok)
            .count();

        assert_eq!(count, PAGE_SIZE);
    }

    #[test]
    fn no_content_page_ends_iteration() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).return_once(|_| {
            Ok(RawResponse {
                status: StatusCode::NO_CONTENT,
                body: String::new(),
            })
        });
        let client = ApiClient::new(transport, RetryPolicy::without_delay(1));

        assert_eq!(client.pages::<Item>("/items").count(), 0);
    }

    #[test]
    fn stops_after_first_error() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).return_once(|_| {
            Ok(RawResponse {
                status: StatusCode::NOT_FOUND,
                body: r#"{"message":"Not Found"}"#.to_owned(),
            })
        });
        let client = ApiClient::new(transport, RetryPolicy::without_delay(1));
        let mut pages = client.pages::<Item>("/items");

        assert!(matches!(pages.next(), Some(Err(HeraldError::Terminal { status: 404, .. }))));
        assert!(pages.next().is_none());
    }

    #[test]
    fn is_lazy_until_polled() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let client = ApiClient::new(transport, RetryPolicy::without_delay(1));

        let pages = client.pages::<Item>("/items");

        drop(pages);
    }
}
