use crate::entity::{Book, BookId};
use crate::query::{BookFilter, BookFindOptions};
use crate::KernelError;

/// Read side of the book collection.
///
/// Implementations report store failures as [`KernelError::Internal`]; an absent
/// document is `Ok(None)`, leaving the caller to decide whether that is an error.
#[async_trait::async_trait]
pub trait BookQuery: Sync + Send + 'static {
    async fn find_by_id(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError>;

    /// Matching books in `options` order, restricted to the `skip`/`limit` window.
    async fn find_all(
        &self,
        filter: &BookFilter,
        options: &BookFindOptions,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    /// Number of books matching `filter`, ignoring any pagination.
    async fn count(&self, filter: &BookFilter) -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnBookQuery: Sync + Send + 'static {
    type BookQuery: BookQuery;
    fn book_query(&self) -> &Self::BookQuery;
}
