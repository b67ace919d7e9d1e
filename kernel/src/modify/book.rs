use crate::entity::{Book, BookId};
use crate::KernelError;

/// Write side of the book collection. Each call is a single store round trip.
#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    /// Fails with [`KernelError::Internal`] when the store rejects the write, duplicate ids included.
    async fn create(&self, book: &Book) -> error_stack::Result<(), KernelError>;

    /// Replaces the whole document keyed by `book.id()`. Returns the number of matched documents.
    async fn update(&self, book: &Book) -> error_stack::Result<u64, KernelError>;

    /// Removes at most one document. Returns the number of removed documents.
    async fn delete(&self, book_id: &BookId) -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send {
    type BookModifier: BookModifier;
    fn book_modifier(&self) -> &Self::BookModifier;
}
