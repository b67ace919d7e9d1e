use destructure::Destructure;
use vodca::References;

use crate::entity::Book;

/// One page of books plus the number of books matching the filter overall.
#[derive(Debug, Clone, Default, Eq, PartialEq, References, Destructure)]
pub struct BookSet {
    items: Vec<Book>,
    total: u64,
}

impl BookSet {
    pub fn new(items: Vec<Book>, total: u64) -> Self {
        Self { items, total }
    }
}
