use destructure::Destructure;
use vodca::References;

use crate::entity::{BookAuthor, BookName};

/// Descriptive payload of a book, stored nested under `data`.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookData {
    name: BookName,
    author: BookAuthor,
}

impl BookData {
    pub fn new(name: BookName, author: BookAuthor) -> Self {
        Self { name, author }
    }
}
