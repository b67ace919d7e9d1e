use error_stack::Report;

use kernel::interface::query::QueryBookRequest;
use kernel::prelude::entity::{
    Book, BookAuthor, BookData, BookId, BookName, BookSet, CreatedAt, DestructBook,
    DestructBookData, DestructBookSet, PageNumber, PageSize, Pagination,
};
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: String,
    /// Unix milliseconds.
    pub created_at: i64,
    pub name: String,
    pub author: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            created_at,
            data,
        } = value.into_destruct();
        let DestructBookData { name, author } = data.into_destruct();
        Self {
            id: id.into(),
            created_at: created_at.unix_millis(),
            name: name.into(),
            author: author.into(),
        }
    }
}

impl TryFrom<BookDto> for Book {
    type Error = Report<KernelError>;
    fn try_from(value: BookDto) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(value.id),
            CreatedAt::from_unix_millis(value.created_at)?,
            BookData::new(BookName::new(value.name), BookAuthor::new(value.author)),
        ))
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BookSetDto {
    pub items: Vec<BookDto>,
    pub total: u64,
}

impl From<BookSet> for BookSetDto {
    fn from(value: BookSet) -> Self {
        let DestructBookSet { items, total } = value.into_destruct();
        Self {
            items: items.into_iter().map(BookDto::from).collect(),
            total,
        }
    }
}

pub struct GetBookDto {
    pub id: String,
}

pub struct CreateBookDto {
    /// Caller-assigned id. A fresh one is generated when absent or blank.
    pub id: Option<String>,
    pub name: String,
    pub author: String,
}

#[derive(Debug, Default)]
pub struct QueryBookDto {
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
    pub keywords: Option<String>,
}

impl TryFrom<QueryBookDto> for QueryBookRequest {
    type Error = Report<KernelError>;
    fn try_from(value: QueryBookDto) -> Result<Self, Self::Error> {
        let page_number = match value.page_number {
            Some(number) => PageNumber::new(number)?,
            None => PageNumber::default(),
        };
        let page_size = match value.page_size {
            Some(size) => PageSize::new(size)?,
            None => PageSize::default(),
        };
        Ok(QueryBookRequest::new(
            Pagination::new(page_number, page_size),
            value.keywords,
        ))
    }
}

pub struct PatchBookDto {
    pub id: String,
    pub name: Option<String>,
    pub author: Option<String>,
}

pub struct DeleteBookDto {
    pub id: String,
}
