use error_stack::{Report, ResultExt};

use kernel::interface::query::{BookQuery, DependOnBookQuery, QueryBookRequest};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookData, BookId, BookName, BookSet, CreatedAt,
};
use kernel::KernelError;

use crate::transfer::{
    BookDto, BookSetDto, CreateBookDto, DeleteBookDto, GetBookDto, PatchBookDto, QueryBookDto,
};

fn require_id(id: String) -> error_stack::Result<BookId, KernelError> {
    let id = BookId::new(id);
    if id.is_empty() {
        return Err(Report::new(KernelError::Validation).attach_printable("book id is required"));
    }
    Ok(id)
}

fn require_data(name: &str, author: &str) -> error_stack::Result<(), KernelError> {
    if name.trim().is_empty() {
        return Err(Report::new(KernelError::Validation).attach_printable("book name is required"));
    }
    if author.trim().is_empty() {
        return Err(
            Report::new(KernelError::Validation).attach_printable("book author is required")
        );
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let CreateBookDto { id, name, author } = dto;
        require_data(&name, &author)?;

        let id = id
            .filter(|id| !id.trim().is_empty())
            .map(BookId::new)
            .unwrap_or_else(BookId::generate);
        let book = Book::new(
            id,
            CreatedAt::now(),
            BookData::new(BookName::new(name), BookAuthor::new(author)),
        );

        self.book_modifier()
            .create(&book)
            .await
            .attach_printable_lazy(|| {
                format!(
                    "inserted book({}) document error",
                    book.data().name().as_ref()
                )
            })?;

        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let id = require_id(dto.id)?;

        let book = self
            .book_query()
            .find_by_id(&id)
            .await
            .attach_printable_lazy(|| format!("find book {id} error"))?;

        match book {
            Some(book) => Ok(BookDto::from(book)),
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {id} not found"))),
        }
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait QueryBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn query_book(&self, dto: QueryBookDto) -> error_stack::Result<BookSetDto, KernelError> {
        let request = QueryBookRequest::try_from(dto)?;
        let filter = request.filter();
        let options = request.options();

        let items = self
            .book_query()
            .find_all(&filter, &options)
            .await
            .attach_printable("find book error")?;
        let total = self
            .book_query()
            .count(&filter)
            .await
            .attach_printable("get book count error")?;

        Ok(BookSetDto::from(BookSet::new(items, total)))
    }
}

impl<T> QueryBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait UpdateBookService: 'static + Sync + Send + DependOnBookModifier {
    /// Replaces the stored record with `dto` in full.
    async fn update_book(&self, dto: BookDto) -> error_stack::Result<(), KernelError> {
        require_data(&dto.name, &dto.author)?;
        let id = require_id(dto.id.clone())?;
        let book = Book::try_from(dto)?;

        let matched = self
            .book_modifier()
            .update(&book)
            .await
            .attach_printable_lazy(|| {
                format!("update book({}) document error", book.data().name().as_ref())
            })?;

        if matched == 0 {
            return Err(
                Report::new(KernelError::NotFound).attach_printable(format!("book {id} not found"))
            );
        }
        Ok(())
    }
}

impl<T> UpdateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait PatchBookService: 'static + Sync + Send + GetBookService + UpdateBookService {
    /// Loads the record, overwrites the supplied fields and writes it back.
    async fn patch_book(&self, dto: PatchBookDto) -> error_stack::Result<BookDto, KernelError> {
        let PatchBookDto { id, name, author } = dto;
        let mut book = self.get_book(GetBookDto { id }).await?;
        if let Some(name) = name {
            book.name = name;
        }
        if let Some(author) = author {
            book.author = author;
        }

        self.update_book(book.clone()).await?;
        Ok(book)
    }
}

impl<T> PatchBookService for T where T: GetBookService + UpdateBookService {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let id = BookId::new(dto.id);
        if id.is_empty() {
            return Err(Report::new(KernelError::Validation).attach_printable("book is nil"));
        }

        let deleted = self
            .book_modifier()
            .delete(&id)
            .await
            .attach_printable_lazy(|| format!("delete book({id}) error"))?;

        if deleted == 0 {
            return Err(
                Report::new(KernelError::NotFound).attach_printable(format!("book {id} not found"))
            );
        }
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}
