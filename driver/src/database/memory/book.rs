use std::sync::Arc;

use error_stack::{Report, ResultExt};
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;

use kernel::interface::query::{BookField, BookFilter, BookFindOptions, BookQuery, BookSort, Order};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::error::ConvertError;

/// Book store kept in process memory, evaluating filters the same way the MongoDB store does.
///
/// Clones share the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

enum Matcher<'a> {
    All,
    Pattern {
        fields: &'a [BookField],
        regex: Regex,
    },
}

impl<'a> Matcher<'a> {
    fn compile(filter: &'a BookFilter) -> error_stack::Result<Self, KernelError> {
        match filter {
            BookFilter::AllMatch => Ok(Matcher::All),
            BookFilter::TextSearch { fields, pattern } => {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
                    .convert_error()
                    .attach_printable_lazy(|| format!("invalid search pattern: {pattern}"))?;
                Ok(Matcher::Pattern { fields, regex })
            }
        }
    }

    fn matches(&self, book: &Book) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Pattern { fields, regex } => fields.iter().any(|field| {
                let value: &String = match field {
                    BookField::Name => book.data().name().as_ref(),
                    BookField::Author => book.data().author().as_ref(),
                };
                regex.is_match(value)
            }),
        }
    }
}

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    async fn find_by_id(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id() == id).cloned())
    }

    async fn find_all(
        &self,
        filter: &BookFilter,
        options: &BookFindOptions,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let matcher = Matcher::compile(filter)?;
        let books = self.books.read().await;
        let mut matched = books
            .iter()
            .filter(|book| matcher.matches(book))
            .cloned()
            .collect::<Vec<_>>();

        // Equal timestamps fall back to the id, matching the `_id` key of the MongoDB sort.
        let BookSort::CreatedAt(order) = options.sort;
        matched.sort_by(|a, b| {
            a.created_at()
                .unix_millis()
                .cmp(&b.created_at().unix_millis())
                .then_with(|| a.id().cmp(b.id()))
        });
        if order == Order::Descending {
            matched.reverse();
        }

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(options.limit).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, filter: &BookFilter) -> error_stack::Result<u64, KernelError> {
        let matcher = Matcher::compile(filter)?;
        let books = self.books.read().await;
        Ok(books.iter().filter(|book| matcher.matches(book)).count() as u64)
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    async fn create(&self, book: &Book) -> error_stack::Result<(), KernelError> {
        let mut books = self.books.write().await;
        if books.iter().any(|stored| stored.id() == book.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("duplicate key: {}", book.id())));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> error_stack::Result<u64, KernelError> {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|stored| stored.id() == book.id()) {
            Some(stored) => {
                *stored = book.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, book_id: &BookId) -> error_stack::Result<u64, KernelError> {
        let mut books = self.books.write().await;
        match books.iter().position(|stored| stored.id() == book_id) {
            Some(index) => {
                books.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::query::{
        BookField, BookFilter, BookFindOptions, BookQuery, BookSort, Order,
    };
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookData, BookId, BookName, CreatedAt};
    use kernel::KernelError;

    use super::InMemoryBookRepository;

    fn at(id: &str, millis: i64, name: &str, author: &str) -> Book {
        Book::new(
            BookId::new(id),
            CreatedAt::from_unix_millis(millis).expect("valid timestamp"),
            BookData::new(BookName::new(name), BookAuthor::new(author)),
        )
    }

    fn ids(books: Vec<Book>) -> Vec<String> {
        books.iter().map(|book| book.id().to_string()).collect()
    }

    fn search(pattern: &str) -> BookFilter {
        BookFilter::TextSearch {
            fields: vec![BookField::Name, BookField::Author],
            pattern: pattern.to_string(),
        }
    }

    fn newest_first(skip: u64, limit: u64) -> BookFindOptions {
        BookFindOptions {
            sort: BookSort::CreatedAt(Order::Descending),
            skip,
            limit,
        }
    }

    #[tokio::test]
    async fn crud() -> error_stack::Result<(), KernelError> {
        let repository = InMemoryBookRepository::new();
        let book = at("a", 1_000, "Foo", "Bar");

        repository.create(&book).await?;
        assert_eq!(repository.find_by_id(book.id()).await?, Some(book.clone()));

        let report = repository.create(&book).await.unwrap_err();
        assert_eq!(*report.current_context(), KernelError::Internal);

        let renamed = at("a", 1_000, "Foo II", "Bar");
        assert_eq!(repository.update(&renamed).await?, 1);
        assert_eq!(repository.find_by_id(book.id()).await?, Some(renamed));
        assert_eq!(repository.update(&at("b", 0, "x", "y")).await?, 0);

        assert_eq!(repository.delete(book.id()).await?, 1);
        assert_eq!(repository.delete(book.id()).await?, 0);
        assert_eq!(repository.find_by_id(book.id()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn orders_by_creation_time() -> error_stack::Result<(), KernelError> {
        let repository = InMemoryBookRepository::new();
        repository.create(&at("middle", 2_000, "b", "b")).await?;
        repository.create(&at("oldest", 1_000, "a", "a")).await?;
        repository.create(&at("newest", 3_000, "c", "c")).await?;

        let books = repository
            .find_all(&BookFilter::AllMatch, &newest_first(0, 10))
            .await?;
        assert_eq!(ids(books), vec!["newest", "middle", "oldest"]);

        let books = repository
            .find_all(&BookFilter::AllMatch, &newest_first(1, 1))
            .await?;
        assert_eq!(ids(books), vec!["middle"]);

        let oldest_first = BookFindOptions {
            sort: BookSort::CreatedAt(Order::Ascending),
            skip: 0,
            limit: 10,
        };
        let books = repository
            .find_all(&BookFilter::AllMatch, &oldest_first)
            .await?;
        assert_eq!(ids(books), vec!["oldest", "middle", "newest"]);
        Ok(())
    }

    #[tokio::test]
    async fn equal_timestamps_order_by_id() -> error_stack::Result<(), KernelError> {
        let repository = InMemoryBookRepository::new();
        repository.create(&at("b", 1_000, "b", "b")).await?;
        repository.create(&at("c", 1_000, "c", "c")).await?;
        repository.create(&at("a", 1_000, "a", "a")).await?;

        let books = repository
            .find_all(&BookFilter::AllMatch, &newest_first(0, 10))
            .await?;
        assert_eq!(ids(books), vec!["c", "b", "a"]);

        let books = repository
            .find_all(&BookFilter::AllMatch, &newest_first(u64::MAX, 10))
            .await?;
        assert!(books.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_across_fields() -> error_stack::Result<(), KernelError> {
        let repository = InMemoryBookRepository::new();
        repository.create(&at("1", 1_000, "Foo", "Bar")).await?;
        repository.create(&at("2", 2_000, "Baz", "Qux")).await?;
        repository
            .create(&at("3", 3_000, "Notes\nfoot", "Someone"))
            .await?;

        assert_eq!(repository.count(&search("foo")).await?, 2);
        assert_eq!(repository.count(&search("QUX")).await?, 1);
        assert_eq!(repository.count(&search("^foot$")).await?, 1);
        assert_eq!(repository.count(&BookFilter::AllMatch).await?, 3);

        let books = repository
            .find_all(&search("ba"), &newest_first(0, 10))
            .await?;
        assert_eq!(books.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_pattern_is_internal() {
        let repository = InMemoryBookRepository::new();
        let report = repository.count(&search("(")).await.unwrap_err();
        assert_eq!(*report.current_context(), KernelError::Internal);
    }
}
