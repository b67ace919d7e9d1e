use error_stack::{Report, ResultExt};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use kernel::interface::query::{BookField, BookFilter, BookFindOptions, BookQuery, BookSort, Order};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookData, BookId, BookName, CreatedAt, DestructBook, DestructBookData,
};
use kernel::KernelError;

use crate::error::ConvertError;

pub const BOOK_COLLECTION: &str = "book";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: String,
    create_at: i64,
    data: BookDataDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDataDocument {
    name: String,
    author: String,
}

impl From<Book> for BookDocument {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            created_at,
            data,
        } = value.into_destruct();
        let DestructBookData { name, author } = data.into_destruct();
        Self {
            id: id.into(),
            create_at: created_at.unix_millis(),
            data: BookDataDocument {
                name: name.into(),
                author: author.into(),
            },
        }
    }
}

impl TryFrom<BookDocument> for Book {
    type Error = Report<KernelError>;
    fn try_from(value: BookDocument) -> Result<Self, Self::Error> {
        let created_at = CreatedAt::from_unix_millis(value.create_at)
            .attach_printable_lazy(|| format!("decode book {} error", value.id))?;
        Ok(Book::new(
            BookId::new(value.id),
            created_at,
            BookData::new(
                BookName::new(value.data.name),
                BookAuthor::new(value.data.author),
            ),
        ))
    }
}

fn field_path(field: &BookField) -> &'static str {
    match field {
        BookField::Name => "data.name",
        BookField::Author => "data.author",
    }
}

fn filter_document(filter: &BookFilter) -> Document {
    match filter {
        BookFilter::AllMatch => Document::new(),
        BookFilter::TextSearch { fields, pattern } => {
            // "i": ignore case, "m": anchors match at line breaks
            let conditions = fields
                .iter()
                .map(|field| {
                    let mut condition = Document::new();
                    condition.insert(
                        field_path(field),
                        doc! { "$regex": pattern.as_str(), "$options": "im" },
                    );
                    Bson::Document(condition)
                })
                .collect::<Vec<_>>();
            doc! { "$or": conditions }
        }
    }
}

fn sort_document(sort: &BookSort) -> Document {
    match sort {
        BookSort::CreatedAt(Order::Ascending) => doc! { "create_at": 1, "_id": 1 },
        BookSort::CreatedAt(Order::Descending) => doc! { "create_at": -1, "_id": -1 },
    }
}

fn find_options(options: &BookFindOptions) -> FindOptions {
    FindOptions::builder()
        .sort(sort_document(&options.sort))
        // The server reads skip as a signed 64-bit integer.
        .skip(options.skip.min(i64::MAX as u64))
        .limit(i64::try_from(options.limit).unwrap_or(i64::MAX))
        .build()
}

fn id_filter(id: &BookId) -> Document {
    doc! { "_id": id.to_string() }
}

/// Book access over a single MongoDB collection.
#[derive(Clone)]
pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(BOOK_COLLECTION),
        }
    }
}

#[async_trait::async_trait]
impl BookQuery for MongoBookRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError> {
        let found = self
            .collection
            .find_one(id_filter(id), None)
            .await
            .convert_error()?;
        found.map(Book::try_from).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        filter: &BookFilter,
        options: &BookFindOptions,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let cursor = self
            .collection
            .find(filter_document(filter), find_options(options))
            .await
            .convert_error()?;
        let documents: Vec<BookDocument> = cursor
            .try_collect()
            .await
            .convert_error()
            .attach_printable("decode book error")?;
        documents.into_iter().map(Book::try_from).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, filter: &BookFilter) -> error_stack::Result<u64, KernelError> {
        let count = self
            .collection
            .count_documents(filter_document(filter), None)
            .await
            .convert_error()?;
        tracing::debug!("{count} books matched");
        Ok(count)
    }
}

#[async_trait::async_trait]
impl BookModifier for MongoBookRepository {
    #[tracing::instrument(skip(self))]
    async fn create(&self, book: &Book) -> error_stack::Result<(), KernelError> {
        self.collection
            .insert_one(BookDocument::from(book.clone()), None)
            .await
            .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, book: &Book) -> error_stack::Result<u64, KernelError> {
        let result = self
            .collection
            .replace_one(id_filter(book.id()), BookDocument::from(book.clone()), None)
            .await
            .convert_error()?;
        Ok(result.matched_count)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, book_id: &BookId) -> error_stack::Result<u64, KernelError> {
        let result = self
            .collection
            .delete_one(id_filter(book_id), None)
            .await
            .convert_error()?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod test {
    use mongodb::bson::doc;

    use kernel::interface::query::{
        BookField, BookFilter, BookFindOptions, BookQuery, BookSort, Order, QueryBookRequest,
    };
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookData, BookId, BookName, CreatedAt, PageNumber, PageSize, Pagination,
    };
    use kernel::KernelError;

    use crate::database::mongo::book::{filter_document, find_options, BookDocument};
    use crate::database::MongoDatabase;

    fn book(id: &BookId, name: &str, author: &str) -> Book {
        Book::new(
            id.clone(),
            CreatedAt::now(),
            BookData::new(BookName::new(name), BookAuthor::new(author)),
        )
    }

    #[test]
    fn all_match_is_an_empty_filter() {
        assert_eq!(filter_document(&BookFilter::AllMatch), doc! {});
    }

    #[test]
    fn text_search_ors_regex_over_fields() {
        let filter = BookFilter::TextSearch {
            fields: vec![BookField::Name, BookField::Author],
            pattern: "foo".to_string(),
        };
        assert_eq!(
            filter_document(&filter),
            doc! {
                "$or": [
                    { "data.name": { "$regex": "foo", "$options": "im" } },
                    { "data.author": { "$regex": "foo", "$options": "im" } },
                ]
            }
        );
    }

    #[test]
    fn options_sort_and_window() {
        let options = find_options(&BookFindOptions {
            sort: BookSort::CreatedAt(Order::Descending),
            skip: 20,
            limit: 10,
        });
        assert_eq!(options.sort, Some(doc! { "create_at": -1, "_id": -1 }));
        assert_eq!(options.skip, Some(20));
        assert_eq!(options.limit, Some(10));
    }

    #[test]
    fn far_pages_stay_within_signed_range() {
        let request = QueryBookRequest::new(
            Pagination::new(
                PageNumber::new(1u64 << 62).expect("valid page number"),
                PageSize::new(4u64).expect("valid page size"),
            ),
            None,
        );
        let options = find_options(&request.options());
        assert_eq!(options.skip, Some(i64::MAX as u64));
        assert_eq!(options.limit, Some(4));
    }

    #[test]
    fn document_keeps_nested_layout() -> error_stack::Result<(), KernelError> {
        let original = book(&BookId::new("book-1"), "Foo", "Bar");
        let document = BookDocument::from(original.clone());
        assert_eq!(document.id, "book-1");
        assert_eq!(document.data.name, "Foo");
        assert_eq!(document.data.author, "Bar");
        assert_eq!(document.create_at, original.created_at().unix_millis());
        assert_eq!(Book::try_from(document)?, original);
        Ok(())
    }

    #[test_with::env(MONGODB_TEST)]
    #[tokio::test]
    async fn crud() -> error_stack::Result<(), KernelError> {
        let db = MongoDatabase::new().await?;
        let repository = db.book_repository();
        let id = BookId::generate();
        let created = book(&id, "test", "tester");

        repository.create(&created).await?;
        let found = repository.find_by_id(&id).await?;
        assert_eq!(found, Some(created.clone()));

        let filter = BookFilter::TextSearch {
            fields: vec![BookField::Name, BookField::Author],
            pattern: "TESTER".to_string(),
        };
        assert!(repository.count(&filter).await? >= 1);

        let updated = created.reconstruct(|b| {
            b.data = BookData::new(BookName::new("test2"), BookAuthor::new("tester"))
        });
        assert_eq!(repository.update(&updated).await?, 1);
        let found = repository.find_by_id(&id).await?;
        assert_eq!(found, Some(updated));

        assert_eq!(repository.delete(&id).await?, 1);
        assert_eq!(repository.delete(&id).await?, 0);
        let found = repository.find_by_id(&id).await?;
        assert!(found.is_none());

        Ok(())
    }
}
