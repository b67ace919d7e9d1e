use crate::entity::Pagination;

/// Text fields of a book that a keyword search can look into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Name,
    Author,
}

/// Store-independent predicate. Drivers translate it into their native query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    AllMatch,
    /// Matches when any of `fields` contains `pattern` as a case-insensitive,
    /// multi-line regular expression.
    TextSearch {
        fields: Vec<BookField>,
        pattern: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSort {
    CreatedAt(Order),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookFindOptions {
    pub sort: BookSort,
    pub skip: u64,
    pub limit: u64,
}

/// Logical list request: a page window plus an optional keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBookRequest {
    page: Pagination,
    keywords: Option<String>,
}

impl QueryBookRequest {
    pub fn new(page: Pagination, keywords: Option<String>) -> Self {
        // Blank keywords list everything rather than searching for whitespace.
        let keywords = keywords
            .map(|keywords| keywords.trim().to_string())
            .filter(|keywords| !keywords.is_empty());
        Self { page, keywords }
    }

    pub fn filter(&self) -> BookFilter {
        match &self.keywords {
            None => BookFilter::AllMatch,
            Some(keywords) => BookFilter::TextSearch {
                fields: vec![BookField::Name, BookField::Author],
                pattern: keywords.clone(),
            },
        }
    }

    /// Newest first, windowed to the requested page.
    pub fn options(&self) -> BookFindOptions {
        BookFindOptions {
            sort: BookSort::CreatedAt(Order::Descending),
            skip: self.page.skip(),
            limit: self.page.limit(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{PageNumber, PageSize, Pagination};

    use super::{BookField, BookFilter, BookSort, Order, QueryBookRequest};

    fn request(page_number: u64, keywords: Option<&str>) -> QueryBookRequest {
        let page = Pagination::new(
            PageNumber::new(page_number).expect("valid page number"),
            PageSize::new(10u64).expect("valid page size"),
        );
        QueryBookRequest::new(page, keywords.map(str::to_string))
    }

    #[test]
    fn without_keywords_matches_everything() {
        assert_eq!(request(1, None).filter(), BookFilter::AllMatch);
        assert_eq!(request(1, Some("")).filter(), BookFilter::AllMatch);
        assert_eq!(request(1, Some("   ")).filter(), BookFilter::AllMatch);
    }

    #[test]
    fn keywords_search_name_and_author() {
        assert_eq!(
            request(1, Some(" foo ")).filter(),
            BookFilter::TextSearch {
                fields: vec![BookField::Name, BookField::Author],
                pattern: "foo".to_string(),
            }
        );
    }

    #[test]
    fn options_sort_newest_first_and_window_the_page() {
        let options = request(1, None).options();
        assert_eq!(options.sort, BookSort::CreatedAt(Order::Descending));
        assert_eq!((options.skip, options.limit), (0, 10));

        let options = request(2, None).options();
        assert_eq!((options.skip, options.limit), (10, 10));

        let options = request(3, Some("foo")).options();
        assert_eq!((options.skip, options.limit), (20, 10));
    }
}
