//! HTTP client for the book routes exposed by `server`.

use error_stack::{Report, ResultExt};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use kernel::KernelError;

static BOOK_SERVER_URL: &str = "BOOK_SERVER_URL";
const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    address: String,
}

impl ClientConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// Reads `BOOK_SERVER_URL`, falling back to the local server.
    pub fn from_env() -> Self {
        Self::new(dotenvy::var(BOOK_SERVER_URL).unwrap_or_else(|_| DEFAULT_ADDRESS.to_string()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct QueryBookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct BookData {
    pub name: String,
    pub author: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct Book {
    pub id: String,
    pub created_at: i64,
    pub data: BookData,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct BookSet {
    pub items: Vec<Book>,
    pub total: u64,
}

pub struct BookClient {
    base: Url,
    http: Client,
}

impl BookClient {
    pub fn new(config: &ClientConfig) -> error_stack::Result<Self, KernelError> {
        let base = Url::parse(&config.address)
            .change_context(KernelError::Validation)
            .attach_printable_lazy(|| format!("invalid server address: {}", config.address))?;
        let http = Client::builder()
            .build()
            .change_context(KernelError::Internal)?;
        Ok(Self { base, http })
    }

    fn books_url(&self) -> error_stack::Result<Url, KernelError> {
        self.base
            .join("books")
            .change_context(KernelError::Validation)
    }

    fn query_request(
        &self,
        req: &QueryBookRequest,
    ) -> error_stack::Result<reqwest::Request, KernelError> {
        self.http
            .get(self.books_url()?)
            .query(req)
            .build()
            .change_context(KernelError::Internal)
    }

    #[tracing::instrument(skip(self))]
    pub async fn query_book(
        &self,
        req: &QueryBookRequest,
    ) -> error_stack::Result<BookSet, KernelError> {
        let request = self.query_request(req)?;
        let response = self
            .http
            .execute(request)
            .await
            .change_context(KernelError::Internal)
            .attach_printable("query book request error")?;

        let status = response.status();
        if !status.is_success() {
            return Err(Report::new(status_error(status))
                .attach_printable(format!("query book responded {status}")));
        }

        response
            .json::<BookSet>()
            .await
            .change_context(KernelError::Internal)
            .attach_printable("decode book set error")
    }
}

fn status_error(status: StatusCode) -> KernelError {
    match status {
        StatusCode::BAD_REQUEST => KernelError::Validation,
        StatusCode::NOT_FOUND => KernelError::NotFound,
        _ => KernelError::Internal,
    }
}

#[cfg(test)]
mod test {
    use reqwest::StatusCode;

    use kernel::KernelError;

    use super::{status_error, BookClient, BookSet, ClientConfig, QueryBookRequest};

    #[test]
    fn encodes_only_present_parameters() -> error_stack::Result<(), KernelError> {
        let client = BookClient::new(&ClientConfig::new("http://localhost:8080"))?;

        let request = client.query_request(&QueryBookRequest::default())?;
        assert_eq!(request.url().as_str(), "http://localhost:8080/books");

        let request = client.query_request(&QueryBookRequest {
            page_number: Some(2),
            page_size: Some(10),
            keywords: Some("foo bar".to_string()),
        })?;
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/books?page_number=2&page_size=10&keywords=foo+bar"
        );
        Ok(())
    }

    #[test]
    fn rejects_unparsable_address() {
        let report = BookClient::new(&ClientConfig::new("not a url")).err();
        assert_eq!(
            report.map(|report| *report.current_context()),
            Some(KernelError::Validation)
        );
    }

    #[test]
    fn maps_status_to_error_kind() {
        assert_eq!(status_error(StatusCode::BAD_REQUEST), KernelError::Validation);
        assert_eq!(status_error(StatusCode::NOT_FOUND), KernelError::NotFound);
        assert_eq!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR),
            KernelError::Internal
        );
    }

    #[test]
    fn decodes_server_payload() {
        let set: BookSet = serde_json::from_str(
            r#"{"items":[{"id":"1","created_at":1000,"data":{"name":"Foo","author":"Bar"}}],"total":3}"#,
        )
        .expect("valid payload");
        assert_eq!(set.total, 3);
        assert_eq!(set.items[0].data.name, "Foo");
    }
}
