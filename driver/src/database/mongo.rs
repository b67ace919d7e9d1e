use error_stack::Report;
use mongodb::{Client, Database};

use kernel::KernelError;

use crate::error::ConvertError;
use crate::{env, env_or};

pub use self::book::*;

mod book;

static MONGODB_URL: &str = "MONGODB_URL";
static MONGODB_DATABASE: &str = "MONGODB_DATABASE";
const DEFAULT_DATABASE: &str = "keyauth";

/// Process-wide handle on the configured database. Cloning shares the driver's connection pool.
#[derive(Clone)]
pub struct MongoDatabase {
    database: Database,
}

impl MongoDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(MONGODB_URL)?;
        let name = env_or(MONGODB_DATABASE, DEFAULT_DATABASE);
        let client = Client::with_uri_str(&url).await.convert_error()?;
        tracing::info!("connected to mongodb database {name}");
        Ok(Self {
            database: client.database(&name),
        })
    }

    pub fn book_repository(&self) -> MongoBookRepository {
        MongoBookRepository::new(&self.database)
    }
}

impl<T> ConvertError for Result<T, mongodb::error::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}
