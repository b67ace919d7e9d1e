use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use std::ops::Deref;
use std::sync::Arc;

/// Shared application state handed to every route.
pub struct AppModule<R>(Arc<Handler<R>>);

impl<R> AppModule<R> {
    pub fn new(repository: R) -> Self {
        Self(Arc::new(Handler { repository }))
    }
}

impl<R> Clone for AppModule<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> Deref for AppModule<R> {
    type Target = Handler<R>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<R> {
    repository: R,
}

impl<R: BookQuery> DependOnBookQuery for Handler<R> {
    type BookQuery = R;
    fn book_query(&self) -> &Self::BookQuery {
        &self.repository
    }
}

impl<R: BookModifier> DependOnBookModifier for Handler<R> {
    type BookModifier = R;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.repository
    }
}
