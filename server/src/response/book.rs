use crate::controller::Exhaust;
use application::transfer::{BookDto, BookSetDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Marks a freshly created record so it is answered with `201 Created`.
pub struct Created<T>(pub T);

#[derive(Debug, Serialize)]
pub struct BookDataResponse {
    name: String,
    author: String,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: String,
    created_at: i64,
    data: BookDataResponse,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
            data: BookDataResponse {
                name: value.name,
                author: value.author,
            },
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookSetResponse {
    items: Vec<BookResponse>,
    total: u64,
}

impl IntoResponse for BookSetResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<()> for BookPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, output: BookDto) -> Self::To {
        BookResponse::from(output)
    }
}

impl Exhaust<Created<BookDto>> for BookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, output: Created<BookDto>) -> Self::To {
        CreatedBookResponse(BookResponse::from(output.0))
    }
}

impl Exhaust<BookSetDto> for BookPresenter {
    type To = BookSetResponse;
    fn emit(&self, output: BookSetDto) -> Self::To {
        BookSetResponse {
            items: output.items.into_iter().map(BookResponse::from).collect(),
            total: output.total,
        }
    }
}
