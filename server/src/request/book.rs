use crate::controller::Intake;
use application::transfer::{
    CreateBookDto, DeleteBookDto, GetBookDto, PatchBookDto, QueryBookDto,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    id: Option<String>,
    name: String,
    author: String,
}

/// Body of `PUT /books/:id`. Both fields are replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    name: String,
    author: String,
}

/// Body of `PATCH /books/:id`. Only present fields are replaced.
#[derive(Debug, Deserialize)]
pub struct PatchBookRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryBookRequest {
    #[serde(default)]
    page_number: Option<u64>,
    #[serde(default)]
    page_size: Option<u64>,
    #[serde(default)]
    keywords: Option<String>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: String,
}

impl GetBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: String,
}

impl DeleteBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            id: input.id,
            name: input.name,
            author: input.author,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<QueryBookRequest> for BookTransformer {
    type To = QueryBookDto;
    fn emit(&self, input: QueryBookRequest) -> Self::To {
        QueryBookDto {
            page_number: input.page_number,
            page_size: input.page_size,
            keywords: input.keywords,
        }
    }
}

impl Intake<(String, UpdateBookRequest)> for BookTransformer {
    type To = PatchBookDto;
    fn emit(&self, input: (String, UpdateBookRequest)) -> Self::To {
        let (id, input) = input;
        PatchBookDto {
            id,
            name: Some(input.name),
            author: Some(input.author),
        }
    }
}

impl Intake<(String, PatchBookRequest)> for BookTransformer {
    type To = PatchBookDto;
    fn emit(&self, input: (String, PatchBookRequest)) -> Self::To {
        let (id, input) = input;
        PatchBookDto {
            id,
            name: input.name,
            author: input.author,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}
