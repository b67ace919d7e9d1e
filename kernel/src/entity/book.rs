mod author;
mod data;
mod id;
mod name;
mod set;

pub use self::{author::*, data::*, id::*, name::*, set::*};
use crate::entity::common::CreatedAt;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    created_at: CreatedAt<Book>,
    data: BookData,
}

impl Book {
    pub fn new(id: BookId, created_at: CreatedAt<Book>, data: BookData) -> Self {
        Self {
            id,
            created_at,
            data,
        }
    }
}
