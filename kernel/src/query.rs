mod book;
mod criteria;

pub use self::{book::*, criteria::*};
