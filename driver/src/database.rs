mod memory;
mod mongo;

pub use self::{memory::*, mongo::*};
