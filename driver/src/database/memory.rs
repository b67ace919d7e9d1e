use error_stack::Report;

use kernel::KernelError;

use crate::error::ConvertError;

pub use self::book::*;

mod book;

impl<T> ConvertError for Result<T, regex::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}
