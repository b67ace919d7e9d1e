use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const DEFAULT_PAGE_SIZE: u64 = 20;

/// 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct PageNumber(u64);

impl PageNumber {
    pub fn new(value: impl Into<u64>) -> error_stack::Result<Self, KernelError> {
        let value = value.into();
        if value == 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("page number must be greater than or equal to 1"));
        }
        Ok(PageNumber(value))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct PageSize(u64);

impl PageSize {
    pub fn new(value: impl Into<u64>) -> error_stack::Result<Self, KernelError> {
        let value = value.into();
        if value == 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("page size must be greater than or equal to 1"));
        }
        Ok(PageSize(value))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    page_number: PageNumber,
    page_size: PageSize,
}

impl Pagination {
    pub fn new(page_number: PageNumber, page_size: PageSize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Documents to pass over before the requested page starts.
    pub fn skip(&self) -> u64 {
        self.page_size.0.saturating_mul(self.page_number.0 - 1)
    }

    pub fn limit(&self) -> u64 {
        self.page_size.0
    }
}

#[cfg(test)]
mod test {
    use crate::KernelError;

    use super::{PageNumber, PageSize, Pagination};

    fn page(number: u64, size: u64) -> Pagination {
        Pagination::new(
            PageNumber::new(number).expect("valid page number"),
            PageSize::new(size).expect("valid page size"),
        )
    }

    #[test]
    fn skip_grows_by_page_size() {
        assert_eq!(page(1, 10).skip(), 0);
        assert_eq!(page(2, 10).skip(), 10);
        assert_eq!(page(3, 10).skip(), 20);
        assert_eq!(page(3, 10).limit(), 10);
    }

    #[test]
    fn zero_is_rejected() {
        let number = PageNumber::new(0u64).unwrap_err();
        assert_eq!(*number.current_context(), KernelError::Validation);
        let size = PageSize::new(0u64).unwrap_err();
        assert_eq!(*size.current_context(), KernelError::Validation);
    }

    #[test]
    fn defaults_to_first_page() {
        let pagination = Pagination::default();
        assert_eq!(pagination.skip(), 0);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn skip_saturates() {
        assert_eq!(page(u64::MAX, u64::MAX).skip(), u64::MAX);
    }
}
