use std::alloc;
use std::error::Error;

use crate::collections::contiguous::error::{AllocFailure, ReserveError};

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait ReserveResultExtension<T> {
    /// Unwraps the result of a reservation for the infallible APIs. Allocator failures are passed
    /// to [`alloc::handle_alloc_error`] rather than panicking, which avoids allocating any further.
    ///
    /// # Panics
    /// Panics if the reservation failed with a capacity overflow.
    fn or_handle_alloc_error(self) -> T;
}

impl<T> ReserveResultExtension<T> for Result<T, ReserveError> {
    #[track_caller]
    fn or_handle_alloc_error(self) -> T {
        match self {
            Ok(val) => val,
            Err(ReserveError::AllocFailure(AllocFailure { layout })) => {
                alloc::handle_alloc_error(layout)
            },
            Err(error) => panic!("{}", error),
        }
    }
}
