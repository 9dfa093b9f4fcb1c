use core::error::Error;
use core::fmt::Debug;
use core::fmt::Display;
use std::backtrace::Backtrace;
use std::backtrace::BacktraceStatus;

/// The catch-all error type of the refa tools.
///
/// Any type implementing [`Error`] (and string messages) converts into a
/// `RefaError` through the blanket [`From`] implementation, so `?` can be
/// used at the boundaries of the command line tools and the I/O functions.
/// A backtrace is captured on creation and printed by the [`Debug`]
/// implementation when `RUST_BACKTRACE` is set.
pub struct RefaError {
    inner: Box<InnerRefaError>,
}

impl RefaError {
    /// Attempts to downcast the underlying error to the given type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.error.downcast_ref::<E>()
    }
}

/// Keeps the `Result<T, RefaError>` a single pointer wide.
struct InnerRefaError {
    error: Box<dyn Error + Send + Sync + 'static>,
    backtrace: Backtrace,
}

// This gives us From<&str> and From<String> as well.
impl<E> From<E> for RefaError
where
    Box<dyn Error + Send + Sync + 'static>: From<E>,
{
    #[cold]
    fn from(error: E) -> Self {
        RefaError {
            inner: Box::new(InnerRefaError {
                error: error.into(),
                backtrace: Backtrace::capture(),
            }),
        }
    }
}

impl Display for RefaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.inner.error)
    }
}

impl Debug for RefaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self.inner.error)?;

        let backtrace = &self.inner.backtrace;
        if let BacktraceStatus::Captured = backtrace.status() {
            writeln!(f, "{backtrace}")?;
        }

        Ok(())
    }
}
