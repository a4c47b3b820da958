//! [`Database`]-related implementations.

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(test)]
pub(crate) mod stub;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
///
/// Transient from the caller's perspective: the failed operation may be
/// retried by re-issuing it with unchanged arguments. Callers must not treat
/// any partial result as usable.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),

    /// Store could not be reached.
    #[display("store unavailable")]
    #[from(ignore)]
    Unavailable,
}
