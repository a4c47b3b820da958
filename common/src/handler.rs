//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Queries, commands and database operations are all expressed through this
/// single seam, so implementations stay swappable at every layer.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
