//! Postgres database client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Non-transactional Postgres database client.
///
/// Every operation checks a [`Connection`] out of the [`connection::Pool`]
/// and returns it once finished, so clones of this client may be used
/// concurrently.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to check [`Connection`]s out of.
    pub(crate) pool: connection::Pool,
}

impl NonTx {
    /// Creates a new [`NonTx`] client from the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self { pool }
    }

    /// Checks a [`Connection`] out of the [`connection::Pool`].
    async fn connection(
        &self,
    ) -> Result<connection::NonTx, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl Connection for NonTx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .exec(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Transactional Postgres database client.
///
/// Holds a single started [`connection::Tx`], pinning all operations issued
/// through this client to one transaction until it's committed.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Started [`connection::Tx`], until committed.
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Starts a new [`Tx`] client on a [`Connection`] checked out of the
    /// provided [`connection::Pool`].
    ///
    /// # Errors
    ///
    /// If failed to check out a [`Connection`], or to start a transaction on
    /// it.
    pub(crate) async fn start(
        pool: &connection::Pool,
    ) -> Result<Self, Traced<database::Error>> {
        let conn = pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        let tx = connection::Tx::from_non_tx(conn)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Self {
            tx: Arc::new(RwLock::new(Some(tx))),
        })
    }

    /// Returns the underlying [`connection::Tx`] of this [`Tx`] client.
    async fn connection(
        &self,
    ) -> RwLockReadGuard<'_, connection::Tx> {
        RwLockReadGuard::map(self.tx.read().await, |tx| {
            tx.as_ref().expect("already committed")
        })
    }

    /// Commits this [`Tx`] client.
    ///
    /// Committing an already committed [`Tx`] client is a no-op.
    ///
    /// # Errors
    ///
    /// If failed to commit transaction of this [`Tx`] client.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        if let Some(tx) = self.tx.write().await.take() {
            tx.commit().await.map_err(tracerr::wrap!())
        } else {
            Ok(())
        }
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .query(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .exec(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }
}
