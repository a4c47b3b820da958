//! In-memory [`Database`] stub for tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use common::operations::{By, Commit, Lock, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    read::profile::list,
};

use super::{Database, Error};

/// In-memory [`Database`] over a shared [`Vec`] of [`Profile`]s.
///
/// Cloning yields a handle to the same storage, so a test may keep one handle
/// for assertions while the exercised code owns another.
#[derive(Clone, Debug, Default)]
pub(crate) struct InMemory {
    /// Shared storage of this [`InMemory`] database.
    inner: Arc<Mutex<Inner>>,
}

/// Storage behind an [`InMemory`] database.
#[derive(Debug, Default)]
struct Inner {
    /// Stored [`Profile`]s, in insertion order.
    rows: Vec<Profile>,

    /// Whether the next operation should fail.
    fail_next: bool,

    /// Artificial latency of page queries.
    delay: Option<Duration>,

    /// Number of performed write operations.
    writes: usize,

    /// Number of performed page queries.
    page_queries: usize,
}

impl InMemory {
    /// Inserts the provided [`Profile`] into this [`InMemory`] database.
    pub(crate) fn insert(&self, profile: Profile) {
        self.inner.lock().unwrap().rows.push(profile);
    }

    /// Returns the [`profile::Role`] of the [`Profile`] with the provided
    /// [`profile::Id`], if it's stored.
    pub(crate) fn role_of(&self, id: profile::Id) -> Option<profile::Role> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.role)
    }

    /// Returns the number of write operations performed so far.
    pub(crate) fn writes(&self) -> usize {
        self.inner.lock().unwrap().writes
    }

    /// Returns the number of page queries performed so far.
    pub(crate) fn page_queries(&self) -> usize {
        self.inner.lock().unwrap().page_queries
    }

    /// Makes the next operation fail with an [`Error::Unavailable`].
    pub(crate) fn fail_next(&self) {
        self.inner.lock().unwrap().fail_next = true;
    }

    /// Delays every following page query by the provided [`Duration`].
    pub(crate) fn set_delay(&self, delay: Option<Duration>) {
        self.inner.lock().unwrap().delay = delay;
    }

    /// Consumes a pending [`InMemory::fail_next()`] arrangement, if any.
    fn take_failure(&self) -> Result<(), Traced<Error>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next {
            inner.fail_next = false;
            return Err(tracerr::new!(Error::Unavailable));
        }
        Ok(())
    }
}

/// Creates a [`Profile`] with the [`profile::Id`] encoded by the provided
/// `suffix` hex digits.
pub(crate) fn profile(
    suffix: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Profile {
    Profile {
        id: id(suffix),
        first_name: first_name.parse().unwrap(),
        last_name: last_name.parse().unwrap(),
        email: email.parse().unwrap(),
        role: profile::Role::User,
        created_at: common::DateTime::UNIX_EPOCH.coerce(),
    }
}

/// Creates a [`profile::Id`] from the provided hex digits.
///
/// Lexicographic order of equal-length suffixes matches the order of the
/// produced IDs.
pub(crate) fn id(suffix: &str) -> profile::Id {
    uuid::Uuid::from_u128(u128::from_str_radix(suffix, 16).unwrap()).into()
}

impl Database<Select<By<Option<Profile>, profile::Id>>> for InMemory {
    type Ok = Option<Profile>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Select<By<Option<Profile>, profile::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.take_failure()?;

        let id = op.0.into_inner();
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
}

impl Database<Select<By<list::Page, list::Selector>>> for InMemory {
    type Ok = list::Page;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.take_failure()?;

        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.page_queries += 1;
            inner.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let selector = op.0.into_inner();
        let needle = selector
            .filter
            .search
            .as_ref()
            .map(|s| AsRef::<str>::as_ref(s).to_lowercase());

        let mut rows = self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|p| {
                needle.as_ref().is_none_or(|needle| {
                    [
                        AsRef::<str>::as_ref(&p.first_name),
                        AsRef::<str>::as_ref(&p.last_name),
                        AsRef::<str>::as_ref(&p.email),
                    ]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by_key(|p| list::Cursor::from(p));

        let edges = rows
            .into_iter()
            .filter(|p| {
                selector
                    .arguments
                    .after
                    .is_none_or(|after| list::Cursor::from(p) > after)
            })
            .take(selector.arguments.first + 1)
            .map(|p| (list::Cursor::from(&p), p))
            .collect::<Vec<_>>();

        let has_next_page = edges.len() > selector.arguments.first;
        Ok(list::Page::new(
            edges.into_iter().take(selector.arguments.first),
            has_next_page,
        ))
    }
}

impl Database<Update<profile::RoleChange>> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Update<profile::RoleChange>,
    ) -> Result<Self::Ok, Self::Err> {
        self.take_failure()?;

        let mut inner = self.inner.lock().unwrap();
        inner.writes += 1;
        if let Some(p) = inner.rows.iter_mut().find(|p| p.id == op.0.profile_id)
        {
            p.role = op.0.role;
        }
        Ok(())
    }
}

impl Database<Transact> for InMemory {
    type Ok = Self;
    type Err = Traced<Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        self.take_failure()?;

        Ok(self.clone())
    }
}

impl Database<Lock<By<Profile, profile::Id>>> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Lock<By<Profile, profile::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.take_failure()
    }
}

impl Database<Commit> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.take_failure()
    }
}
