//! Admin directory session engine.

pub mod debounce;
pub mod stack;

use std::{cell::RefCell, rc::Rc, time::Duration};

use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{update_profile_role, UpdateProfileRole},
    domain::{profile, Profile, Session},
    infra::database,
    query,
    read::profile::list,
    Command, Query,
};

pub use self::{debounce::Debouncer, stack::CursorStack};

/// [`Directory`] configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// Number of [`Profile`]s per page.
    #[default(10)]
    pub page_size: usize,

    /// Quiet interval after the last search keystroke before the term is
    /// committed.
    #[default(Duration::from_millis(300))]
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
}

/// Paginated, searchable directory of [`Profile`]s browsed by one admin.
///
/// Owns all the state of one browsing session: the committed search term,
/// the current cursor, the [`CursorStack`], the displayed page and the
/// [`Debouncer`]. Single-writer by construction: every transition happens
/// through a method of this type, and no borrow of the state is ever held
/// across a suspension point.
///
/// Clones share the same session state, so a clone may be handed to a
/// scheduled task while the original keeps serving input events.
#[derive(Clone, Debug)]
pub struct Directory<Svc> {
    /// Service executing queries and commands of this [`Directory`].
    svc: Svc,

    /// [`Session`] of the admin browsing this [`Directory`].
    session: Session,

    /// [`Config`] of this [`Directory`].
    config: Config,

    /// State of this browsing session.
    state: Rc<RefCell<State>>,

    /// [`Debouncer`] of search input.
    debouncer: Rc<RefCell<Debouncer>>,
}

/// State of one [`Directory`] browsing session.
#[derive(Debug, Default)]
struct State {
    /// Committed search term, where an empty string means "no filter".
    search: String,

    /// Cursor the displayed page was requested with.
    ///
    /// [`None`] addresses the first page.
    cursor: Option<list::Cursor>,

    /// [`CursorStack`] of this session.
    stack: CursorStack<list::Cursor>,

    /// Most recently applied page, if any.
    page: Option<list::Page>,

    /// Indicator whether a fetch is in flight.
    fetching: bool,

    /// Message of the last failed operation, if any.
    last_error: Option<String>,

    /// Number of the most recently issued fetch.
    ///
    /// A completed fetch is applied only if no later fetch has been issued
    /// since, so out-of-order responses can never clobber newer state.
    generation: u64,
}

/// Read-only view of a [`Directory`] for rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// [`Profile`]s of the displayed page.
    pub profiles: Vec<Profile>,

    /// Number of the displayed page, starting at 1.
    pub page_number: usize,

    /// Indicator whether a page exists after the displayed one.
    pub has_next_page: bool,

    /// Indicator whether a fetch is in flight.
    pub fetching: bool,

    /// Committed search term.
    pub search: String,

    /// Message of the last failed operation, if any.
    pub last_error: Option<String>,
}

impl<Svc> Directory<Svc> {
    /// Creates a new [`Directory`] browsed by the provided [`Session`].
    ///
    /// The configured page size is clamped to the `1..=100` range.
    #[must_use]
    pub fn new(svc: Svc, session: Session, mut config: Config) -> Self {
        config.page_size = config.page_size.clamp(1, 100);
        Self {
            svc,
            session,
            config,
            state: Rc::default(),
            debouncer: Rc::default(),
        }
    }
}

impl<Svc> Directory<Svc>
where
    Svc: Query<
            query::profiles::List,
            Ok = list::Page,
            Err = Traced<database::Error>,
        > + Command<
            UpdateProfileRole,
            Ok = Profile,
            Err = Traced<update_profile_role::ExecutionError>,
        > + Clone
        + 'static,
{
    /// Fetches the page addressed by the current navigation state and
    /// applies it, unless superseded by a later fetch meanwhile.
    ///
    /// Idempotent: re-issuing it with unchanged state returns an identical
    /// page against an unchanged store.
    ///
    /// # Errors
    ///
    /// If the store fails. The displayed page is left unchanged then, and
    /// the same fetch may be retried by calling this method again.
    pub async fn refresh(&self) -> Result<(), Traced<database::Error>> {
        let (generation, selector) = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.fetching = true;
            (
                state.generation,
                list::Selector {
                    arguments: list::Arguments::new(
                        self.config.page_size,
                        state.cursor,
                    ),
                    filter: list::Filter::new(&state.search),
                },
            )
        };

        let result =
            self.svc.execute(query::profiles::List::by(selector)).await;

        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            log::debug!("discarding stale page response");
            return Ok(());
        }
        state.fetching = false;
        match result {
            Ok(page) => {
                state.page = Some(page);
                state.last_error = None;
                Ok(())
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Advances this [`Directory`] to the next page and fetches it.
    ///
    /// No-op if the displayed page is not followed by another one.
    ///
    /// # Errors
    ///
    /// If the store fails. The navigation state remains at the requested
    /// page, so [`Directory::refresh()`] retries the same fetch.
    pub async fn next_page(&self) -> Result<(), Traced<database::Error>> {
        {
            let mut state = self.state.borrow_mut();
            let Some(next) =
                state.page.as_ref().and_then(|p| p.next_cursor().copied())
            else {
                return Ok(());
            };
            let left = state.cursor;
            state.stack.push(left);
            state.cursor = Some(next);
        }
        self.refresh().await
    }

    /// Returns this [`Directory`] to the previous page and fetches it.
    ///
    /// No-op if the first page is displayed.
    ///
    /// # Errors
    ///
    /// If the store fails. The navigation state remains at the requested
    /// page, so [`Directory::refresh()`] retries the same fetch.
    pub async fn previous_page(&self) -> Result<(), Traced<database::Error>> {
        {
            let mut state = self.state.borrow_mut();
            let Some(cursor) = state.stack.pop() else {
                return Ok(());
            };
            state.cursor = cursor;
        }
        self.refresh().await
    }

    /// Accepts one raw search keystroke.
    ///
    /// The input is committed once the configured quiet interval elapses
    /// without further keystrokes. Intermediate values never produce a
    /// fetch.
    ///
    /// # Panics
    ///
    /// If called outside a [`tokio::task::LocalSet`] context.
    pub fn on_search_input(&self, raw: impl Into<String>) {
        let raw = raw.into();
        let this = self.clone();
        self.debouncer
            .borrow_mut()
            .schedule(self.config.debounce, async move {
                this.commit_search(raw).await;
            });
    }

    /// Commits the provided search `term` and restarts pagination at the
    /// first page under the new filter.
    ///
    /// Unconditional: committing a term equal to the current one resets the
    /// navigation state all the same.
    async fn commit_search(&self, term: String) {
        {
            let mut state = self.state.borrow_mut();
            state.search = term;
            state.stack.clear();
            state.cursor = None;
        }
        if let Err(e) = self.refresh().await {
            log::warn!("failed to fetch page after search commit: {e}");
        }
    }

    /// Changes the [`profile::Role`] of the [`Profile`] with the provided
    /// [`profile::Id`] and returns the updated [`Profile`].
    ///
    /// On success the displayed page is refetched rather than patched in
    /// place, as its cached rows may diverge from the store after concurrent
    /// edits by other admins.
    ///
    /// # Errors
    ///
    /// If the requester is not authorized, the [`Profile`] doesn't exist, or
    /// the store fails. No local state changes then, apart from recording
    /// the error.
    pub async fn set_role(
        &self,
        profile_id: profile::Id,
        role: profile::Role,
    ) -> Result<Profile, Traced<update_profile_role::ExecutionError>> {
        let update = UpdateProfileRole {
            session: self.session,
            profile_id,
            role,
        };
        let updated = match self.svc.execute(update).await {
            Ok(updated) => updated,
            Err(e) => {
                self.state.borrow_mut().last_error = Some(e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self.refresh().await {
            log::warn!("failed to refetch page after role change: {e}");
        }
        Ok(updated)
    }

    /// Returns a [`Snapshot`] of this [`Directory`] for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.borrow();
        Snapshot {
            profiles: state
                .page
                .as_ref()
                .map(|p| p.nodes().cloned().collect())
                .unwrap_or_default(),
            page_number: state.stack.page_number(),
            has_next_page: state
                .page
                .as_ref()
                .is_some_and(|p| p.has_next_page),
            fetching: state.fetching,
            search: state.search.clone(),
            last_error: state.last_error.clone(),
        }
    }

    /// Returns the number of the currently displayed page, starting at 1.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.state.borrow().stack.page_number()
    }
}
