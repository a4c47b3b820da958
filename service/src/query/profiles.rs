//! [`Query`] collection related to multiple [`Profile`]s.
//!
//! [`Profile`]: crate::domain::Profile

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::read;

use super::DatabaseQuery;

/// Queries a [`read::profile::list::Page`] of [`Profile`]s.
///
/// Requests one more row than the page limit, so the existence of a following
/// page is detected without a separate count query.
///
/// [`Profile`]: crate::domain::Profile
pub type List =
    DatabaseQuery<By<read::profile::list::Page, read::profile::list::Selector>>;
