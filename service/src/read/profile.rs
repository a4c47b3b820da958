//! [`Profile`] read model definition.
//!
//! [`Profile`]: crate::domain::Profile

pub mod list {
    //! [`Profile`]s list definitions.

    use common::define_pagination;
    use derive_more::{AsRef, Display};

    use crate::domain::{profile, Profile};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = Profile;

    /// Cursor pointing to a specific [`Profile`] in a list.
    ///
    /// The pair `(created_at, id)` is a unique, totally ordered composite key:
    /// `created_at` alone may collide, so [`profile::Id`] breaks ties. A
    /// [`Cursor`] is the exclusive lower bound of the page following the row
    /// it points at.
    #[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
    pub struct Cursor {
        /// [`profile::CreationDateTime`] of the [`Profile`] pointed at.
        pub created_at: profile::CreationDateTime,

        /// [`profile::Id`] of the [`Profile`] pointed at.
        pub id: profile::Id,
    }

    impl From<&Profile> for Cursor {
        fn from(profile: &Profile) -> Self {
            Self {
                created_at: profile.created_at,
                id: profile.id,
            }
        }
    }

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Search`] term to match [`Profile`]s against.
        pub search: Option<Search>,
    }

    impl Filter {
        /// Creates a new [`Filter`] from a raw search input.
        ///
        /// An empty (or whitespace-only) input means "no filter".
        #[must_use]
        pub fn new(search: impl AsRef<str>) -> Self {
            Self {
                search: Search::new(search.as_ref()),
            }
        }
    }

    /// Committed search term.
    ///
    /// Matched case-insensitively as a substring against a [`Profile`]'s
    /// first name, last name and email (logical OR). Never empty: the absence
    /// of a term is expressed as [`Option::None`] in a [`Filter`].
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str, String)]
    pub struct Search(String);

    impl Search {
        /// Creates a new [`Search`] term, if the given `input` contains any
        /// non-whitespace characters.
        #[must_use]
        pub fn new(input: impl Into<String>) -> Option<Self> {
            let input = input.into();
            (!input.trim().is_empty()).then_some(Self(input))
        }
    }

    #[cfg(test)]
    mod spec {
        use super::Filter;

        #[test]
        fn empty_input_means_no_filter() {
            assert!(Filter::new("").search.is_none());
            assert!(Filter::new("   ").search.is_none());
            assert!(Filter::new("ada").search.is_some());
        }
    }
}
