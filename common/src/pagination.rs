//! Abstractions for keyset pagination.
//!
//! Pages are addressed by an exclusive lower-bound [`Cursor`] derived from the
//! unique sort key of the last row seen, never by an offset, so concurrent
//! inserts can neither skip nor duplicate rows. Pagination is forward-only:
//! "previous page" is reconstructed by the caller from previously seen
//! cursors rather than by a descending range scan.
//!
//! [`Cursor`]: Edge::cursor

/// Page of `I` nodes selected by keyset pagination.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Connection<C, I> {
    /// [`Edge`]s in this [`Connection`].
    pub edges: Vec<Edge<C, I>>,

    /// Indicator whether more nodes exist past the last [`Edge`].
    pub has_next_page: bool,
}

/// A page in a [`Connection`].
pub type Page<C, I> = Connection<C, I>;

impl<C, I> Connection<C, I> {
    /// Creates a new [`Connection`] from the provided [`Edge`]s.
    #[must_use]
    pub fn new(
        edges: impl IntoIterator<Item = impl Into<Edge<C, I>>>,
        has_next_page: bool,
    ) -> Self {
        Self {
            edges: edges.into_iter().map(Into::into).collect::<Vec<_>>(),
            has_next_page,
        }
    }

    /// Returns the cursor addressing the page following this [`Connection`],
    /// if such a page exists.
    ///
    /// This is the cursor of the last included [`Edge`], representing the
    /// exclusive lower bound of the next page.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&C> {
        self.has_next_page
            .then(|| self.edges.last().map(|e| &e.cursor))
            .flatten()
    }

    /// Returns an [`Iterator`] over the nodes of this [`Connection`].
    pub fn nodes(&self) -> impl Iterator<Item = &I> {
        self.edges.iter().map(|e| &e.node)
    }

    /// Returns the number of nodes in this [`Connection`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Indicates whether this [`Connection`] contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// An edge in a [`Connection`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge<C, I> {
    /// Cursor of this [`Edge`].
    pub cursor: C,

    /// Node of this [`Edge`].
    pub node: I,
}

impl<C, I> From<(C, I)> for Edge<C, I> {
    fn from((cursor, node): (C, I)) -> Self {
        Self { cursor, node }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments<C> {
    /// Number of nodes to return.
    pub first: usize,

    /// Cursor strictly after which to return nodes.
    ///
    /// [`None`] addresses the first page.
    pub after: Option<C>,
}

impl<C> Arguments<C> {
    /// Creates a new [`Arguments`].
    #[must_use]
    pub fn new(first: usize, after: Option<C>) -> Self {
        Self { first, after }
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<C, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty) => {
        #[doc = "Edge of a [`Connection`]."]
        pub type Edge = $crate::pagination::Edge<$cursor, $node>;

        #[doc = "A [`Connection`] of [`$node`]s."]
        pub type Connection = $crate::pagination::Connection<$cursor, $node>;

        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$cursor, $node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$cursor, $filter>;
    };
}

#[cfg(test)]
mod spec {
    use std::iter;

    use super::Connection;

    #[test]
    fn next_cursor_is_last_edge_cursor() {
        let page = Connection::new([(1, "a"), (2, "b"), (3, "c")], true);

        assert_eq!(page.next_cursor(), Some(&3));
        assert_eq!(page.nodes().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn next_cursor_absent_on_last_page() {
        let page = Connection::new([(1, "a"), (2, "b")], false);

        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn next_cursor_absent_on_empty_page() {
        let page =
            Connection::<u8, &str>::new(iter::empty::<(u8, &str)>(), false);

        assert!(page.is_empty());
        assert_eq!(page.next_cursor(), None);
    }
}
