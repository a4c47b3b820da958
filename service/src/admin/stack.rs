//! [`CursorStack`] definition.

/// Stack of previously active cursors of one page-navigation session.
///
/// Each slot holds the cursor a page was fetched with, where [`None`] is the
/// first page. The stack depth plus one always equals the currently displayed
/// page number: going forward pushes the cursor of the page being left, going
/// backward pops exactly the value needed to reconstruct that page boundary.
#[derive(Clone, Debug)]
pub struct CursorStack<C> {
    /// Saved cursors, oldest at the bottom.
    slots: Vec<Option<C>>,
}

// `derive(Default)` would require `C: Default`.
impl<C> Default for CursorStack<C> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<C> CursorStack<C> {
    /// Pushes the provided `cursor` onto this [`CursorStack`].
    pub fn push(&mut self, cursor: Option<C>) {
        self.slots.push(cursor);
    }

    /// Pops the most recently pushed cursor off this [`CursorStack`].
    ///
    /// Returns [`None`] if this [`CursorStack`] is empty, meaning the first
    /// page is displayed and there is nothing to go back to.
    pub fn pop(&mut self) -> Option<Option<C>> {
        self.slots.pop()
    }

    /// Clears this [`CursorStack`].
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns the depth of this [`CursorStack`].
    #[must_use]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of the currently displayed page, starting at 1.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.depth() + 1
    }

    /// Indicates whether this [`CursorStack`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod spec {
    use super::CursorStack;

    #[test]
    fn starts_at_page_one() {
        let stack = CursorStack::<u8>::default();

        assert!(stack.is_empty());
        assert_eq!(stack.page_number(), 1);
    }

    #[test]
    fn page_number_is_depth_plus_one() {
        let mut stack = CursorStack::default();

        stack.push(None);
        stack.push(Some(9));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.page_number(), 3);

        assert_eq!(stack.pop(), Some(Some(9)));
        assert_eq!(stack.page_number(), 2);
    }

    #[test]
    fn pop_distinguishes_first_page_from_empty() {
        let mut stack = CursorStack::<u8>::default();

        stack.push(None);
        assert_eq!(stack.pop(), Some(None));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn clear_resets_to_page_one() {
        let mut stack = CursorStack::default();

        stack.push(None);
        stack.push(Some(9));
        stack.clear();

        assert!(stack.is_empty());
        assert_eq!(stack.page_number(), 1);
    }
}
