//! Sort state and the header-click cycle

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// The active sort, if any.
///
/// Absence of a `SortState` means no sort is active and rows keep their
/// insertion order.
///
/// # Example
///
/// ```
/// use tablekit::SortState;
///
/// // Clicking a header cycles: none -> asc -> desc -> none.
/// let s = SortState::cycle(None, "price");
/// assert_eq!(s, Some(SortState::asc("price")));
/// let s = SortState::cycle(s.as_ref(), "price");
/// assert_eq!(s, Some(SortState::desc("price")));
/// let s = SortState::cycle(s.as_ref(), "price");
/// assert_eq!(s, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortState {
    /// Key of the column being sorted.
    pub key: String,
    /// Direction of the sort.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on the given column key.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on the given column key.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Advances the sort state for a click on the given column header.
    ///
    /// Repeated clicks on the same column cycle ascending, descending, then
    /// back to unsorted. Clicking a different column always restarts at
    /// ascending, regardless of the previous column's phase in the cycle.
    pub fn cycle(current: Option<&SortState>, clicked: &str) -> Option<SortState> {
        match current {
            Some(state) if state.key == clicked => match state.direction {
                Direction::Asc => Some(SortState::desc(clicked)),
                Direction::Desc => None,
            },
            _ => Some(SortState::asc(clicked)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_clicks_return_to_unsorted() {
        let first = SortState::cycle(None, "name");
        let second = SortState::cycle(first.as_ref(), "name");
        let third = SortState::cycle(second.as_ref(), "name");

        assert_eq!(first, Some(SortState::asc("name")));
        assert_eq!(second, Some(SortState::desc("name")));
        assert_eq!(third, None);
    }

    #[test]
    fn test_different_column_restarts_at_asc() {
        let on_name = Some(SortState::desc("name"));
        assert_eq!(
            SortState::cycle(on_name.as_ref(), "price"),
            Some(SortState::asc("price"))
        );

        let on_name = Some(SortState::asc("name"));
        assert_eq!(
            SortState::cycle(on_name.as_ref(), "price"),
            Some(SortState::asc("price"))
        );
    }
}
