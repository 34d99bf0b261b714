//! Truncated page-range calculation for pager controls

/// One slot in a pager control: a page number or an elided range marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A selectable page number.
    Page(u32),
    /// An elided range of pages.
    Ellipsis,
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageToken::Page(n) => n.fmt(f),
            PageToken::Ellipsis => f.write_str("…"),
        }
    }
}

/// Computes the page-selector tokens for a truncated pager.
///
/// With the default `sibling_count` of 1 the control shows at most 7 slots:
/// both boundary pages, up to two ellipses, and `2 * sibling_count + 1`
/// pages around the current one. When every page fits in that budget
/// (`total_pages <= 2 * sibling_count + 5`) all pages are listed and no
/// ellipsis appears.
///
/// Callers own the contract: `total_pages >= 1` and
/// `1 <= current_page <= total_pages`. Violations fail fast in debug builds
/// rather than producing a malformed range.
///
/// # Example
///
/// ```
/// use tablekit::{page_range, PageToken};
///
/// let tokens = page_range(10, 20, 1);
/// assert_eq!(tokens, vec![
///     PageToken::Page(1),
///     PageToken::Ellipsis,
///     PageToken::Page(9),
///     PageToken::Page(10),
///     PageToken::Page(11),
///     PageToken::Ellipsis,
///     PageToken::Page(20),
/// ]);
/// ```
pub fn page_range(current_page: u32, total_pages: u32, sibling_count: u32) -> Vec<PageToken> {
    debug_assert!(total_pages >= 1, "page_range called with zero pages");
    debug_assert!(
        (1..=total_pages).contains(&current_page),
        "page_range called with current_page {} outside 1..={}",
        current_page,
        total_pages
    );

    // 2 boundary pages + 2 ellipsis slots + the sibling window.
    let slots = 2 * sibling_count + 5;
    if total_pages <= slots {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let left_sibling = current_page.saturating_sub(sibling_count).max(1);
    let right_sibling = (current_page + sibling_count).min(total_pages);
    let show_left_ellipsis = left_sibling > 2;
    let show_right_ellipsis = right_sibling < total_pages - 2;

    let mut tokens = Vec::with_capacity(slots as usize);
    match (show_left_ellipsis, show_right_ellipsis) {
        (false, true) => {
            // Contiguous left block, ellipsis, last page.
            let block = 3 + 2 * sibling_count;
            tokens.extend((1..=block).map(PageToken::Page));
            tokens.push(PageToken::Ellipsis);
            tokens.push(PageToken::Page(total_pages));
        }
        (true, false) => {
            // First page, ellipsis, contiguous right block.
            let block = 3 + 2 * sibling_count;
            tokens.push(PageToken::Page(1));
            tokens.push(PageToken::Ellipsis);
            tokens.extend((total_pages - block + 1..=total_pages).map(PageToken::Page));
        }
        (true, true) => {
            tokens.push(PageToken::Page(1));
            tokens.push(PageToken::Ellipsis);
            tokens.extend((left_sibling..=right_sibling).map(PageToken::Page));
            tokens.push(PageToken::Ellipsis);
            tokens.push(PageToken::Page(total_pages));
        }
        (false, false) => {
            // Unreachable once total_pages exceeds the slot budget: both
            // ellipses suppressed would require total_pages <= slots - 1.
            debug_assert!(false, "pager window suppressed both ellipses");
            tokens.extend((1..=total_pages).map(PageToken::Page));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageToken::{Ellipsis, Page};

    #[test]
    fn test_all_pages_fit() {
        assert_eq!(
            page_range(1, 5, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(
            page_range(4, 7, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_right_ellipsis_only() {
        assert_eq!(
            page_range(1, 20, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_range(3, 20, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_left_ellipsis_only() {
        assert_eq!(
            page_range(20, 20, 1),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
        assert_eq!(
            page_range(18, 20, 1),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_both_ellipses() {
        assert_eq!(
            page_range(10, 20, 1),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_boundary_between_cases() {
        // Page 4 of 20 is the first position where the left block no longer
        // covers the sibling window's left edge.
        assert_eq!(
            page_range(4, 20, 1),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
        // Page 17 mirrors it on the right.
        assert_eq!(
            page_range(17, 20, 1),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_wider_sibling_window() {
        assert_eq!(
            page_range(10, 30, 2),
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(30)
            ]
        );
        // With siblings = 2 the budget grows to 9, so 9 pages need no ellipsis.
        assert_eq!(page_range(5, 9, 2).len(), 9);
        assert!(page_range(5, 9, 2).iter().all(|t| matches!(t, Page(_))));
    }

    #[test]
    fn test_single_page() {
        assert_eq!(page_range(1, 1, 1), vec![Page(1)]);
    }
}
