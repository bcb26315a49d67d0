//! Offset/limit pagination primitives shared by listing endpoints.
//!
//! A [`Page`] is validated once at the edge (non-negative limit and offset)
//! and then applied either by the store (`LIMIT`/`OFFSET`) or in memory via
//! [`Page::window`]. The in-memory window never overruns: an offset past the
//! end yields an empty slice and the limit is clamped to what remains.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of items returned when the caller omits `limit`.
pub const DEFAULT_LIMIT: u32 = 5;

/// Default starting offset when the caller omits `offset`.
pub const DEFAULT_OFFSET: u32 = 0;

/// Validation failures for raw pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// `limit` was negative.
    #[error("parameter 'limit' must be a non-negative number, got {0}")]
    NegativeLimit(i64),
    /// `offset` was negative.
    #[error("parameter 'offset' must be a non-negative number, got {0}")]
    NegativeOffset(i64),
}

/// Validated offset/limit pair.
///
/// # Examples
/// ```
/// use pagination::Page;
///
/// let page = Page::new(Some(2), Some(1)).expect("valid page");
/// assert_eq!(page.window(vec![1, 2, 3, 4]), vec![2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    /// Build a page from optional raw parameters, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when either value is negative.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PageError> {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(value) if value < 0 => return Err(PageError::NegativeLimit(value)),
            Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
        };
        let offset = match offset {
            None => DEFAULT_OFFSET,
            Some(value) if value < 0 => return Err(PageError::NegativeOffset(value)),
            Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
        };
        Ok(Self { limit, offset })
    }

    /// Build a page from already non-negative values.
    #[must_use]
    pub const fn from_parts(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Maximum number of items in the window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of leading items skipped.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Limit widened for SQL `LIMIT` clauses.
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Offset widened for SQL `OFFSET` clauses.
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::from(self.offset)
    }

    /// Apply the window to an in-memory sequence.
    ///
    /// Items are taken in their existing order. An offset at or beyond the
    /// length yields an empty vector.
    #[must_use]
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}
