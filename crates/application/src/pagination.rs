//! Paging and sorting contract shared by every listing operation.
//!
//! Page `0` means "no pagination": every row is returned in one page. Pages
//! `1..` are zero-based offsets of `page * size` rows, matching the numbering
//! older clients already depend on.

use std::str::FromStr;

use mentor_core::{AppError, AppResult, ReasonCode};
use mentor_domain::{RoleSortField, SortField, UserSortField};

/// Default page size used when a caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Raw listing parameters as received from a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based page index. `0` returns every row.
    pub page: u32,
    /// Requested page size. Falls back to the configured default.
    pub size: Option<u32>,
    /// Requested sort attribute. Falls back to the configured default.
    pub sort_by: Option<String>,
}

/// Configured listing defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDefaults {
    page_size: u32,
    user_sort: UserSortField,
    role_sort: RoleSortField,
}

impl ListingDefaults {
    /// Creates validated listing defaults.
    pub fn new(
        page_size: u32,
        user_sort: UserSortField,
        role_sort: RoleSortField,
    ) -> AppResult<Self> {
        validate_page_size(page_size)?;

        Ok(Self {
            page_size,
            user_sort,
            role_sort,
        })
    }

    /// Returns the default page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the default user sort attribute.
    #[must_use]
    pub fn user_sort(&self) -> UserSortField {
        self.user_sort
    }

    /// Returns the default role sort attribute.
    #[must_use]
    pub fn role_sort(&self) -> RoleSortField {
        self.role_sort
    }
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            user_sort: UserSortField::Id,
            role_sort: RoleSortField::Id,
        }
    }
}

/// Resolved page request handed to repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpec<S> {
    /// Every row, ordered by `sort`.
    Unpaged {
        /// Sort attribute.
        sort: S,
    },
    /// One window of `size` rows starting at `page * size`.
    Paged {
        /// Zero-based page index, always `>= 1`.
        page: u32,
        /// Positive page size.
        size: u32,
        /// Sort attribute.
        sort: S,
    },
}

impl<S: SortField> PageSpec<S> {
    /// Resolves raw listing parameters against the configured defaults.
    pub fn resolve(query: &ListQuery, default_size: u32, default_sort: S) -> AppResult<Self> {
        let sort = match query.sort_by.as_deref() {
            Some(value) if !value.trim().is_empty() => S::from_str(value)?,
            _ => default_sort,
        };
        // Page 0 returns every row, so the requested size is ignored there.
        if query.page == 0 {
            return Ok(Self::Unpaged { sort });
        }

        let size = query.size.unwrap_or(default_size);
        validate_page_size(size)?;

        Ok(Self::Paged {
            page: query.page,
            size,
            sort,
        })
    }

    /// Returns the sort attribute.
    #[must_use]
    pub fn sort(&self) -> S {
        match self {
            Self::Unpaged { sort } | Self::Paged { sort, .. } => *sort,
        }
    }

    /// Returns `(offset, limit)` for paged requests.
    #[must_use]
    pub fn window(&self) -> Option<(u64, u32)> {
        match self {
            Self::Unpaged { .. } => None,
            Self::Paged { page, size, .. } => Some((u64::from(*page) * u64::from(*size), *size)),
        }
    }

    /// Sorts and slices a full table scan into a page.
    #[must_use]
    pub fn apply(&self, mut rows: Vec<S::Entity>) -> Page<S::Entity> {
        let sort = self.sort();
        rows.sort_by(|left, right| sort.compare(left, right));
        let total_elements = rows.len() as u64;

        match self.window() {
            None => Page::unpaged(rows),
            Some((offset, limit)) => {
                let items = rows
                    .into_iter()
                    .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                    .take(limit as usize)
                    .collect();
                Page::paged(items, self.page_index(), limit, total_elements)
            }
        }
    }

    /// Builds a page from rows a store already windowed and ordered.
    #[must_use]
    pub fn page_of<T>(&self, items: Vec<T>, total_elements: u64) -> Page<T> {
        match self {
            Self::Unpaged { .. } => Page::unpaged(items),
            Self::Paged { page, size, .. } => Page::paged(items, *page, *size, total_elements),
        }
    }

    fn page_index(&self) -> u32 {
        match self {
            Self::Unpaged { .. } => 0,
            Self::Paged { page, .. } => *page,
        }
    }
}

/// Ordered page of rows with enough metadata to compute total pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Builds the single page returned for page `0`.
    #[must_use]
    pub fn unpaged(items: Vec<T>) -> Self {
        let total_elements = items.len() as u64;
        Self {
            size: u32::try_from(items.len()).unwrap_or(u32::MAX),
            items,
            page: 0,
            total_elements,
        }
    }

    /// Builds one window of a larger result.
    #[must_use]
    pub fn paged(items: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        Self {
            items,
            page,
            size,
            total_elements,
        }
    }

    /// Returns the rows of this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its rows.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of rows across all pages.
    #[must_use]
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Returns the number of pages of `size` rows needed for every row.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }

        self.total_elements.div_ceil(u64::from(self.size))
    }

    /// Maps every row while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, mapper: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(mapper).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// Parses a sort attribute name for entity `S`.
pub fn parse_sort_field<S: SortField>(value: &str) -> AppResult<S> {
    S::from_str(value)
}

fn validate_page_size(size: u32) -> AppResult<()> {
    if size == 0 {
        return Err(AppError::bad_request(
            ReasonCode::InvalidPageSize,
            "page size must be a positive integer",
        ));
    }

    Ok(())
}
