//! # redactdesk-table
//!
//! The collection engine behind every list screen in `RedactDesk`.
//!
//! This crate provides:
//! - Column descriptors that drive both rendering and property filtering
//! - Filter queries with `=`, `!=`, `:` and `!:` operators combined by AND/OR
//! - A pure `derive` step: filter, free-text fallback, stable sort, paginate
//! - Single and multiple selection with `keep_selection` across refetches
//! - Page size and column visibility preferences
//! - [`ListState`], the per-mount owner of all of the above
//!
//! Nothing here knows about widgets or HTTP; the console renders what
//! [`ListState::derive`] returns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod column;
pub mod engine;
mod error;
pub mod filter;
pub mod list;
pub mod preferences;
pub mod selection;
pub mod value;

pub use column::{
    ACTIONS_COLUMN_ID, ActionsLayout, ColumnDescriptor, ColumnOverride, ColumnSet,
    ContentDisplayOption, FilterProperty, RowAction,
};
pub use engine::{
    Collection, CollectionState, Derived, PaginationState, SortState, matches_text, sort_label,
};
pub use error::{Error, Result};
pub use filter::{FilterOperator, FilterQuery, FilterToken, Operation};
pub use list::{ListOptions, ListState};
pub use preferences::{ContentDisplayItem, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Preferences};
pub use selection::{Selection, SelectionType};
pub use value::{Value, locale_cmp};

/// An entity shown in a list, identified by a stable key.
///
/// Records are immutable snapshots; the list never edits them in place.
pub trait Record {
    /// Returns the unique key used to track selection across refetches.
    fn key(&self) -> String;
}
