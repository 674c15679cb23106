//! Derived table rows: filter -> stable sort -> paginate
//!
//! Everything here is a pure function of (countries, filters, sort, page).
//! Nothing is cached; the app recomputes on every state change.

use std::cmp::Ordering;

use crate::models::{Column, Country, FilterState, PageState, SortDirection, SortState};

/// The rows visible on the current page plus the numbers needed to draw pagination
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableView {
    pub rows: Vec<Country>,
    /// Blank rows to pad a short last page to full height
    pub empty_rows: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub page: usize,
    pub page_count: usize,
}

/// Case-insensitive substring match of `pattern` against one column of `country`.
///
/// Languages match if any language name contains the pattern. A missing
/// capital or currency never matches a non-empty pattern.
pub fn matches_filter(country: &Country, column: Column, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    let needle = pattern.to_lowercase();
    let contains = |value: &str| value.to_lowercase().contains(&needle);

    match column {
        Column::Name => contains(&country.name),
        Column::Native => contains(&country.native),
        Column::Capital => country.capital.as_deref().is_some_and(contains),
        Column::Currency => country.currency.as_deref().is_some_and(contains),
        Column::Languages => country.languages.iter().any(|l| contains(&l.name)),
    }
}

/// Keep rows matching every active filter (logical AND)
pub fn filter_rows<'a>(countries: &'a [Country], filters: &FilterState) -> Vec<&'a Country> {
    countries
        .iter()
        .filter(|c| filters.active().all(|(column, text)| matches_filter(c, column, text)))
        .collect()
}

/// Stable sort by the raw column value.
///
/// Every row is paired with its input position and ties are broken by that
/// position in both directions, so equal keys keep their input order.
pub fn sort_rows<'a>(rows: Vec<&'a Country>, sort: SortState) -> Vec<&'a Country> {
    let mut keyed: Vec<(usize, String, &Country)> = rows
        .into_iter()
        .enumerate()
        .map(|(i, c)| (i, c.column_value(sort.column), c))
        .collect();

    keyed.sort_unstable_by(|(ia, ka, _), (ib, kb, _)| {
        let ord = match sort.direction {
            SortDirection::Ascending => ka.cmp(kb),
            SortDirection::Descending => kb.cmp(ka),
        };
        match ord {
            Ordering::Equal => ia.cmp(ib),
            other => other,
        }
    });

    keyed.into_iter().map(|(_, _, c)| c).collect()
}

/// Filtered and sorted rows, ignoring pagination. This is what gets exported.
pub fn sorted_rows(countries: &[Country], filters: &FilterState, sort: SortState) -> Vec<Country> {
    sort_rows(filter_rows(countries, filters), sort)
        .into_iter()
        .cloned()
        .collect()
}

/// Slice one page out of `rows`. A page past the end yields an empty slice.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Compute the current page of the table
pub fn visible_rows(
    countries: &[Country],
    filters: &FilterState,
    sort: SortState,
    page: PageState,
) -> TableView {
    let sorted = sort_rows(filter_rows(countries, filters), sort);
    let filtered_count = sorted.len();

    let mut page = page;
    page.clamp(filtered_count);

    let rows: Vec<Country> = paginate(&sorted, page.page, page.page_size)
        .iter()
        .map(|c| (*c).clone())
        .collect();
    let empty_rows = page.page_size.saturating_sub(rows.len());

    TableView {
        rows,
        empty_rows,
        filtered_count,
        total_count: countries.len(),
        page: page.page,
        page_count: page.page_count(filtered_count),
    }
}
