use serde::{Deserialize, Serialize};

/// A spoken language as reported by the countries service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Language {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A country record. `capital` and `currency` may be absent upstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub native: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Country {
            name: name.into(),
            native: String::new(),
            capital: None,
            currency: None,
            emoji: String::new(),
            languages: Vec::new(),
        }
    }

    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_native(mut self, native: impl Into<String>) -> Self {
        self.native = native.into();
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn with_language(mut self, code: &str, name: &str) -> Self {
        self.languages.push(Language::new(code, name));
        self
    }

    /// Comma-joined language names, as shown in the table and the export
    pub fn language_names(&self) -> String {
        self.languages
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Raw textual value of a column; missing optionals read as ""
    pub fn column_value(&self, column: Column) -> String {
        match column {
            Column::Name => self.name.clone(),
            Column::Capital => self.capital.clone().unwrap_or_default(),
            Column::Currency => self.currency.clone().unwrap_or_default(),
            Column::Languages => self.language_names(),
            Column::Native => self.native.clone(),
        }
    }
}

/// Visible table columns, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Column {
    #[default]
    Name,
    Capital,
    Currency,
    Languages,
    Native,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Capital,
        Column::Currency,
        Column::Languages,
        Column::Native,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Capital => "Capital",
            Column::Currency => "Currency",
            Column::Languages => "Languages",
            Column::Native => "Native",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Column::Name => 0,
            Column::Capital => 1,
            Column::Currency => 2,
            Column::Languages => 3,
            Column::Native => 4,
        }
    }

    pub fn next(&self) -> Column {
        Column::ALL[(self.index() + 1) % Column::ALL.len()]
    }

    pub fn prev(&self) -> Column {
        Column::ALL[(self.index() + Column::ALL.len() - 1) % Column::ALL.len()]
    }
}

/// Sort direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Sort column plus direction; direction only means something for that column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        SortState { column, direction }
    }

    /// Same column flips the direction, a new column starts ascending
    pub fn toggle(&mut self, column: Column) {
        if self.column == column {
            self.direction = self.direction.flip();
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Per-column substring filters. Empty text means no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    texts: [String; 5],
}

impl FilterState {
    pub fn get(&self, column: Column) -> &str {
        &self.texts[column.index()]
    }

    pub fn get_mut(&mut self, column: Column) -> &mut String {
        &mut self.texts[column.index()]
    }

    pub fn set(&mut self, column: Column, text: impl Into<String>) {
        self.texts[column.index()] = text.into();
    }

    pub fn clear_all(&mut self) {
        for text in self.texts.iter_mut() {
            text.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.texts.iter().any(|t| !t.is_empty())
    }

    /// Non-empty filters with their column
    pub fn active(&self) -> impl Iterator<Item = (Column, &str)> {
        Column::ALL
            .into_iter()
            .zip(self.texts.iter())
            .filter(|(_, t)| !t.is_empty())
            .map(|(c, t)| (c, t.as_str()))
    }
}

/// Current page index (zero-based) and page size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            page: 0,
            page_size: crate::constants::DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        PageState { page: 0, page_size }
    }

    /// Number of pages for `count` rows; never less than one
    pub fn page_count(&self, count: usize) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        count.div_ceil(self.page_size).max(1)
    }

    /// Keep `page` inside the window of a `count`-row result
    pub fn clamp(&mut self, count: usize) {
        let last = self.page_count(count) - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// Switch page size and start over at the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page = 0;
    }
}

/// Result of the countries query as seen by the table
#[derive(Clone, Debug, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Loading,
    Error(String),
    Ready(Vec<Country>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_toggle() {
        let mut sort = SortState::default();
        assert_eq!(sort.column, Column::Name);
        sort.toggle(Column::Name);
        assert_eq!(sort.direction, SortDirection::Descending);

        // Switching column resets direction
        sort.toggle(Column::Currency);
        assert_eq!(sort, SortState::new(Column::Currency, SortDirection::Ascending));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut page = PageState::new(5);
        page.page = 3;
        page.set_page_size(25);
        assert_eq!(page.page, 0);
        assert_eq!(page.page_size, 25);
    }

    #[test]
    fn test_page_clamp() {
        let mut page = PageState::new(10);
        page.page = 7;
        page.clamp(25);
        assert_eq!(page.page, 2);

        page.clamp(0);
        assert_eq!(page.page, 0);
    }

    #[test]
    fn test_missing_capital_reads_empty() {
        let country = Country::new("Antarctica");
        assert_eq!(country.column_value(Column::Capital), "");
        assert_eq!(country.column_value(Column::Currency), "");
    }

    #[test]
    fn test_active_filters() {
        let mut filters = FilterState::default();
        assert!(!filters.is_active());
        filters.set(Column::Currency, "XAF");
        let active: Vec<_> = filters.active().collect();
        assert_eq!(active, vec![(Column::Currency, "XAF")]);
        filters.clear_all();
        assert!(!filters.is_active());
    }
}
