//! Spreadsheet writer for the country table

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::constants::EXPORT_HEADER;
use crate::models::Country;

/// Header row followed by one row per country.
///
/// Every declared header column is populated, Native included.
pub fn build_rows(countries: &[Country]) -> Vec<[String; 5]> {
    let mut rows = Vec::with_capacity(countries.len() + 1);
    rows.push(EXPORT_HEADER.map(String::from));

    for country in countries {
        rows.push([
            country.name.clone(),
            country.capital.clone().unwrap_or_default(),
            country.currency.clone().unwrap_or_default(),
            country.language_names(),
            country.native.clone(),
        ]);
    }

    rows
}

/// Serialize `countries` into an in-memory xlsx workbook
pub fn to_xlsx(countries: &[Country]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (r, row) in build_rows(countries).iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if r == 0 {
                worksheet.write_string_with_format(r as u32, c as u16, value, &bold)?;
            } else {
                worksheet.write_string(r as u32, c as u16, value)?;
            }
        }
    }
    worksheet.autofit();

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// Write the workbook to `path`.
///
/// Bytes go to a temporary file in the destination directory which is only
/// renamed into place once complete. On any error the temporary file is
/// dropped, which removes it.
pub fn write_xlsx(countries: &[Country], path: &Path) -> Result<usize> {
    let buffer = to_xlsx(countries).context("Failed to build workbook")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(&buffer)?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(countries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXPORT_FILE_NAME;
    use tempfile::tempdir;

    fn countries() -> Vec<Country> {
        vec![
            Country::new("Chad")
                .with_native("Tchad")
                .with_capital("N'Djamena")
                .with_currency("XAF")
                .with_language("fr", "French")
                .with_language("ar", "Arabic"),
            Country::new("Antarctica").with_native("Antarctica"),
        ]
    }

    #[test]
    fn test_build_rows_header_and_native() {
        let rows = build_rows(&countries());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ["Name", "Capital", "Currency", "Languages", "Native"]);
        assert_eq!(rows[1], ["Chad", "N'Djamena", "XAF", "French, Arabic", "Tchad"]);
        assert_eq!(rows[2], ["Antarctica", "", "", "", "Antarctica"]);
    }

    #[test]
    fn test_write_xlsx() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        let written = write_xlsx(&countries(), &path).unwrap();
        assert_eq!(written, 2);

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");

        // Only the final file remains
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_xlsx_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exports").join(EXPORT_FILE_NAME);
        write_xlsx(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // Target is an existing directory, so the final rename fails
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();

        assert!(write_xlsx(&countries(), &path).is_err());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
