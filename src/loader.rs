use crate::config::InputConfig;
use crate::error::{Error, Result};
use crate::series::MonthlySeries;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs;
use std::path::{Path, PathBuf};

/// Locate exactly one `.xlsx` workbook in `dir`. Zero or multiple candidates
/// are fatal. Excel lock files (`~$` prefix) are ignored.
pub fn find_workbook(dir: &Path) -> Result<PathBuf> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_string_lossy().starts_with("~$") {
            continue;
        }
        let is_xlsx = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("xlsx"));
        if is_xlsx {
            candidates.push(path);
        }
    }

    candidates.sort();

    match candidates.len() {
        0 => Err(Error::Workbook(format!(
            "No .xlsx file found in {}",
            dir.display()
        ))),
        1 => Ok(candidates.remove(0)),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            Err(Error::Workbook(format!(
                "More than one .xlsx file found in {}: {}",
                dir.display(),
                names.join(", ")
            )))
        }
    }
}

/// Read the month and normality columns from the configured sheet, rounding
/// values to one decimal. Sheet and column presence are validated up front.
pub fn load_series(path: &Path, input: &InputConfig) -> Result<MonthlySeries> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| Error::Workbook(format!("Failed to open {}: {}", path.display(), e)))?;

    if !workbook.sheet_names().iter().any(|s| s == &input.sheet) {
        return Err(Error::Workbook(format!(
            "Sheet '{}' not found in {}",
            input.sheet,
            path.display()
        )));
    }

    let range = workbook
        .worksheet_range(&input.sheet)
        .map_err(|e| Error::Workbook(format!("Failed to read sheet '{}': {}", input.sheet, e)))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| Error::Data(format!("Sheet '{}' is empty", input.sheet)))?;

    let month_col = find_column(header, &input.month_column);
    let value_col = find_column(header, &input.value_column);

    let missing: Vec<&str> = [
        (month_col, input.month_column.as_str()),
        (value_col, input.value_column.as_str()),
    ]
    .iter()
    .filter(|(idx, _)| idx.is_none())
    .map(|(_, name)| *name)
    .collect();

    if !missing.is_empty() {
        return Err(Error::Column(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }

    let (month_col, value_col) = (month_col.unwrap(), value_col.unwrap());

    let mut months = Vec::new();
    let mut values = Vec::new();

    for (i, row) in rows.enumerate() {
        let month_cell = row.get(month_col).unwrap_or(&Data::Empty);
        let value_cell = row.get(value_col).unwrap_or(&Data::Empty);

        // Blank rows below the table are common; skip them.
        if matches!(month_cell, Data::Empty) && matches!(value_cell, Data::Empty) {
            continue;
        }

        // 1-based spreadsheet row, accounting for the header.
        let row_number = i + 2;

        let month = cell_to_label(month_cell).ok_or_else(|| {
            Error::Data(format!(
                "Row {}: missing value in column '{}'",
                row_number, input.month_column
            ))
        })?;
        let value = cell_to_value(value_cell).ok_or_else(|| {
            Error::Data(format!(
                "Row {}: non-numeric value in column '{}'",
                row_number, input.value_column
            ))
        })?;

        months.push(month);
        values.push(round_tenth(value));
    }

    if values.is_empty() {
        return Err(Error::Data(format!(
            "Sheet '{}' has no data rows",
            input.sheet
        )));
    }

    Ok(MonthlySeries::new(months, values))
}

fn find_column(header: &[Data], name: &str) -> Option<usize> {
    header.iter().position(|cell| match cell {
        Data::String(s) => s.trim() == name,
        _ => false,
    })
}

fn cell_to_label(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}

fn cell_to_value(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn write_workbook(path: &Path, sheet: &str, headers: [&str; 2], rows: &[(&str, f64)]) {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        worksheet.write(0, 0, headers[0]).unwrap();
        worksheet.write(0, 1, headers[1]).unwrap();
        for (i, (month, value)) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write(row, 0, *month).unwrap();
            worksheet.write(row, 1, *value).unwrap();
        }
        workbook.save(path).unwrap();
    }

    fn spanish_input() -> InputConfig {
        InputConfig::default()
    }

    #[test]
    fn rejects_an_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_workbook(dir.path()).is_err());
    }

    #[test]
    fn finds_a_single_workbook() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("report.xlsx")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let found = find_workbook(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "report.xlsx");
    }

    #[test]
    fn rejects_multiple_workbooks() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.xlsx")).unwrap();
        File::create(dir.path().join("b.xlsx")).unwrap();

        let err = find_workbook(dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("a.xlsx"));
        assert!(message.contains("b.xlsx"));
    }

    #[test]
    fn ignores_excel_lock_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("report.xlsx")).unwrap();
        File::create(dir.path().join("~$report.xlsx")).unwrap();

        assert!(find_workbook(dir.path()).is_ok());
    }

    #[test]
    fn values_round_to_one_decimal() {
        assert_eq!(round_tenth(91.24), 91.2);
        assert_eq!(round_tenth(91.25), 91.3);
        assert_eq!(round_tenth(-0.05), -0.1);
    }

    #[test]
    fn loads_and_rounds_the_configured_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normalidad.xlsx");
        write_workbook(
            &path,
            "Hoja1",
            ["Mes", "Normalidad"],
            &[("Ene", 90.14), ("Feb", 91.25), ("Mar", 92.0)],
        );

        let series = load_series(&path, &spanish_input()).unwrap();
        assert_eq!(series.months, vec!["Ene", "Feb", "Mar"]);
        assert_eq!(series.values, vec![90.1, 91.3, 92.0]);
    }

    #[test]
    fn rejects_a_workbook_without_the_configured_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normalidad.xlsx");
        write_workbook(&path, "Otra", ["Mes", "Normalidad"], &[("Ene", 90.0)]);

        let err = load_series(&path, &spanish_input()).unwrap_err();
        assert!(matches!(err, Error::Workbook(_)));
        assert!(err.to_string().contains("Hoja1"));
    }

    #[test]
    fn rejects_a_sheet_missing_the_value_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normalidad.xlsx");
        write_workbook(&path, "Hoja1", ["Mes", "Valor"], &[("Ene", 90.0)]);

        let err = load_series(&path, &spanish_input()).unwrap_err();
        assert!(matches!(err, Error::Column(_)));
        assert!(err.to_string().contains("Normalidad"));
    }

    #[test]
    fn header_lookup_trims_whitespace() {
        let header = vec![
            Data::String(" Mes ".to_string()),
            Data::String("Normalidad".to_string()),
        ];
        assert_eq!(find_column(&header, "Mes"), Some(0));
        assert_eq!(find_column(&header, "Normalidad"), Some(1));
        assert_eq!(find_column(&header, "Promedio"), None);
    }
}
