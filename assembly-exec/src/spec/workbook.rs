use std::io::Cursor;

use assembly_core::ParseError;
use calamine::{Data, Reader, Xlsx};

/// Sheet that carries the specification; the first sheet is used when it is missing.
pub const SHEET_NAME: &str = "Sheet1";

/// Flattens the specification sheet into rows of cell text.
///
/// Row and column indices are absolute: leading empty rows and columns are kept as empty cells
/// so that "first column" and "first 50 rows" mean what they say in the sheet.
pub fn read_rows(service_id: &str, bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ParseError::workbook(service_id, e.to_string()))?;

    let names = workbook.sheet_names();
    let sheet = names
        .iter()
        .find(|n| n.as_str() == SHEET_NAME)
        .or_else(|| names.first())
        .cloned()
        .ok_or_else(|| ParseError::workbook(service_id, "workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ParseError::workbook(service_id, e.to_string()))?;

    let Some((start_row, start_col)) = range.start() else {
        return Ok(Vec::new());
    };

    let mut rows = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row = vec![String::new(); start_col as usize];
        row.extend(cells.iter().map(cell_text));
        rows.push(row);
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
