use crate::types::ApiParameter;

pub const BASIC_MARKER: &str = "기본인자";
pub const REQUEST_MARKER: &str = "요청인자";
/// Either variant marks the output section, which follows the parameter sections.
pub const OUTPUT_MARKERS: [&str; 2] = ["출력값", "출력명"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Outside,
    Basic,
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    Enter(Section),
    Terminate,
    Parameter(ApiParameter),
    Skip,
}

/// Classifies one row given the section the parser is currently in.
///
/// Section markers are recognised anywhere; parameter rows only inside a section.
pub fn classify_row(row: &[String], section: Section) -> RowClass {
    if row.iter().all(|c| c.is_empty()) {
        return RowClass::Skip;
    }

    let first = row.first().map(String::as_str).unwrap_or("");
    if first.contains(BASIC_MARKER) {
        return RowClass::Enter(Section::Basic);
    }
    if first.contains(REQUEST_MARKER) {
        return RowClass::Enter(Section::Request);
    }
    if OUTPUT_MARKERS.iter().any(|m| first.contains(m)) {
        return RowClass::Terminate;
    }

    if section == Section::Outside || row.len() < 3 {
        return RowClass::Skip;
    }

    let label = &row[1];
    if label.is_empty() || !ApiParameter::is_parameter_label(label) {
        return RowClass::Skip;
    }

    RowClass::Parameter(ApiParameter::new(first, label.as_str(), row[2].as_str()))
}
