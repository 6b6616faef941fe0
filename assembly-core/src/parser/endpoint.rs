pub const ADDRESS_MARKER: &str = "요청주소";
pub const ENDPOINT_SCAN_ROWS: usize = 50;

const URL_SCHEME: &str = "https://";
const BULLET: &str = "- ";

/// Locates the endpoint URL in the first column.
///
/// The marker row must fall within the first [`ENDPOINT_SCAN_ROWS`] rows; the URL is read from
/// the row right after it. A marker followed by a non-URL row is ignored and scanning continues.
pub fn find_endpoint_url(rows: &[Vec<String>]) -> Option<String> {
    for (idx, row) in rows.iter().enumerate().take(ENDPOINT_SCAN_ROWS) {
        let Some(cell) = row.first() else {
            continue;
        };
        if !cell.contains(ADDRESS_MARKER) {
            continue;
        }
        let next = rows.get(idx + 1).and_then(|r| r.first());
        if let Some(next) = next {
            if next.contains(URL_SCHEME) {
                return Some(clean_url(next));
            }
        }
    }
    None
}

fn clean_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(BULLET)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
