use std::collections::BTreeMap;
use std::io::Cursor;
use std::thread;
use std::time::Duration;

use calamine::{Data, Range, Reader, Xlsx};
use log::{info, warn};

use super::error::DataError;
use super::model::{
    CellValue, ColumnRoleMap, ScoreRecord, ScoreTable, GRADING_COLUMN, NAME_COLUMN,
};

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Published workbook holding the team's assessment scores.
pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/ankitverma4503/streamlit-dashboad-score/main/Assesment%20scores.xlsx";

/// Worksheet with one row per individual.
pub const SHEET_NAME: &str = "Overall Team's Score";

const FETCH_ATTEMPTS: u32 = 3;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Download the workbook and parse the score sheet in one go.  Role columns
/// are resolved here as well, so a renamed or missing score column fails the
/// load rather than the first query that needs it.
pub fn load_remote(url: &str, sheet: &str) -> Result<(ScoreTable, ColumnRoleMap), DataError> {
    let bytes = fetch(url)?;
    let table = load_workbook(&bytes, sheet)?;
    let roles = ColumnRoleMap::resolve(&table)?;
    info!(
        "loaded {} individuals from sheet {sheet:?} (total column {:?})",
        table.len(),
        roles.total
    );
    Ok((table, roles))
}

// ---------------------------------------------------------------------------
// HTTP fetch
// ---------------------------------------------------------------------------

/// Blocking GET of the workbook bytes.
///
/// Transport failures and 5xx responses are retried up to [`FETCH_ATTEMPTS`]
/// times with doubling backoff; any 4xx is terminal immediately.
pub fn fetch(url: &str) -> Result<Vec<u8>, DataError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|source| DataError::Request {
            url: url.to_string(),
            source,
        })?;

    let mut delay = RETRY_BASE_DELAY;
    let mut attempt = 1;
    loop {
        let err = match client.get(url).send() {
            Ok(response) if response.status().is_success() => {
                return response
                    .bytes()
                    .map(|body| body.to_vec())
                    .map_err(|source| DataError::Request {
                        url: url.to_string(),
                        source,
                    });
            }
            Ok(response) => {
                let status = response.status();
                let err = DataError::Fetch {
                    url: url.to_string(),
                    status,
                };
                if !status.is_server_error() {
                    return Err(err);
                }
                err
            }
            Err(source) => DataError::Request {
                url: url.to_string(),
                source,
            },
        };

        if attempt >= FETCH_ATTEMPTS {
            return Err(err);
        }
        warn!("fetch attempt {attempt}/{FETCH_ATTEMPTS} failed ({err}), retrying in {delay:?}");
        thread::sleep(delay);
        delay *= 2;
        attempt += 1;
    }
}

// ---------------------------------------------------------------------------
// Workbook parsing
// ---------------------------------------------------------------------------

/// Parse xlsx bytes and extract the named worksheet.
pub fn load_workbook(bytes: &[u8], sheet: &str) -> Result<ScoreTable, DataError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range(sheet)?;
    table_from_range(&range, sheet)
}

/// Build a [`ScoreTable`] from a worksheet cell range.
///
/// Row 0 is the header row.  The source header cells are not guaranteed
/// clean, so every header is trimmed before any lookup; the exact-match
/// `Name` and `Performance Grading` columns are required.  Rows with an
/// empty `Name` cell (trailing blank worksheet rows) are skipped.
fn table_from_range(range: &Range<Data>, sheet: &str) -> Result<ScoreTable, DataError> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| DataError::EmptySheet(sheet.to_string()))?;

    let headers: Vec<String> = header
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let name_idx = required_column(&headers, NAME_COLUMN)?;
    let grading_idx = required_column(&headers, GRADING_COLUMN)?;

    let mut records = Vec::new();
    for row in rows {
        let name = cell_text(row.get(name_idx));
        if name.is_empty() {
            continue;
        }
        let grading = cell_text(row.get(grading_idx));

        let mut values = BTreeMap::new();
        for (idx, column) in headers.iter().enumerate() {
            if idx == name_idx || idx == grading_idx || column.is_empty() {
                continue;
            }
            let value = row.get(idx).map(cell_value).unwrap_or(CellValue::Null);
            values.insert(column.clone(), value);
        }

        records.push(ScoreRecord {
            name,
            grading,
            values,
        });
    }

    let columns = headers.into_iter().filter(|c| !c.is_empty()).collect();
    Ok(ScoreTable { columns, records })
}

fn required_column(headers: &[String], name: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::ColumnNotFound {
            marker: name.to_string(),
        })
}

fn cell_text(cell: Option<&Data>) -> String {
    cell.map(|c| c.to_string().trim().to_string())
        .unwrap_or_default()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(v) => CellValue::Float(*v),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        // Date/duration cells don't occur in score data; keep them readable.
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("{e:?}")),
    }
}
