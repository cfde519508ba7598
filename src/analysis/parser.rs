use log::{debug, info, warn};

use crate::error::AnalysisError;
use crate::types::{Channel, ColumnMapping, ImuSeries};

/// Row counts kept for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub data_lines: usize,
    pub parsed_rows: usize,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub series: ImuSeries,
    pub mapping: ColumnMapping,
    pub stats: ParseStats,
}

/// Maps header tokens onto the six IMU channels.
///
/// A token matches a channel when either upper-cased string contains the
/// other. Tokens are scanned left to right and the first matching header wins
/// per channel, so trailing derived columns such as `AngX` cannot shadow `GX`.
/// One token may still resolve several channels. Empty tokens are ignored,
/// since an empty string is contained in every channel name.
pub fn map_columns(header: &str) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();

    for (i, token) in header.split(',').map(str::trim).enumerate() {
        if token.is_empty() {
            continue;
        }
        let upper = token.to_uppercase();
        for channel in Channel::ALL {
            let name = channel.as_str();
            if mapping.get(channel).is_some() {
                continue;
            }
            if upper.contains(name) || name.contains(upper.as_str()) {
                mapping.set(channel, i);
                debug!("Found column '{}' -> {} (index: {})", token, name, i);
            }
        }
    }

    mapping
}

/// Parses header + data lines into an aligned series.
///
/// A header-only (or empty) document yields an empty series rather than an
/// error; the pipeline reports that as "no valid data". Missing channels are
/// an error.
pub fn parse_csv(content: &str) -> Result<ParsedCsv, AnalysisError> {
    let mut lines = content.trim().lines();

    let header = match lines.next() {
        Some(h) => h,
        None => {
            warn!("CSV content is empty");
            return Ok(ParsedCsv::default());
        }
    };
    info!("CSV header: {}", header.trim());

    let mapping = map_columns(header);
    let columns = match mapping.resolved() {
        Some(columns) => columns,
        None => {
            let missing = mapping.missing();
            warn!("Missing required columns: {:?}", missing);
            return Err(AnalysisError::MissingColumns(missing));
        }
    };
    info!("Column mapping: {:?}", columns);

    let data_lines: Vec<&str> = lines.collect();
    if data_lines.is_empty() {
        warn!("CSV has a header but no data rows");
        return Ok(ParsedCsv {
            mapping,
            ..Default::default()
        });
    }

    let mut series = ImuSeries::with_capacity(data_lines.len());
    let mut stats = ParseStats {
        data_lines: data_lines.len(),
        ..Default::default()
    };

    for (line_num, line) in data_lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line, &columns) {
            Ok(values) => {
                series.push(
                    [values[0], values[1], values[2]],
                    [values[3], values[4], values[5]],
                );
                stats.parsed_rows += 1;
                if stats.parsed_rows <= 3 {
                    debug!(
                        "Row {}: acc=[{:.2}, {:.2}, {:.2}], gyro=[{:.2}, {:.2}, {:.2}]",
                        line_num + 1,
                        values[0], values[1], values[2], values[3], values[4], values[5]
                    );
                }
            }
            Err(e) => {
                stats.skipped_rows += 1;
                // 只显示前3个错误
                if stats.skipped_rows <= 3 {
                    let preview: String = line.chars().take(50).collect();
                    warn!("Row {} skipped: {}, data: {}...", line_num + 1, e, preview);
                }
            }
        }
    }

    info!(
        "CSV parsed: {} rows ok, {} rows skipped",
        stats.parsed_rows, stats.skipped_rows
    );

    Ok(ParsedCsv {
        series,
        mapping,
        stats,
    })
}

/// Extracts the six mapped fields of one row. Positions past the end of the
/// row read as 0.0; any field that fails to parse rejects the whole row.
fn parse_row(line: &str, columns: &[usize; 6]) -> Result<[f64; 6], std::num::ParseFloatError> {
    let values: Vec<&str> = line.split(',').map(str::trim).collect();
    let mut out = [0.0f64; 6];
    for (slot, &column) in columns.iter().enumerate() {
        out[slot] = match values.get(column) {
            Some(raw) => raw.parse::<f64>()?,
            None => 0.0,
        };
    }
    Ok(out)
}
