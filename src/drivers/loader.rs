use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use csv::{ErrorKind, ReaderBuilder};
use log::{debug, info};
use crate::drivers::error::PipelineError;
use crate::drivers::table::{Reading, Table};
use crate::types::CHANNEL_COUNT;
/// Lines starting with this byte are device metadata, not samples.
pub const COMMENT_MARKER: u8 = b'#';
/// Time plus one column per channel.
pub const FIELDS_PER_LINE: usize = 1 + CHANNEL_COUNT;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub accepted: usize,
    pub skipped: usize,
}
/// Parse a numeric field written with a decimal comma (`36,52`).
/// Returns `None` for anything that does not yield a finite number.
pub fn parse_decimal(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
pub fn load_table(path: &Path) -> Result<(Table, LoadSummary), PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let (table, summary) =
        parse_table(BufReader::new(file)).map_err(|source| PipelineError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        "loaded {} rows from {} ({} lines skipped)",
        summary.accepted,
        path.display(),
        summary.skipped
    );
    Ok((table, summary))
}
/// Tab-separated, headerless, `#` comments. Malformed lines are dropped;
/// only genuine I/O failures are returned as errors.
pub fn parse_table<R: Read>(reader: R) -> io::Result<(Table, LoadSummary)> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(COMMENT_MARKER))
        .flexible(true)
        .quoting(false)
        .from_reader(reader);
    let mut table = Table::new();
    let mut summary = LoadSummary::default();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or_default();
                match err.into_kind() {
                    ErrorKind::Io(source) => return Err(source),
                    other => {
                        debug!("line {line}: skipped, unreadable record ({other:?})");
                        summary.skipped += 1;
                        continue;
                    }
                }
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() != FIELDS_PER_LINE {
            debug!(
                "line {line}: skipped, expected {FIELDS_PER_LINE} fields, found {}",
                record.len()
            );
            summary.skipped += 1;
            continue;
        }
        let Some(time_s) = parse_decimal(&record[0]) else {
            debug!("line {line}: skipped, unusable time field {:?}", &record[0]);
            summary.skipped += 1;
            continue;
        };
        let mut channels = [None; CHANNEL_COUNT];
        for (slot, field) in channels.iter_mut().zip(record.iter().skip(1)) {
            *slot = parse_decimal(field);
        }
        table.push(Reading::new(time_s, channels));
        summary.accepted += 1;
    }
    Ok((table, summary))
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Channel;
    use std::io::Write;
    const SAMPLE: &str = "# Device: PF5010\n\
                          # Time\tCh1\tCh2\tCh3\tCh4\tCh5\tCh6\tCh7\tCh8\n\
                          0,00\t36,5\t12,1\t13,0\t36,6\t11,9\t36,4\t12,8\t36,7\n\
                          0,25\t36,6\t12,4\t13,2\t36,5\t12,0\t36,4\t12,7\t36,8\n";
    #[test]
    fn decimal_comma_is_normalized() {
        assert_eq!(parse_decimal("36,52"), Some(36.52));
        assert_eq!(parse_decimal(" -0,5 "), Some(-0.5));
        assert_eq!(parse_decimal("604.7495"), Some(604.7495));
        assert_eq!(parse_decimal("12"), Some(12.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("---"), None);
        assert_eq!(parse_decimal("1,2,3"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }
    #[test]
    fn well_formed_rows_parse_exactly() {
        let (table, summary) = parse_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(summary, LoadSummary { accepted: 2, skipped: 0 });
        assert_eq!(table.times(), vec![0.0, 0.25]);
        let first = table.readings()[0];
        assert_eq!(first.value(Channel::Ch1), Some(36.5));
        assert_eq!(first.value(Channel::Ch2), Some(12.1));
        assert_eq!(first.value(Channel::Ch8), Some(36.7));
        assert_eq!(table.column(Channel::Ch7), vec![Some(12.8), Some(12.7)]);
    }
    #[test]
    fn bad_channel_token_only_blanks_that_channel() {
        let input = "1,5\t36,5\tERR\t13,0\t36,6\t11,9\t36,4\t12,8\t36,7\n";
        let (table, _) = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        let reading = table.readings()[0];
        assert_eq!(reading.time_s, 1.5);
        assert_eq!(reading.value(Channel::Ch2), None);
        assert_eq!(reading.value(Channel::Ch1), Some(36.5));
        assert_eq!(reading.value(Channel::Ch3), Some(13.0));
        assert_eq!(reading.channels.iter().filter(|v| v.is_none()).count(), 1);
    }
    #[test]
    fn malformed_lines_are_skipped() {
        let input = "0,0\t1\t2\t3\t4\t5\t6\t7\t8\n\
                     garbage line\n\
                     0,1\t1\t2\t3\n\
                     0,2\t1\t2\t3\t4\t5\t6\t7\t8\t9\n\
                     time\t1\t2\t3\t4\t5\t6\t7\t8\n\
                     \n\
                     0,3\t1\t2\t3\t4\t5\t6\t7\t8\n";
        let (table, summary) = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.times(), vec![0.0, 0.3]);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.skipped, 4);
    }
    #[test]
    fn invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"0,0\t1\t2\t3\t4\t5\t6\t7\t8\n\
                             0,5\t1\t\xff\xfe\t3\t4\t5\t6\t7\t8\n\
                             1,0\t1\t2\t3\t4\t5\t6\t7\t8\n";
        let (table, summary) = parse_table(input).unwrap();
        assert_eq!(table.times(), vec![0.0, 1.0]);
        assert_eq!(summary, LoadSummary { accepted: 2, skipped: 1 });
    }
    #[test]
    fn comment_lines_never_reach_the_table() {
        let input = "#0,0\t1\t2\t3\t4\t5\t6\t7\t8\n1,0\t1\t2\t3\t4\t5\t6\t7\t8\n";
        let (table, _) = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.times(), vec![1.0]);
    }
    #[test]
    fn header_only_or_empty_input_gives_empty_table() {
        let (table, summary) = parse_table("# header\n# more\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(summary.accepted, 0);
        let (table, _) = parse_table("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
    #[test]
    fn crlf_line_endings_are_accepted() {
        let input = "0,5\t1\t2\t3\t4\t5\t6\t7\t8\r\n1,5\t1\t2\t3\t4\t5\t6\t7\t8,5\r\n";
        let (table, _) = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.times(), vec![0.5, 1.5]);
        assert_eq!(table.readings()[1].value(Channel::Ch8), Some(8.5));
    }
    #[test]
    fn load_from_disk_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let (table, _) = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, PipelineError::ReadInput { .. }));
    }
}
