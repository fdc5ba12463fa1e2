//! Decodes an uploaded CSV into field-keyed rows.
//!
//! The whole input is decoded before any row is handed on, so an encoding
//! error anywhere in the file fails the upload before a single row has been
//! checked against the store.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::IngestError;
use crate::club::{ClubField, ClubFields};

/// UTF-8 byte order mark, as some spreadsheet exports prepend it.
const BOM: char = '\u{feff}';

/// One data line of an upload, after trimming and header mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRow {
    /// 1-based line number in the uploaded file.
    pub line: u64,
    pub fields: ClubFields,
}

/// The decoded rows of one upload.
///
/// Consuming: once iterated, the rows are gone. Use [`RowStream::len`]
/// before iterating to learn the total.
#[derive(Debug)]
pub struct RowStream {
    rows: std::vec::IntoIter<IngestionRow>,
}

impl Iterator for RowStream {
    type Item = IngestionRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for RowStream {}

/// Decode a comma-separated upload with a header row.
///
/// - Header cells are matched with [`ClubField::from_header`]; unknown
///   columns are ignored.
/// - Every cell is trimmed.
/// - Empty lines (and lines that are blank once trimmed) produce no row.
/// - Short rows leave their missing fields empty; surplus cells are dropped.
///
/// Invalid UTF-8, broken quoting, or a read failure yields
/// [`IngestError::MalformedInput`].
pub fn decode_rows<R: Read>(mut input: R) -> Result<RowStream, IngestError> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| IngestError::MalformedInput(format!("failed to read upload: {e}")))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes.as_slice());

    let columns: Vec<Option<ClubField>> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let header = if i == 0 {
                header.trim_start_matches(BOM).trim()
            } else {
                header
            };
            ClubField::from_header(header)
        })
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        if is_blank(&record) {
            continue;
        }
        let line = record
            .position()
            .map(|p| line_at(&bytes, p.byte()))
            .unwrap_or_default();
        rows.push(IngestionRow {
            line,
            fields: zip_record(&columns, &record),
        });
    }

    Ok(RowStream {
        rows: rows.into_iter(),
    })
}

fn zip_record(columns: &[Option<ClubField>], record: &StringRecord) -> ClubFields {
    let mut fields = ClubFields::default();
    for (column, value) in columns.iter().zip(record.iter()) {
        if let Some(field) = column {
            fields.set(*field, value.to_string());
        }
    }
    fields
}

/// 1-based line of the record starting at `offset`.
///
/// Counted from the raw bytes: the csv reader's line counter is off by one
/// on CRLF input. A record's start offset can sit on the terminator(s) of
/// the lines before it, which are skipped first.
fn line_at(bytes: &[u8], offset: u64) -> u64 {
    let start = usize::try_from(offset).map_or(bytes.len(), |o| o.min(bytes.len()));
    let first = bytes[start..]
        .iter()
        .position(|b| *b != b'\r' && *b != b'\n')
        .map_or(bytes.len(), |skip| start + skip);
    let newlines = bytes[..first].iter().filter(|b| **b == b'\n').count();
    newlines as u64 + 1
}

/// A line holding nothing but whitespace decodes to a single empty cell.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

fn malformed(err: csv::Error) -> IngestError {
    IngestError::MalformedInput(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn decode(text: &str) -> Vec<IngestionRow> {
        decode_rows(text.as_bytes()).expect("decode should succeed").collect()
    }

    #[test]
    fn cells_are_trimmed_and_zipped_by_header() {
        let rows = decode("College Name , Club Name,Club Advisor\n  MIT-WPU ,Coding Club , Dr. Rao \n");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields.college_name, "MIT-WPU");
        assert_eq!(rows[0].fields.club_name, "Coding Club");
        assert_eq!(rows[0].fields.club_advisor, "Dr. Rao");
        assert_eq!(rows[0].fields.website, "");
    }

    #[test]
    fn empty_lines_produce_no_rows() {
        let rows = decode("College Name,Club Name\n\nA,One\n\n\nB,Two\n   \n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields.club_name, "Two");
    }

    #[test]
    fn delimiter_only_lines_are_rows() {
        let rows = decode("College Name,Club Name\n,\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields, ClubFields::default());
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        assert!(decode("College Name,Club Name\n").is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn short_rows_default_and_long_rows_truncate() {
        let rows = decode("College Name,Club Name,Club Website\nA\nB,Two,x.org,extra\n");
        assert_eq!(rows[0].fields.college_name, "A");
        assert_eq!(rows[0].fields.club_name, "");
        assert_eq!(rows[1].fields.website, "x.org");
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let rows = decode("Notes,Club Name,College Name\nignored,Chess,COEP\n");
        assert_eq!(rows[0].fields.club_name, "Chess");
        assert_eq!(rows[0].fields.college_name, "COEP");
    }

    #[test]
    fn quoted_cells_keep_commas() {
        let rows = decode("College Name,Club Name,Brief Description\nA,B,\"Code, coffee, repeat\"\n");
        assert_eq!(rows[0].fields.brief_description, "Code, coffee, repeat");
    }

    #[test]
    fn byte_order_mark_is_stripped_from_first_header() {
        let rows = decode("\u{feff}College Name,Club Name\nA,B\n");
        assert_eq!(rows[0].fields.college_name, "A");
    }

    #[test]
    fn line_numbers_follow_the_file() {
        let rows = decode("College Name,Club Name\nA,One\n\nB,Two\n");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 4);

        let lines = |text: &str| -> Vec<u64> { decode(text).iter().map(|r| r.line).collect() };

        assert_eq!(
            lines("College Name,Club Name\r\nA,B\r\nC,D\r\nE,F\r\n"),
            vec![2, 3, 4]
        );
        assert_eq!(
            lines("College Name,Club Name\r\nA,B\r\n\r\n\r\nC,D\r\n"),
            vec![2, 5]
        );
        assert_eq!(
            lines("College Name,Club Name\r\nA,One\r\n   \r\nB,Two"),
            vec![2, 4]
        );
    }

    #[test]
    fn quoted_newlines_do_not_shift_later_rows() {
        let rows = decode("College Name,Club Name,Brief Description\r\nA,One,\"two\r\nlines\"\r\nB,Two,\r\n");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].fields.brief_description, "two\r\nlines");
        assert_eq!(rows[1].line, 4);
    }

    #[test]
    fn invalid_utf8_fails_the_whole_decode() {
        let mut bytes = b"College Name,Club Name\nA,One\nB,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);

        assert_matches!(
            decode_rows(bytes.as_slice()),
            Err(IngestError::MalformedInput(_))
        );
    }

    #[test]
    fn stream_reports_its_length_before_iteration() {
        let stream = decode_rows("College Name,Club Name\nA,1\nB,2\nC,3\n".as_bytes()).unwrap();
        assert_eq!(stream.len(), 3);
    }
}
