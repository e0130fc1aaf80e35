//! Destinations for the surviving candidates.

use crate::candidate::CandidateRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Default file name for the exported result table
pub const DEFAULT_OUTPUT_FILENAME: &str = "vernier_output_data.csv";

/// Errors raised while persisting results
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Accepts the filtered candidates of a search, in generation order.
pub trait ResultSink {
    fn accept(&mut self, records: &[CandidateRecord]) -> Result<(), SinkError>;
}

/// Collects records in memory
impl ResultSink for Vec<CandidateRecord> {
    fn accept(&mut self, records: &[CandidateRecord]) -> Result<(), SinkError> {
        self.extend_from_slice(records);
        Ok(())
    }
}

/// Writes a table with header `z1,z2,z3,z4,total_rotations,total_ratio`
/// followed by one row per record.
///
/// The header row is written even when there are no survivors.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl CsvSink<File> {
    /// Create (or truncate) a CSV file at `path`
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            header_written: false,
        }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }

    fn write_header(&mut self) -> Result<(), SinkError> {
        self.writer.write_record([
            "z1",
            "z2",
            "z3",
            "z4",
            "total_rotations",
            "total_ratio",
        ])?;
        self.header_written = true;
        Ok(())
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn accept(&mut self, records: &[CandidateRecord]) -> Result<(), SinkError> {
        if !self.header_written {
            self.write_header()?;
        }
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear_set::GearSet;
    use crate::period::RotationResult;

    fn record(z1: u32, z2: u32, z3: u32, z4: u32, total_rotations: f64) -> CandidateRecord {
        CandidateRecord::new(
            GearSet::new(z1, z2, z3, z4),
            RotationResult {
                total_rotations,
                total_ratio: 0.25,
            },
        )
    }

    fn written(records: &[CandidateRecord]) -> String {
        let mut sink = CsvSink::new(Vec::new());
        sink.accept(records).unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_header_then_rows() {
        let text = written(&[record(1, 10, 9, 7, 90.0), record(1, 12, 9, 8, 108.0)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "z1,z2,z3,z4,total_rotations,total_ratio",
                "1,10,9,7,90.0,0.25",
                "1,12,9,8,108.0,0.25",
            ]
        );
    }

    #[test]
    fn test_header_written_for_empty_result() {
        assert_eq!(written(&[]), "z1,z2,z3,z4,total_rotations,total_ratio\n");
    }

    #[test]
    fn test_header_written_once_across_batches() {
        let mut sink = CsvSink::new(Vec::new());
        sink.accept(&[record(1, 10, 9, 7, 90.0)]).unwrap();
        sink.accept(&[record(2, 10, 9, 7, 45.0)]).unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.matches("z1,z2").count(), 1);
    }

    #[test]
    fn test_rows_read_back() {
        let records = vec![record(3, 29, 11, 23, 106.5), record(5, 30, 30, 30, 6.0)];
        let text = written(&records);

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let parsed: Vec<CandidateRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<CandidateRecord> = Vec::new();
        sink.accept(&[record(1, 10, 9, 7, 90.0)]).unwrap();
        sink.accept(&[record(1, 11, 9, 7, 99.0)]).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].z2, 11);
    }
}
