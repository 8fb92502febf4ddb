use crate::core::StepRecord;
use crate::error::EstimateError;
use crate::streams::EventStream;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest node id accepted unless configured otherwise.
///
/// Node state is indexed densely by id, so the bound caps the node table at
/// 64 Mi entries. Raise it with `with_max_node_id` for larger id spaces.
pub const DEFAULT_MAX_NODE_ID: u64 = 1 << 26;

enum Source {
    File {
        path: PathBuf,
        reader: BufReader<File>,
    },
    Reader(Box<dyn BufRead>),
}

impl Source {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        match self {
            Source::File { reader, .. } => reader.read_line(buf),
            Source::Reader(reader) => reader.read_line(buf),
        }
    }
}

/// Line-oriented edge stream: one time step per line.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// The remaining lines are split on tabs and every field from `column` on is
/// a node id that gains an edge at that step. Earlier fields are ignored.
pub struct TsvEventStream {
    source: Source,
    column: usize,
    max_node_id: u64,
    line_number: usize,
    exhausted: bool,
    buf: String,
}

impl TsvEventStream {
    pub fn open<P: AsRef<Path>>(path: P, column: usize) -> Result<Self, EstimateError> {
        let path = path.as_ref().to_path_buf();
        let reader = BufReader::new(File::open(&path)?);
        Ok(Self::with_source(Source::File { path, reader }, column))
    }

    /// Wraps an arbitrary reader. Such a stream cannot be restarted.
    pub fn from_reader<R: BufRead + 'static>(reader: R, column: usize) -> Self {
        Self::with_source(Source::Reader(Box::new(reader)), column)
    }

    fn with_source(source: Source, column: usize) -> Self {
        Self {
            source,
            column,
            max_node_id: DEFAULT_MAX_NODE_ID,
            line_number: 0,
            exhausted: false,
            buf: String::new(),
        }
    }

    pub fn with_max_node_id(mut self, max_node_id: u64) -> Self {
        self.max_node_id = max_node_id;
        self
    }

    /// 1-based number of the last line read, comments included.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl EventStream for TsvEventStream {
    fn has_more_steps(&self) -> bool {
        !self.exhausted
    }

    fn next_step(&mut self) -> Option<Result<StepRecord, EstimateError>> {
        if self.exhausted {
            return None;
        }
        loop {
            self.buf.clear();
            match self.source.read_line(&mut self.buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => self.line_number += 1,
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e.into()));
                }
            }
            let parsed = parse_line(
                &self.buf,
                self.line_number,
                self.column,
                self.max_node_id,
            );
            match parsed {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn restart(&mut self) -> Result<(), EstimateError> {
        match &mut self.source {
            Source::File { path, reader } => {
                debug!(path = %path.display(), "restarting edge stream");
                *reader = BufReader::new(File::open(&*path)?);
            }
            Source::Reader(_) => {
                return Err(Error::new(
                    ErrorKind::Unsupported,
                    "stream over a plain reader cannot be restarted",
                )
                .into());
            }
        }
        self.line_number = 0;
        self.exhausted = false;
        Ok(())
    }
}

/// Parses one input line; `Ok(None)` for blank and comment lines.
pub fn parse_line(
    line: &str,
    line_number: usize,
    column: usize,
    max_node_id: u64,
) -> Result<Option<StepRecord>, EstimateError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() <= column {
        return Err(EstimateError::MalformedRecord {
            line: line_number,
            fields: fields.len(),
            column,
        });
    }

    let nodes = fields[column..]
        .iter()
        .map(|field| {
            let field = field.trim();
            let id: u64 = field.parse().map_err(|_| EstimateError::InvalidNodeId {
                line: line_number,
                field: field.to_string(),
            })?;
            if id > max_node_id {
                return Err(EstimateError::NodeIdOutOfRange {
                    line: line_number,
                    id,
                    max: max_node_id,
                });
            }
            Ok(id)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(StepRecord::new(nodes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn collect(stream: &mut TsvEventStream) -> Vec<Vec<u64>> {
        let mut out = Vec::new();
        while let Some(r) = stream.next_step() {
            out.push(r.unwrap().nodes);
        }
        out
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# header\n\n1\t2\n   \n# more\n2\t3\n";
        let mut s = TsvEventStream::from_reader(Cursor::new(text), 0);
        assert_eq!(collect(&mut s), vec![vec![1, 2], vec![2, 3]]);
        assert!(!s.has_more_steps());
        assert!(s.next_step().is_none());
    }

    #[test]
    fn leading_columns_are_metadata() {
        let text = "2021-03-01\tpaper-17\t4\t9\n2021-03-02\tpaper-18\t9\n";
        let mut s = TsvEventStream::from_reader(Cursor::new(text), 2);
        assert_eq!(collect(&mut s), vec![vec![4, 9], vec![9]]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let record = parse_line("  5\t6\t\r\n", 1, 0, DEFAULT_MAX_NODE_ID)
            .unwrap()
            .unwrap();
        assert_eq!(record.nodes, vec![5, 6]);
    }

    #[test]
    fn short_line_is_malformed_with_its_line_number() {
        let text = "# c\n1\t2\nonly\n";
        let mut s = TsvEventStream::from_reader(Cursor::new(text), 1);
        assert_eq!(s.next_step().unwrap().unwrap().nodes, vec![2]);
        match s.next_step().unwrap() {
            Err(EstimateError::MalformedRecord {
                line,
                fields,
                column,
            }) => {
                assert_eq!((line, fields, column), (3, 1, 1));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = parse_line("1\tx7", 4, 0, DEFAULT_MAX_NODE_ID).unwrap_err();
        match err {
            EstimateError::InvalidNodeId { line, field } => {
                assert_eq!(line, 4);
                assert_eq!(field, "x7");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_line("-3", 1, 0, DEFAULT_MAX_NODE_ID),
            Err(EstimateError::InvalidNodeId { .. })
        ));
    }

    #[test]
    fn ids_above_the_bound_are_rejected() {
        assert!(matches!(
            parse_line("10\t11", 2, 0, 10),
            Err(EstimateError::NodeIdOutOfRange {
                line: 2,
                id: 11,
                max: 10
            })
        ));
    }

    #[test]
    fn default_bound_rejects_the_next_id() {
        let above = DEFAULT_MAX_NODE_ID + 1;
        let text = format!("1\n{DEFAULT_MAX_NODE_ID}\n{above}\n");
        let mut s = TsvEventStream::from_reader(Cursor::new(text), 0);
        assert_eq!(s.next_step().unwrap().unwrap().nodes, vec![1]);
        assert_eq!(
            s.next_step().unwrap().unwrap().nodes,
            vec![DEFAULT_MAX_NODE_ID]
        );
        match s.next_step().unwrap() {
            Err(EstimateError::NodeIdOutOfRange { line, id, max }) => {
                assert_eq!(line, 3);
                assert_eq!(id, DEFAULT_MAX_NODE_ID + 1);
                assert_eq!(max, DEFAULT_MAX_NODE_ID);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn raised_bound_admits_large_ids() {
        let text = format!("{}\n", u64::from(u32::MAX));
        let mut s = TsvEventStream::from_reader(Cursor::new(text), 0)
            .with_max_node_id(u64::from(u32::MAX));
        assert_eq!(
            s.next_step().unwrap().unwrap().nodes,
            vec![u64::from(u32::MAX)]
        );
    }

    #[test]
    fn file_stream_restarts_from_the_top() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "1\t2").unwrap();
        writeln!(tmp, "# skip").unwrap();
        writeln!(tmp, "3").unwrap();
        tmp.flush().unwrap();

        let mut s = TsvEventStream::open(tmp.path(), 0).unwrap();
        let first = collect(&mut s);
        assert_eq!(s.line_number(), 3);
        s.restart().unwrap();
        assert!(s.has_more_steps());
        assert_eq!(collect(&mut s), first);
    }

    #[test]
    fn reader_stream_cannot_restart() {
        let mut s = TsvEventStream::from_reader(Cursor::new("1\n"), 0);
        assert!(matches!(s.restart(), Err(EstimateError::Io(_))));
    }
}
