//! Seek-based binary search over a text file sorted by line key.
//!
//! The key of a line is everything before its first space or tab. Lines
//! have arbitrary width, so the search bisects byte offsets and realigns
//! on the next line start after every seek.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use lexvec_core::Result;

pub struct SortedTextFile {
    path: PathBuf,
    reader: BufReader<File>,
    /// First byte of the searchable region (after an optional header).
    start: u64,
    end: u64,
}

/// A line located in the file: its start offset, its length in bytes
/// including the terminator, and its text without the terminator.
struct Located {
    start: u64,
    len: u64,
    text: String,
}

pub fn line_key(line: &str) -> &str {
    line.split([' ', '\t']).next().unwrap_or_default()
}

impl SortedTextFile {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let end = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            start: 0,
            end,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the first line as a header and exclude it from searches.
    /// Returns `None` for an empty file.
    pub fn read_header(&mut self) -> Result<Option<String>> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf)?;
        self.start = n as u64;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(decode(buf)?))
    }

    /// Find the first line whose key equals `key`.
    pub fn find(&mut self, key: &str) -> Result<Option<String>> {
        // Invariant: every line starting before `lo` has a key < `key`, and the
        // first line starting at or after `hi` (if any) has a key >= `key`.
        let mut lo = self.start;
        let mut hi = self.end;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.line_from(mid)? {
                Some(line) if line_key(&line.text) < key => lo = line.start + line.len,
                _ => hi = mid,
            }
        }

        match self.line_from(lo)? {
            Some(line) if line_key(&line.text) == key => Ok(Some(line.text)),
            _ => Ok(None),
        }
    }

    /// The first line starting at or after `pos`.
    fn line_from(&mut self, pos: u64) -> io::Result<Option<Located>> {
        let start = if pos <= self.start {
            self.reader.seek(SeekFrom::Start(self.start))?;
            self.start
        } else {
            self.reader.seek(SeekFrom::Start(pos - 1))?;
            let mut skipped = Vec::new();
            let n = self.reader.read_until(b'\n', &mut skipped)?;
            pos - 1 + n as u64
        };
        if start >= self.end {
            return Ok(None);
        }

        let mut buf = Vec::new();
        let len = self.reader.read_until(b'\n', &mut buf)? as u64;
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(Located {
            start,
            len,
            text: decode(buf)?,
        }))
    }
}

fn decode(mut buf: Vec<u8>) -> io::Result<String> {
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
