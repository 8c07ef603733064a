//! Definitions in languages other than the database's own.
//!
//! `<root>/<lang>.definition.txt` holds `00001740-n|...|definition` lines
//! in no particular order, so lookups scan the file.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::PathBuf;

use lexvec_core::{DomainError, Result, Sense};

#[derive(Debug, Clone)]
pub struct DefinitionStore {
    root: PathBuf,
}

impl DefinitionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn table(&self, lang: &str) -> PathBuf {
        self.root.join(format!("{}.definition.txt", lang))
    }

    /// Definition of `sense` in `lang`, `None` if the file has no line for it.
    pub fn definition(&self, sense: &Sense, lang: &str) -> Result<Option<String>> {
        let file = match File::open(self.table(lang)) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::UnsupportedLanguage(lang.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let key = sense.offset_key();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.starts_with(&key) {
                return Ok(line.trim().rsplit('|').next().map(str::to_string));
            }
        }
        Ok(None)
    }
}
