//! Batch extractors that walk the whole lexical database for one language
//! and write compact indexed tables for graph-embedding training.
//!
//! ```text
//! <out>/<lang>/words.txt      synsets.txt     lexemes.txt
//!              hypernym.txt   similar.txt     verbGroup.txt   antonym.txt
//!              synonym.txt    (backward only)
//!              summary.json
//! ```
//! Indices are 1-based and assigned in walk order; `-1` marks an entity with
//! no vector data, and edges touching one are not written.

pub mod backward;
pub mod forward;
pub mod report;

#[cfg(test)]
mod testdata;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use lexvec_core::{DomainError, Pos, Result};
use lexvec_engine::SemanticLexicon;

pub use backward::BackwardExtractor;
pub use forward::ForwardExtractor;
pub use report::{Direction, Summary};

/// Walk order of both extractors.
pub const POS_ORDER: [Pos; 4] = [Pos::Adjective, Pos::Adverb, Pos::Noun, Pos::Verb];

/// `<out>/<lang>`, created if missing. Fails for languages the database
/// cannot list word-forms in.
pub fn target_dir(lexicon: &SemanticLexicon, out: &Path, lang: &str) -> Result<PathBuf> {
    if !lexicon.languages().iter().any(|l| l == lang) {
        return Err(DomainError::UnsupportedLanguage(lang.to_string()));
    }
    let folder = out.join(lang);
    fs::create_dir_all(&folder)?;
    Ok(folder)
}

pub(crate) fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Running index of extracted entities.
#[derive(Debug, Default)]
pub struct Index {
    ids: HashMap<String, i64>,
    next: i64,
}

impl Index {
    /// Next 1-based index, also recorded for `key`.
    pub fn assign(&mut self, key: &str) -> i64 {
        self.next += 1;
        self.ids.insert(key.to_string(), self.next);
        self.next
    }

    pub fn mark_unvectored(&mut self, key: &str) {
        self.ids.insert(key.to_string(), -1);
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.ids.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.ids.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.next as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }

    /// Both ends' indices when both carry vector data.
    pub fn edge(&self, source: &str, target: &str) -> Option<(i64, i64)> {
        match (self.get(source)?, self.get(target)?) {
            (s, t) if s >= 0 && t >= 0 => Some((s, t)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_assigns_from_one_and_skips_unvectored_edges() {
        let mut index = Index::default();
        assert!(index.is_empty());
        assert_eq!(index.assign("a"), 1);
        assert_eq!(index.assign("b"), 2);
        assert_eq!(index.assign("c"), 3);
        index.mark_unvectored("c");

        assert_eq!(index.len(), 3);
        assert_eq!(index.edge("a", "b"), Some((1, 2)));
        assert_eq!(index.edge("a", "c"), None);
        assert_eq!(index.edge("a", "zzz"), None);
        assert!(index.contains("c"));
        assert_eq!(index.get("c"), Some(-1));
    }
}
