//! FrequencyStore: per-language, per-topic word-form frequencies.
//!
//! `<root>/<lang>/freq/freq.<topic>.txt`:
//! ```text
//! 1523 <anything>          total occurrence count of the topic corpus
//! car.n.01:auto 12         sorted by `sense:name`
//! car.n.01:car 340
//! ```

use std::path::{Path, PathBuf};

use lexvec_core::{DomainError, Result, Topic, WordForm};
use tracing::debug;

use crate::sorted_file::SortedTextFile;

#[derive(Debug, Clone)]
pub struct FrequencyStore {
    root: PathBuf,
}

impl FrequencyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn table(&self, lang: &str, topic: Topic) -> PathBuf {
        self.root
            .join(lang)
            .join("freq")
            .join(format!("freq.{}.txt", topic))
    }

    /// Occurrence count of `form` normalised by the topic total, in `[0, 1]`.
    /// Forms missing from the table have frequency 0.
    pub fn frequency(&self, topic: Topic, form: &WordForm) -> Result<f64> {
        let path = self.table(&form.lang, topic);
        let mut table = SortedTextFile::open(&path)?;
        let total = read_total(&mut table, &path)?;

        let key = form.key();
        let Some(line) = table.find(&key)? else {
            debug!("{} absent from {:?}", key, path);
            return Ok(0.0);
        };

        let count: u64 = line
            .split_whitespace()
            .nth(1)
            .and_then(|c| c.parse().ok())
            .ok_or_else(|| DomainError::corrupt(&path, format!("bad count line {:?}", line)))?;
        if count > total {
            return Err(DomainError::corrupt(
                &path,
                format!("count {} of {} exceeds total {}", count, key, total),
            ));
        }
        Ok(count as f64 / total as f64)
    }
}

/// The header's total count. Zero is a corrupt table, not an empty one.
fn read_total(table: &mut SortedTextFile, path: &Path) -> Result<u64> {
    let header = table
        .read_header()?
        .ok_or_else(|| DomainError::corrupt(path, "missing total count header"))?;
    let total: u64 = header
        .split_whitespace()
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| DomainError::corrupt(path, format!("bad header {:?}", header)))?;
    if total == 0 {
        return Err(DomainError::corrupt(path, "total count is 0"));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(content: &str) -> (tempfile::TempDir, FrequencyStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FrequencyStore::new(dir.path());
        let path = store.table("eng", Topic::General);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        (dir, store)
    }

    #[test]
    fn normalises_by_total() {
        let (_dir, store) = store_with("100\ns0:w0 5\ns1:w1 40\ns3:w3 1\n");
        let f = store
            .frequency(Topic::General, &WordForm::new("s1", "w1", "eng"))
            .unwrap();
        assert!((f - 0.4).abs() < 1e-12);
    }

    #[test]
    fn unlisted_form_is_zero() {
        let (_dir, store) = store_with("100\ns1:w1 40\n");
        let f = store
            .frequency(Topic::General, &WordForm::new("s2", "w2", "eng"))
            .unwrap();
        assert_eq!(f, 0.0);
    }

    #[test]
    fn header_with_trailing_fields() {
        let (_dir, store) = store_with("200 tokens total\ns1:w1 50\n");
        let f = store
            .frequency(Topic::General, &WordForm::new("s1", "w1", "eng"))
            .unwrap();
        assert!((f - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_total_is_corrupt() {
        let (_dir, store) = store_with("0\ns1:w1 40\n");
        let err = store
            .frequency(Topic::General, &WordForm::new("s1", "w1", "eng"))
            .unwrap_err();
        assert!(matches!(err, DomainError::CorruptResource { .. }));
    }

    #[test]
    fn count_above_total_is_corrupt() {
        let (_dir, store) = store_with("100\ns1:w1 40\ns2:w2 101\n");
        let err = store
            .frequency(Topic::General, &WordForm::new("s2", "w2", "eng"))
            .unwrap_err();
        assert!(matches!(err, DomainError::CorruptResource { .. }));

        let f = store
            .frequency(Topic::General, &WordForm::new("s1", "w1", "eng"))
            .unwrap();
        assert!((f - 0.4).abs() < 1e-12);
    }

    #[test]
    fn other_topics_have_their_own_table() {
        let (_dir, store) = store_with("100\ns1:w1 40\n");
        assert!(store.table("eng", Topic::Music).ends_with("eng/freq/freq.music.txt"));
        let err = store
            .frequency(Topic::Music, &WordForm::new("s1", "w1", "eng"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }
}
