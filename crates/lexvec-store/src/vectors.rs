//! VectorStore: dense vectors for senses, word-forms, words and topics.
//!
//! Tables live under one root directory:
//! ```text
//! sense_vectors               dog.n.01 0.12 -0.40 ...
//! topic_vectors               music 0.05 0.33 ...
//! <lang>/word_form_vectors    dog.n.01:dog 0.10 ...
//! <lang>/word_vectors         dog 0.21 ...
//! ```
//! A key missing from its table yields the zero vector; deciding whether
//! that is an error is up to the caller.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lexvec_core::{zero_vector, DomainError, Result, Topic, Vector, WordForm};
use tracing::debug;

use crate::sorted_file::SortedTextFile;

/// Which table to consult and what to search it for.
#[derive(Debug, Clone, Copy)]
pub enum VectorKey<'a> {
    Sense(&'a str),
    WordForm(&'a WordForm),
    Word { lang: &'a str, name: &'a str },
    Topic(Topic),
}

impl VectorKey<'_> {
    pub fn table(&self, root: &Path) -> PathBuf {
        match self {
            VectorKey::Sense(_) => root.join("sense_vectors"),
            VectorKey::WordForm(form) => root.join(&form.lang).join("word_form_vectors"),
            VectorKey::Word { lang, .. } => root.join(lang).join("word_vectors"),
            VectorKey::Topic(_) => root.join("topic_vectors"),
        }
    }

    pub fn search_key(&self) -> Cow<'_, str> {
        match self {
            VectorKey::Sense(name) => Cow::Borrowed(name),
            VectorKey::WordForm(form) => Cow::Owned(form.key()),
            VectorKey::Word { name, .. } => Cow::Borrowed(name),
            VectorKey::Topic(topic) => Cow::Borrowed(topic.as_str()),
        }
    }
}

impl fmt::Display for VectorKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKey::Sense(name) => write!(f, "sense {}", name),
            VectorKey::WordForm(form) => write!(f, "word-form {} ({})", form.key(), form.lang),
            VectorKey::Word { lang, name } => write!(f, "word {} ({})", name, lang),
            VectorKey::Topic(topic) => write!(f, "topic {}", topic),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VectorStore {
    root: PathBuf,
    dimensions: usize,
}

impl VectorStore {
    pub fn new(root: impl Into<PathBuf>, dimensions: usize) -> Self {
        Self {
            root: root.into(),
            dimensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Raw component text stored for `key`, without the key itself.
    pub fn entry(&self, key: &VectorKey) -> Result<Option<String>> {
        let path = key.table(&self.root);
        let mut table = SortedTextFile::open(&path)?;
        let search = key.search_key();
        let line = table.find(&search)?;
        Ok(line.map(|l| l[search.len()..].trim().to_string()))
    }

    /// Vector stored for `key`, or the zero vector if the key is absent.
    pub fn vector(&self, key: &VectorKey) -> Result<Vector> {
        let Some(components) = self.entry(key)? else {
            debug!("no vector line for {}", key);
            return Ok(zero_vector(self.dimensions));
        };

        let vector = components
            .split_whitespace()
            .map(|t| t.parse::<f64>())
            .collect::<std::result::Result<Vector, _>>()
            .map_err(|e| {
                DomainError::corrupt(key.table(&self.root), format!("{}: {}", key, e))
            })?;

        if vector.len() != self.dimensions {
            return Err(DomainError::corrupt(
                key.table(&self.root),
                format!(
                    "{} has {} components, expected {}",
                    key,
                    vector.len(),
                    self.dimensions
                ),
            ));
        }
        Ok(vector)
    }
}

/// One table line: `key d1 d2 ... dN`.
pub fn format_vector_line(key: &str, vector: &[f64]) -> String {
    let mut line = String::from(key);
    for x in vector {
        line.push(' ');
        line.push_str(&x.to_string());
    }
    line
}

/// Write a vector table, sorting entries by key so it can be binary-searched.
pub fn write_vector_table<I, K>(path: &Path, entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, Vector)>,
    K: AsRef<str>,
{
    let mut lines: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format_vector_line(k.as_ref(), &v))
        .collect();
    lines.sort_by(|a, b| crate::sorted_file::line_key(a).cmp(crate::sorted_file::line_key(b)));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexvec_core::is_zero;

    fn store_with(entries: Vec<(&str, Vector)>) -> (tempfile::TempDir, VectorStore) {
        let dir = tempfile::tempdir().unwrap();
        write_vector_table(&dir.path().join("sense_vectors"), entries).unwrap();
        let store = VectorStore::new(dir.path(), 3);
        (dir, store)
    }

    #[test]
    fn round_trip_through_table() {
        let original = vec![0.1, -2.5e-7, 123.456789];
        let (_dir, store) = store_with(vec![
            ("dog.n.01", original.clone()),
            ("cat.n.01", vec![1.0, 2.0, 3.0]),
        ]);
        let v = store.vector(&VectorKey::Sense("dog.n.01")).unwrap();
        for (a, b) in v.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn missing_key_is_zero_vector() {
        let (_dir, store) = store_with(vec![("cat.n.01", vec![1.0, 2.0, 3.0])]);
        let v = store.vector(&VectorKey::Sense("unicorn.n.01")).unwrap();
        assert_eq!(v.len(), 3);
        assert!(is_zero(&v));
    }

    #[test]
    fn lookups_are_idempotent() {
        let (_dir, store) = store_with(vec![("cat.n.01", vec![0.1, 0.2, 0.3])]);
        let a = store.vector(&VectorKey::Sense("cat.n.01")).unwrap();
        let b = store.vector(&VectorKey::Sense("cat.n.01")).unwrap();
        let bits = |v: &Vector| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn word_form_and_word_tables_are_per_language() {
        let dir = tempfile::tempdir().unwrap();
        write_vector_table(
            &dir.path().join("jpn").join("word_form_vectors"),
            vec![("dog.n.01:犬", vec![1.0, 0.0, 0.0])],
        )
        .unwrap();
        write_vector_table(
            &dir.path().join("eng").join("word_vectors"),
            vec![("dog", vec![0.0, 1.0, 0.0])],
        )
        .unwrap();
        let store = VectorStore::new(dir.path(), 3);

        let form = WordForm::new("dog.n.01", "犬", "jpn");
        assert_eq!(store.vector(&VectorKey::WordForm(&form)).unwrap(), vec![1.0, 0.0, 0.0]);
        let word = VectorKey::Word { lang: "eng", name: "dog" };
        assert_eq!(store.vector(&word).unwrap(), vec![0.0, 1.0, 0.0]);
        assert_eq!(store.entry(&word).unwrap().as_deref(), Some("0 1 0"));
    }

    #[test]
    fn wrong_dimension_is_corrupt() {
        let (_dir, store) = store_with(vec![("cat.n.01", vec![1.0, 2.0])]);
        let err = store.vector(&VectorKey::Sense("cat.n.01")).unwrap_err();
        assert!(matches!(err, DomainError::CorruptResource { .. }));
    }

    #[test]
    fn missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::new(dir.path(), 3);
        let err = store.vector(&VectorKey::Topic(Topic::Music)).unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }
}
