pub mod word;

#[cfg(test)]
mod testdata;

use std::path::PathBuf;

use lexvec_core::*;
use lexvec_store::{DefinitionStore, FrequencyStore, VectorKey, VectorStore};

pub use word::{Association, Word};

/// One lexical database plus the vector and frequency tables under one root.
///
/// Holds no open file handles; every lookup opens and releases its own, so a
/// lexicon can be shared across threads.
pub struct SemanticLexicon {
    db: Box<dyn LexicalDatabase + Send + Sync>,
    vectors: VectorStore,
    frequencies: FrequencyStore,
    definitions: DefinitionStore,
    params: MeasureParams,
}

impl SemanticLexicon {
    pub fn new(db: impl LexicalDatabase + Send + Sync + 'static, root: impl Into<PathBuf>) -> Self {
        Self::with_params(db, root, MeasureParams::default())
    }

    pub fn with_params(
        db: impl LexicalDatabase + Send + Sync + 'static,
        root: impl Into<PathBuf>,
        params: MeasureParams,
    ) -> Self {
        let root = root.into();
        Self {
            db: Box::new(db),
            vectors: VectorStore::new(root.clone(), params.dimensions),
            frequencies: FrequencyStore::new(root.clone()),
            definitions: DefinitionStore::new(root),
            params,
        }
    }

    pub fn database(&self) -> &dyn LexicalDatabase {
        self.db.as_ref()
    }

    pub fn vectors(&self) -> &VectorStore {
        &self.vectors
    }

    pub fn params(&self) -> &MeasureParams {
        &self.params
    }

    pub fn topics(&self) -> &'static [Topic] {
        &Topic::ALL
    }

    pub fn languages(&self) -> Vec<String> {
        self.db.languages()
    }

    // ─── Words ───────────────────────────────────────────────────

    pub fn word(&self, name: &str, pos: Pos, lang: &str) -> Result<Word<'_>> {
        Word::new(self, name, pos, lang)
    }

    /// One word per part of speech `name` is attested with, sorted.
    pub fn words(&self, name: &str, lang: &str) -> Result<Vec<Word<'_>>> {
        let mut words = Pos::WORD_TAGS
            .into_iter()
            .filter(|pos| self.db.contains_word(name, *pos, lang))
            .map(|pos| Word::new(self, name, pos, lang))
            .collect::<Result<Vec<_>>>()?;
        words.sort();
        Ok(words)
    }

    /// Every attested word, tag by tag (`n v a r` unless `pos` narrows it).
    ///
    /// Names come from the database itself, so no entry is re-validated.
    /// Calling again starts a fresh pass.
    pub fn all_words<'a>(&'a self, pos: Option<Pos>, lang: &'a str) -> impl Iterator<Item = Word<'a>> + 'a {
        let tags: Vec<Pos> = match pos {
            Some(p) => vec![p.word_pos()],
            None => Pos::WORD_TAGS.to_vec(),
        };
        tags.into_iter().flat_map(move |p| {
            self.db
                .word_names(p, lang)
                .into_iter()
                .map(move |name| Word::attested(self, name, p, lang))
        })
    }

    /// Cosine of two words' own (topic-independent) vectors.
    pub fn relatedness(&self, a: &Word, b: &Word) -> Result<f64> {
        Ok(cosine(&a.vector(None)?, &b.vector(None)?))
    }

    // ─── Senses and word-forms ───────────────────────────────────

    pub fn sense(&self, name: &str) -> Result<Sense> {
        self.db
            .sense(name)
            .ok_or_else(|| DomainError::UnknownSense(name.to_string()))
    }

    pub fn senses(&self, name: &str, pos: Option<Pos>, lang: &str) -> Vec<Sense> {
        self.db.senses(name, pos, lang)
    }

    pub fn all_senses(&self, pos: Option<Pos>) -> Vec<Sense> {
        self.db.all_senses(pos)
    }

    pub fn word_forms(&self, name: &str, pos: Pos, lang: &str) -> Vec<WordForm> {
        self.db.word_forms(name, pos, lang)
    }

    /// Definition of `sense` in `lang`. `None` when the language's
    /// definition file has no entry for the sense.
    pub fn definition(&self, sense: &Sense, lang: &str) -> Result<Option<String>> {
        if lang == self.db.native_language() {
            return Ok(Some(sense.definition.clone()));
        }
        self.definitions.definition(sense, lang)
    }

    // ─── Vectors and frequencies ─────────────────────────────────

    pub fn sense_vector(&self, sense: &Sense) -> Result<Vector> {
        self.nonzero(VectorKey::Sense(&sense.name))
    }

    pub fn word_form_vector(&self, form: &WordForm) -> Result<Vector> {
        self.nonzero(VectorKey::WordForm(form))
    }

    pub fn topic_vector(&self, topic: Topic) -> Result<Vector> {
        self.nonzero(VectorKey::Topic(topic))
    }

    pub fn frequency(&self, form: &WordForm, topic: Topic) -> Result<f64> {
        self.frequencies.frequency(topic, form)
    }

    fn nonzero(&self, key: VectorKey) -> Result<Vector> {
        let vector = self.vectors.vector(&key)?;
        if is_zero(&vector) {
            return Err(DomainError::NoVectorData(key.to_string()));
        }
        Ok(vector)
    }
}
