//! Word: a `(name, pos, lang)` triple attested in the lexical database, and
//! the measures derived from its vectors, frequencies and senses.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use lexvec_core::*;
use lexvec_store::VectorKey;
use tracing::debug;

use crate::SemanticLexicon;

/// Relatedness of two words and the shortest semantic-graph distance
/// between any pair of their senses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Association {
    pub relatedness: f64,
    pub distance: usize,
}

impl Association {
    /// `relatedness · ln(1 + distance / k)`. Zero at distance 0.
    pub fn index(&self, k: f64) -> f64 {
        self.relatedness * (1.0 + self.distance as f64 / k).ln()
    }
}

#[derive(Clone)]
pub struct Word<'a> {
    lexicon: &'a SemanticLexicon,
    name: String,
    pos: Pos,
    lang: String,
    key: String,
}

impl<'a> Word<'a> {
    /// Fails with `UnknownWord` unless the database attests the triple.
    /// The name is stored in the database's spelling, so `Domestic dog`
    /// and `domestic_dog` are the same English word.
    pub fn new(lexicon: &'a SemanticLexicon, name: &str, pos: Pos, lang: &str) -> Result<Self> {
        let pos = pos.word_pos();
        let name = lexicon
            .database()
            .canonical_name(name, pos, lang)
            .ok_or_else(|| DomainError::unknown_word(name, pos, lang))?;
        Ok(Self::attested(lexicon, name, pos, lang))
    }

    pub(crate) fn attested(lexicon: &'a SemanticLexicon, name: String, pos: Pos, lang: &str) -> Self {
        let key = format!("{}.{}.{}", name, pos, lang);
        Self {
            lexicon,
            name,
            pos,
            lang: lang.to_string(),
            key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// `name.pos.lang`
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn senses(&self) -> Vec<Sense> {
        self.lexicon
            .database()
            .senses(&self.name, Some(self.pos), &self.lang)
    }

    /// The word-forms named like this word, one per sense.
    pub fn word_forms(&self) -> Vec<WordForm> {
        self.lexicon
            .database()
            .word_forms(&self.name, self.pos, &self.lang)
    }

    /// The word's own vector, or with a topic, the frequency-weighted sum of
    /// its word-forms' vectors. Forms without a vector contribute nothing.
    pub fn vector(&self, topic: Option<Topic>) -> Result<Vector> {
        let vectors = self.lexicon.vectors();
        let Some(topic) = topic else {
            let vector = vectors.vector(&VectorKey::Word {
                lang: &self.lang,
                name: &self.name,
            })?;
            if is_zero(&vector) {
                return Err(DomainError::NoVectorData(self.to_string()));
            }
            return Ok(vector);
        };

        let mut acc = zero_vector(vectors.dimensions());
        for form in self.word_forms() {
            let v = vectors.vector(&VectorKey::WordForm(&form))?;
            if is_zero(&v) {
                debug!("{}: no vector for {}, skipped", self.key, form.key());
                continue;
            }
            let f = self.lexicon.frequency(&form, topic)?;
            add_scaled(&mut acc, &v, f);
        }

        if is_zero(&acc) {
            return Err(DomainError::NoVectorData(format!("{} in topic {}", self, topic)));
        }
        Ok(acc)
    }

    /// Fuzzy count of the word's senses in use within `topic`.
    ///
    /// Frequencies are rescaled by their maximum, so a single dominant
    /// word-form scores close to 1 however many rare ones it has.
    pub fn ambiguity(&self, topic: Topic) -> Result<f64> {
        let frequencies = self
            .word_forms()
            .iter()
            .map(|form| self.lexicon.frequency(form, topic))
            .collect::<Result<Vec<f64>>>()?;

        let max = frequencies.iter().copied().fold(0.0, f64::max);
        if max <= 0.0 {
            return Err(DomainError::AllFrequenciesZero(self.to_string()));
        }

        let delta = self.lexicon.params().delta;
        let term = |v: f64| v.powf(delta) / (v.powf(delta) + (1.0 - v).powf(delta)).powf(1.0 / delta);
        Ok(frequencies.iter().map(|f| term(f / max)).sum())
    }

    pub fn topic_relatedness(&self, topic: Topic) -> Result<f64> {
        let topic_vector = self.lexicon.topic_vector(topic)?;
        Ok(cosine(&self.vector(Some(topic))?, &topic_vector))
    }

    pub fn association(&self, other: &Word, topic: Option<Topic>) -> Result<Association> {
        let relatedness = cosine(&self.vector(topic)?, &other.vector(topic)?);

        let db = self.lexicon.database();
        let theirs = other.senses();
        let distance = self
            .senses()
            .iter()
            .flat_map(|a| theirs.iter().filter_map(move |b| db.shortest_path_distance(a, b)))
            .min()
            .ok_or_else(|| DomainError::Disconnected(self.to_string(), other.to_string()))?;

        Ok(Association {
            relatedness,
            distance,
        })
    }

    pub fn association_index(&self, other: &Word, topic: Option<Topic>) -> Result<f64> {
        Ok(self.association(other, topic)?.index(self.lexicon.params().k))
    }

    /// Words sharing a sense with this one (`None`) or reachable from its
    /// senses along `relation`, without this word itself.
    pub fn related(&self, relation: Option<Relation>) -> Result<Vec<Word<'a>>> {
        let db = self.lexicon.database();
        let mut words = BTreeSet::new();
        for sense in self.senses() {
            let targets = match relation {
                None => vec![sense],
                Some(r) => db.related_senses(&sense, r),
            };
            for target in &targets {
                for form in db.sense_word_forms(target, &self.lang) {
                    // Data-file lemmas keep their capitals; the word does not.
                    let word = Word::new(self.lexicon, &form.name, self.pos, &self.lang)?;
                    if word.name != self.name {
                        words.insert(word);
                    }
                }
            }
        }
        Ok(words.into_iter().collect())
    }
}

impl PartialEq for Word<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Word<'_> {}

impl PartialOrd for Word<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Word<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for Word<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word('{}')", self.key)
    }
}

impl fmt::Debug for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
