//! Pluggable lexical database trait.
//!
//! The measurement layer never reads a sense inventory itself; it asks a
//! `LexicalDatabase` for senses, word-forms and graph distances.
//! Current implementation: `lexvec_wordnet::WordNet`.

use crate::{Pos, Relation, Sense, WordForm};

/// Read-only view over a sense inventory and its semantic graph.
///
/// The trait is object-safe and uses `&self`, so one database can back any
/// number of concurrent queries.
///
/// # Implementing a new backend
///
/// ```ignore
/// struct MyDb { /* ... */ }
///
/// impl LexicalDatabase for MyDb {
///     fn languages(&self) -> Vec<String> { vec!["eng".into()] }
///     fn word_names(&self, pos: Pos, lang: &str) -> Vec<String> { /* ... */ }
///     fn canonical_name(&self, name: &str, pos: Pos, lang: &str) -> Option<String> { /* ... */ }
///     // ...
/// }
/// ```
pub trait LexicalDatabase {
    /// Language whose definitions are stored with the senses themselves.
    fn native_language(&self) -> &str {
        "eng"
    }

    /// Every language word-forms can be requested in.
    fn languages(&self) -> Vec<String>;

    /// Human-readable resource version (for logging/reports).
    fn version(&self) -> Option<String> {
        None
    }

    /// Every attested word name for a word-level part of speech, sorted.
    fn word_names(&self, pos: Pos, lang: &str) -> Vec<String>;

    /// The database's own spelling of an attested `(name, pos, lang)`,
    /// after whatever case or separator folding the language uses.
    /// `None` when the triple is not attested.
    fn canonical_name(&self, name: &str, pos: Pos, lang: &str) -> Option<String>;

    /// Whether `(name, pos, lang)` is attested.
    fn contains_word(&self, name: &str, pos: Pos, lang: &str) -> bool {
        self.canonical_name(name, pos, lang).is_some()
    }

    /// Senses a word name belongs to, optionally restricted to one part of speech.
    fn senses(&self, name: &str, pos: Option<Pos>, lang: &str) -> Vec<Sense>;

    /// The word-forms named `name` across all of its senses.
    fn word_forms(&self, name: &str, pos: Pos, lang: &str) -> Vec<WordForm>;

    /// All word-forms of a sense in a language.
    fn sense_word_forms(&self, sense: &Sense, lang: &str) -> Vec<WordForm>;

    /// Look a sense up by its identifying name.
    fn sense(&self, name: &str) -> Option<Sense>;

    /// Every sense, optionally restricted to a word-level part of speech.
    fn all_senses(&self, pos: Option<Pos>) -> Vec<Sense>;

    /// Length of the shortest path between two senses, `None` when unconnected.
    fn shortest_path_distance(&self, a: &Sense, b: &Sense) -> Option<usize>;

    /// Neighbouring senses along one relation.
    fn related_senses(&self, sense: &Sense, relation: Relation) -> Vec<Sense>;

    /// Antonym edges of a word-form.
    fn antonyms(&self, form: &WordForm) -> Vec<WordForm>;
}
