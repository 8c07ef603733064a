pub mod database;
pub mod error;

pub use database::LexicalDatabase;
pub use error::{DomainError, Result};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ─── Configuration ───────────────────────────────────────────────

/// Tunable constants of the derived measures.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasureParams {
    /// Dimensionality of every vector table. Default 300.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Exponent of the fuzzy-membership term used by ambiguity.
    /// Lower values let a dominant sense hide minor ones less. Default 0.65.
    #[serde(default = "default_delta")]
    pub delta: f64,
    /// Damping of the shortest-path discount in the association index.
    /// Larger values surface more specific associations. Default 0.5.
    #[serde(default = "default_k")]
    pub k: f64,
}

fn default_dimensions() -> usize {
    300
}
fn default_delta() -> f64 {
    0.65
}
fn default_k() -> f64 {
    0.5
}

impl Default for MeasureParams {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            delta: default_delta(),
            k: default_k(),
        }
    }
}

impl MeasureParams {
    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

// ─── Part of Speech ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    /// Adjective satellite. Words never carry it; senses may.
    Satellite,
    Adverb,
}

impl Pos {
    /// The four tags a word can be looked up with, in extraction order.
    pub const WORD_TAGS: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    pub fn tag(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adjective => 'a',
            Pos::Satellite => 's',
            Pos::Adverb => 'r',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' => Some(Pos::Adjective),
            's' => Some(Pos::Satellite),
            'r' => Some(Pos::Adverb),
            _ => None,
        }
    }

    /// Satellites are adjectives as far as words are concerned.
    pub fn word_pos(self) -> Self {
        match self {
            Pos::Satellite => Pos::Adjective,
            other => other,
        }
    }

    /// Whether a sense tagged `self` is reachable from a word tagged `word_pos`.
    pub fn matches(self, word_pos: Pos) -> bool {
        self.word_pos() == word_pos.word_pos()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Pos {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let pos = match s {
            "n" | "noun" => Pos::Noun,
            "v" | "verb" => Pos::Verb,
            "a" | "adj" | "adjective" => Pos::Adjective,
            "s" | "satellite" => Pos::Satellite,
            "r" | "adv" | "adverb" => Pos::Adverb,
            _ => return Err(DomainError::UnknownPos(s.to_string())),
        };
        Ok(pos)
    }
}

// ─── Topics ──────────────────────────────────────────────────────

/// The closed set of topics frequency tables and topic vectors exist for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Topic {
    #[default]
    General,
    Automotive,
    Fashion,
    Music,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::General, Topic::Automotive, Topic::Fashion, Topic::Music];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::General => "general",
            Topic::Automotive => "automotive",
            Topic::Fashion => "fashion",
            Topic::Music => "music",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownTopic(s.to_string()))
    }
}

// ─── Relations ───────────────────────────────────────────────────

/// Typed edges of the semantic graph, named after their pointer symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Hypernym,
    InstanceHypernym,
    Hyponym,
    InstanceHyponym,
    Similar,
    VerbGroup,
    Antonym,
    AlsoSee,
    Entailment,
    Cause,
    Attribute,
    Derivation,
    MemberHolonym,
    SubstanceHolonym,
    PartHolonym,
    MemberMeronym,
    SubstanceMeronym,
    PartMeronym,
}

const RELATIONS: [(Relation, &str, &str); 18] = [
    (Relation::Hypernym, "@", "hypernym"),
    (Relation::InstanceHypernym, "@i", "instanceHypernym"),
    (Relation::Hyponym, "~", "hyponym"),
    (Relation::InstanceHyponym, "~i", "instanceHyponym"),
    (Relation::Similar, "&", "similar"),
    (Relation::VerbGroup, "$", "verbGroup"),
    (Relation::Antonym, "!", "antonym"),
    (Relation::AlsoSee, "^", "alsoSee"),
    (Relation::Entailment, "*", "entailment"),
    (Relation::Cause, ">", "cause"),
    (Relation::Attribute, "=", "attribute"),
    (Relation::Derivation, "+", "derivation"),
    (Relation::MemberHolonym, "#m", "memberHolonym"),
    (Relation::SubstanceHolonym, "#s", "substanceHolonym"),
    (Relation::PartHolonym, "#p", "partHolonym"),
    (Relation::MemberMeronym, "%m", "memberMeronym"),
    (Relation::SubstanceMeronym, "%s", "substanceMeronym"),
    (Relation::PartMeronym, "%p", "partMeronym"),
];

impl Relation {
    pub fn symbol(self) -> &'static str {
        RELATIONS
            .iter()
            .find(|(r, _, _)| *r == self)
            .map(|(_, symbol, _)| *symbol)
            .unwrap_or_default()
    }

    /// camelCase name, also used for extractor output file stems.
    pub fn name(self) -> &'static str {
        RELATIONS
            .iter()
            .find(|(r, _, _)| *r == self)
            .map(|(_, _, name)| *name)
            .unwrap_or_default()
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        RELATIONS
            .iter()
            .find(|(_, s, _)| *s == symbol)
            .map(|(r, _, _)| *r)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relation {
    type Err = DomainError;

    /// Accepts either the pointer symbol (`@`) or the name (`hypernym`).
    fn from_str(s: &str) -> Result<Self> {
        RELATIONS
            .iter()
            .find(|(_, symbol, name)| *symbol == s || name.eq_ignore_ascii_case(s))
            .map(|(r, _, _)| *r)
            .ok_or_else(|| DomainError::UnknownRelation(s.to_string()))
    }
}

// ─── Lexical Handles ─────────────────────────────────────────────

/// A sense (synset) as handed out by a [`LexicalDatabase`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sense {
    /// Identifying name, e.g. `dog.n.01`.
    pub name: String,
    pub pos: Pos,
    pub offset: u32,
    pub definition: String,
    pub examples: Vec<String>,
}

impl Sense {
    /// `00000000-n` style key used by per-language definition files.
    pub fn offset_key(&self) -> String {
        format!("{:08}-{}", self.offset, self.pos)
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sense('{}')", self.name)
    }
}

/// A word-form (lemma): one surface name inside exactly one sense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordForm {
    /// Name of the owning sense.
    pub sense: String,
    pub name: String,
    pub lang: String,
}

impl WordForm {
    pub fn new(sense: &str, name: &str, lang: &str) -> Self {
        Self {
            sense: sense.to_string(),
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }

    /// `sense:name`, the key of word-form vector and frequency tables.
    pub fn key(&self) -> String {
        format!("{}:{}", self.sense, self.name)
    }
}

impl fmt::Display for WordForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordForm('{}.{}')", self.sense, self.name)
    }
}

// ─── Vector Utilities ────────────────────────────────────────────

pub type Vector = Vec<f64>;

pub fn zero_vector(dims: usize) -> Vector {
    vec![0.0; dims]
}

pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn norm(v: &[f64]) -> f64 {
    dot_product(v, v).sqrt()
}

/// The "no data" sentinel check.
pub fn is_zero(v: &[f64]) -> bool {
    v.iter().all(|x| *x == 0.0)
}

/// Cosine similarity. NaN when either side is the zero vector; callers
/// reject zero vectors before getting here.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    dot_product(a, b) / (dot_product(a, a) * dot_product(b, b)).sqrt()
}

/// `acc += weight * v`
pub fn add_scaled(acc: &mut [f64], v: &[f64], weight: f64) {
    for (a, x) in acc.iter_mut().zip(v.iter()) {
        *a += weight * x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_vector_with_itself_is_one() {
        let v = vec![0.3, -1.2, 4.0, 0.0];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_opposite_vectors_is_minus_one() {
        let v = vec![0.3, -1.2, 4.0];
        let neg: Vec<f64> = v.iter().map(|x| -x).collect();
        assert!((cosine(&v, &neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 2.0]), 0.0);
    }

    #[test]
    fn cosine_with_zero_vector_is_undefined() {
        assert!(cosine(&[1.0, 0.0], &[0.0, 0.0]).is_nan());
    }

    #[test]
    fn zero_sentinel() {
        assert!(is_zero(&zero_vector(300)));
        assert!(!is_zero(&[0.0, 1e-30]));
        assert_eq!(zero_vector(300).len(), 300);
    }

    #[test]
    fn add_scaled_accumulates() {
        let mut acc = vec![1.0, 1.0];
        add_scaled(&mut acc, &[2.0, -4.0], 0.5);
        assert_eq!(acc, vec![2.0, -1.0]);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn topics_parse_and_reject() {
        assert_eq!("music".parse::<Topic>().unwrap(), Topic::Music);
        assert_eq!(Topic::default(), Topic::General);
        match "sports".parse::<Topic>() {
            Err(DomainError::UnknownTopic(t)) => assert_eq!(t, "sports"),
            other => panic!("expected UnknownTopic, got {:?}", other),
        }
    }

    #[test]
    fn pos_tags_round_trip_and_satellites_fold() {
        for pos in [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Satellite, Pos::Adverb] {
            assert_eq!(Pos::from_tag(pos.tag()), Some(pos));
        }
        assert_eq!(Pos::Satellite.word_pos(), Pos::Adjective);
        assert!(Pos::Satellite.matches(Pos::Adjective));
        assert!(!Pos::Noun.matches(Pos::Verb));
        assert!("x".parse::<Pos>().is_err());
        assert_eq!("adverb".parse::<Pos>().unwrap(), Pos::Adverb);
    }

    #[test]
    fn relations_parse_by_symbol_or_name() {
        assert_eq!("@".parse::<Relation>().unwrap(), Relation::Hypernym);
        assert_eq!("verbGroup".parse::<Relation>().unwrap(), Relation::VerbGroup);
        assert_eq!(Relation::Antonym.symbol(), "!");
        assert_eq!(Relation::from_symbol("~i"), Some(Relation::InstanceHyponym));
        assert!("?".parse::<Relation>().is_err());
    }

    #[test]
    fn handle_keys() {
        let form = WordForm::new("dog.n.01", "domestic_dog", "eng");
        assert_eq!(form.key(), "dog.n.01:domestic_dog");
        let sense = Sense {
            name: "hot.a.01".into(),
            pos: Pos::Adjective,
            offset: 1234,
            definition: String::new(),
            examples: Vec::new(),
        };
        assert_eq!(sense.offset_key(), "00001234-a");
    }

    #[test]
    fn params_default_and_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, r#"{ "delta": 0.8 }"#).unwrap();
        let params = MeasureParams::from_json_file(&path).unwrap();
        assert_eq!(params.delta, 0.8);
        assert_eq!(params.k, 0.5);
        assert_eq!(params.dimensions, 300);
    }
}
