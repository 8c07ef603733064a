//! WordNet: a [`LexicalDatabase`] over Princeton WordNet dict files.
//!
//! Loads `data.{noun,verb,adj,adv}` and `index.{noun,verb,adj,adv}` from a
//! dict directory into memory, optionally adding languages from Open
//! Multilingual WordNet `wn-data-<lang>.tab` files. Sense names follow the
//! `lemma.pos.NN` convention: first lemma of the synset, lower-cased, and its
//! 1-based position in that lemma's index entry.

pub mod parser;

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use lexvec_core::{DomainError, LexicalDatabase, Pos, Relation, Result, Sense, WordForm};
use tracing::{debug, info};

use parser::{parse_data_line, parse_index_line, parse_omw_line, RawSynset};

const NATIVE: &str = "eng";

const FILES: [(Pos, &str); 4] = [
    (Pos::Noun, "noun"),
    (Pos::Verb, "verb"),
    (Pos::Adjective, "adj"),
    (Pos::Adverb, "adv"),
];

type SynsetId = usize;

#[derive(Debug, Clone)]
struct Pointer {
    symbol: String,
    target: SynsetId,
    source: u16,
    target_word: u16,
}

#[derive(Debug, Clone)]
struct Synset {
    name: String,
    pos: Pos,
    offset: u32,
    lemmas: Vec<String>,
    pointers: Vec<Pointer>,
    definition: String,
    examples: Vec<String>,
}

impl Synset {
    fn to_sense(&self) -> Sense {
        Sense {
            name: self.name.clone(),
            pos: self.pos,
            offset: self.offset,
            definition: self.definition.clone(),
            examples: self.examples.clone(),
        }
    }
}

/// Word name → synsets in sense order, per word-level part of speech.
#[derive(Debug, Default)]
struct Vocabulary {
    words: HashMap<Pos, BTreeMap<String, Vec<SynsetId>>>,
}

impl Vocabulary {
    fn insert(&mut self, pos: Pos, name: String, id: SynsetId) {
        let ids = self
            .words
            .entry(pos.word_pos())
            .or_default()
            .entry(name)
            .or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    fn get(&self, pos: Pos, name: &str) -> &[SynsetId] {
        self.words
            .get(&pos.word_pos())
            .and_then(|m| m.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn names(&self, pos: Pos) -> Vec<String> {
        self.words
            .get(&pos.word_pos())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// A language added from an OMW tab file.
#[derive(Debug, Default)]
struct ForeignLexicon {
    vocabulary: Vocabulary,
    forms: HashMap<SynsetId, Vec<String>>,
}

#[derive(Debug)]
pub struct WordNet {
    dir: PathBuf,
    version: Option<String>,
    synsets: Vec<Synset>,
    by_offset: HashMap<(Pos, u32), SynsetId>,
    by_name: HashMap<String, SynsetId>,
    vocabulary: Vocabulary,
    foreign: BTreeMap<String, ForeignLexicon>,
}

/// Satellites live in the adjective files and share their offsets.
fn file_pos(pos: Pos) -> Pos {
    pos.word_pos()
}

fn normalise(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

impl WordNet {
    /// Load a WordNet dict directory. Missing part-of-speech files are skipped,
    /// but at least one data file must exist.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut version = None;
        let mut raw: Vec<RawSynset> = Vec::new();
        let mut index = Vec::new();

        for (pos, suffix) in FILES {
            let data_path = dir.join(format!("data.{}", suffix));
            if !data_path.exists() {
                debug!("skipping missing {:?}", data_path);
                continue;
            }
            let content = fs::read_to_string(&data_path)?;
            for (n, line) in content.lines().enumerate() {
                if parser::is_header(line) {
                    if version.is_none() {
                        version = parser::version_from_header(line);
                    }
                    continue;
                }
                let synset = parse_data_line(line)
                    .map_err(|msg| DomainError::invalid_format(&data_path, n + 1, msg))?;
                if file_pos(synset.pos) != pos {
                    return Err(DomainError::invalid_format(
                        &data_path,
                        n + 1,
                        format!("synset of pos {} in {} file", synset.pos, suffix),
                    ));
                }
                raw.push(synset);
            }

            let index_path = dir.join(format!("index.{}", suffix));
            let content = fs::read_to_string(&index_path)?;
            for (n, line) in content.lines().enumerate() {
                if parser::is_header(line) {
                    continue;
                }
                let entry = parse_index_line(line)
                    .map_err(|msg| DomainError::invalid_format(&index_path, n + 1, msg))?;
                index.push((index_path.clone(), n + 1, entry));
            }
        }

        if raw.is_empty() {
            return Err(DomainError::corrupt(dir, "no WordNet data files found"));
        }

        let mut wordnet = Self::assemble(dir, raw, index)?;
        wordnet.version = version;
        info!(
            "loaded WordNet {} from {:?}: {} synsets",
            wordnet.version.as_deref().unwrap_or("?"),
            dir,
            wordnet.synsets.len()
        );
        Ok(wordnet)
    }

    fn assemble(
        dir: &Path,
        raw: Vec<RawSynset>,
        index: Vec<(PathBuf, usize, parser::IndexEntry)>,
    ) -> Result<Self> {
        let by_offset: HashMap<(Pos, u32), SynsetId> = raw
            .iter()
            .enumerate()
            .map(|(id, s)| ((file_pos(s.pos), s.offset), id))
            .collect();

        let mut vocabulary = Vocabulary::default();
        for (path, line, entry) in index {
            for offset in entry.offsets {
                let id = *by_offset
                    .get(&(file_pos(entry.pos), offset))
                    .ok_or_else(|| {
                        DomainError::invalid_format(&path, line, format!("unknown offset {:08}", offset))
                    })?;
                vocabulary.insert(entry.pos, entry.lemma.clone(), id);
            }
        }

        let mut synsets = Vec::with_capacity(raw.len());
        let mut by_name = HashMap::with_capacity(raw.len());
        for (id, s) in raw.iter().enumerate() {
            let first = s
                .lemmas
                .first()
                .map(|l| normalise(l))
                .ok_or_else(|| DomainError::corrupt(dir, format!("synset {:08} has no lemmas", s.offset)))?;
            let sense_number = vocabulary
                .get(s.pos, &first)
                .iter()
                .position(|other| *other == id)
                .map(|i| i + 1)
                .ok_or_else(|| {
                    DomainError::corrupt(dir, format!("{} is not indexed for synset {:08}", first, s.offset))
                })?;
            let name = format!("{}.{}.{:02}", first, s.pos, sense_number);

            let pointers = s
                .pointers
                .iter()
                .filter_map(|p| match by_offset.get(&(file_pos(p.pos), p.offset)) {
                    Some(target) => Some(Pointer {
                        symbol: p.symbol.clone(),
                        target: *target,
                        source: p.source,
                        target_word: p.target,
                    }),
                    None => {
                        debug!("dangling pointer {} from {} to {:08}", p.symbol, name, p.offset);
                        None
                    }
                })
                .collect();

            by_name.insert(name.clone(), id);
            synsets.push(Synset {
                name,
                pos: s.pos,
                offset: s.offset,
                lemmas: s.lemmas.clone(),
                pointers,
                definition: s.definition.clone(),
                examples: s.examples.clone(),
            });
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            version: None,
            synsets,
            by_offset,
            by_name,
            vocabulary,
            foreign: BTreeMap::new(),
        })
    }

    /// Add every `wn-data-<lang>.tab` file found in `dir`.
    pub fn with_omw(mut self, dir: &Path) -> Result<Self> {
        let mut files: Vec<(String, PathBuf)> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter_map(|p| {
                let lang = p
                    .file_name()?
                    .to_str()?
                    .strip_prefix("wn-data-")?
                    .strip_suffix(".tab")?
                    .to_string();
                Some((lang, p))
            })
            .collect();
        files.sort();
        for (lang, path) in files {
            self.load_omw(&lang, &path)?;
        }
        Ok(self)
    }

    /// Add one language from an OMW tab file.
    pub fn load_omw(&mut self, lang: &str, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let mut lexicon = ForeignLexicon::default();
        let mut skipped = 0usize;
        for (n, line) in content.lines().enumerate() {
            let Some(entry) = parse_omw_line(line, lang)
                .map_err(|msg| DomainError::invalid_format(path, n + 1, msg))?
            else {
                continue;
            };
            let Some(&id) = self.by_offset.get(&(file_pos(entry.pos), entry.offset)) else {
                skipped += 1;
                continue;
            };
            let forms = lexicon.forms.entry(id).or_default();
            if !forms.contains(&entry.lemma) {
                forms.push(entry.lemma.clone());
            }
            lexicon.vocabulary.insert(entry.pos, entry.lemma, id);
        }
        if skipped > 0 {
            debug!("{}: {} lemmas point at unknown synsets", lang, skipped);
        }
        info!("loaded {} lemmas for {} from {:?}", lexicon.forms.values().map(Vec::len).sum::<usize>(), lang, path);
        self.foreign.insert(lang.to_string(), lexicon);
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn vocabulary(&self, lang: &str) -> Option<&Vocabulary> {
        if lang == NATIVE {
            Some(&self.vocabulary)
        } else {
            self.foreign.get(lang).map(|l| &l.vocabulary)
        }
    }

    fn lookup_name<'a>(&self, name: &'a str, lang: &str) -> std::borrow::Cow<'a, str> {
        if lang == NATIVE {
            std::borrow::Cow::Owned(normalise(name))
        } else {
            std::borrow::Cow::Borrowed(name)
        }
    }

    fn id(&self, sense: &Sense) -> Option<SynsetId> {
        self.by_name.get(&sense.name).copied()
    }

    fn forms_of(&self, id: SynsetId, lang: &str) -> Vec<WordForm> {
        let synset = &self.synsets[id];
        let names: &[String] = if lang == NATIVE {
            &synset.lemmas
        } else {
            self.foreign
                .get(lang)
                .and_then(|l| l.forms.get(&id))
                .map(Vec::as_slice)
                .unwrap_or_default()
        };
        names
            .iter()
            .map(|n| WordForm::new(&synset.name, n, lang))
            .collect()
    }

    /// Hypernym ancestors (self included at 0) with their path lengths.
    fn hypernym_distances(&self, id: SynsetId) -> HashMap<SynsetId, usize> {
        let mut distances = HashMap::from([(id, 0)]);
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            let d = distances[&current];
            for p in &self.synsets[current].pointers {
                let upward = p.symbol == Relation::Hypernym.symbol()
                    || p.symbol == Relation::InstanceHypernym.symbol();
                if upward && p.source == 0 && !distances.contains_key(&p.target) {
                    distances.insert(p.target, d + 1);
                    queue.push_back(p.target);
                }
            }
        }
        distances
    }
}

impl LexicalDatabase for WordNet {
    fn native_language(&self) -> &str {
        NATIVE
    }

    fn languages(&self) -> Vec<String> {
        std::iter::once(NATIVE.to_string())
            .chain(self.foreign.keys().cloned())
            .collect()
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }

    fn word_names(&self, pos: Pos, lang: &str) -> Vec<String> {
        self.vocabulary(lang).map(|v| v.names(pos)).unwrap_or_default()
    }

    fn canonical_name(&self, name: &str, pos: Pos, lang: &str) -> Option<String> {
        let key = self.lookup_name(name, lang);
        let vocabulary = self.vocabulary(lang)?;
        if vocabulary.get(pos, &key).is_empty() {
            None
        } else {
            Some(key.into_owned())
        }
    }

    fn senses(&self, name: &str, pos: Option<Pos>, lang: &str) -> Vec<Sense> {
        let Some(vocabulary) = self.vocabulary(lang) else {
            return Vec::new();
        };
        let key = self.lookup_name(name, lang);
        let tags: Vec<Pos> = match pos {
            Some(p) => vec![p.word_pos()],
            None => Pos::WORD_TAGS.to_vec(),
        };
        tags.into_iter()
            .flat_map(|p| vocabulary.get(p, &key).iter())
            .map(|id| self.synsets[*id].to_sense())
            .collect()
    }

    fn word_forms(&self, name: &str, pos: Pos, lang: &str) -> Vec<WordForm> {
        let key = self.lookup_name(name, lang).to_lowercase();
        self.senses(name, Some(pos), lang)
            .iter()
            .filter_map(|s| self.id(s))
            .flat_map(|id| self.forms_of(id, lang))
            .filter(|f| f.name.to_lowercase() == key)
            .collect()
    }

    fn sense_word_forms(&self, sense: &Sense, lang: &str) -> Vec<WordForm> {
        self.id(sense)
            .map(|id| self.forms_of(id, lang))
            .unwrap_or_default()
    }

    fn sense(&self, name: &str) -> Option<Sense> {
        self.by_name.get(name).map(|id| self.synsets[*id].to_sense())
    }

    fn all_senses(&self, pos: Option<Pos>) -> Vec<Sense> {
        self.synsets
            .iter()
            .filter(|s| pos.map_or(true, |p| s.pos.matches(p)))
            .map(Synset::to_sense)
            .collect()
    }

    fn shortest_path_distance(&self, a: &Sense, b: &Sense) -> Option<usize> {
        let (a, b) = (self.id(a)?, self.id(b)?);
        if a == b {
            return Some(0);
        }
        let from_a = self.hypernym_distances(a);
        let from_b = self.hypernym_distances(b);
        from_a
            .iter()
            .filter_map(|(ancestor, da)| from_b.get(ancestor).map(|db| da + db))
            .min()
    }

    fn related_senses(&self, sense: &Sense, relation: Relation) -> Vec<Sense> {
        let Some(id) = self.id(sense) else {
            return Vec::new();
        };
        // Antonymy is recorded between word-forms only.
        let lexical = relation == Relation::Antonym;
        let mut seen = HashSet::new();
        self.synsets[id]
            .pointers
            .iter()
            .filter(|p| p.symbol == relation.symbol() && (p.source != 0) == lexical)
            .filter(|p| seen.insert(p.target))
            .map(|p| self.synsets[p.target].to_sense())
            .collect()
    }

    fn antonyms(&self, form: &WordForm) -> Vec<WordForm> {
        if form.lang != NATIVE {
            return Vec::new();
        }
        let Some(&id) = self.by_name.get(&form.sense) else {
            return Vec::new();
        };
        let synset = &self.synsets[id];
        let Some(position) = synset.lemmas.iter().position(|l| *l == form.name) else {
            return Vec::new();
        };
        synset
            .pointers
            .iter()
            .filter(|p| p.symbol == Relation::Antonym.symbol() && p.source as usize == position + 1)
            .filter_map(|p| {
                let target = &self.synsets[p.target];
                let name = target.lemmas.get((p.target_word as usize).checked_sub(1)?)?;
                Some(WordForm::new(&target.name, name, NATIVE))
            })
            .collect()
    }
}
