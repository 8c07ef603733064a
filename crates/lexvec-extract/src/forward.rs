//! Sense-centric extraction: one line per sense, word vectors attached to
//! the word-forms that have them.
//!
//! ```text
//! synsets.txt   dog.n.01 dog.n.01.dog,dog.n.01.domestic_dog
//! words.txt     dog 0.12 -0.40 ...          (<root>/<lang>/word_vectors)
//! lexemes.txt   <word index> <sense index>
//! ```

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use lexvec_core::{Relation, Result};
use lexvec_engine::SemanticLexicon;
use lexvec_store::VectorKey;
use tracing::{debug, info};

use crate::report::{Coverage, Direction, PosSummary, RelationSummary, Summary};
use crate::{create, target_dir, Index, POS_ORDER};

/// Edge files written by the forward extractor, in order.
pub const RELATIONS: [Relation; 4] = [
    Relation::Hypernym,
    Relation::Similar,
    Relation::VerbGroup,
    Relation::Antonym,
];

pub struct ForwardExtractor<'a> {
    lexicon: &'a SemanticLexicon,
    lang: String,
    folder: PathBuf,
    senses: Index,
    words: Index,
}

impl<'a> ForwardExtractor<'a> {
    pub fn new(lexicon: &'a SemanticLexicon, out: &Path, lang: &str) -> Result<Self> {
        Ok(Self {
            folder: target_dir(lexicon, out, lang)?,
            lexicon,
            lang: lang.to_string(),
            senses: Index::default(),
            words: Index::default(),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn run(mut self) -> Result<Summary> {
        let vectors = self.lexicon.vectors().root().join(&self.lang).join("word_vectors");
        info!("forward extraction of {} from {:?} into {:?}", self.lang, vectors, self.folder);

        let pos = self.extract_senses()?;
        let relations = RELATIONS
            .into_iter()
            .map(|r| self.extract_relation(r))
            .collect::<Result<Vec<_>>>()?;

        let summary = Summary {
            direction: Direction::Forward,
            lang: self.lang.clone(),
            resource: self.lexicon.database().version(),
            vectors,
            target: self.folder.clone(),
            pos,
            relations,
        };
        summary.write_json(&self.folder.join("summary.json"))?;
        summary.log();
        Ok(summary)
    }

    fn extract_senses(&mut self) -> Result<Vec<PosSummary>> {
        let lexicon = self.lexicon;
        let db = lexicon.database();
        let mut words_out = create(&self.folder.join("words.txt"))?;
        let mut senses_out = create(&self.folder.join("synsets.txt"))?;
        let mut lexemes_out = create(&self.folder.join("lexemes.txt"))?;

        let mut summaries = Vec::with_capacity(POS_ORDER.len());
        for pos in POS_ORDER {
            let mut summary = PosSummary::new(pos);
            let mut new_words = 0;
            let mut missing = HashSet::new();

            for sense in db.all_senses(Some(pos)) {
                let sense_id = self.senses.assign(&sense.name);
                let mut members = Vec::new();

                for form in db.sense_word_forms(&sense, &self.lang) {
                    let key = VectorKey::Word {
                        lang: &self.lang,
                        name: &form.name,
                    };
                    let entry = lexicon.vectors().entry(&key)?;
                    summary.lexemes.count(entry.is_some());
                    let Some(components) = entry else {
                        missing.insert(form.name);
                        continue;
                    };

                    let word_id = match self.words.get(&form.name) {
                        Some(id) => id,
                        None => {
                            writeln!(words_out, "{} {}", form.name, components)?;
                            new_words += 1;
                            self.words.assign(&form.name)
                        }
                    };
                    writeln!(lexemes_out, "{} {}", word_id, sense_id)?;
                    members.push(format!("{}.{}", sense.name, form.name));
                }

                if members.is_empty() {
                    writeln!(senses_out, "{}", sense.name)?;
                    self.senses.mark_unvectored(&sense.name);
                } else {
                    writeln!(senses_out, "{} {}", sense.name, members.join(","))?;
                }
                summary.senses.count(!members.is_empty());
            }

            summary.words = Coverage {
                found: new_words,
                total: new_words + missing.len(),
            };
            summaries.push(summary);
        }

        words_out.flush()?;
        senses_out.flush()?;
        lexemes_out.flush()?;
        Ok(summaries)
    }

    fn extract_relation(&self, relation: Relation) -> Result<RelationSummary> {
        let db = self.lexicon.database();
        let mut out = create(&self.folder.join(format!("{}.txt", relation.name())))?;
        let mut edges = 0;
        let mut targets = BTreeMap::new();

        for pos in POS_ORDER {
            for sense in db.all_senses(Some(pos)) {
                for target in db.related_senses(&sense, relation) {
                    *targets.entry(target.pos.to_string()).or_insert(0) += 1;
                    if let Some((s, t)) = self.senses.edge(&sense.name, &target.name) {
                        writeln!(out, "{} {}", s, t)?;
                        edges += 1;
                    } else if !self.senses.contains(&target.name) {
                        debug!("{} {}: target was never indexed", sense.name, target.name);
                    }
                }
            }
        }
        out.flush()?;
        info!("extracted {}: {} edges", relation.name(), edges);

        Ok(RelationSummary {
            relation: relation.name().to_string(),
            edges,
            targets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;
    use lexvec_core::DomainError;
    use std::fs;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn senses_words_and_lexemes() {
        let (dir, lex) = testdata::lexicon();
        let out = dir.path().join("out");
        let summary = ForwardExtractor::new(&lex, &out, "eng").unwrap().run().unwrap();
        let folder = out.join("eng");

        let words: Vec<String> = lines(&folder.join("words.txt"))
            .iter()
            .map(|l| l.split(' ').next().unwrap().to_string())
            .collect();
        assert_eq!(words, vec!["hot", "cold", "beast", "dog", "cat", "run", "sprint"]);
        assert_eq!(lines(&folder.join("words.txt"))[3], "dog 1 0 0");

        let senses = lines(&folder.join("synsets.txt"));
        assert_eq!(senses.len(), 13);
        assert_eq!(senses[0], "hot.a.01 hot.a.01.hot");
        assert_eq!(senses[2], "blistering.s.01");
        assert_eq!(senses[5], "dog.n.01 dog.n.01.dog");
        assert_eq!(senses[7], "frump.n.01 frump.n.01.dog");

        assert_eq!(
            lines(&folder.join("lexemes.txt")),
            vec!["1 1", "2 2", "3 5", "4 6", "5 7", "4 8", "6 11", "7 12"]
        );

        let a = &summary.pos[0];
        assert_eq!((a.senses.found, a.senses.total), (2, 3));
        assert_eq!((a.lexemes.found, a.lexemes.total), (2, 4));
        assert_eq!((a.words.found, a.words.total), (2, 4));
        let n = &summary.pos[2];
        assert_eq!((n.senses.found, n.senses.total), (4, 7));
        assert_eq!((n.lexemes.found, n.lexemes.total), (4, 14));
        assert_eq!((n.words.found, n.words.total), (3, 13));
        assert_eq!(summary.pos[1].senses.total, 0);
        assert!(folder.join("summary.json").exists());
    }

    #[test]
    fn relation_edges_between_vectored_senses() {
        let (dir, lex) = testdata::lexicon();
        let out = dir.path().join("out");
        let summary = ForwardExtractor::new(&lex, &out, "eng").unwrap().run().unwrap();
        let folder = out.join("eng");

        assert_eq!(lines(&folder.join("hypernym.txt")), vec!["6 5", "7 5"]);
        assert!(lines(&folder.join("similar.txt")).is_empty());
        assert_eq!(lines(&folder.join("verbGroup.txt")), vec!["11 12", "12 11"]);
        assert_eq!(lines(&folder.join("antonym.txt")), vec!["1 2", "2 1"]);
        assert!(!folder.join("synonym.txt").exists());

        let hypernym = &summary.relations[0];
        assert_eq!(hypernym.edges, 2);
        assert_eq!(hypernym.targets.get("n"), Some(&5));
        assert_eq!(hypernym.targets.get("v"), Some(&1));
        let similar = &summary.relations[1];
        assert_eq!(similar.targets.get("s"), Some(&1));
        assert_eq!(similar.targets.get("a"), Some(&1));
    }

    #[test]
    fn foreign_word_forms() {
        let (dir, lex) = testdata::lexicon();
        let out = dir.path().join("out");
        ForwardExtractor::new(&lex, &out, "jpn").unwrap().run().unwrap();
        assert_eq!(lines(&out.join("jpn").join("words.txt")), vec!["犬 0.5 0.5 0"]);
        assert_eq!(lines(&out.join("jpn").join("lexemes.txt")), vec!["1 6", "1 8"]);
    }

    #[test]
    fn unsupported_language() {
        let (dir, lex) = testdata::lexicon();
        let err = ForwardExtractor::new(&lex, dir.path(), "fra").err().unwrap();
        assert!(matches!(err, DomainError::UnsupportedLanguage(l) if l == "fra"));
        assert!(!dir.path().join("fra").exists());
    }
}
