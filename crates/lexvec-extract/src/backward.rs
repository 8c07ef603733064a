//! Word-centric extraction: one line per word, sense vectors attached to the
//! senses that have them.
//!
//! ```text
//! words.txt     dog.n dog.n.01.dog,frump.n.01.dog
//! synsets.txt   dog.n.01 0.12 -0.40 ...     (<root>/sense_vectors)
//! lexemes.txt   <sense index> <word index>
//! ```

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use lexvec_core::{Relation, Result};
use lexvec_engine::{SemanticLexicon, Word};
use lexvec_store::VectorKey;
use tracing::{debug, info};

use crate::report::{Coverage, Direction, PosSummary, RelationSummary, Summary};
use crate::{create, target_dir, Index, POS_ORDER};

/// Edge files written by the backward extractor, in order; `None` is synonymy.
pub const RELATIONS: [Option<Relation>; 5] = [
    Some(Relation::Hypernym),
    Some(Relation::Similar),
    None,
    Some(Relation::VerbGroup),
    Some(Relation::Antonym),
];

fn edge_file_stem(relation: Option<Relation>) -> &'static str {
    relation.map_or("synonym", Relation::name)
}

/// `name.pos`, the word's identity within one language.
fn word_id(word: &Word) -> String {
    format!("{}.{}", word.name(), word.pos())
}

pub struct BackwardExtractor<'a> {
    lexicon: &'a SemanticLexicon,
    lang: String,
    folder: PathBuf,
    words: Index,
    senses: Index,
}

impl<'a> BackwardExtractor<'a> {
    pub fn new(lexicon: &'a SemanticLexicon, out: &Path, lang: &str) -> Result<Self> {
        Ok(Self {
            folder: target_dir(lexicon, out, lang)?,
            lexicon,
            lang: lang.to_string(),
            words: Index::default(),
            senses: Index::default(),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn run(mut self) -> Result<Summary> {
        let vectors = self.lexicon.vectors().root().join("sense_vectors");
        info!("backward extraction of {} from {:?} into {:?}", self.lang, vectors, self.folder);

        let pos = self.extract_words()?;
        let relations = RELATIONS
            .into_iter()
            .map(|r| self.extract_relation(r))
            .collect::<Result<Vec<_>>>()?;

        let summary = Summary {
            direction: Direction::Backward,
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

    fn extract_words(&mut self) -> Result<Vec<PosSummary>> {
        let lexicon = self.lexicon;
        let mut words_out = create(&self.folder.join("words.txt"))?;
        let mut senses_out = create(&self.folder.join("synsets.txt"))?;
        let mut lexemes_out = create(&self.folder.join("lexemes.txt"))?;

        let mut summaries = Vec::with_capacity(POS_ORDER.len());
        for pos in POS_ORDER {
            let mut summary = PosSummary::new(pos);
            let mut new_senses = 0;
            let mut missing = HashSet::new();

            for word in lexicon.all_words(Some(pos), &self.lang) {
                let id = word_id(&word);
                let word_index = self.words.assign(&id);
                let mut members = Vec::new();

                for sense in word.senses() {
                    let entry = lexicon.vectors().entry(&VectorKey::Sense(&sense.name))?;
                    summary.lexemes.count(entry.is_some());
                    let Some(components) = entry else {
                        missing.insert(sense.name);
                        continue;
                    };

                    let sense_index = match self.senses.get(&sense.name) {
                        Some(i) => i,
                        None => {
                            writeln!(senses_out, "{} {}", sense.name, components)?;
                            new_senses += 1;
                            self.senses.assign(&sense.name)
                        }
                    };
                    writeln!(lexemes_out, "{} {}", sense_index, word_index)?;
                    members.push(format!("{}.{}", sense.name, word.name()));
                }

                if members.is_empty() {
                    writeln!(words_out, "{}", id)?;
                    self.words.mark_unvectored(&id);
                } else {
                    writeln!(words_out, "{} {}", id, members.join(","))?;
                }
                summary.words.count(!members.is_empty());
            }

            summary.senses = Coverage {
                found: new_senses,
                total: new_senses + missing.len(),
            };
            summaries.push(summary);
        }

        words_out.flush()?;
        senses_out.flush()?;
        lexemes_out.flush()?;
        Ok(summaries)
    }

    fn extract_relation(&self, relation: Option<Relation>) -> Result<RelationSummary> {
        let stem = edge_file_stem(relation);
        let mut out = create(&self.folder.join(format!("{}.txt", stem)))?;
        let mut edges = 0;
        let mut targets = BTreeMap::new();

        for pos in POS_ORDER {
            for word in self.lexicon.all_words(Some(pos), &self.lang) {
                let source = word_id(&word);
                for target in word.related(relation)? {
                    *targets.entry(target.pos().to_string()).or_insert(0) += 1;
                    let target = word_id(&target);
                    if let Some((s, t)) = self.words.edge(&source, &target) {
                        writeln!(out, "{} {}", s, t)?;
                        edges += 1;
                    } else if !self.words.contains(&target) {
                        debug!("{} {}: target was never indexed", source, target);
                    }
                }
            }
        }
        out.flush()?;
        info!("extracted {}: {} edges", stem, edges);

        Ok(RelationSummary {
            relation: stem.to_string(),
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
    fn words_senses_and_lexemes() {
        let (dir, lex) = testdata::lexicon();
        let out = dir.path().join("out");
        let summary = BackwardExtractor::new(&lex, &out, "eng").unwrap().run().unwrap();
        let folder = out.join("eng");

        let words = lines(&folder.join("words.txt"));
        assert_eq!(words.len(), 20);
        assert_eq!(words[0], "blistering.a");
        assert_eq!(words[1], "cold.a cold.a.01.cold");
        assert_eq!(words[2], "hot.a hot.a.01.hot");
        assert_eq!(words[11], "dog.n dog.n.01.dog");
        assert_eq!(words[17], "run.v run.v.01.run");

        let senses: Vec<String> = lines(&folder.join("synsets.txt"))
            .iter()
            .map(|l| l.split(' ').next().unwrap().to_string())
            .collect();
        assert_eq!(
            senses,
            vec!["cold.a.01", "hot.a.01", "animal.n.01", "dog.n.01", "cat.n.01", "run.v.01", "sprint.v.01"]
        );

        assert_eq!(
            lines(&folder.join("lexemes.txt")),
            vec!["1 2", "2 3", "3 5", "3 8", "4 9", "5 11", "4 12", "4 13", "5 17", "6 18", "7 19"]
        );

        let a = &summary.pos[0];
        assert_eq!((a.words.found, a.words.total), (2, 4));
        assert_eq!((a.senses.found, a.senses.total), (2, 3));
        assert_eq!((a.lexemes.found, a.lexemes.total), (2, 4));
        let v = &summary.pos[3];
        assert_eq!((v.words.found, v.words.total), (2, 3));
    }

    #[test]
    fn word_relation_edges() {
        let (dir, lex) = testdata::lexicon();
        let out = dir.path().join("out");
        let summary = BackwardExtractor::new(&lex, &out, "eng").unwrap().run().unwrap();
        let folder = out.join("eng");

        let hypernym = lines(&folder.join("hypernym.txt"));
        assert_eq!(hypernym.len(), 10);
        assert_eq!(&hypernym[..2], &["9 5", "9 8"]);

        assert_eq!(
            lines(&folder.join("synonym.txt")),
            vec!["5 8", "8 5", "9 12", "9 13", "11 17", "12 9", "12 13", "13 9", "13 12", "17 11"]
        );
        assert_eq!(lines(&folder.join("verbGroup.txt")), vec!["18 19", "19 18"]);
        assert_eq!(lines(&folder.join("antonym.txt")), vec!["2 3", "3 2"]);
        assert!(lines(&folder.join("similar.txt")).is_empty());

        let stems: Vec<&str> = summary.relations.iter().map(|r| r.relation.as_str()).collect();
        assert_eq!(stems, vec!["hypernym", "similar", "synonym", "verbGroup", "antonym"]);
        assert_eq!(summary.relations[4].targets.get("a"), Some(&2));
    }

    #[test]
    fn unsupported_language() {
        let (dir, lex) = testdata::lexicon();
        let err = BackwardExtractor::new(&lex, dir.path(), "xxx").err().unwrap();
        assert!(matches!(err, DomainError::UnsupportedLanguage(_)));
    }
}
