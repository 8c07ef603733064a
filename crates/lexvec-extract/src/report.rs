//! Extraction summary: coverage per part of speech and edge counts per
//! relation, written as `summary.json` and logged.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use lexvec_core::{Pos, Result};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// `found` of `total` entities had vector data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub found: usize,
    pub total: usize,
}

impl Coverage {
    pub fn count(&mut self, found: bool) {
        self.total += 1;
        if found {
            self.found += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosSummary {
    pub pos: String,
    pub words: Coverage,
    pub senses: Coverage,
    pub lexemes: Coverage,
}

impl PosSummary {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos: pos.to_string(),
            words: Coverage::default(),
            senses: Coverage::default(),
            lexemes: Coverage::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationSummary {
    /// Edge file stem, e.g. `hypernym`.
    pub relation: String,
    /// Edges written, both ends indexed.
    pub edges: usize,
    /// Targets found per part of speech, written or not.
    pub targets: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub direction: Direction,
    pub lang: String,
    pub resource: Option<String>,
    pub vectors: PathBuf,
    pub target: PathBuf,
    pub pos: Vec<PosSummary>,
    pub relations: Vec<RelationSummary>,
}

impl Summary {
    pub fn log(&self) {
        info!(
            "{:?} extraction of {} (WordNet {}) from {:?} into {:?}",
            self.direction,
            self.lang,
            self.resource.as_deref().unwrap_or("?"),
            self.vectors,
            self.target
        );
        for p in &self.pos {
            info!(
                "  {}: words {}/{}, senses {}/{}, lexemes {}/{}",
                p.pos,
                p.words.found,
                p.words.total,
                p.senses.found,
                p.senses.total,
                p.lexemes.found,
                p.lexemes.total
            );
        }
        for r in &self.relations {
            info!("  {}: {} edges, targets {:?}", r.relation, r.edges, r.targets);
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(out, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_counts() {
        let mut c = Coverage::default();
        c.count(true);
        c.count(false);
        c.count(true);
        assert_eq!(c, Coverage { found: 2, total: 3 });
    }

    #[test]
    fn summary_serialises() {
        let dir = tempfile::tempdir().unwrap();
        let mut pos = PosSummary::new(Pos::Noun);
        pos.words.count(true);
        let summary = Summary {
            direction: Direction::Backward,
            lang: "eng".into(),
            resource: Some("3.0".into()),
            vectors: "tables/sense_vectors".into(),
            target: dir.path().to_path_buf(),
            pos: vec![pos],
            relations: vec![RelationSummary {
                relation: "hypernym".into(),
                edges: 4,
                targets: BTreeMap::from([("n".to_string(), 5)]),
            }],
        };
        let path = dir.path().join("summary.json");
        summary.write_json(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["direction"], "backward");
        assert_eq!(json["pos"][0]["words"]["found"], 1);
        assert_eq!(json["relations"][0]["targets"]["n"], 5);
    }
}
