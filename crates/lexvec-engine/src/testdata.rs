//! Tables over the miniature WordNet, three dimensions wide.

use std::fs;
use std::path::Path;

use lexvec_core::MeasureParams;
use lexvec_store::write_vector_table;
use lexvec_wordnet::{fixture, WordNet};

use crate::SemanticLexicon;

fn write_sorted(path: &Path, header: &str, mut lines: Vec<&str>) {
    lines.sort();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("{}\n{}\n", header, lines.join("\n"))).unwrap();
}

pub fn lexicon() -> (tempfile::TempDir, SemanticLexicon) {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("dict");
    let root = dir.path().join("tables");
    fixture::write_wordnet(&dict).unwrap();
    fixture::write_omw(&dict).unwrap();

    write_vector_table(
        &root.join("sense_vectors"),
        vec![("dog.n.01", vec![1.0, 0.0, 0.0]), ("cat.n.01", vec![0.0, 1.0, 0.0])],
    )
    .unwrap();
    write_vector_table(
        &root.join("eng").join("word_vectors"),
        vec![
            ("dog", vec![1.0, 0.0, 0.0]),
            ("domestic_dog", vec![1.0, 0.0, 0.0]),
            ("cat", vec![0.6, 0.8, 0.0]),
            ("island", vec![0.0, 1.0, 0.0]),
            ("hot", vec![0.0, 0.0, 1.0]),
        ],
    )
    .unwrap();
    write_vector_table(
        &root.join("eng").join("word_form_vectors"),
        vec![
            ("dog.n.01:dog", vec![1.0, 0.0, 0.0]),
            ("frump.n.01:dog", vec![0.0, 1.0, 0.0]),
            ("cat.n.01:cat", vec![0.0, 1.0, 0.0]),
            ("island.n.01:island", vec![0.0, 0.0, 1.0]),
        ],
    )
    .unwrap();
    write_vector_table(
        &root.join("topic_vectors"),
        vec![("general", vec![1.0, 1.0, 0.0]), ("music", vec![1.0, 0.0, 0.0])],
    )
    .unwrap();

    let freq = root.join("eng").join("freq");
    write_sorted(
        &freq.join("freq.general.txt"),
        "100",
        vec!["dog.n.01:dog 30", "frump.n.01:dog 10", "cat.n.01:cat 20"],
    );
    // Same proportions as general, counts doubled.
    write_sorted(
        &freq.join("freq.music.txt"),
        "100",
        vec!["dog.n.01:dog 60", "frump.n.01:dog 20", "cat.n.01:cat 40"],
    );
    write_sorted(&freq.join("freq.automotive.txt"), "100", vec!["island.n.01:island 0"]);

    fs::write(root.join("jpn.definition.txt"), "00000300-n|犬|飼い犬\n00000500-n|犬|地味な女\n").unwrap();

    let wordnet = WordNet::open(&dict).unwrap().with_omw(&dict).unwrap();
    let params = MeasureParams {
        dimensions: 3,
        ..MeasureParams::default()
    };
    (dir, SemanticLexicon::with_params(wordnet, root, params))
}
