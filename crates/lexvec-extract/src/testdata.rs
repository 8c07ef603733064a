//! Vector tables over the miniature WordNet for extractor tests.

use lexvec_core::MeasureParams;
use lexvec_engine::SemanticLexicon;
use lexvec_store::write_vector_table;
use lexvec_wordnet::{fixture, WordNet};

pub fn lexicon() -> (tempfile::TempDir, SemanticLexicon) {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("dict");
    let root = dir.path().join("tables");
    fixture::write_wordnet(&dict).unwrap();
    fixture::write_omw(&dict).unwrap();

    let unit = |i: usize| {
        let mut v = vec![0.0; 3];
        v[i % 3] = 1.0;
        v
    };

    write_vector_table(
        &root.join("sense_vectors"),
        ["hot.a.01", "animal.n.01", "dog.n.01", "cat.n.01", "run.v.01", "sprint.v.01", "cold.a.01"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, unit(i))),
    )
    .unwrap();
    write_vector_table(
        &root.join("eng").join("word_vectors"),
        vec![
            ("dog", vec![1.0, 0.0, 0.0]),
            ("hot", unit(1)),
            ("cold", unit(2)),
            ("beast", unit(0)),
            ("cat", unit(1)),
            ("run", unit(2)),
            ("sprint", unit(0)),
        ],
    )
    .unwrap();
    write_vector_table(
        &root.join("jpn").join("word_vectors"),
        vec![("犬", vec![0.5, 0.5, 0.0])],
    )
    .unwrap();

    let wordnet = WordNet::open(&dict).unwrap().with_omw(&dict).unwrap();
    let params = MeasureParams {
        dimensions: 3,
        ..MeasureParams::default()
    };
    (dir, SemanticLexicon::with_params(wordnet, root, params))
}
