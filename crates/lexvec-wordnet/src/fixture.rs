//! A miniature WordNet for tests.
//!
//! ```text
//! entity ── animal ─┬─ dog          frump (also "dog") ── entity
//!                   └─ cat          car ── entity
//! island            hot ! cold      hot & blistering     run $ sprint, run @ travel
//! ```

use std::fs;
use std::io;
use std::path::Path;

const HEADER: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n  2 WordNet 3.0 Copyright 2006 by Princeton University.  All rights reserved.\n";

const DATA_NOUN: &str = "\
00000100 03 n 01 entity 0 000 | that which is perceived to exist
00000200 05 n 02 animal 0 beast 0 001 @ 00000100 n 0000 | a living organism
00000300 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 001 @ 00000200 n 0000 | a domesticated canid; \"the dog barked all night\"
00000400 05 n 02 cat 0 true_cat 0 001 @ 00000200 n 0000 | feline mammal
00000500 18 n 02 frump 0 dog 0 001 @ 00000100 n 0000 | a dull unattractive unpleasant girl or woman
00000600 06 n 03 car 0 auto 0 automobile 0 001 @ 00000100 n 0000 | a motor vehicle; \"he needs a car to get to work\"
00000700 09 n 01 island 0 000 | a land mass surrounded by water
";

const INDEX_NOUN: &str = "\
animal n 1 1 @ 1 0 00000200
auto n 1 1 @ 1 0 00000600
automobile n 1 1 @ 1 0 00000600
beast n 1 1 @ 1 0 00000200
canis_familiaris n 1 1 @ 1 0 00000300
car n 1 1 @ 1 0 00000600
cat n 1 1 @ 1 0 00000400
dog n 2 1 @ 2 1 00000300 00000500
domestic_dog n 1 1 @ 1 0 00000300
entity n 1 0 1 0 00000100
frump n 1 1 @ 1 0 00000500
island n 1 0 1 0 00000700
true_cat n 1 1 @ 1 0 00000400
";

const DATA_ADJ: &str = "\
00001000 00 a 01 hot 0 002 ! 00001100 a 0101 & 00001200 s 0000 | used of physical heat; \"a hot stove\"
00001100 00 a 01 cold 0 001 ! 00001000 a 0101 | having a low temperature
00001200 00 s 02 blistering 0 red-hot(p) 0 001 & 00001000 a 0000 | hot enough to raise blisters
";

const INDEX_ADJ: &str = "\
blistering a 1 1 & 1 0 00001200
cold a 1 1 ! 1 0 00001100
hot a 1 2 ! & 1 0 00001000
red-hot a 1 1 & 1 0 00001200
";

const DATA_VERB: &str = "\
00002000 38 v 01 run 0 002 $ 00002100 v 0000 @ 00002200 v 0000 01 + 02 00 | move fast by using the feet
00002100 38 v 01 sprint 0 001 $ 00002000 v 0000 01 + 02 00 | run very fast
00002200 38 v 01 travel 0 000 01 + 01 00 | change location
";

const INDEX_VERB: &str = "\
run v 1 2 $ @ 1 0 00002000
sprint v 1 1 $ 1 0 00002100
travel v 1 0 1 0 00002200
";

const OMW_JPN: &str = "\
# Japanese Wordnet\tjpn\thttp://compling.hss.ntu.edu.sg/wnja\tCC BY
00000300-n\tjpn:lemma\t犬
00000300-n\tjpn:lemma\tドッグ
00000500-n\tjpn:lemma\t犬
00000400-n\tjpn:lemma\t猫
00000300-n\tjpn:def\t0\t飼い犬
";

/// Write `data.*` and `index.*` for nouns, verbs and adjectives into `dir`.
pub fn write_wordnet(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for (suffix, data, index) in [
        ("noun", DATA_NOUN, INDEX_NOUN),
        ("adj", DATA_ADJ, INDEX_ADJ),
        ("verb", DATA_VERB, INDEX_VERB),
    ] {
        fs::write(dir.join(format!("data.{}", suffix)), format!("{}{}", HEADER, data))?;
        fs::write(dir.join(format!("index.{}", suffix)), format!("{}{}", HEADER, index))?;
    }
    Ok(())
}

/// Write `wn-data-jpn.tab` into `dir`.
pub fn write_omw(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("wn-data-jpn.tab"), OMW_JPN)
}
