//! Line parsers for WordNet `data.*` / `index.*` files and OMW tab files.
//!
//! ```text
//! data:  offset lex_filenum ss_type w_cnt (word lex_id)* p_cnt (sym offset pos src/tgt)* [frames] | gloss
//! index: lemma pos synset_cnt p_cnt (sym)* sense_cnt tagsense_cnt (offset)*
//! omw:   offset-pos <TAB> lang:lemma <TAB> written form
//! ```

use lexvec_core::Pos;

#[derive(Debug, Clone, PartialEq)]
pub struct RawPointer {
    pub symbol: String,
    pub offset: u32,
    pub pos: Pos,
    /// 1-based word number in the source synset, 0 for semantic pointers.
    pub source: u16,
    /// 1-based word number in the target synset, 0 for semantic pointers.
    pub target: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawSynset {
    pub offset: u32,
    pub pos: Pos,
    pub lemmas: Vec<String>,
    pub pointers: Vec<RawPointer>,
    pub definition: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub lemma: String,
    pub pos: Pos,
    pub offsets: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OmwEntry {
    pub offset: u32,
    pub pos: Pos,
    pub lemma: String,
}

/// Licence lines start with whitespace.
pub fn is_header(line: &str) -> bool {
    line.starts_with(' ') || line.trim().is_empty()
}

/// `WordNet 3.0 Copyright ...` → `3.0`.
pub fn version_from_header(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "WordNet" {
            if let Some(v) = tokens.next() {
                if v.starts_with(|c: char| c.is_ascii_digit()) {
                    return Some(v.to_string());
                }
            }
        }
    }
    None
}

fn pos_of(token: &str) -> Result<Pos, String> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Pos::from_tag(c).ok_or_else(|| format!("bad pos {:?}", token)),
        _ => Err(format!("bad pos {:?}", token)),
    }
}

fn next<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str, String> {
    tokens.next().ok_or_else(|| format!("missing {}", what))
}

fn decimal<T: std::str::FromStr>(token: &str, what: &str) -> Result<T, String> {
    token.parse().map_err(|_| format!("bad {} {:?}", what, token))
}

fn hex(token: &str, what: &str) -> Result<u16, String> {
    u16::from_str_radix(token, 16).map_err(|_| format!("bad {} {:?}", what, token))
}

/// Adjective lemmas may carry a syntactic marker: `red-hot(p)`.
fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(i) if word.ends_with(')') => &word[..i],
        _ => word,
    }
}

pub fn parse_data_line(line: &str) -> Result<RawSynset, String> {
    let (fields, gloss) = match line.split_once('|') {
        Some((f, g)) => (f, g.trim()),
        None => (line, ""),
    };
    let mut tokens = fields.split_whitespace();

    let offset = decimal(next(&mut tokens, "offset")?, "offset")?;
    next(&mut tokens, "lex_filenum")?;
    let pos = pos_of(next(&mut tokens, "ss_type")?)?;

    let w_cnt = hex(next(&mut tokens, "w_cnt")?, "w_cnt")?;
    let mut lemmas = Vec::with_capacity(w_cnt as usize);
    for _ in 0..w_cnt {
        lemmas.push(strip_marker(next(&mut tokens, "word")?).to_string());
        next(&mut tokens, "lex_id")?;
    }

    let p_cnt: usize = decimal(next(&mut tokens, "p_cnt")?, "p_cnt")?;
    let mut pointers = Vec::with_capacity(p_cnt);
    for _ in 0..p_cnt {
        let symbol = next(&mut tokens, "pointer symbol")?.to_string();
        let target_offset = decimal(next(&mut tokens, "pointer offset")?, "pointer offset")?;
        let target_pos = pos_of(next(&mut tokens, "pointer pos")?)?;
        let st = next(&mut tokens, "source/target")?;
        if st.len() != 4 {
            return Err(format!("bad source/target {:?}", st));
        }
        pointers.push(RawPointer {
            symbol,
            offset: target_offset,
            pos: target_pos,
            source: hex(&st[..2], "source")?,
            target: hex(&st[2..], "target")?,
        });
    }

    let (definition, examples) = split_gloss(gloss);
    Ok(RawSynset {
        offset,
        pos,
        lemmas,
        pointers,
        definition,
        examples,
    })
}

/// Quoted gloss parts are examples; everything else is the definition.
pub fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let mut definitions = Vec::new();
    let mut examples = Vec::new();
    for part in gloss.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part.starts_with('"') {
            examples.push(part.trim_matches('"').to_string());
        } else {
            definitions.push(part);
        }
    }
    (definitions.join("; "), examples)
}

pub fn parse_index_line(line: &str) -> Result<IndexEntry, String> {
    let mut tokens = line.split_whitespace();
    let lemma = next(&mut tokens, "lemma")?.to_string();
    let pos = pos_of(next(&mut tokens, "pos")?)?;
    let synset_cnt: usize = decimal(next(&mut tokens, "synset_cnt")?, "synset_cnt")?;
    let p_cnt: usize = decimal(next(&mut tokens, "p_cnt")?, "p_cnt")?;
    for _ in 0..p_cnt {
        next(&mut tokens, "pointer symbol")?;
    }
    next(&mut tokens, "sense_cnt")?;
    next(&mut tokens, "tagsense_cnt")?;

    let offsets = (0..synset_cnt)
        .map(|_| next(&mut tokens, "synset offset").and_then(|t| decimal(t, "synset offset")))
        .collect::<Result<Vec<u32>, String>>()?;
    Ok(IndexEntry { lemma, pos, offsets })
}

/// `None` for comments and non-lemma rows (definitions, examples).
pub fn parse_omw_line(line: &str, lang: &str) -> Result<Option<OmwEntry>, String> {
    if line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }
    let mut fields = line.split('\t');
    let key = next(&mut fields, "offset-pos")?;
    let kind = next(&mut fields, "type")?;
    if kind != format!("{}:lemma", lang) {
        return Ok(None);
    }
    let value = next(&mut fields, "lemma")?.trim();

    let (offset, pos) = key
        .split_once('-')
        .ok_or_else(|| format!("bad offset-pos {:?}", key))?;
    Ok(Some(OmwEntry {
        offset: decimal(offset, "offset")?,
        pos: pos_of(pos)?,
        lemma: value.replace(' ', "_"),
    }))
}
