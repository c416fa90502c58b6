/// Characters that introduce an annotation after the basic category.
pub static ANNOTATION_CHARS: [char; 3] = ['-', '=', '|'];

/// Penn Treebank punctuation tags.
pub static PUNCTUATION_TAGS: [&'static str; 7] = ["''", "``", "-LRB-", "-RRB-", ".", ":", ","];

#[inline]
fn is_annotation_char(ch: char) -> bool {
    ANNOTATION_CHARS.contains(&ch)
}

/// Byte offset where the basic category of `category` ends.
///
/// An annotation character at position 0 does not cut the category; it opens
/// a span closed by the same character, so `-NONE-`, `-LRB-` and `-` are kept
/// whole while `-NONE--1` becomes `-NONE-`. The closing character needs
/// at least one character before it, so `--PU` becomes `-`.
pub fn post_basic_category_index(category: &str) -> usize {
    let mut opened: Option<char> = None;
    for (i, ch) in category.char_indices() {
        if !is_annotation_char(ch) {
            continue;
        }
        if i == 0 {
            opened = Some(ch);
        } else if i > 1 && opened == Some(ch) {
            opened = None;
        } else {
            return i;
        }
    }
    category.len()
}

/// Strips functional tags and coindexation, e.g. `NP-SBJ-1` → `NP`.
pub fn basic_category(category: &str) -> &str {
    &category[..post_basic_category_index(category)]
}

/// Annotation segments following the basic category, e.g. `NP-SBJ=2` →
/// `["SBJ", "2"]`.
pub fn functional_tags(category: &str) -> Vec<&str> {
    let rest = &category[post_basic_category_index(category)..];
    rest.split(|ch: char| is_annotation_char(ch))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Basic category plus the first non-numeric functional tag, e.g.
/// `NP-SBJ-1` → `NP-SBJ`, `PP-LOC=2` → `PP-LOC`.
pub fn category_and_function(category: &str) -> String {
    let basic = basic_category(category);
    match functional_tags(category)
        .into_iter()
        .find(|tag| !tag.chars().all(|ch| ch.is_ascii_digit()))
    {
        Some(tag) => format!("{}-{}", basic, tag),
        None => basic.to_string(),
    }
}

pub fn is_punctuation_tag(tag: &str) -> bool {
    PUNCTUATION_TAGS.iter().any(|&t| t == tag)
}
