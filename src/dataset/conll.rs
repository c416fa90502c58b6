use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::error;
use std::fmt;
use std::io as std_io;
use std::ops::Deref;
use std::str::FromStr;

use io as mod_io;
use lang::Tokenized;
use syntax::order;
use syntax::{Dependency, Relation};
use trees::{ParentTable, Tree};

static CONLL_FIELD_DELIMITER: &'static str = "\t";
static CONLL_FEATS_DELIMITER: &'static str = "|";
static CONLL_FEAT_ASSIGN: &'static str = "=";
static CONLL_EMPTY_FIELD: &'static str = "_";
const CONLL_NUM_FIELDS: usize = 10;

pub static ROOT_RELATION: &'static str = "root";
pub static DEFAULT_RELATION: &'static str = "dep";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidFeature(String),
    InvalidField { column: usize, value: String },
    FieldCount(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidFeature(ref s) => write!(f, "invalid feature `{}`", s),
            Error::InvalidField { column, ref value } => {
                write!(f, "invalid value `{}` in column {}", value, column)
            }
            Error::FieldCount(n) => write!(
                f,
                "expected {} fields but found {}",
                CONLL_NUM_FIELDS,
                n
            ),
        }
    }
}

impl error::Error for Error {}

/// Morphological features of one token, e.g. `Case=Nom|Number=Sing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    map: BTreeMap<String, String>,
}

impl Features {
    pub fn new() -> Self {
        Features::default()
    }

    /// `_` and the empty string give no features.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut features = Features::new();
        let s = s.trim();
        if s.is_empty() || s == CONLL_EMPTY_FIELD {
            return Ok(features);
        }
        for pair in s.split(CONLL_FEATS_DELIMITER) {
            let mut kv = pair.splitn(2, CONLL_FEAT_ASSIGN);
            match (kv.next(), kv.next()) {
                (Some(k), Some(v)) if !k.is_empty() => {
                    features.insert(k, v);
                }
                _ => return Err(Error::InvalidFeature(pair.to_string())),
            }
        }
        Ok(features)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<String, String> {
        self.map.iter()
    }

    /// Keys ordered case-insensitively; exact text breaks ties.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.map.keys().map(|k| k.as_str()).collect();
        keys.sort_by(|a, b| compare_keys(a, b));
        keys
    }
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.map.is_empty() {
            return f.write_str(CONLL_EMPTY_FIELD);
        }
        for (i, key) in self.sorted_keys().into_iter().enumerate() {
            if i > 0 {
                f.write_str(CONLL_FEATS_DELIMITER)?;
            }
            write!(f, "{}{}{}", key, CONLL_FEAT_ASSIGN, self.map[key])?;
        }
        Ok(())
    }
}

impl FromStr for Features {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Features::parse(s)
    }
}

/// One row of a CoNLL-U sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    id: usize,
    form: Cow<'a, str>,
    lemma: Option<Cow<'a, str>>,
    upos: Option<Cow<'a, str>>,
    xpos: Option<Cow<'a, str>>,
    feats: Features,
    head: Option<usize>,
    deprel: Option<Cow<'a, str>>,
    deps: Option<Cow<'a, str>>,
    misc: Option<Cow<'a, str>>,
}

impl<'a> Token<'a> {
    pub fn new<S: Into<Cow<'a, str>>>(id: usize, form: S) -> Self {
        Token {
            id: id,
            form: form.into(),
            lemma: None,
            upos: None,
            xpos: None,
            feats: Features::new(),
            head: None,
            deprel: None,
            deps: None,
            misc: None,
        }
    }

    pub fn with_lemma<S: Into<Cow<'a, str>>>(mut self, lemma: S) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn with_upos<S: Into<Cow<'a, str>>>(mut self, upos: S) -> Self {
        self.upos = Some(upos.into());
        self
    }

    pub fn with_xpos<S: Into<Cow<'a, str>>>(mut self, xpos: S) -> Self {
        self.xpos = Some(xpos.into());
        self
    }

    pub fn with_feats(mut self, feats: Features) -> Self {
        self.feats = feats;
        self
    }

    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    pub fn with_deprel<S: Into<Cow<'a, str>>>(mut self, deprel: S) -> Self {
        self.deprel = Some(deprel.into());
        self
    }

    pub fn upos(&self) -> Option<&str> {
        self.upos.as_ref().map(|x| x.deref())
    }

    pub fn xpos(&self) -> Option<&str> {
        self.xpos.as_ref().map(|x| x.deref())
    }

    pub fn feats(&self) -> &Features {
        &self.feats
    }

    pub fn deps(&self) -> Option<&str> {
        self.deps.as_ref().map(|x| x.deref())
    }

    pub fn misc(&self) -> Option<&str> {
        self.misc.as_ref().map(|x| x.deref())
    }

    pub fn into_owned(self) -> Token<'static> {
        fn own(s: Option<Cow<str>>) -> Option<Cow<'static, str>> {
            s.map(|s| Cow::Owned(s.into_owned()))
        }
        Token {
            id: self.id,
            form: Cow::Owned(self.form.into_owned()),
            lemma: own(self.lemma),
            upos: own(self.upos),
            xpos: own(self.xpos),
            feats: self.feats,
            head: self.head,
            deprel: own(self.deprel),
            deps: own(self.deps),
            misc: own(self.misc),
        }
    }
}

impl<'a> Tokenized for Token<'a> {
    fn id(&self) -> usize {
        self.id
    }

    fn form(&self) -> &str {
        &self.form
    }

    fn lemma(&self) -> Option<&str> {
        self.lemma.as_ref().map(|x| x.deref())
    }

    fn postag(&self) -> Option<&str> {
        self.xpos.as_ref().map(|x| x.deref())
    }

    fn head(&self) -> Option<usize> {
        self.head
    }

    fn deprel(&self) -> Option<&str> {
        self.deprel.as_ref().map(|x| x.deref())
    }
}

#[inline]
fn write_optional_field<S: Deref<Target = str>>(
    f: &mut fmt::Formatter,
    field: &Option<S>,
) -> fmt::Result {
    match *field {
        Some(ref s) => write!(f, "{}{}", CONLL_FIELD_DELIMITER, &**s),
        None => write!(f, "{}{}", CONLL_FIELD_DELIMITER, CONLL_EMPTY_FIELD),
    }
}

/// The tab-separated row, without a line terminator.
impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.id, CONLL_FIELD_DELIMITER, self.form)?;
        write_optional_field(f, &self.lemma)?;
        write_optional_field(f, &self.upos)?;
        write_optional_field(f, &self.xpos)?;
        write!(f, "{}{}", CONLL_FIELD_DELIMITER, self.feats)?;
        write_optional_field(f, &self.head.map(|h| h.to_string()))?;
        write_optional_field(f, &self.deprel)?;
        write_optional_field(f, &self.deps)?;
        write_optional_field(f, &self.misc)
    }
}

#[inline]
fn parse_conll_required_usize_field(column: usize, field: &str) -> Result<usize, Error> {
    field.parse::<usize>().map_err(|_| Error::InvalidField {
        column: column,
        value: field.to_string(),
    })
}

#[inline]
fn parse_conll_optional_usize_field(column: usize, field: &str) -> Result<Option<usize>, Error> {
    if field == CONLL_EMPTY_FIELD {
        Ok(None)
    } else {
        parse_conll_required_usize_field(column, field).map(Some)
    }
}

#[inline]
fn parse_conll_optional_str_field<'a>(field: &str) -> Option<Cow<'a, str>> {
    if field == CONLL_EMPTY_FIELD {
        None
    } else {
        Some(Cow::Owned(field.to_string()))
    }
}

impl<'a> mod_io::FromLine for Token<'a> {
    type Err = Error;

    fn from_line(line: &str) -> Result<Token<'a>, Self::Err> {
        let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        let cols: Vec<&str> = line.split(CONLL_FIELD_DELIMITER).collect();
        if cols.len() != CONLL_NUM_FIELDS {
            return Err(Error::FieldCount(cols.len()));
        }
        Ok(Token {
            id: parse_conll_required_usize_field(1, cols[0])?,
            form: Cow::Owned(cols[1].to_string()),
            lemma: parse_conll_optional_str_field(cols[2]),
            upos: parse_conll_optional_str_field(cols[3]),
            xpos: parse_conll_optional_str_field(cols[4]),
            feats: Features::parse(cols[5])?,
            head: parse_conll_optional_usize_field(7, cols[6])?,
            deprel: parse_conll_optional_str_field(cols[7]),
            deps: parse_conll_optional_str_field(cols[8]),
            misc: parse_conll_optional_str_field(cols[9]),
        })
    }
}

/// Rows for the words of `tree`, one per leaf in yield order.
///
/// Heads come from `dependencies`; the relation column holds the name of a
/// [`Relation::Named`] edge, `root` for the edge from the boundary symbol
/// and `dep` otherwise. Words without an edge get `_` in both columns.
pub fn to_tokens<'a, 'd, I>(tree: &'a Tree, dependencies: I) -> Vec<Token<'a>>
where
    I: IntoIterator<Item = &'d Dependency>,
{
    let ordered = order::order(dependencies);
    let num_words = tree.yield_len();
    let heads = order::heads(&ordered, num_words);
    let mut relations: Vec<Option<&Dependency>> = vec![None; num_words + 1];
    for dependency in &ordered {
        if let Some(i) = dependency.dependent_index() {
            if i >= 1 && i <= num_words && relations[i].is_none() {
                relations[i] = Some(dependency);
            }
        }
    }

    let table = ParentTable::new(tree);
    let mut tokens = Vec::with_capacity(num_words);
    let mut position = 0;
    for (id, node) in table.iter() {
        if !node.is_leaf() {
            continue;
        }
        position += 1;
        let index = node.label().index().unwrap_or(position);
        let mut token = Token::new(index, node.value());
        if let Some(parent) = table.parent_node(id) {
            if parent.is_preterminal() {
                token = token.with_xpos(parent.value());
            }
        }
        if index <= num_words {
            if let Some(head) = heads[index] {
                token = token.with_head(head);
            }
            if let Some(dependency) = relations[index] {
                let deprel = match *dependency.relation() {
                    Relation::Named(ref name) => name.to_string(),
                    _ if dependency.governor_index() == Some(0) => ROOT_RELATION.to_string(),
                    _ => DEFAULT_RELATION.to_string(),
                };
                token = token.with_deprel(deprel);
            }
        }
        tokens.push(token);
    }
    tokens
}

/// Writes one sentence followed by the blank separator line.
pub fn write_sentence<W: std_io::Write>(writer: &mut W, tokens: &[Token]) -> std_io::Result<()> {
    for token in tokens {
        writeln!(writer, "{}", token)?;
    }
    writeln!(writer)
}

/// Reads up to `num` blank-line separated sentences; `#` comment lines are
/// skipped.
pub fn read_upto<R: std_io::BufRead>(
    reader: &mut R,
    num: usize,
    buf: &mut Vec<Vec<Token<'static>>>,
) -> std_io::Result<usize> {
    let mut count = 0;
    let mut line = String::new();
    let mut tokens = vec![];
    while count < num {
        match reader.read_line(&mut line) {
            Ok(0) => {
                if !tokens.is_empty() {
                    buf.push(tokens);
                    count += 1;
                }
                break;
            }
            Ok(_) => {
                let line_trimmed = line.trim();
                if line_trimmed.is_empty() {
                    if !tokens.is_empty() {
                        buf.push(tokens);
                        count += 1;
                    }
                    tokens = vec![];
                } else if !line_trimmed.starts_with('#') {
                    let token = <Token as mod_io::FromLine>::from_line(line_trimmed)
                        .map_err(|e| std_io::Error::new(std_io::ErrorKind::InvalidData, e))?;
                    tokens.push(token);
                }
            }
            Err(ref e) if e.kind() == std_io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
        line.clear();
    }
    Ok(count)
}

pub type Reader<R> = mod_io::Reader<R, Vec<Token<'static>>>;

impl<R: std_io::BufRead> mod_io::Read for Reader<R> {
    type Item = Vec<Token<'static>>;

    fn read_upto(&mut self, num: usize, buf: &mut Vec<Self::Item>) -> std_io::Result<usize> {
        read_upto(self.inner_mut(), num, buf)
    }
}
