use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::io as std_io;

use serde_json;

use syntax::Error;
use trees::category::basic_category;
use trees::Tree;

/// Side from which children are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scan {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Match {
    /// Try each category in order; within one category the scan decides.
    Priority,
    /// Take the first child, in scan order, whose category is in the set.
    Disjunctive,
    /// Take the first child, in scan order, whose category is not in the set.
    Except,
}

/// One step of a head rule.
///
/// Serialized in the compact form used by head-rule files: a keyword
/// (`left`, `leftdis`, `leftexcept`, `right`, `rightdis`, `rightexcept`)
/// followed by categories, e.g. `["left", "VP", "S"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RuleGroup {
    scan: Scan,
    kind: Match,
    categories: Vec<String>,
}

impl RuleGroup {
    pub fn new<S: AsRef<str>>(scan: Scan, kind: Match, categories: &[S]) -> Self {
        RuleGroup {
            scan: scan,
            kind: kind,
            categories: categories.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    pub fn left<S: AsRef<str>>(categories: &[S]) -> Self {
        RuleGroup::new(Scan::Left, Match::Priority, categories)
    }

    pub fn right<S: AsRef<str>>(categories: &[S]) -> Self {
        RuleGroup::new(Scan::Right, Match::Priority, categories)
    }

    pub fn left_dis<S: AsRef<str>>(categories: &[S]) -> Self {
        RuleGroup::new(Scan::Left, Match::Disjunctive, categories)
    }

    pub fn right_dis<S: AsRef<str>>(categories: &[S]) -> Self {
        RuleGroup::new(Scan::Right, Match::Disjunctive, categories)
    }

    pub fn left_except<S: AsRef<str>>(categories: &[S]) -> Self {
        RuleGroup::new(Scan::Left, Match::Except, categories)
    }

    pub fn right_except<S: AsRef<str>>(categories: &[S]) -> Self {
        RuleGroup::new(Scan::Right, Match::Except, categories)
    }

    /// Matches the first child seen from `scan`, whatever its category.
    pub fn first(scan: Scan) -> Self {
        RuleGroup {
            scan: scan,
            kind: Match::Disjunctive,
            categories: vec![],
        }
    }

    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, Error> {
        let (keyword, categories) = match fields.split_first() {
            Some((keyword, categories)) => (keyword.as_ref(), categories),
            None => return Err(Error::InvalidRule("empty rule group".to_string())),
        };
        let (scan, kind) = match keyword {
            "left" => (Scan::Left, Match::Priority),
            "leftdis" => (Scan::Left, Match::Disjunctive),
            "leftexcept" => (Scan::Left, Match::Except),
            "right" => (Scan::Right, Match::Priority),
            "rightdis" => (Scan::Right, Match::Disjunctive),
            "rightexcept" => (Scan::Right, Match::Except),
            other => {
                return Err(Error::InvalidRule(format!(
                    "unknown rule keyword `{}`",
                    other
                )))
            }
        };
        Ok(RuleGroup::new(scan, kind, categories))
    }

    pub fn keyword(&self) -> &'static str {
        match (self.scan, self.kind) {
            (Scan::Left, Match::Priority) => "left",
            (Scan::Left, Match::Disjunctive) => "leftdis",
            (Scan::Left, Match::Except) => "leftexcept",
            (Scan::Right, Match::Priority) => "right",
            (Scan::Right, Match::Disjunctive) => "rightdis",
            (Scan::Right, Match::Except) => "rightexcept",
        }
    }

    pub fn scan(&self) -> Scan {
        self.scan
    }

    pub fn kind(&self) -> Match {
        self.kind
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn positions(&self, len: usize) -> Vec<usize> {
        match self.scan {
            Scan::Left => (0..len).collect(),
            Scan::Right => (0..len).rev().collect(),
        }
    }

    #[inline]
    fn accepts(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Index of the child selected by this group, if any.
    pub fn find(&self, children: &[Tree]) -> Option<usize> {
        self.find_among(children, |_| true)
    }

    /// Like [`RuleGroup::find`], but children rejected by `keep` are never
    /// selected. The returned index still refers to `children`.
    pub fn find_among<F>(&self, children: &[Tree], keep: F) -> Option<usize>
    where
        F: Fn(&Tree) -> bool,
    {
        let positions: Vec<usize> = self.positions(children.len())
            .into_iter()
            .filter(|&i| keep(&children[i]))
            .collect();
        if self.categories.is_empty() {
            return positions.first().cloned();
        }
        let category_at = |i: usize| basic_category(children[i].value());
        match self.kind {
            Match::Priority => {
                for candidate in &self.categories {
                    let found = positions.iter().find(|&&i| category_at(i) == candidate);
                    if let Some(&i) = found {
                        return Some(i);
                    }
                }
                None
            }
            Match::Disjunctive => positions
                .into_iter()
                .find(|&i| self.accepts(category_at(i))),
            Match::Except => positions
                .into_iter()
                .find(|&i| !self.accepts(category_at(i))),
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())?;
        for category in &self.categories {
            write!(f, " {}", category)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for RuleGroup {
    type Error = Error;

    fn try_from(fields: Vec<String>) -> Result<Self, Error> {
        RuleGroup::parse(&fields)
    }
}

impl From<RuleGroup> for Vec<String> {
    fn from(group: RuleGroup) -> Vec<String> {
        let mut fields = Vec::with_capacity(group.categories.len() + 1);
        fields.push(group.keyword().to_string());
        fields.extend(group.categories);
        fields
    }
}

fn default_groups() -> Vec<RuleGroup> {
    vec![RuleGroup::first(Scan::Left)]
}

/// Head rule table: basic category → rule groups, plus the groups tried
/// when a category has no entry or none of its groups match.
///
/// Tables are plain immutable values; share one between threads with an
/// `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadRules {
    #[serde(default = "default_groups")]
    default: Vec<RuleGroup>,
    #[serde(default)]
    rules: BTreeMap<String, Vec<RuleGroup>>,
}

impl Default for HeadRules {
    fn default() -> Self {
        HeadRules::new(default_groups())
    }
}

impl HeadRules {
    pub fn new(default: Vec<RuleGroup>) -> Self {
        HeadRules {
            default: default,
            rules: BTreeMap::new(),
        }
    }

    /// A table without any rule; only unary nodes get a head.
    pub fn empty() -> Self {
        HeadRules::new(vec![])
    }

    pub fn leftmost() -> Self {
        HeadRules::new(vec![RuleGroup::first(Scan::Left)])
    }

    pub fn rightmost() -> Self {
        HeadRules::new(vec![RuleGroup::first(Scan::Right)])
    }

    pub fn rule<S: Into<String>>(mut self, category: S, groups: Vec<RuleGroup>) -> Self {
        self.insert(category, groups);
        self
    }

    /// Reuses the groups of `from` for `category`.
    pub fn alias<S: Into<String>>(mut self, category: S, from: &str) -> Self {
        if let Some(groups) = self.rules.get(from).cloned() {
            self.insert(category, groups);
        }
        self
    }

    pub fn insert<S: Into<String>>(&mut self, category: S, groups: Vec<RuleGroup>) {
        self.rules.insert(category.into(), groups);
    }

    pub fn get(&self, category: &str) -> Option<&[RuleGroup]> {
        self.rules.get(category).map(|groups| groups.as_slice())
    }

    pub fn default_groups(&self) -> &[RuleGroup] {
        &self.default
    }

    pub fn categories(&self) -> Vec<&str> {
        self.rules.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Json)
    }

    pub fn from_json<R: std_io::Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::Json)
    }
}
