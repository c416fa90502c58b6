use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use lang::{Label, Symbol};

/// Side of the head on which a modifier attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// Tree configuration that licensed the edge.
    Structural {
        parent: Symbol,
        head: Symbol,
        modifier: Symbol,
        direction: Direction,
    },
    /// A grammatical relation name assigned by a collaborator.
    Named(Symbol),
}

impl Relation {
    pub fn structural<S1, S2, S3>(parent: S1, head: S2, modifier: S3, direction: Direction) -> Self
    where
        S1: Into<Symbol>,
        S2: Into<Symbol>,
        S3: Into<Symbol>,
    {
        Relation::Structural {
            parent: parent.into(),
            head: head.into(),
            modifier: modifier.into(),
            direction: direction,
        }
    }

    pub fn named<S: Into<Symbol>>(name: S) -> Self {
        Relation::Named(name.into())
    }

    pub fn direction(&self) -> Option<Direction> {
        match *self {
            Relation::Structural { direction, .. } => Some(direction),
            Relation::Named(_) => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Relation::Structural {
                ref parent,
                ref head,
                ref modifier,
                direction,
            } => write!(f, "{}/{}/{}/{}", parent, head, modifier, direction),
            Relation::Named(ref name) => write!(f, "{}", name),
        }
    }
}

/// A bilexical edge between two words.
///
/// Two dependencies are equal when their governor and dependent positions
/// match; label text and relation are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    governor: Label,
    dependent: Label,
    relation: Relation,
    #[serde(default)]
    extra: bool,
}

impl Dependency {
    pub fn new(governor: Label, dependent: Label, relation: Relation) -> Self {
        Dependency {
            governor: governor,
            dependent: dependent,
            relation: relation,
            extra: false,
        }
    }

    /// Marks an edge added on top of the tree-derived set.
    pub fn extra(mut self) -> Self {
        self.extra = true;
        self
    }

    #[inline]
    pub fn governor(&self) -> &Label {
        &self.governor
    }

    #[inline]
    pub fn dependent(&self) -> &Label {
        &self.dependent
    }

    #[inline]
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    #[inline]
    pub fn is_extra(&self) -> bool {
        self.extra
    }

    #[inline]
    pub fn governor_index(&self) -> Option<usize> {
        self.governor.index()
    }

    #[inline]
    pub fn dependent_index(&self) -> Option<usize> {
        self.dependent.index()
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Dependency) -> bool {
        self.governor_index() == other.governor_index()
            && self.dependent_index() == other.dependent_index()
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.governor_index().hash(state);
        self.dependent_index().hash(state);
    }
}

/// Consistent with equality: dependent position, then governor position.
impl PartialOrd for Dependency {
    fn partial_cmp(&self, other: &Dependency) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dependency {
    fn cmp(&self, other: &Dependency) -> Ordering {
        self.dependent_index()
            .cmp(&other.dependent_index())
            .then_with(|| self.governor_index().cmp(&other.governor_index()))
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({}, {})", self.relation, self.governor, self.dependent)
    }
}
