use std::fmt;

use lang::{Label, Symbol};

/// An n-ary labeled tree. A node owns its children; a node without children
/// is a leaf (terminal).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    label: Label,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Tree>,
}

impl Tree {
    pub fn new(label: Label, children: Vec<Tree>) -> Self {
        Tree {
            label: label,
            children: children,
        }
    }

    pub fn leaf<S: Into<Symbol>>(value: S) -> Self {
        Tree::new(Label::new(value), vec![])
    }

    pub fn node<S: Into<Symbol>>(value: S, children: Vec<Tree>) -> Self {
        Tree::new(Label::new(value), children)
    }

    /// Builds a `(tag word)` pair.
    pub fn preterminal<S1: Into<Symbol>, S2: Into<Symbol>>(tag: S1, word: S2) -> Self {
        Tree::node(tag, vec![Tree::leaf(word)])
    }

    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[inline]
    pub fn value(&self) -> &str {
        self.label.value()
    }

    #[inline]
    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Tree> {
        self.children.get(index)
    }

    pub fn first_child(&self) -> Option<&Tree> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&Tree> {
        self.children.last()
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn into_parts(self) -> (Label, Vec<Tree>) {
        (self.label, self.children)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// A node whose only child is a leaf.
    pub fn is_preterminal(&self) -> bool {
        self.children.len() == 1 && self.children[0].is_leaf()
    }

    pub fn is_phrasal(&self) -> bool {
        !self.is_leaf() && !self.is_preterminal()
    }

    pub fn preorder(&self) -> Preorder {
        Preorder { stack: vec![self] }
    }

    /// The leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&Tree> {
        self.preorder().filter(|node| node.is_leaf()).collect()
    }

    pub fn preterminals(&self) -> Vec<&Tree> {
        self.preorder().filter(|node| node.is_preterminal()).collect()
    }

    pub fn yield_values(&self) -> Vec<&str> {
        self.preorder()
            .filter(|node| node.is_leaf())
            .map(|node| node.value())
            .collect()
    }

    pub fn yield_len(&self) -> usize {
        self.preorder().filter(|node| node.is_leaf()).count()
    }

    /// Number of nodes, leaves included.
    pub fn size(&self) -> usize {
        self.preorder().count()
    }

    /// Length of the longest path down to a leaf; a leaf has height 0.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns a copy whose leaves carry consecutive positions from `start`.
    pub fn index_leaves(&self, start: usize) -> Tree {
        let mut next = start;
        self.map_labels(&mut |node: &Tree| {
            if node.is_leaf() {
                let label = node.label().clone().indexed(next);
                next += 1;
                label
            } else {
                node.label().clone()
            }
        })
    }

    /// Structural copy with every label replaced by `f(node)`, visited in
    /// preorder.
    pub fn map_labels<F>(&self, f: &mut F) -> Tree
    where
        F: FnMut(&Tree) -> Label,
    {
        let label = f(self);
        let children = self.children.iter().map(|child| child.map_labels(f)).collect();
        Tree::new(label, children)
    }

    /// Copy of this tree wrapped in a new unary node labeled `value`.
    pub fn wrap<S: Into<Symbol>>(&self, value: S) -> Tree {
        Tree::node(value, vec![self.clone()])
    }
}

/// Penn-bracket rendering, e.g. `(S (NP (NNP John)) (VP (VBZ runs)))`.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.value());
        }
        write!(f, "({}", self.value())?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Tree;

    fn next(&mut self) -> Option<&'a Tree> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
