use std::sync::Arc;

use slog::{Discard, Logger};

use lang::{Interner, Symbol};
use syntax::HeadFinder;
use trees::category::{basic_category, category_and_function, functional_tags, is_punctuation_tag};
use trees::Tree;

pub static EMPTY_LABEL: &'static str = "-NONE-";
pub static ROOT_LABEL: &'static str = "ROOT";
pub static TEMPORAL_TAG: &'static str = "TMP";
pub static SUBJECT_TAG: &'static str = "SBJ";
pub static GAPPED_TAG: &'static str = "G";

/// How `-TMP` marks are kept and spread down head chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    /// `-TMP` is stripped like any other functional tag.
    None,
    /// `NP-TMP` is kept and its head noun tag is marked, e.g. `NN-TMP`.
    NpHead,
    /// Any `X-TMP` is kept and every node on its head chain is marked down
    /// to the tag. In a `PP-TMP` the NP right of the preposition and its
    /// head chain are marked too.
    Percolated,
}

/// Cleanup policy applied by [`Normalizer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Share identical terminal and category strings through an [`Interner`].
    pub intern: bool,
    /// Label of empty/trace preterminals.
    pub empty_label: String,
    /// Category returned for missing labels and used by `wrap_root`.
    pub root_label: String,
    /// Editorial or disfluency labels spliced out of unary chains.
    pub splice_labels: Vec<String>,
    /// Functional tags kept on categories, e.g. `TMP` keeps `NP-TMP`.
    pub retained_functions: Vec<String>,
    /// Keep the first functional tag of every category.
    pub keep_functional_tags: bool,
    /// Delete punctuation preterminals.
    pub strip_punctuation: bool,
    /// Wrap the normalized tree in `root_label` unless it already is one.
    pub wrap_root: bool,
    pub temporal: Temporal,
    /// Relabel `S` clauses whose `NP-SBJ` is empty as `S-G`.
    pub mark_gapped_subjects: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            intern: true,
            empty_label: EMPTY_LABEL.to_string(),
            root_label: ROOT_LABEL.to_string(),
            splice_labels: vec![
                "RS".to_string(),
                "RM".to_string(),
                "IP".to_string(),
                "CODE".to_string(),
            ],
            retained_functions: vec![],
            keep_functional_tags: false,
            strip_punctuation: false,
            wrap_root: false,
            temporal: Temporal::None,
            mark_gapped_subjects: false,
        }
    }
}

/// Rewrites raw treebank trees into canonical trees.
///
/// The input is never modified; every call builds a new tree. A normalizer
/// may be shared between threads: the interner is the only shared state and
/// it is append-only. `-TMP` percolation follows the head finder, Collins'
/// rules unless another one is set.
#[derive(Debug)]
pub struct Normalizer {
    config: NormalizerConfig,
    interner: Arc<Interner>,
    head_finder: HeadFinder,
    logger: Logger,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Normalizer::with_interner(config, Arc::new(Interner::new()))
    }

    pub fn with_interner(config: NormalizerConfig, interner: Arc<Interner>) -> Self {
        Normalizer {
            config: config,
            interner: interner,
            head_finder: HeadFinder::collins(),
            logger: Logger::root(Discard, o!()),
        }
    }

    pub fn head_finder(mut self, head_finder: HeadFinder) -> Self {
        self.head_finder = head_finder;
        self
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn interner(&self) -> &Arc<Interner> {
        &self.interner
    }

    #[inline]
    fn symbol(&self, text: &str) -> Symbol {
        if self.config.intern {
            self.interner.intern(text)
        } else {
            Symbol::new(text)
        }
    }

    /// Words are kept as they are; only their storage is shared.
    pub fn normalize_terminal(&self, text: &str) -> Symbol {
        self.symbol(text)
    }

    pub fn normalize_nonterminal(&self, category: Option<&str>) -> Symbol {
        let category = match category {
            Some(category) if !category.is_empty() => category,
            _ => return self.symbol(&self.config.root_label),
        };
        if self.config.keep_functional_tags {
            return self.symbol(&category_and_function(category));
        }
        let basic = basic_category(category);
        let tags = functional_tags(category);
        let retained = if self.keeps_temporal(basic, &tags) {
            Some(TEMPORAL_TAG)
        } else if self.config.mark_gapped_subjects && basic == "S" && tags.contains(&GAPPED_TAG) {
            Some(GAPPED_TAG)
        } else {
            tags.into_iter()
                .find(|tag| self.config.retained_functions.iter().any(|r| r == tag))
        };
        match retained {
            Some(tag) => self.symbol(&format!("{}-{}", basic, tag)),
            None => self.symbol(basic),
        }
    }

    fn keeps_temporal(&self, basic: &str, tags: &[&str]) -> bool {
        if !tags.contains(&TEMPORAL_TAG) {
            return false;
        }
        match self.config.temporal {
            Temporal::None => false,
            Temporal::NpHead => basic == "NP",
            Temporal::Percolated => true,
        }
    }

    /// Relabels, prunes empty elements and splices degenerate unary chains.
    ///
    /// Returns `None` when pruning removes the whole tree.
    pub fn normalize_whole_tree(&self, tree: &Tree) -> Option<Tree> {
        let relabeled = self.relabel(tree);
        let pruned = match self.prune(relabeled) {
            Some(tree) => tree,
            None => {
                debug!(self.logger, "tree pruned away entirely"; "tree" => %tree);
                return None;
            }
        };
        let spliced = self.splice(pruned);
        let marked = match self.config.temporal {
            Temporal::None => spliced,
            temporal => self.mark_temporal(spliced, temporal),
        };
        if self.config.wrap_root && marked.value() != self.config.root_label {
            Some(marked.wrap(self.symbol(&self.config.root_label)))
        } else {
            Some(marked)
        }
    }

    fn relabel(&self, tree: &Tree) -> Tree {
        tree.map_labels(&mut |node: &Tree| {
            let label = node.label();
            if node.is_leaf() {
                return label.relabel(self.normalize_terminal(label.value()));
            }
            if label.value() == self.config.empty_label {
                return label.relabel(self.symbol(label.value()));
            }
            let category = self.normalize_nonterminal(Some(label.value()));
            if self.config.mark_gapped_subjects && category == "S" && self.has_empty_subject(node) {
                label.relabel(self.symbol(&format!("S-{}", GAPPED_TAG)))
            } else {
                label.relabel(category)
            }
        })
    }

    /// Whether a child `NP-SBJ` dominates nothing but an empty element.
    fn has_empty_subject(&self, node: &Tree) -> bool {
        node.children().iter().any(|child| {
            basic_category(child.value()) == "NP"
                && functional_tags(child.value()).contains(&SUBJECT_TAG)
                && child.num_children() == 1
                && child
                    .first_child()
                    .map_or(false, |empty| basic_category(empty.value()) == self.config.empty_label)
        })
    }

    fn is_prunable(&self, node: &Tree) -> bool {
        if !node.is_preterminal() {
            return false;
        }
        node.value() == self.config.empty_label
            || (self.config.strip_punctuation && is_punctuation_tag(node.value()))
    }

    /// Children are pruned first, so a node left over a single leaf is
    /// judged in its final shape.
    fn prune(&self, tree: Tree) -> Option<Tree> {
        if tree.is_leaf() {
            return Some(tree);
        }
        let (label, children) = tree.into_parts();
        let children: Vec<Tree> = children
            .into_iter()
            .filter_map(|child| self.prune(child))
            .collect();
        if children.is_empty() {
            return None;
        }
        let node = Tree::new(label, children);
        if self.is_prunable(&node) {
            None
        } else {
            Some(node)
        }
    }

    fn with_temporal_tag(&self, tree: Tree) -> Tree {
        if functional_tags(tree.value()).contains(&TEMPORAL_TAG) {
            return tree;
        }
        let (label, children) = tree.into_parts();
        let value = self.symbol(&format!("{}-{}", label.value(), TEMPORAL_TAG));
        Tree::new(label.relabel(value), children)
    }

    /// Head child of `tree`, stepping left over a possessive marker.
    fn temporal_head(&self, tree: &Tree) -> Option<usize> {
        match self.head_finder.determine_head(tree) {
            Ok(head) if head > 0 && basic_category(tree.children()[head].value()) == "POS" => {
                Some(head - 1)
            }
            Ok(head) => Some(head),
            Err(e) => {
                debug!(self.logger, "no head for temporal marking"; "tree" => %tree, "error" => %e);
                None
            }
        }
    }

    fn is_temporal_start(&self, tree: &Tree, temporal: Temporal) -> bool {
        if tree.is_leaf() || tree.is_preterminal() {
            return false;
        }
        functional_tags(tree.value()).contains(&TEMPORAL_TAG)
            && (temporal == Temporal::Percolated || basic_category(tree.value()) == "NP")
    }

    fn mark_temporal(&self, tree: Tree, temporal: Temporal) -> Tree {
        if tree.is_leaf() {
            return tree;
        }
        let start = self.is_temporal_start(&tree, temporal);
        let (label, children) = tree.into_parts();
        let children = children
            .into_iter()
            .map(|child| self.mark_temporal(child, temporal))
            .collect();
        let tree = Tree::new(label, children);
        if !start {
            return tree;
        }
        match temporal {
            Temporal::None => tree,
            Temporal::NpHead => self.mark_head_tag(tree),
            Temporal::Percolated => {
                let is_pp = basic_category(tree.value()) == "PP";
                let head = self.temporal_head(&tree);
                let tree = self.mark_head_chain(tree);
                match head {
                    Some(head) if is_pp => self.mark_prepositional_object(tree, head + 1),
                    _ => tree,
                }
            }
        }
    }

    /// Marks the tag at the bottom of the head chain if it is nominal.
    fn mark_head_tag(&self, tree: Tree) -> Tree {
        if tree.is_leaf() {
            return tree;
        }
        if tree.is_preterminal() {
            return if tree.value().starts_with('N') {
                self.with_temporal_tag(tree)
            } else {
                tree
            };
        }
        self.map_head_child(tree, |child| self.mark_head_tag(child))
    }

    /// Marks every node below `tree` on its head chain, tag included.
    fn mark_head_chain(&self, tree: Tree) -> Tree {
        if tree.is_preterminal() || tree.is_leaf() {
            return tree;
        }
        self.map_head_child(tree, |child| {
            if child.is_leaf() {
                return child;
            }
            let child = self.with_temporal_tag(child);
            self.mark_head_chain(child)
        })
    }

    fn mark_prepositional_object(&self, tree: Tree, position: usize) -> Tree {
        let is_np = tree
            .child(position)
            .map_or(false, |object| object.value().starts_with("NP"));
        if !is_np {
            return tree;
        }
        let (label, mut children) = tree.into_parts();
        let object = children.remove(position);
        let object = self.with_temporal_tag(object);
        children.insert(position, self.mark_head_chain(object));
        Tree::new(label, children)
    }

    fn map_head_child<F>(&self, tree: Tree, f: F) -> Tree
    where
        F: FnOnce(Tree) -> Tree,
    {
        let head = match self.temporal_head(&tree) {
            Some(head) => head,
            None => return tree,
        };
        let (label, mut children) = tree.into_parts();
        let child = children.remove(head);
        children.insert(head, f(child));
        Tree::new(label, children)
    }

    fn is_splice_label(&self, value: &str) -> bool {
        self.config.splice_labels.iter().any(|label| label == value)
    }

    /// Children are spliced first, so a node is compared with its final
    /// child.
    fn splice(&self, tree: Tree) -> Tree {
        if tree.is_leaf() {
            return tree;
        }
        let (label, children) = tree.into_parts();
        let mut children: Vec<Tree> = children
            .into_iter()
            .map(|child| self.splice(child))
            .collect();
        let spliceable = children.len() == 1
            && !children[0].is_leaf()
            && (children[0].value() == label.value() || self.is_splice_label(label.value()));
        if spliceable {
            if let Some(child) = children.pop() {
                return child;
            }
        }
        Tree::new(label, children)
    }
}
