use std::collections::HashSet;
use std::fmt;

use slog::{Discard, Logger};

use lang::{Label, Symbol};
use syntax::dependency::{Dependency, Direction, Relation};
use syntax::head::HeadFinder;
use syntax::order;
use syntax::Error;
use trees::{NodeId, ParentTable, Tree};

pub static TAG_SYMBOL: &'static str = "TAG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Wrapper category above the sentence; also the boundary word.
    pub start_symbol: String,
    /// Replace preterminal categories in relations by `tag_symbol`.
    pub collapse_preterminals: bool,
    pub tag_symbol: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            start_symbol: "ROOT".to_string(),
            collapse_preterminals: false,
            tag_symbol: TAG_SYMBOL.to_string(),
        }
    }
}

/// Recoverable problem found while extracting dependencies.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// No head could be resolved for a node; the node was skipped.
    HeadNotFound {
        node: NodeId,
        category: String,
        parent: Option<String>,
        reason: String,
    },
    /// The number of edges differs from the number of words.
    CountMismatch {
        expected: usize,
        found: usize,
        tree: String,
        dependencies: Vec<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Diagnostic::HeadNotFound {
                node,
                ref category,
                ref parent,
                ref reason,
            } => write!(
                f,
                "head not found for node {} ({} under {}): {}",
                node,
                category,
                parent.as_ref().map(|p| p.as_str()).unwrap_or("-"),
                reason
            ),
            Diagnostic::CountMismatch {
                expected,
                found,
                ref tree,
                ref dependencies,
            } => write!(
                f,
                "expected {} dependencies but found {} in {}: [{}]",
                expected,
                found,
                tree,
                dependencies.join(", ")
            ),
        }
    }
}

/// Dependencies of one tree together with the problems met on the way.
#[derive(Debug, Clone)]
pub struct Extraction {
    dependencies: HashSet<Dependency>,
    diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn dependencies(&self) -> &HashSet<Dependency> {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> HashSet<Dependency> {
        self.dependencies
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_consistent(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn ordered(&self) -> Vec<Dependency> {
        order::order(&self.dependencies)
    }

    pub fn find(&self, governor: usize, dependent: usize) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| {
            d.governor_index() == Some(governor) && d.dependent_index() == Some(dependent)
        })
    }

    /// The edge whose dependent is the word at `dependent`. If the word has
    /// several governors, the first one in serialization order is returned.
    pub fn head_of(&self, dependent: usize) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .filter(|d| d.dependent_index() == Some(dependent))
            .min_by(|a, b| order::compare(a, b))
    }
}

/// Turns head/non-head configurations of a tree into dependencies.
#[derive(Debug)]
pub struct DependencyExtractor {
    head_finder: HeadFinder,
    config: ExtractorConfig,
    start: Symbol,
    tag: Symbol,
    logger: Logger,
}

impl DependencyExtractor {
    pub fn new(head_finder: HeadFinder) -> Self {
        DependencyExtractor::with_config(head_finder, ExtractorConfig::default())
    }

    pub fn with_config(head_finder: HeadFinder, config: ExtractorConfig) -> Self {
        let start = Symbol::new(&config.start_symbol);
        let tag = Symbol::new(&config.tag_symbol);
        DependencyExtractor {
            head_finder: head_finder,
            config: config,
            start: start,
            tag: tag,
            logger: Logger::root(Discard, o!()),
        }
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn head_finder(&self) -> &HeadFinder {
        &self.head_finder
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The node below the start-symbol wrapper, or `tree` itself.
    pub fn effective_top<'t>(&self, tree: &'t Tree) -> &'t Tree {
        if tree.value() == self.start.as_str() && tree.num_children() == 1 {
            &tree.children()[0]
        } else {
            tree
        }
    }

    #[inline]
    fn category(&self, node: &Tree) -> Symbol {
        if self.config.collapse_preterminals && node.is_preterminal() {
            self.tag.clone()
        } else {
            node.label().symbol().clone()
        }
    }

    /// Records a head failure at `id` unless that node was already reported.
    fn head_not_found(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        table: &ParentTable,
        id: NodeId,
        error: Error,
    ) {
        let reported = diagnostics.iter().any(|d| match *d {
            Diagnostic::HeadNotFound { node, .. } => node == id,
            _ => false,
        });
        if reported {
            return;
        }
        let node = table.node(id);
        debug!(self.logger, "head resolution failed"; "node" => id, "error" => %error);
        diagnostics.push(Diagnostic::HeadNotFound {
            node: id,
            category: node.value().to_string(),
            parent: table.parent_node(id).map(|p| p.value().to_string()),
            reason: error.to_string(),
        });
    }

    /// Extracts one edge per non-head child of every branching node plus
    /// the edge from the boundary symbol to the sentence head.
    ///
    /// Every leaf must carry a position (see [`Tree::index_leaves`]).
    pub fn extract(&self, tree: &Tree) -> Result<Extraction, Error> {
        let top = self.effective_top(tree);
        if let Some(leaf) = top.leaves().into_iter().find(|l| l.label().index().is_none()) {
            return Err(Error::MissingIndex {
                value: leaf.value().to_string(),
            });
        }

        let table = ParentTable::new(top);
        let mut dependencies = HashSet::with_capacity(top.yield_len());
        let mut diagnostics = vec![];

        match self.head_finder.head_terminal(top) {
            Ok(head) => {
                let boundary = Label::with_index(self.start.clone(), 0);
                let relation = Relation::Structural {
                    parent: self.start.clone(),
                    head: self.start.clone(),
                    modifier: top.label().symbol().clone(),
                    direction: Direction::Right,
                };
                dependencies.insert(Dependency::new(boundary, head.label().clone(), relation));
            }
            Err(e) => self.head_not_found(&mut diagnostics, &table, table.root(), e),
        }

        for (id, node) in table.iter() {
            if node.num_children() < 2 {
                continue;
            }
            let head_index = match self.head_finder.determine_head_in(node, table.parent_node(id)) {
                Ok(i) => i,
                Err(e) => {
                    self.head_not_found(&mut diagnostics, &table, id, e);
                    continue;
                }
            };
            let head_child = &node.children()[head_index];
            let head_terminal = match self.head_finder.head_terminal_in(head_child, Some(node)) {
                Ok(t) => t,
                Err(e) => {
                    self.head_not_found(&mut diagnostics, &table, id, e);
                    continue;
                }
            };
            let child_ids = table.children(id);
            for (position, child) in node.children().iter().enumerate() {
                if position == head_index {
                    continue;
                }
                let modifier = match self.head_finder.head_terminal_in(child, Some(node)) {
                    Ok(t) => t,
                    Err(e) => {
                        self.head_not_found(&mut diagnostics, &table, child_ids[position], e);
                        continue;
                    }
                };
                let direction = if position < head_index {
                    Direction::Left
                } else {
                    Direction::Right
                };
                let relation = Relation::Structural {
                    parent: self.category(node),
                    head: self.category(head_child),
                    modifier: self.category(child),
                    direction: direction,
                };
                // first edge for a (governor, dependent) pair wins
                dependencies.insert(Dependency::new(
                    head_terminal.label().clone(),
                    modifier.label().clone(),
                    relation,
                ));
            }
        }

        if let Err(diagnostic) = order::validate(&dependencies, top) {
            warn!(self.logger, "inconsistent dependencies"; "diagnostic" => %diagnostic);
            diagnostics.push(diagnostic);
        }

        Ok(Extraction {
            dependencies: dependencies,
            diagnostics: diagnostics,
        })
    }
}
