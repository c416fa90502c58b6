use std::fmt;
use std::sync::Arc;

use syntax::Error;
use trees::category::{basic_category, is_punctuation_tag};
use trees::Tree;

pub use self::rules::{HeadRules, Match, RuleGroup, Scan};
pub use self::semantic::AuxiliaryHook;

mod collins;
mod rules;
mod semantic;

/// Category-specific adjustment evaluated around the generic rule search.
///
/// `before` runs first and may pick the head outright; `parent` is the node
/// above the constituent when the caller knows it. `after` may move the head
/// selected by the rule groups. A head picked by `before` is final.
pub trait HeadHook: Send + Sync {
    #[allow(unused_variables)]
    fn before(&self, category: &str, children: &[Tree], parent: Option<&Tree>) -> Option<usize> {
        None
    }

    #[allow(unused_variables)]
    fn after(&self, category: &str, children: &[Tree], head: usize) -> usize {
        head
    }
}

/// Collins' coordination fix: when the selected head directly follows a
/// `CC` or `CONJP`, the conjunct left of the conjunction becomes the head
/// (punctuation preterminals in between are skipped).
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinationHook;

impl HeadHook for CoordinationHook {
    fn after(&self, _category: &str, children: &[Tree], head: usize) -> usize {
        if head < 2 {
            return head;
        }
        let previous = basic_category(children[head - 1].value());
        if previous != "CC" && previous != "CONJP" {
            return head;
        }
        let mut candidate = head - 2;
        loop {
            let child = &children[candidate];
            if !(child.is_preterminal() && is_punctuation_tag(basic_category(child.value()))) {
                return candidate;
            }
            if candidate == 0 {
                return head;
            }
            candidate -= 1;
        }
    }
}

/// Picks the head child of constituents with a [`HeadRules`] table.
pub struct HeadFinder {
    rules: Arc<HeadRules>,
    hooks: Vec<Box<dyn HeadHook>>,
}

impl fmt::Debug for HeadFinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HeadFinder")
            .field("rules", &self.rules.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl HeadFinder {
    pub fn new(rules: HeadRules) -> Self {
        HeadFinder::with_shared(Arc::new(rules))
    }

    pub fn with_shared(rules: Arc<HeadRules>) -> Self {
        HeadFinder {
            rules: rules,
            hooks: vec![],
        }
    }

    /// Collins' English rules with the coordination fix.
    pub fn collins() -> Self {
        HeadFinder::new(HeadRules::collins()).hook(CoordinationHook)
    }

    /// Content-word heads: the semantic rule table, auxiliary and copula
    /// shifting, and the coordination fix.
    pub fn semantic() -> Self {
        HeadFinder::new(HeadRules::semantic())
            .hook(AuxiliaryHook::default())
            .hook(CoordinationHook)
    }

    pub fn hook<H: HeadHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn rules(&self) -> &Arc<HeadRules> {
        &self.rules
    }

    /// Index of the head child of `tree`.
    pub fn determine_head(&self, tree: &Tree) -> Result<usize, Error> {
        self.determine_head_in(tree, None)
    }

    /// Same as [`HeadFinder::determine_head`] for a node whose parent is
    /// known; hooks may look at it.
    pub fn determine_head_in(&self, tree: &Tree, parent: Option<&Tree>) -> Result<usize, Error> {
        let children = tree.children();
        match children.len() {
            0 => Err(Error::LeafHasNoHead {
                value: tree.value().to_string(),
            }),
            1 => Ok(0),
            n => {
                let category = basic_category(tree.value());
                for hook in &self.hooks {
                    match hook.before(category, children, parent) {
                        Some(head) if head < n => return Ok(head),
                        _ => {}
                    }
                }
                let found = self.rules
                    .get(category)
                    .and_then(|groups| find_head(groups, children))
                    .or_else(|| find_head(self.rules.default_groups(), children));
                match found {
                    Some(mut head) => {
                        for hook in &self.hooks {
                            let adjusted = hook.after(category, children, head);
                            if adjusted < n {
                                head = adjusted;
                            }
                        }
                        Ok(head)
                    }
                    None => Err(Error::NoHead {
                        category: category.to_string(),
                        tree: tree.to_string(),
                    }),
                }
            }
        }
    }

    pub fn head_child<'t>(&self, tree: &'t Tree) -> Result<&'t Tree, Error> {
        let head = self.determine_head(tree)?;
        Ok(&tree.children()[head])
    }

    /// The leaf reached by following head children down from `tree`.
    pub fn head_terminal<'t>(&self, tree: &'t Tree) -> Result<&'t Tree, Error> {
        self.head_terminal_in(tree, None)
    }

    pub fn head_terminal_in<'t>(
        &self,
        tree: &'t Tree,
        parent: Option<&'t Tree>,
    ) -> Result<&'t Tree, Error> {
        let mut parent = parent;
        let mut node = tree;
        while !node.is_leaf() {
            let head = self.determine_head_in(node, parent)?;
            parent = Some(node);
            node = &node.children()[head];
        }
        Ok(node)
    }

    /// The preterminal dominating the head terminal, if `tree` is not a leaf.
    pub fn head_preterminal<'t>(&self, tree: &'t Tree) -> Result<&'t Tree, Error> {
        if tree.is_leaf() {
            return Err(Error::LeafHasNoHead {
                value: tree.value().to_string(),
            });
        }
        let mut node = tree;
        while !node.is_preterminal() {
            node = self.head_child(node)?;
            if node.is_leaf() {
                // unary chain ending in a bare leaf: no tag above the word
                return Err(Error::LeafHasNoHead {
                    value: node.value().to_string(),
                });
            }
        }
        Ok(node)
    }
}

fn find_head(groups: &[RuleGroup], children: &[Tree]) -> Option<usize> {
    groups.iter().filter_map(|group| group.find(children)).next()
}
