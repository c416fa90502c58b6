use std::cmp::Ordering;
use std::collections::HashSet;

use syntax::dependency::Dependency;
use syntax::extract::Diagnostic;
use trees::Tree;

/// Serialization order: dependent position, then governor position (both
/// ascending), then relation.
pub fn compare(a: &Dependency, b: &Dependency) -> Ordering {
    a.dependent_index()
        .cmp(&b.dependent_index())
        .then_with(|| a.governor_index().cmp(&b.governor_index()))
        .then_with(|| a.relation().cmp(b.relation()))
}

pub fn order<'a, I>(dependencies: I) -> Vec<Dependency>
where
    I: IntoIterator<Item = &'a Dependency>,
{
    let mut ordered: Vec<Dependency> = dependencies.into_iter().cloned().collect();
    ordered.sort_by(compare);
    ordered
}

/// Checks that every word of `tree` is the dependent of exactly one edge.
pub fn validate<'a, I>(dependencies: I, tree: &Tree) -> Result<(), Diagnostic>
where
    I: IntoIterator<Item = &'a Dependency>,
{
    let ordered = order(dependencies);
    let mut words: HashSet<Option<usize>> = tree.leaves()
        .iter()
        .map(|leaf| leaf.label().index())
        .collect();
    let expected = tree.yield_len();
    let mut consistent = ordered.len() == expected;
    for dependency in &ordered {
        // each word may be claimed once
        if !words.remove(&dependency.dependent_index()) {
            consistent = false;
        }
    }
    if consistent {
        Ok(())
    } else {
        Err(Diagnostic::CountMismatch {
            expected: expected,
            found: ordered.len(),
            tree: tree.to_string(),
            dependencies: ordered.iter().map(|d| d.to_string()).collect(),
        })
    }
}

/// Head position of each word, indexed by word position; slot 0 stands for
/// the boundary symbol and is always `None`.
pub fn heads<'a, I>(dependencies: I, num_words: usize) -> Vec<Option<usize>>
where
    I: IntoIterator<Item = &'a Dependency>,
{
    let mut heads = vec![None; num_words + 1];
    for dependency in dependencies {
        if let Some(i) = dependency.dependent_index() {
            if i >= 1 && i <= num_words && heads[i].is_none() {
                heads[i] = dependency.governor_index();
            }
        }
    }
    heads
}

/// Whether no two arcs of a head array cross.
pub fn is_projective(heads: &[Option<usize>]) -> bool {
    let arcs: Vec<(usize, usize)> = heads
        .iter()
        .enumerate()
        .filter_map(|(i, head)| head.map(|h| (i.min(h), i.max(h))))
        .collect();
    for &(l1, r1) in &arcs {
        for &(l2, r2) in &arcs {
            if l1 < l2 && l2 < r1 && r1 < r2 {
                return false;
            }
        }
    }
    true
}
