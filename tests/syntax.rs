extern crate treedep;

mod test_utils;

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use treedep::lang::Label;
use treedep::syntax::head::{AuxiliaryHook, CoordinationHook, HeadFinder, HeadHook, HeadRules,
                            RuleGroup};
use treedep::syntax::order;
use treedep::syntax::{Dependency, DependencyExtractor, Diagnostic, Direction, Error, ExtractorConfig,
                      Relation};
use treedep::trees::{Normalizer, NormalizerConfig, Tree};

use test_utils::{node, pt};

fn prepare(tree: &Tree) -> Tree {
    Normalizer::new(NormalizerConfig::default())
        .normalize_whole_tree(tree)
        .unwrap()
        .index_leaves(1)
}

fn head_word(finder: &HeadFinder, tree: &Tree) -> String {
    finder.head_terminal(tree).unwrap().value().to_string()
}

#[test]
fn test_collins_heads() {
    let finder = HeadFinder::collins();
    let tree = test_utils::john_runs();
    assert_eq!(finder.determine_head(&tree).unwrap(), 1);
    assert_eq!(head_word(&finder, &tree), "runs");

    let vp = node("VP", vec![pt("VBD", "saw"), node("NP", vec![pt("PRP", "her")])]);
    assert_eq!(finder.head_child(&vp).unwrap().value(), "VBD");
    assert_eq!(finder.head_preterminal(&vp).unwrap().value(), "VBD");

    let np = node("NP", vec![pt("DT", "the"), pt("JJ", "big"), pt("NN", "dog")]);
    assert_eq!(finder.determine_head(&np).unwrap(), 2);

    let np = node(
        "NP",
        vec![
            node("NP", vec![pt("DT", "the"), pt("NN", "man")]),
            node("PP", vec![pt("IN", "with"), node("NP", vec![pt("DT", "a"), pt("NN", "hat")])]),
        ],
    );
    assert_eq!(finder.determine_head(&np).unwrap(), 0);
    assert_eq!(head_word(&finder, &np), "man");

    // functional tags are ignored when looking up rules
    let s = node(
        "S-TPC",
        vec![node("NP-SBJ", vec![pt("PRP", "we")]), node("VP", vec![pt("VBP", "win")])],
    );
    assert_eq!(head_word(&finder, &s), "win");
}

#[test]
fn test_unary_and_leaf() {
    let finder = HeadFinder::new(HeadRules::empty());
    let preterminal = pt("NN", "dog");
    assert_eq!(finder.determine_head(&preterminal).unwrap(), 0);
    let unary = node("NP", vec![pt("NN", "dog")]);
    assert_eq!(head_word(&finder, &unary), "dog");
    match finder.determine_head(&Tree::leaf("dog")) {
        Err(Error::LeafHasNoHead { ref value }) => assert_eq!(value, "dog"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(finder.head_preterminal(&Tree::leaf("dog")).is_err());
}

#[test]
fn test_no_head_with_empty_table() {
    let finder = HeadFinder::new(HeadRules::empty());
    let tree = test_utils::john_runs();
    match finder.determine_head(&tree) {
        Err(Error::NoHead { ref category, .. }) => assert_eq!(category, "S"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_head_determinism() {
    let finder = HeadFinder::collins();
    let tree = prepare(&test_utils::dog_saw_cat());
    for subtree in tree.preorder().filter(|n| n.num_children() > 1) {
        let first = finder.determine_head(subtree).unwrap();
        for _ in 0..10 {
            assert_eq!(finder.determine_head(subtree).unwrap(), first);
        }
    }
}

#[test]
fn test_coordination_hook() {
    let tree = node(
        "ADVP",
        vec![pt("RB", "slowly"), pt("CC", "and"), pt("RB", "carefully")],
    );
    let plain = HeadFinder::new(HeadRules::collins());
    assert_eq!(plain.determine_head(&tree).unwrap(), 2);
    let finder = HeadFinder::collins();
    assert_eq!(finder.determine_head(&tree).unwrap(), 0);

    let tree = node(
        "ADVP",
        vec![
            pt("RB", "slowly"),
            pt(",", ","),
            pt("CC", "and"),
            pt("RB", "carefully"),
        ],
    );
    let finder = HeadFinder::new(HeadRules::collins()).hook(CoordinationHook);
    assert_eq!(finder.determine_head(&tree).unwrap(), 0);
}

#[test]
fn test_rule_group_kinds() {
    let children = vec![pt("DT", "the"), pt("JJ", "big"), pt("NN", "dog"), pt("JJ", "red")];
    assert_eq!(RuleGroup::left(&["JJ", "DT"]).find(&children), Some(1));
    assert_eq!(RuleGroup::right(&["JJ", "DT"]).find(&children), Some(3));
    assert_eq!(RuleGroup::left_dis(&["NN", "JJ"]).find(&children), Some(1));
    assert_eq!(RuleGroup::right_dis(&["DT", "NN"]).find(&children), Some(2));
    assert_eq!(RuleGroup::left_except(&["DT", "JJ"]).find(&children), Some(2));
    assert_eq!(RuleGroup::right_except(&["JJ"]).find(&children), Some(2));
    assert_eq!(RuleGroup::left(&["VB"]).find(&children), None);
    let empty: &[&str] = &[];
    assert_eq!(RuleGroup::right(empty).find(&children), Some(3));

    let rules = HeadRules::leftmost().rule("X", vec![RuleGroup::left_except(&["DT", "JJ"])]);
    let finder = HeadFinder::new(rules);
    let tree = node("X", children.clone());
    assert_eq!(finder.determine_head(&tree).unwrap(), 2);
    // falls back to the default groups
    let tree = node("Y", children);
    assert_eq!(finder.determine_head(&tree).unwrap(), 0);
}

#[test]
fn test_rules_from_json() {
    let json = r#"{
        "default": [["right"]],
        "rules": {
            "S": [["left", "VP"], ["rightdis", "NP"]],
            "NP": [["rightexcept", "PP"]]
        }
    }"#;
    let rules = HeadRules::from_json_str(json).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get("S").map(|g| g.len()), Some(2));
    assert_eq!(rules.get("S").unwrap()[1].to_string(), "rightdis NP");
    let finder = HeadFinder::new(rules);

    let tree = node(
        "S",
        vec![node("NP", vec![pt("PRP", "it")]), node("NP", vec![pt("NN", "fun")])],
    );
    assert_eq!(finder.determine_head(&tree).unwrap(), 1);
    let tree = node("FRAG", vec![pt("NN", "a"), pt("NN", "b")]);
    assert_eq!(finder.determine_head(&tree).unwrap(), 1);

    assert!(HeadRules::from_json_str(r#"{"rules": {"S": [["sideways", "VP"]]}}"#).is_err());
    assert!(HeadRules::from_json_str(r#"{"rules": {"S": [[]]}}"#).is_err());

    let collins = HeadRules::collins();
    let restored = HeadRules::from_json_str(&collins.to_json().unwrap()).unwrap();
    assert_eq!(restored, collins);
}

#[test]
fn test_extract_basic_svo() {
    let tree = test_utils::john_runs().index_leaves(1);
    let extractor = DependencyExtractor::new(HeadFinder::collins());
    let extraction = extractor.extract(&tree).unwrap();
    assert!(extraction.is_consistent(), "{:?}", extraction.diagnostics());
    assert_eq!(extraction.len(), 2);

    let subject = extraction.find(2, 1).unwrap();
    assert_eq!(subject.governor().value(), "runs");
    assert_eq!(subject.dependent().value(), "John");
    assert_eq!(
        *subject.relation(),
        Relation::structural("S", "VP", "NP", Direction::Left)
    );

    let root = extraction.find(0, 2).unwrap();
    assert_eq!(root.governor().value(), "ROOT");
    assert_eq!(
        *root.relation(),
        Relation::structural("ROOT", "ROOT", "S", Direction::Right)
    );
}

#[test]
fn test_extract_sentence() {
    let tree = prepare(&test_utils::dog_saw_cat());
    let extractor = DependencyExtractor::new(HeadFinder::collins());
    let extraction = extractor.extract(&tree).unwrap();
    assert!(extraction.is_consistent(), "{:?}", extraction.diagnostics());
    assert_eq!(extraction.len(), tree.yield_len());

    let heads = order::heads(extraction.dependencies(), tree.yield_len());
    assert_eq!(
        heads,
        vec![None, Some(2), Some(3), Some(0), Some(5), Some(3), Some(3)]
    );
    assert!(order::is_projective(&heads));

    let arcs: Vec<String> = extraction.ordered().iter().map(|d| d.to_string()).collect();
    assert_eq!(
        arcs,
        vec![
            "NP/NN/DT/LEFT(dog-2, The-1)",
            "S/VP/NP/LEFT(saw-3, dog-2)",
            "ROOT/ROOT/S/RIGHT(ROOT-0, saw-3)",
            "NP/NN/DT/LEFT(cat-5, a-4)",
            "VP/VBD/NP/RIGHT(saw-3, cat-5)",
            "S/VP/./RIGHT(saw-3, .-6)",
        ]
    );
}

#[test]
fn test_extract_question_with_trace() {
    let tree = prepare(&test_utils::what_did_you_see());
    let extractor = DependencyExtractor::new(HeadFinder::collins());
    let extraction = extractor.extract(&tree).unwrap();
    assert!(extraction.is_consistent(), "{:?}", extraction.diagnostics());
    assert_eq!(tree.yield_values(), vec!["What", "did", "you", "see", "?"]);
    assert_eq!(extraction.len(), 5);
    assert_eq!(extraction.head_of(2).and_then(|d| d.governor_index()), Some(0));
    assert_eq!(extraction.head_of(1).and_then(|d| d.governor_index()), Some(2));
    assert_eq!(extraction.head_of(4).and_then(|d| d.governor_index()), Some(2));
}

#[test]
fn test_collapse_preterminals() {
    let tree = prepare(&test_utils::dog_saw_cat());
    let config = ExtractorConfig {
        collapse_preterminals: true,
        ..ExtractorConfig::default()
    };
    let extractor = DependencyExtractor::with_config(HeadFinder::collins(), config);
    let extraction = extractor.extract(&tree).unwrap();
    assert_eq!(
        *extraction.find(2, 1).unwrap().relation(),
        Relation::structural("NP", "TAG", "TAG", Direction::Left)
    );
    assert_eq!(
        *extraction.find(3, 2).unwrap().relation(),
        Relation::structural("S", "VP", "NP", Direction::Left)
    );
    assert_eq!(
        *extraction.find(3, 6).unwrap().relation(),
        Relation::structural("S", "VP", "TAG", Direction::Right)
    );
}

#[test]
fn test_start_symbol_with_several_children() {
    // the wrapper is only skipped when it has a single child
    let tree = node(
        "ROOT",
        vec![node("NP", vec![pt("NN", "Stop")]), pt(".", "!")],
    ).index_leaves(1);
    let extractor = DependencyExtractor::new(HeadFinder::collins());
    let extraction = extractor.extract(&tree).unwrap();
    assert!(extraction.is_consistent());
    assert_eq!(
        *extraction.find(0, 1).unwrap().relation(),
        Relation::structural("ROOT", "ROOT", "ROOT", Direction::Right)
    );
    assert!(extraction.find(1, 2).is_some());
}

#[test]
fn test_extract_diagnostics() {
    let tree = test_utils::john_runs().index_leaves(1);
    let extractor = DependencyExtractor::new(HeadFinder::new(HeadRules::empty()));
    let extraction = extractor.extract(&tree).unwrap();
    assert!(!extraction.is_consistent());
    assert!(extraction.is_empty());
    assert!(extraction.diagnostics().iter().any(|d| match *d {
        Diagnostic::HeadNotFound { node, ref category, .. } => node == 0 && category == "S",
        _ => false,
    }));
    assert!(extraction.diagnostics().iter().any(|d| match *d {
        Diagnostic::CountMismatch { expected, found, .. } => expected == 2 && found == 0,
        _ => false,
    }));
}

#[test]
fn test_extract_skips_unresolved_inner_node() {
    // (S (NP (DT the) (NN dog)) (VP (VBD ran) (ADVP (RB away))))
    let tree = node(
        "S",
        vec![
            node("NP", vec![pt("DT", "the"), pt("NN", "dog")]),
            node("VP", vec![pt("VBD", "ran"), node("ADVP", vec![pt("RB", "away")])]),
        ],
    ).index_leaves(1);
    let rules = HeadRules::empty()
        .rule("S", vec![RuleGroup::left(&["VP"])])
        .rule("VP", vec![RuleGroup::left(&["VBD"])]);
    let extractor = DependencyExtractor::new(HeadFinder::new(rules));
    let extraction = extractor.extract(&tree).unwrap();

    let not_found: Vec<&Diagnostic> = extraction
        .diagnostics()
        .iter()
        .filter(|d| match **d {
            Diagnostic::HeadNotFound { .. } => true,
            _ => false,
        })
        .collect();
    assert_eq!(not_found.len(), 1);
    match *not_found[0] {
        Diagnostic::HeadNotFound {
            node,
            ref category,
            ref parent,
            ..
        } => {
            assert_eq!(node, 1);
            assert_eq!(category, "NP");
            assert_eq!(parent.as_ref().map(|p| p.as_str()), Some("S"));
        }
        _ => unreachable!(),
    }

    // the other branching nodes still produce edges
    assert_eq!(extraction.len(), 2);
    assert!(extraction.find(0, 3).is_some());
    assert!(extraction.find(3, 4).is_some());
    assert!(extraction.head_of(1).is_none());
    assert!(extraction.head_of(2).is_none());
    assert!(extraction.diagnostics().iter().any(|d| match *d {
        Diagnostic::CountMismatch { expected, found, .. } => expected == 4 && found == 2,
        _ => false,
    }));
}

/// Picks the first child on odd calls and the last one on even calls.
struct Alternating(AtomicUsize);

impl HeadHook for Alternating {
    fn before(&self, _category: &str, children: &[Tree], _parent: Option<&Tree>) -> Option<usize> {
        if self.0.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            Some(0)
        } else {
            Some(children.len() - 1)
        }
    }
}

#[test]
fn test_head_of_with_two_governors() {
    let tree = node("X", vec![pt("A", "a"), pt("B", "b")]).index_leaves(1);
    let finder = HeadFinder::new(HeadRules::leftmost()).hook(Alternating(AtomicUsize::new(0)));
    let extraction = DependencyExtractor::new(finder).extract(&tree).unwrap();
    // the root edge and the X edge both claim word 1
    assert!(extraction.find(0, 1).is_some());
    assert!(extraction.find(2, 1).is_some());
    assert!(!extraction.is_consistent());
    for _ in 0..10 {
        assert_eq!(extraction.head_of(1).unwrap().governor_index(), Some(0));
    }
    assert!(extraction.head_of(2).is_none());
}

#[test]
fn test_semantic_rules() {
    let collins = HeadFinder::new(HeadRules::collins());
    let semantic = HeadFinder::new(HeadRules::semantic());

    let qp = node("QP", vec![pt("CD", "three"), pt("CD", "billion")]);
    assert_eq!(collins.determine_head(&qp).unwrap(), 0);
    assert_eq!(semantic.determine_head(&qp).unwrap(), 1);

    let small_clause = node(
        "S",
        vec![
            node("NP", vec![pt("PRP", "him")]),
            node("NP", vec![pt("DT", "a"), pt("NN", "friend")]),
        ],
    );
    assert_eq!(collins.determine_head(&small_clause).unwrap(), 0);
    assert_eq!(semantic.determine_head(&small_clause).unwrap(), 1);

    let sbar = node(
        "SBAR",
        vec![pt("IN", "that"), node("S", vec![node("VP", vec![pt("VBD", "won")])])],
    );
    assert_eq!(collins.determine_head(&sbar).unwrap(), 0);
    assert_eq!(semantic.determine_head(&sbar).unwrap(), 1);

    let conjp = node("CONJP", vec![pt("CC", "but"), pt("RB", "not")]);
    assert_eq!(collins.determine_head(&conjp).unwrap(), 0);
    assert_eq!(HeadFinder::semantic().determine_head(&conjp).unwrap(), 1);
}

fn copula(predicate: Tree) -> Tree {
    node(
        "S",
        vec![
            node("NP", vec![pt("NNP", "Bill")]),
            node("VP", vec![pt("VBZ", "is"), predicate]),
        ],
    )
}

#[test]
fn test_auxiliary_hook() {
    let finder = HeadFinder::semantic();

    let perfect = node("VP", vec![pt("VBZ", "has"), node("VP", vec![pt("VBN", "eaten")])]);
    assert_eq!(HeadFinder::collins().determine_head(&perfect).unwrap(), 0);
    assert_eq!(finder.determine_head(&perfect).unwrap(), 1);

    let passive = node("VP", vec![pt("VBD", "got"), node("VP", vec![pt("VBN", "fired")])]);
    assert_eq!(finder.determine_head(&passive).unwrap(), 1);

    let big = copula(node("ADJP", vec![pt("JJ", "big")]));
    assert_eq!(head_word(&HeadFinder::collins(), &big), "is");
    assert_eq!(head_word(&finder, &big), "big");
    let man = copula(node("NP", vec![pt("DT", "a"), pt("NN", "man")]));
    assert_eq!(head_word(&finder, &man), "man");

    // temporal phrases are never predicates
    let vp = node(
        "VP",
        vec![
            pt("VBZ", "is"),
            node("NP-TMP", vec![pt("NN", "today")]),
            node("NP", vec![pt("DT", "a"), pt("NN", "holiday")]),
        ],
    );
    assert_eq!(finder.determine_head(&vp).unwrap(), 2);

    let question = node(
        "SQ",
        vec![pt("VBZ", "Is"), node("NP", vec![pt("PRP", "it")]), node("ADJP", vec![pt("JJ", "ready")])],
    );
    assert_eq!(finder.determine_head(&question).unwrap(), 2);

    // copulas stay heads when asked to
    let finder = HeadFinder::new(HeadRules::semantic()).hook(AuxiliaryHook::new(true));
    assert_eq!(head_word(&finder, &big), "is");
    assert_eq!(finder.determine_head(&perfect).unwrap(), 1);
}

#[test]
fn test_existential_keeps_copula() {
    let tree = node(
        "S",
        vec![
            node("NP", vec![pt("EX", "There")]),
            node("VP", vec![pt("VBZ", "is"), node("NP", vec![pt("DT", "a"), pt("NN", "man")])]),
        ],
    );
    let finder = HeadFinder::semantic();
    assert_eq!(head_word(&finder, &tree), "is");
    // without its parent the VP looks like a plain copula
    let vp = &tree.children()[1];
    assert_eq!(finder.determine_head(vp).unwrap(), 1);
    assert_eq!(finder.determine_head_in(vp, Some(&tree)).unwrap(), 0);

    let extraction = DependencyExtractor::new(HeadFinder::semantic())
        .extract(&tree.index_leaves(1))
        .unwrap();
    assert!(extraction.is_consistent());
    assert!(extraction.find(0, 2).is_some());
    assert!(extraction.find(2, 1).is_some());
    assert!(extraction.find(2, 4).is_some());
    assert!(extraction.find(4, 3).is_some());
}

#[test]
fn test_extract_copula_predicate() {
    let tree = copula(node("ADJP", vec![pt("JJ", "big")])).index_leaves(1);
    let extraction = DependencyExtractor::new(HeadFinder::semantic())
        .extract(&tree)
        .unwrap();
    assert!(extraction.is_consistent());
    assert!(extraction.find(0, 3).is_some());
    assert!(extraction.find(3, 1).is_some());
    assert!(extraction.find(3, 2).is_some());
    assert_eq!(extraction.head_of(2).unwrap().governor_index(), Some(3));
}

#[test]
fn test_extract_requires_indices() {
    let extractor = DependencyExtractor::new(HeadFinder::collins());
    match extractor.extract(&test_utils::john_runs()) {
        Err(Error::MissingIndex { ref value }) => assert_eq!(value, "John"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_dependency_identity() {
    let a = Dependency::new(
        Label::with_index("runs", 2),
        Label::with_index("John", 1),
        Relation::structural("S", "VP", "NP", Direction::Left),
    );
    let b = Dependency::new(
        Label::with_index("run", 2),
        Label::with_index("john", 1),
        Relation::named("nsubj"),
    );
    assert_eq!(a, b);
    let mut set = HashSet::new();
    assert!(set.insert(a.clone()));
    assert!(!set.insert(b));
    assert_eq!(set.len(), 1);
    assert!(!a.is_extra());
    assert!(a.clone().extra().is_extra());
}

#[test]
fn test_order_stability() {
    let tree = prepare(&test_utils::dog_saw_cat());
    let extraction = DependencyExtractor::new(HeadFinder::collins())
        .extract(&tree)
        .unwrap();
    let first = order::order(extraction.dependencies());
    let second = order::order(extraction.dependencies());
    let render = |deps: &[Dependency]| deps.iter().map(|d| d.to_string()).collect::<Vec<_>>();
    assert_eq!(render(&first), render(&second));
    let dependents: Vec<Option<usize>> = first.iter().map(|d| d.dependent_index()).collect();
    assert_eq!(
        dependents,
        vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]
    );
}

#[test]
fn test_order_ties_on_dependent() {
    let deps = vec![
        Dependency::new(
            Label::with_index("b", 3),
            Label::with_index("a", 1),
            Relation::named("x"),
        ),
        Dependency::new(
            Label::with_index("c", 2),
            Label::with_index("a", 1),
            Relation::named("y"),
        ),
        Dependency::new(
            Label::with_index("ROOT", 0),
            Label::with_index("c", 2),
            Relation::named("root"),
        ),
    ];
    let ordered = order::order(&deps);
    let pairs: Vec<(Option<usize>, Option<usize>)> = ordered
        .iter()
        .map(|d| (d.governor_index(), d.dependent_index()))
        .collect();
    assert_eq!(
        pairs,
        vec![(Some(2), Some(1)), (Some(3), Some(1)), (Some(0), Some(2))]
    );
}

#[test]
fn test_validate() {
    let tree = test_utils::john_runs().index_leaves(1);
    let root = Dependency::new(
        Label::with_index("ROOT", 0),
        Label::with_index("runs", 2),
        Relation::named("root"),
    );
    let subject = Dependency::new(
        Label::with_index("runs", 2),
        Label::with_index("John", 1),
        Relation::named("nsubj"),
    );
    assert!(order::validate(&[root.clone(), subject], &tree).is_ok());
    match order::validate(&[root], &tree) {
        Err(Diagnostic::CountMismatch {
            expected,
            found,
            ref tree,
            ref dependencies,
        }) => {
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
            assert_eq!(tree, "(S (NP (NNP John)) (VP (VBZ runs)))");
            assert_eq!(dependencies, &vec!["root(ROOT-0, runs-2)".to_string()]);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_projectivity() {
    assert!(order::is_projective(&[None, Some(2), Some(0)]));
    assert!(!order::is_projective(&[None, Some(3), Some(4), Some(0), Some(3)]));
}
