#![allow(dead_code)]

use treedep::trees::Tree;

pub fn pt(tag: &str, word: &str) -> Tree {
    Tree::preterminal(tag, word)
}

pub fn node(label: &str, children: Vec<Tree>) -> Tree {
    Tree::node(label, children)
}

/// `(S (NP (NNP John)) (VP (VBZ runs)))`
pub fn john_runs() -> Tree {
    node(
        "S",
        vec![
            node("NP", vec![pt("NNP", "John")]),
            node("VP", vec![pt("VBZ", "runs")]),
        ],
    )
}

/// `(ROOT (S (NP-SBJ (DT The) (NN dog)) (VP (VBD saw) (NP (DT a) (NN cat))) (. .)))`
pub fn dog_saw_cat() -> Tree {
    node(
        "ROOT",
        vec![node(
            "S",
            vec![
                node("NP-SBJ", vec![pt("DT", "The"), pt("NN", "dog")]),
                node(
                    "VP",
                    vec![pt("VBD", "saw"), node("NP", vec![pt("DT", "a"), pt("NN", "cat")])],
                ),
                pt(".", "."),
            ],
        )],
    )
}

/// `(S (NP-SBJ (-NONE- *)) (VP (VBZ rained)))`
pub fn it_rained() -> Tree {
    node(
        "S",
        vec![
            node("NP-SBJ", vec![pt("-NONE-", "*")]),
            node("VP", vec![pt("VBZ", "rained")]),
        ],
    )
}

/// A wh-question with a trace and a coindexed empty subject.
pub fn what_did_you_see() -> Tree {
    node(
        "ROOT",
        vec![node(
            "SBARQ",
            vec![
                node("WHNP-1", vec![pt("WP", "What")]),
                node(
                    "SQ",
                    vec![
                        pt("VBD", "did"),
                        node("NP-SBJ", vec![pt("PRP", "you")]),
                        node(
                            "VP",
                            vec![pt("VB", "see"), node("NP", vec![pt("-NONE-", "*T*-1")])],
                        ),
                    ],
                ),
                pt(".", "?"),
            ],
        )],
    )
}
