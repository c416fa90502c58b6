use trees::category::{basic_category, functional_tags};
use trees::Tree;

use super::rules::{HeadRules, RuleGroup, Scan};
use super::HeadHook;

static VERB_TAGS: [&'static str; 10] =
    ["TO", "MD", "VB", "VBD", "VBP", "VBZ", "VBG", "VBN", "AUX", "AUXG"];

/// Tags that mark an auxiliary whatever the word is.
static UNAMBIGUOUS_AUX_TAGS: [&'static str; 4] = ["TO", "MD", "AUX", "AUXG"];

static BE_WORDS: [&'static str; 18] = [
    "am", "is", "are", "r", "be", "being", "'s", "'re", "'m", "was", "were", "been", "s", "ai",
    "m", "art", "ar", "wase",
];

static AUXILIARY_WORDS: [&'static str; 35] = [
    "will", "wo", "shall", "sha", "may", "might", "should", "would", "can", "could", "ca",
    "must", "'ll", "ll", "has", "have", "had", "having", "'ve", "ve", "v", "'d", "d", "get",
    "gets", "getting", "got", "gotten", "do", "does", "did", "du", "to", "na", "ta",
];

static PASSIVE_WORDS: [&'static str; 4] = ["get", "gets", "getting", "got"];

static COPULA_VERBS: [&'static str; 21] = [
    "seem", "seems", "seemed", "seeming", "appear", "appears", "appeared", "stay", "stays",
    "stayed", "remain", "remains", "remained", "resemble", "resembles", "resembled",
    "resembling", "become", "becomes", "became", "becoming",
];

static PARTICIPLE_TAGS: [&'static str; 3] = ["VBN", "VBG", "VBD"];

impl HeadRules {
    /// Collins' table adjusted towards content-word heads: main verbs over
    /// complementizers, the last number of a quantity, nouns over
    /// possessive markers, and sentence-first parentheticals.
    pub fn semantic() -> Self {
        HeadRules::collins()
            .rule("NP", vec![
                RuleGroup::right_dis(&["NN", "NNP", "NNPS", "NNS", "NX", "NML", "JJR", "WP"]),
                RuleGroup::left(&["NP", "PRP"]),
                RuleGroup::right_dis(&["$", "ADJP", "FW"]),
                RuleGroup::right(&["CD"]),
                RuleGroup::right_dis(&[
                    "JJ", "JJS", "QP", "DT", "WDT", "NML", "PRN", "RB", "RBR", "ADVP",
                ]),
                RuleGroup::right_dis(&["VP", "VB", "VBZ", "VBD", "VBP"]),
                RuleGroup::left(&["POS"]),
            ])
            .alias("NX", "NP")
            .alias("NML", "NP")
            .rule("WHNP", vec![
                RuleGroup::right_dis(&["NN", "NNP", "NNPS", "NNS", "NX", "NML", "JJR", "WP"]),
                RuleGroup::left(&["WHNP", "NP"]),
                RuleGroup::right_dis(&["$", "ADJP", "PRN", "FW"]),
                RuleGroup::right(&["CD"]),
                RuleGroup::right_dis(&["JJ", "JJS", "RB", "QP"]),
                RuleGroup::left(&["WHPP", "WHADJP", "WP$", "WDT"]),
            ])
            .rule("WHADJP", vec![
                RuleGroup::left(&["ADJP", "JJ", "JJR", "WP"]),
                RuleGroup::right(&["RB"]),
                RuleGroup::first(Scan::Right),
            ])
            .rule("WHADVP", vec![RuleGroup::right_dis(&["WRB", "WHADVP", "RB", "JJ"])])
            .rule("QP", vec![RuleGroup::right(&[
                "$", "NNS", "NN", "CD", "JJ", "PDT", "DT", "IN", "RB", "NCD", "QP", "JJR", "JJS",
            ])])
            .rule("S", vec![
                RuleGroup::left(&["VP", "S", "FRAG", "SBAR", "ADJP", "UCP", "TO"]),
                RuleGroup::right(&["NP"]),
            ])
            .rule("SBAR", vec![RuleGroup::left(&[
                "S", "SQ", "SINV", "SBAR", "FRAG", "VP", "WHNP", "WHPP", "WHADVP", "WHADJP", "IN",
                "DT",
            ])])
            .rule("SQ", vec![RuleGroup::left(&[
                "VP", "SQ", "ADJP", "VB", "VBZ", "VBD", "VBP", "MD", "AUX", "AUXG",
            ])])
            .rule("UCP", vec![RuleGroup::first(Scan::Left)])
            .rule("CONJP", vec![RuleGroup::right(&["CC", "VB", "JJ", "RB", "IN"])])
            .rule("FRAG", vec![
                RuleGroup::left(&["IN"]),
                RuleGroup::right(&["RB"]),
                RuleGroup::left(&["NP"]),
                RuleGroup::left(&["ADJP", "ADVP", "FRAG", "S", "SBAR", "VP"]),
            ])
            .rule("PRN", vec![RuleGroup::left(&[
                "VP", "SQ", "S", "SINV", "SBAR", "NP", "ADJP", "PP", "ADVP", "INTJ", "WHNP",
                "NAC", "VBP", "JJ", "NN", "NNP",
            ])])
            .rule("XS", vec![RuleGroup::right(&["IN"])])
            .rule("XSL", vec![RuleGroup::first(Scan::Left)])
            .rule("EMBED", vec![RuleGroup::right(&["INTJ"])])
    }
}

/// Moves the head of verbal constituents from auxiliaries and copulas to
/// the main predicate.
///
/// In `VP`, `SQ` and `SINV`, an auxiliary (or a passive/progressive `be`
/// or `get`) hands the head to the verb phrase it governs, e.g. `has
/// eaten` is headed by `eaten`. A copula hands it to its predicate, e.g.
/// `is big` is headed by `big`, unless the clause is existential or a
/// wh-question. `CONJP` phrases such as `but not` are headed by the
/// adverb.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuxiliaryHook {
    /// Keep copulas as heads of their predicates.
    pub copula_head: bool,
}

impl AuxiliaryHook {
    pub fn new(copula_head: bool) -> Self {
        AuxiliaryHook {
            copula_head: copula_head,
        }
    }

    fn is_copula(&self, word: &str) -> bool {
        !self.copula_head
            && (BE_WORDS.contains(&word) || COPULA_VERBS.contains(&word))
    }

    fn has_copula(&self, children: &[Tree]) -> bool {
        children.iter().any(|child| match verb_word(child) {
            Some(word) => self.is_copula(&word),
            None => false,
        })
    }

    fn auxiliary_head(&self, children: &[Tree]) -> Option<usize> {
        if !(children.iter().any(is_auxiliary) || has_passive_auxiliary(children)) {
            return None;
        }
        let group = if self.has_copula(children) {
            RuleGroup::left(&["VP", "ADJP"])
        } else {
            RuleGroup::left(&["VP"])
        };
        group.find_among(children, is_head_candidate)
    }

    fn predicate_head(
        &self,
        category: &str,
        children: &[Tree],
        parent: Option<&Tree>,
    ) -> Option<usize> {
        if !self.has_copula(children)
            || is_existential(category, parent)
            || is_wh_question(category, parent)
        {
            return None;
        }
        let predicates = ["VP", "ADJP", "NP", "WHADJP", "WHNP"];
        let group = if category == "SQ" {
            RuleGroup::right(&predicates)
        } else {
            RuleGroup::left(&predicates)
        };
        let head = group.find_among(children, is_head_candidate)?;
        // an NP heads a question only when another NP precedes it
        if category == "SQ" && basic_category(children[head].value()) == "NP" {
            let subject = children[..head]
                .iter()
                .any(|child| basic_category(child.value()) == "NP");
            if !subject {
                return None;
            }
        }
        Some(head)
    }
}

impl HeadHook for AuxiliaryHook {
    fn before(&self, category: &str, children: &[Tree], parent: Option<&Tree>) -> Option<usize> {
        match category {
            "CONJP" => conjunction_head(children),
            "VP" | "SQ" | "SINV" => self.auxiliary_head(children)
                .or_else(|| self.predicate_head(category, children, parent)),
            _ => None,
        }
    }
}

/// Lowercased word of a preterminal tagged as a verb.
fn verb_word(node: &Tree) -> Option<String> {
    if !node.is_preterminal() {
        return None;
    }
    if !VERB_TAGS.contains(&basic_category(node.value())) {
        return None;
    }
    node.first_child().map(|word| word.value().to_lowercase())
}

fn is_auxiliary(node: &Tree) -> bool {
    if !node.is_preterminal() {
        return false;
    }
    if UNAMBIGUOUS_AUX_TAGS.contains(&basic_category(node.value())) {
        return true;
    }
    match verb_word(node) {
        Some(word) => BE_WORDS.contains(&word.as_str()) || AUXILIARY_WORDS.contains(&word.as_str()),
        None => false,
    }
}

fn is_passive_auxiliary(node: &Tree) -> bool {
    match verb_word(node) {
        Some(word) => BE_WORDS.contains(&word.as_str()) || PASSIVE_WORDS.contains(&word.as_str()),
        None => false,
    }
}

fn is_participle(node: &Tree) -> bool {
    node.is_preterminal() && PARTICIPLE_TAGS.contains(&basic_category(node.value()))
}

/// A `be`/`get` form next to a VP headed by a participle, including
/// coordinated participle VPs.
fn has_passive_auxiliary(children: &[Tree]) -> bool {
    if !children.iter().any(is_passive_auxiliary) {
        return false;
    }
    children
        .iter()
        .filter(|child| child.is_phrasal() && basic_category(child.value()) == "VP")
        .any(|vp| {
            let mut coordinated_participle = false;
            for child in vp.children() {
                let category = basic_category(child.value());
                if child.is_preterminal() {
                    if is_participle(child) || (category == "CC" && coordinated_participle) {
                        return true;
                    }
                } else if category == "VP" {
                    coordinated_participle = child.children().iter().any(is_participle);
                } else if (category == "CONJP" || category == "PRN") && coordinated_participle {
                    return true;
                }
            }
            false
        })
}

/// Temporal and adverbial phrases never take over the head of a predicate.
fn is_head_candidate(node: &Tree) -> bool {
    let tags = functional_tags(node.value());
    if tags.contains(&"TMP") || tags.contains(&"ADV") {
        return false;
    }
    !(basic_category(node.value()) == "VP" && is_verbless_temporal(node))
}

/// A VP holding an `NP-TMP` but neither a verb nor a nominal or
/// adjectival predicate.
fn is_verbless_temporal(vp: &Tree) -> bool {
    let children = vp.children();
    let temporal = children.iter().any(|child| {
        basic_category(child.value()) == "NP" && functional_tags(child.value()).contains(&"TMP")
    });
    temporal
        && !children.iter().any(|child| {
            let category = basic_category(child.value());
            category.starts_with('V')
                || ["NNP", "NN", "NNPS", "NNS", "NP", "JJ", "ADJP", "S"].contains(&category)
        })
}

fn has_existential_there(node: &Tree) -> bool {
    node.preterminals()
        .iter()
        .any(|pt| basic_category(pt.value()) == "EX")
}

/// `there` left of the VP in a declarative, or anywhere in a question.
fn is_existential(category: &str, parent: Option<&Tree>) -> bool {
    let parent = match parent {
        Some(parent) => parent,
        None => return false,
    };
    match category {
        "VP" => parent
            .children()
            .iter()
            .take_while(|sibling| sibling.value() != "VP")
            .any(has_existential_there),
        "SQ" => parent
            .children()
            .iter()
            .filter(|sibling| !sibling.value().starts_with("VB"))
            .any(has_existential_there),
        _ => false,
    }
}

fn is_wh_question(category: &str, parent: Option<&Tree>) -> bool {
    match parent {
        Some(parent) if category == "SQ" && parent.value() == "SBARQ" => parent
            .children()
            .iter()
            .any(|sibling| sibling.value().starts_with("WH")),
        _ => false,
    }
}

fn word_of(node: &Tree) -> Option<String> {
    if node.is_preterminal() {
        return node.first_child().map(|word| word.value().to_lowercase());
    }
    if node.num_children() == 1 {
        node.first_child().and_then(word_of)
    } else {
        None
    }
}

/// `but not`, `and not`, `but also`, `but rather` and `and yet` are headed
/// by the adverb.
fn conjunction_head(children: &[Tree]) -> Option<usize> {
    for (i, pair) in children.windows(2).enumerate() {
        if basic_category(pair[0].value()) != "CC" || !pair[0].is_preterminal() {
            continue;
        }
        let conjunction = match word_of(&pair[0]) {
            Some(word) => word,
            None => continue,
        };
        let adverb_category = basic_category(pair[1].value());
        if adverb_category != "RB" && adverb_category != "ADVP" {
            continue;
        }
        let adverb = match word_of(&pair[1]) {
            Some(word) => word,
            None => continue,
        };
        let matched = match (conjunction.as_str(), adverb.as_str()) {
            ("but", "not") | ("and", "not") => adverb_category == "RB",
            ("but", "also") | ("but", "rather") | ("and", "yet") => true,
            _ => false,
        };
        if matched {
            return Some(i + 1);
        }
    }
    None
}
