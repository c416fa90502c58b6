use super::rules::{HeadRules, RuleGroup, Scan};

impl HeadRules {
    /// English Penn Treebank head rules from Collins (1999), Appendix A.
    ///
    /// NP follows Collins' special case: the rightmost nominal (or
    /// possessive) tag, then the leftmost NP, then rightmost `$`/ADJP/PRN,
    /// rightmost CD, rightmost JJ/JJS/RB/QP, and finally the last word.
    pub fn collins() -> Self {
        HeadRules::leftmost()
            .rule("ADJP", vec![RuleGroup::left(&[
                "NNS", "QP", "NN", "$", "ADVP", "JJ", "VBN", "VBG", "ADJP", "JJR", "NP", "JJS",
                "DT", "FW", "RBR", "RBS", "SBAR", "RB",
            ])])
            .rule("ADVP", vec![RuleGroup::right(&[
                "RB", "RBR", "RBS", "FW", "ADVP", "TO", "CD", "JJR", "JJ", "IN", "NP", "JJS", "NN",
            ])])
            .rule("CONJP", vec![RuleGroup::right(&["CC", "RB", "IN"])])
            .rule("FRAG", vec![RuleGroup::first(Scan::Right)])
            .rule("INTJ", vec![RuleGroup::first(Scan::Left)])
            .rule("LST", vec![RuleGroup::right(&["LS", ":"])])
            .rule("NAC", vec![RuleGroup::left(&[
                "NN", "NNS", "NNP", "NNPS", "NP", "NAC", "EX", "$", "CD", "QP", "PRP", "VBG", "JJ",
                "JJS", "JJR", "ADJP", "FW",
            ])])
            .rule("NP", vec![
                RuleGroup::right_dis(&["NN", "NNP", "NNPS", "NNS", "NX", "POS", "JJR"]),
                RuleGroup::left(&["NP"]),
                RuleGroup::right_dis(&["$", "ADJP", "PRN"]),
                RuleGroup::right(&["CD"]),
                RuleGroup::right_dis(&["JJ", "JJS", "RB", "QP"]),
                RuleGroup::first(Scan::Right),
            ])
            .alias("NX", "NP")
            .rule("PP", vec![RuleGroup::right(&["IN", "TO", "VBG", "VBN", "RP", "FW"])])
            .rule("PRN", vec![RuleGroup::first(Scan::Left)])
            .rule("PRT", vec![RuleGroup::right(&["RP"])])
            .rule("QP", vec![RuleGroup::left(&[
                "$", "IN", "NNS", "NN", "JJ", "RB", "DT", "CD", "NCD", "QP", "JJR", "JJS",
            ])])
            .rule("RRC", vec![RuleGroup::right(&["VP", "NP", "ADVP", "ADJP", "PP"])])
            .rule("S", vec![RuleGroup::left(&[
                "TO", "IN", "VP", "S", "SBAR", "ADJP", "UCP", "NP",
            ])])
            .rule("SBAR", vec![RuleGroup::left(&[
                "WHNP", "WHPP", "WHADVP", "WHADJP", "IN", "DT", "S", "SQ", "SINV", "SBAR", "FRAG",
            ])])
            .rule("SBARQ", vec![RuleGroup::left(&["SQ", "S", "SINV", "SBARQ", "FRAG"])])
            .rule("SINV", vec![RuleGroup::left(&[
                "VBZ", "VBD", "VBP", "VB", "MD", "VP", "S", "SINV", "ADJP", "NP",
            ])])
            .rule("SQ", vec![RuleGroup::left(&[
                "VBZ", "VBD", "VBP", "VB", "MD", "VP", "SQ",
            ])])
            .rule("UCP", vec![RuleGroup::first(Scan::Right)])
            .rule("VP", vec![RuleGroup::left(&[
                "TO", "VBD", "VBN", "MD", "VBZ", "VB", "VBG", "VBP", "VP", "ADJP", "NN", "NNS",
                "NP",
            ])])
            .rule("WHADJP", vec![RuleGroup::left(&["CC", "WRB", "JJ", "ADJP"])])
            .rule("WHADVP", vec![RuleGroup::right(&["CC", "WRB"])])
            .rule("WHNP", vec![RuleGroup::left(&[
                "WDT", "WP", "WP$", "WHADJP", "WHPP", "WHNP",
            ])])
            .rule("WHPP", vec![RuleGroup::right(&["IN", "TO", "FW"])])
            .rule("X", vec![RuleGroup::first(Scan::Right)])
            .rule("ROOT", vec![RuleGroup::first(Scan::Left)])
    }
}
