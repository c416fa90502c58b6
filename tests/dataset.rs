extern crate treedep;

mod test_utils;

#[cfg(feature = "dataset-conll")]
mod tests {
    use std::io::Cursor;

    use treedep::dataset::conll::{self, Error, Features, Token};
    use treedep::io::{FromLine, Read, Reader};
    use treedep::lang::{Label, Tokenized};
    use treedep::syntax::{Dependency, Relation};
    use treedep::Pipeline;

    use super::test_utils;

    #[test]
    fn test_features_roundtrip() {
        let features = Features::parse("Case=Nom|Number=Sing").unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features.get("Case"), Some("Nom"));
        assert_eq!(features.get("Number"), Some("Sing"));
        assert_eq!(features.to_string(), "Case=Nom|Number=Sing");

        let empty = Features::parse("_").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "_");
        assert_eq!(Features::new().to_string(), "_");
    }

    #[test]
    fn test_features_case_insensitive_order() {
        let features: Features = "number=Sing|Case=Nom|Gender=Fem".parse().unwrap();
        assert_eq!(features.to_string(), "Case=Nom|Gender=Fem|number=Sing");
        assert_eq!(features.sorted_keys(), vec!["Case", "Gender", "number"]);
    }

    #[test]
    fn test_features_malformed() {
        assert_eq!(
            Features::parse("Case=Nom|Plural"),
            Err(Error::InvalidFeature("Plural".to_string()))
        );
        assert_eq!(
            Features::parse("=Nom"),
            Err(Error::InvalidFeature("=Nom".to_string()))
        );
    }

    #[test]
    fn test_token_from_line() {
        let line = "1\tJohn\tJohn\tPROPN\tNNP\tNumber=Sing\t2\tnsubj\t_\tSpaceAfter=No";
        let token = Token::from_line(line).unwrap();
        assert_eq!(token.id(), 1);
        assert_eq!(token.form(), "John");
        assert_eq!(token.lemma(), Some("John"));
        assert_eq!(token.upos(), Some("PROPN"));
        assert_eq!(token.xpos(), Some("NNP"));
        assert_eq!(token.postag(), Some("NNP"));
        assert_eq!(token.feats().get("Number"), Some("Sing"));
        assert_eq!(token.head(), Some(2));
        assert_eq!(token.deprel(), Some("nsubj"));
        assert_eq!(token.deps(), None);
        assert_eq!(token.misc(), Some("SpaceAfter=No"));
        assert_eq!(token.to_string(), line);

        let token = Token::from_line("3\truns\t_\t_\t_\t_\t_\t_\t_\t_\n").unwrap();
        assert_eq!(token.head(), None);
        assert_eq!(token.to_string(), "3\truns\t_\t_\t_\t_\t_\t_\t_\t_");
    }

    #[test]
    fn test_token_from_line_errors() {
        assert_eq!(
            Token::from_line("1\tJohn\t_\t_\t_\t_\t2\tnsubj\t_"),
            Err(Error::FieldCount(9))
        );
        assert_eq!(
            Token::from_line("x\tJohn\t_\t_\t_\t_\t2\tnsubj\t_\t_"),
            Err(Error::InvalidField {
                column: 1,
                value: "x".to_string(),
            })
        );
        assert_eq!(
            Token::from_line("1\tJohn\t_\t_\t_\tCase\t2\tnsubj\t_\t_"),
            Err(Error::InvalidFeature("Case".to_string()))
        );
    }

    #[test]
    fn test_to_tokens_from_extraction() {
        let pipeline = Pipeline::collins();
        let processed = pipeline
            .process(&test_utils::dog_saw_cat())
            .unwrap()
            .unwrap();
        let tokens = conll::to_tokens(&processed.tree, processed.extraction.dependencies());
        let rows: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rows,
            vec![
                "1\tThe\t_\t_\tDT\t_\t2\tdep\t_\t_",
                "2\tdog\t_\t_\tNN\t_\t3\tdep\t_\t_",
                "3\tsaw\t_\t_\tVBD\t_\t0\troot\t_\t_",
                "4\ta\t_\t_\tDT\t_\t5\tdep\t_\t_",
                "5\tcat\t_\t_\tNN\t_\t3\tdep\t_\t_",
                "6\t.\t_\t_\t.\t_\t3\tdep\t_\t_",
            ]
        );
    }

    #[test]
    fn test_to_tokens_named_relations() {
        let tree = test_utils::john_runs().index_leaves(1);
        let deps = vec![
            Dependency::new(
                Label::with_index("ROOT", 0),
                Label::with_index("runs", 2),
                Relation::named("root"),
            ),
            Dependency::new(
                Label::with_index("runs", 2),
                Label::with_index("John", 1),
                Relation::named("nsubj"),
            ),
        ];
        let tokens = conll::to_tokens(&tree, &deps);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].deprel(), Some("nsubj"));
        assert_eq!(tokens[0].head(), Some(2));
        assert_eq!(tokens[1].deprel(), Some("root"));

        // words without an edge are left blank
        let tokens = conll::to_tokens(&tree, &deps[..1]);
        assert_eq!(tokens[0].head(), None);
        assert_eq!(tokens[0].deprel(), None);
    }

    #[test]
    fn test_read_and_write_sentences() {
        let text = "# sent_id = 1\n\
                    1\tIt\tit\tPRON\tPRP\tCase=Nom\t2\tnsubj\t_\t_\n\
                    2\trained\train\tVERB\tVBD\t_\t0\troot\t_\t_\n\
                    \n\
                    1\tStop\tstop\tVERB\tVB\tMood=Imp\t0\troot\t_\t_\n\
                    2\t!\t!\tPUNCT\t.\t_\t1\tpunct\t_\t_\n";
        let mut reader: conll::Reader<_> = Reader::new(Cursor::new(text.as_bytes()));
        let mut sentences = vec![];
        let count = reader.read(&mut sentences).unwrap();
        assert_eq!(count, 2);
        assert_eq!(sentences[0].len(), 2);
        assert_eq!(sentences[1][1].deprel(), Some("punct"));
        assert_eq!(sentences[0][0].feats().get("Case"), Some("Nom"));

        let mut out = vec![];
        for sentence in &sentences {
            conll::write_sentence(&mut out, sentence).unwrap();
        }
        let written = String::from_utf8(out).unwrap();
        let expected: String = text.lines()
            .filter(|l| !l.starts_with('#'))
            .map(|l| format!("{}\n", l))
            .collect::<String>() + "\n";
        assert_eq!(written, expected);
    }

    #[test]
    fn test_read_rows() {
        let text = "1\tIt\tit\tPRON\tPRP\t_\t2\tnsubj\t_\t_\n\n\
                    2\trained\train\tVERB\tVBD\t_\t0\troot\t_\t_\n";
        let mut reader: Reader<_, Token> = Reader::new(Cursor::new(text.as_bytes()));
        let mut tokens = vec![];
        assert_eq!(reader.read_upto(1, &mut tokens).unwrap(), 1);
        assert_eq!(reader.read(&mut tokens).unwrap(), 1);
        assert_eq!(tokens[1].form(), "rained");
    }

    #[test]
    fn test_read_malformed_row() {
        let text = "1\tIt\tit\tPRON\tPRP\t_\t2\tnsubj\n";
        let mut reader: conll::Reader<_> = Reader::new(Cursor::new(text.as_bytes()));
        let mut sentences = vec![];
        assert!(reader.read(&mut sentences).is_err());
    }
}
