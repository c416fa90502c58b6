extern crate treedep;

mod test_utils;

use std::io::Cursor;

use treedep::io::serialize::{self, Format, Serializer};
use treedep::io::{Read, Write};
use treedep::syntax::Dependency;
use treedep::trees::Tree;
use treedep::Pipeline;

#[test]
fn test_dependencies_as_json_lines() {
    let processed = Pipeline::collins()
        .process(&test_utils::dog_saw_cat())
        .unwrap()
        .unwrap();
    let ordered = processed.extraction.ordered();

    let mut writer = Serializer::new(vec![], Format::Json);
    assert_eq!(writer.write(&ordered).unwrap(), 6);
    writer.flush().unwrap();
    let bytes = writer.into_inner();
    assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 6);

    let mut reader: Serializer<_, Dependency> = Serializer::new(Cursor::new(bytes), Format::Json);
    let mut restored = vec![];
    assert_eq!(reader.read(&mut restored).unwrap(), 6);
    assert_eq!(restored, ordered);
    for (a, b) in restored.iter().zip(&ordered) {
        assert_eq!(a.relation(), b.relation());
        assert_eq!(a.governor().value(), b.governor().value());
    }
}

#[test]
fn test_tree_json() {
    let tree = test_utils::john_runs().index_leaves(1);
    let bytes = serialize::serialize(&tree, Format::Json).unwrap();
    let json = String::from_utf8(bytes.clone()).unwrap();
    assert!(json.contains(r#"{"label":{"value":"John","index":1}}"#), "{}", json);
    let restored: Tree = serialize::deserialize(&bytes, Format::Json).unwrap();
    assert_eq!(restored, tree);

    let pretty = serialize::serialize(&tree, Format::JsonPretty).unwrap();
    assert!(pretty.contains(&b'\n'));
    assert!(serialize::deserialize::<Tree>(&pretty, Format::JsonPretty).is_err());
}

#[test]
fn test_read_without_trailing_newline() {
    let text = "{\"label\":{\"value\":\"a\"}}\n\n{\"label\":{\"value\":\"b\"}}";
    let mut reader: Serializer<_, Tree> = Serializer::new(Cursor::new(text), Format::Json);
    let mut trees = vec![];
    assert_eq!(reader.read(&mut trees).unwrap(), 2);
    assert_eq!(trees[1].value(), "b");
}
