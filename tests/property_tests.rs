//! Property-based tests over generated header paths and payloads.

use proptest::prelude::*;
use toml_tree::{
    free, get, init, saw_table, saw_table_array, to_json_string, to_string, walk, Error, Node,
};

fn dotted_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]{1,2}", 1..4).prop_map(|segments| segments.join("."))
}

proptest! {
    // A header succeeds exactly when its path was not there before, and
    // afterwards every prefix resolves to a table.
    #[test]
    fn prop_saw_table_succeeds_iff_absent(paths in prop::collection::vec(dotted_path(), 1..20)) {
        let mut root = init();
        for path in &paths {
            let existed = get(&root, path).is_some();
            let before = root.clone();
            match saw_table(&mut root, path) {
                Ok(_) => prop_assert!(!existed, "{} accepted twice", path),
                Err(Error::DuplicateDeclaration { .. }) => {
                    prop_assert!(existed);
                    prop_assert_eq!(&root, &before);
                }
                Err(e) => prop_assert!(false, "unexpected error for {}: {}", path, e),
            }

            let segments: Vec<&str> = path.split('.').collect();
            for end in 1..=segments.len() {
                let prefix = segments[..end].join(".");
                prop_assert!(get(&root, &prefix).map_or(false, Node::is_table));
            }
        }
    }

    #[test]
    fn prop_table_array_grows_by_one_per_header(path in dotted_path(), count in 1usize..8) {
        let mut root = init();
        for i in 0..count {
            saw_table_array(&mut root, &path)
                .unwrap()
                .insert("i", Node::from(i as i64))
                .unwrap();
        }
        let tables = get(&root, &path).and_then(Node::as_array).unwrap();
        prop_assert_eq!(tables.len(), count);
        for (i, table) in tables.iter().enumerate() {
            prop_assert_eq!(get(table, "i").and_then(Node::as_int), Some(i as i64));
        }
    }

    #[test]
    fn prop_empty_segments_never_mutate(path in "[a.]{0,6}") {
        prop_assume!(path.split('.').any(str::is_empty));
        let mut root = init();
        saw_table(&mut root, "a").unwrap();
        let before = root.clone();
        let is_empty_key = matches!(saw_table(&mut root, &path), Err(Error::EmptyKeySegment { .. }));
        prop_assert!(is_empty_key);
        let is_empty_key = matches!(saw_table_array(&mut root, &path), Err(Error::EmptyKeySegment { .. }));
        prop_assert!(is_empty_key);
        prop_assert_eq!(root, before);
    }

    #[test]
    fn prop_float_keeps_written_digits(value in -1.0e6f64..1.0e6, precision in 1usize..10) {
        let mut root = init();
        root.insert("x", Node::float(value, precision)).unwrap();
        let text = to_string(&root).unwrap();
        let literal = text.trim_end().trim_start_matches("x = ");
        let digits = literal.split('.').nth(1).map_or(0, str::len);
        prop_assert_eq!(digits, precision);
    }

    #[test]
    fn prop_json_output_parses_back(
        entries in prop::collection::vec(("\\PC{1,8}", any::<String>()), 0..8)
    ) {
        let mut root = init();
        let mut kept = Vec::new();
        for (key, value) in entries {
            if root.insert(&key, Node::from(value.as_str())).is_ok() {
                kept.push((key, value));
            }
        }

        let json: serde_json::Value = serde_json::from_str(&to_json_string(&root).unwrap()).unwrap();
        prop_assert_eq!(json.as_object().map(|o| o.len()), Some(kept.len()));
        for (key, value) in &kept {
            prop_assert_eq!(&json[key]["type"], "string");
            prop_assert_eq!(json[key]["value"].as_str(), Some(value.as_str()));
        }
    }

    #[test]
    fn prop_free_releases_every_node(paths in prop::collection::vec(dotted_path(), 0..12)) {
        let mut root = init();
        for path in &paths {
            let _ = saw_table(&mut root, path);
        }
        let mut nodes = 0;
        walk(&root, |_| nodes += 1);
        prop_assert_eq!(free(root).nodes, nodes);
    }
}
