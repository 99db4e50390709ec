//! Tests for TreeBuilder

use rstest::rstest;

use treegen::domain::{Node, NodeKind, Template, TreeBuilder};

#[test]
fn given_dir_and_file_when_building_then_directories_come_first() {
    // Arrange
    let paths = ["b.txt", "a/", "a/z.txt"];

    // Act
    let tree = TreeBuilder::build(&paths);

    // Assert
    assert_eq!(
        tree,
        vec![Node::dir("a", vec![Node::file("z.txt")]), Node::file("b.txt")]
    );
}

#[test]
fn given_unordered_input_when_building_then_sorts_every_level() {
    let paths = ["src/z.rs", "src/a.rs", "src/mod/", "README.md", "docs/"];

    let tree = TreeBuilder::build(&paths);

    assert_eq!(
        tree,
        vec![
            Node::dir("docs", vec![]),
            Node::dir(
                "src",
                vec![Node::dir("mod", vec![]), Node::file("a.rs"), Node::file("z.rs")]
            ),
            Node::file("README.md"),
        ]
    );
}

#[rstest]
#[case("docs/", vec![Node::dir("docs", vec![])])]
#[case("docs/readme.md", vec![Node::dir("docs", vec![Node::file("readme.md")])])]
#[case("docs", vec![Node::file("docs")])]
#[case("/docs//api/", vec![Node::dir("docs", vec![Node::dir("api", vec![])])])]
#[case("  notes.txt  ", vec![Node::file("notes.txt")])]
fn given_single_entry_when_building_then_trailing_slash_decides_kind(
    #[case] entry: &str,
    #[case] expected: Vec<Node>,
) {
    assert_eq!(TreeBuilder::build(&[entry]), expected);
}

#[test]
fn given_same_list_twice_when_building_then_trees_are_equal() {
    let paths = ["{name}/main.go", "{name}/", "assets/", "b", "a/b/c"];

    let first = TreeBuilder::build(&paths);
    let second = TreeBuilder::build(&paths);

    assert_eq!(first, second);
}

#[test]
fn given_permuted_input_when_building_then_result_is_identical() {
    let forward = TreeBuilder::build(&["x/1", "y", "x/2/", "z/"]);
    let backward = TreeBuilder::build(&["z/", "x/2/", "y", "x/1"]);

    assert_eq!(forward, backward);
}

#[test]
fn given_duplicate_entries_when_building_then_merges_by_name_and_kind() {
    let tree = TreeBuilder::build(&["src/", "src/main.rs", "src/main.rs", "src"]);

    // "src" as file and "src" as directory coexist, duplicates collapse
    assert_eq!(
        tree,
        vec![
            Node::dir("src", vec![Node::file("main.rs")]),
            Node::file("src"),
        ]
    );
}

#[test]
fn given_blank_entries_when_building_then_they_are_ignored() {
    let tree = TreeBuilder::build(&["", "   ", "\t", "/"]);
    assert!(tree.is_empty());
}

#[test]
fn given_nested_path_when_building_then_ancestors_are_directories() {
    let tree = TreeBuilder::build(&["a/b/c.txt"]);

    assert_eq!(tree[0].kind, NodeKind::Directory);
    assert_eq!(tree[0].children[0].kind, NodeKind::Directory);
    assert_eq!(tree[0].children[0].children[0].kind, NodeKind::File);
    assert!(tree[0].children[0].children[0].children.is_empty());
}

#[test]
fn given_placeholders_when_building_template_then_variables_sorted() {
    let template = Template::from_paths(
        "go-service",
        "Go service layout",
        &["{module}/cmd/{name}/main.go", "{module}/internal/", "{env}.yaml"],
    );

    assert_eq!(
        template.variables,
        vec!["env".to_string(), "module".to_string(), "name".to_string()]
    );
    assert_eq!(template.root[0].name, "{module}");
    assert!(template.validate().is_ok());
}
