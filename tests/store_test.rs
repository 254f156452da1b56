//! Integration tests for the ordered course store.

use rstest::rstest;

use advisor::domain::{Course, CourseTree, TreeRender, MAX_RENDER_DEPTH};
use advisor::util::testing;

fn course(number: &str, title: &str) -> Course {
    Course::new(number, title, vec![])
}

fn tree_of(numbers: &[&str]) -> CourseTree {
    let mut tree = CourseTree::new();
    for number in numbers {
        tree.insert(course(number, &format!("Title {number}")));
    }
    tree
}

#[rstest]
#[case(&["CSCI200", "CSCI100", "MATH201"])]
#[case(&["MATH201", "CSCI200", "CSCI100"])]
#[case(&["CSCI100", "CSCI200", "MATH201"])]
fn given_any_insertion_order_when_iterating_then_ascending(#[case] numbers: &[&str]) {
    testing::init_test_setup();
    // Arrange
    let tree = tree_of(numbers);

    // Act
    let listed: Vec<&str> = tree.iter().map(Course::number).collect();

    // Assert
    assert_eq!(listed, vec!["CSCI100", "CSCI200", "MATH201"]);
}

#[test]
fn given_tree_when_iterating_twice_then_same_sequence() {
    let tree = tree_of(&["B", "A", "C", "AA"]);

    let first: Vec<&Course> = tree.iter().collect();
    let second: Vec<&Course> = (&tree).into_iter().collect();

    assert_eq!(first, second);
}

#[test]
fn given_duplicate_inserts_when_counting_then_every_insert_counts() {
    let mut tree = CourseTree::new();

    tree.insert(course("CSCI100", "First"));
    tree.insert(course("CSCI100", "Second"));
    tree.insert(course("CSCI050", "Other"));

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.iter().count(), 3);
    let found = tree.search("CSCI100").expect("duplicate key is searchable");
    assert!(found.title() == "First" || found.title() == "Second");
}

#[test]
fn given_inserted_courses_when_searching_then_each_is_found() {
    let numbers = ["M", "C", "X", "A", "E", "Z"];
    let tree = tree_of(&numbers);

    for number in numbers {
        let found = tree.search(number).expect("inserted course should be found");
        assert_eq!(found.number(), number);
        assert_eq!(found.title(), format!("Title {number}"));
    }
}

#[rstest]
#[case("csci100")]
#[case("CSCI10")]
#[case("CSCI1000")]
#[case("")]
fn given_non_matching_key_when_searching_then_none(#[case] key: &str) {
    let tree = tree_of(&["CSCI100", "CSCI200"]);

    assert!(tree.search(key).is_none());
    assert!(tree.search_or_empty(key).is_empty());
}

#[test]
fn given_byte_order_keys_when_iterating_then_uppercase_sorts_before_lowercase() {
    let tree = tree_of(&["b", "B", "a", "A"]);

    let listed: Vec<&str> = tree.iter().map(Course::number).collect();

    assert_eq!(listed, vec!["A", "B", "a", "b"]);
}

#[test]
fn given_small_tree_when_rendering_then_shows_missing_children() {
    let tree = tree_of(&["B", "C"]);

    let rendered = tree.to_tree_string().to_string();

    assert!(rendered.starts_with("B\n"), "root first: {rendered}");
    assert!(rendered.contains('-'));
    assert!(rendered.contains('C'));
}

#[test]
fn given_empty_tree_when_rendering_then_placeholder() {
    let rendered = CourseTree::new().to_tree_string().to_string();
    assert!(rendered.contains("Empty tree"));
}

#[test]
fn given_large_sorted_input_when_rendering_then_output_is_capped() {
    testing::init_test_setup();
    // Arrange: sorted keys degrade the tree to a right-leaning list
    let mut tree = CourseTree::new();
    for i in 0..20_000 {
        tree.insert(course(&format!("C{i:06}"), "t"));
    }
    assert_eq!(tree.depth(), 20_000);

    // Act
    let rendered = tree.to_tree_string().to_string();

    // Assert
    assert!(rendered.starts_with("C000000\n"));
    assert!(rendered.contains('…'));
    assert!(!rendered.contains(&format!("C{:06}", MAX_RENDER_DEPTH)));
    assert!(rendered.lines().count() < 4 * MAX_RENDER_DEPTH);
}
