// tests/priority_key.rs

mod common;
use crate::common::builders::GraphBuilder;

use std::cmp::Ordering;
use std::error::Error;

use calgraph::dag::{PriorityKey, compare_priority};
use calgraph::errors::CalGraphError;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn fewer_predecessors_come_first() {
    let blocked = PriorityKey::new(2, 5, "a");
    let free = PriorityKey::new(0, 0, "z");
    assert_eq!(compare_priority(&free, &blocked), Ordering::Less);
    assert_eq!(compare_priority(&blocked, &free), Ordering::Greater);
}

#[test]
fn more_successors_break_in_degree_ties() {
    let fan_out = PriorityKey::new(1, 3, "z");
    let leaf = PriorityKey::new(1, 0, "a");
    assert_eq!(compare_priority(&fan_out, &leaf), Ordering::Less);
}

#[test]
fn identifier_is_the_final_tie_break() {
    let a = PriorityKey::new(1, 1, "cal_q0_0");
    let b = PriorityKey::new(1, 1, "cal_q1_0");
    assert_eq!(compare_priority(&a, &b), Ordering::Less);
    assert_eq!(compare_priority(&a, &a.clone()), Ordering::Equal);
}

#[test]
fn ord_matches_the_comparator() {
    let mut keys = vec![
        PriorityKey::new(1, 0, "c"),
        PriorityKey::new(0, 0, "b"),
        PriorityKey::new(1, 2, "a"),
        PriorityKey::new(0, 1, "d"),
    ];
    keys.sort();
    let order: Vec<&str> = keys.iter().map(|k| k.id.as_str()).collect();
    assert_eq!(order, vec!["d", "b", "a", "c"]);
}

#[test]
fn display_mirrors_the_tuple() {
    assert_eq!(PriorityKey::new(0, 2, "q0").to_string(), "(0, -2, 'q0')");
    assert_eq!(PriorityKey::new(3, 0, "cal_q1_0").to_string(), "(3, 0, cal_q1_0)");
}

#[test]
fn keys_are_read_from_current_degrees() -> TestResult {
    let mut graph = GraphBuilder::new()
        .qubit("q0")
        .calibrations(&["cal_a", "cal_b"])
        .edge("q0", "cal_a")
        .edge("cal_b", "cal_a")
        .build();

    assert_eq!(
        PriorityKey::for_node(&graph, "cal_a")?,
        PriorityKey::new(2, 0, "cal_a")
    );

    graph.remove_node("q0")?;
    assert_eq!(
        PriorityKey::for_node(&graph, "cal_a")?,
        PriorityKey::new(1, 0, "cal_a")
    );

    assert!(matches!(
        PriorityKey::for_node(&graph, "q0"),
        Err(CalGraphError::UnknownNode(_))
    ));
    Ok(())
}
