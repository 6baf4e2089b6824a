//! End-to-end graph execution behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weft_core::prelude::*;
use weft_engine::Graph;

fn add_one(name: &str, input: &str, output: &str) -> FnNode {
    let input = input.to_string();
    let output = output.to_string();
    FnNode::new(
        NodeSpec::new(name)
            .with_inputs([input.clone()])
            .with_outputs([output.clone()]),
        move |ws| {
            let value: i64 = ws.get(&input)?;
            ws.set(output.clone(), value + 1);
            Ok(())
        },
    )
}

fn times_two(name: &str, input: &str, output: &str) -> FnNode {
    let input = input.to_string();
    let output = output.to_string();
    FnNode::new(
        NodeSpec::new(name)
            .with_inputs([input.clone()])
            .with_outputs([output.clone()]),
        move |ws| {
            let value: i64 = ws.get(&input)?;
            ws.set(output.clone(), value * 2);
            Ok(())
        },
    )
}

#[test]
fn linear_pipeline() {
    let mut graph = Graph::new("linear");
    graph.add_node(add_one("add_one", "x", "y"));
    graph.add_node(times_two("times_two", "y", "z"));

    let ws = Workspace::new();
    ws.set("x", 10_i64);
    graph.run(&ws, 1, false).unwrap();

    assert_eq!(ws.get::<i64>("z").unwrap(), 22);
}

#[test]
fn diamond_parallelism() {
    let mut graph = Graph::new("diamond");
    graph.add_node(add_one("add_one", "x", "p"));
    graph.add_node(times_two("times_two", "x", "q"));

    let ws = Workspace::new();
    ws.set("x", 10_i64);
    graph.run(&ws, 2, false).unwrap();

    assert_eq!(ws.get::<i64>("p").unwrap(), 11);
    assert_eq!(ws.get::<i64>("q").unwrap(), 20);
}

#[test]
fn single_node_with_no_inputs() {
    let mut graph = Graph::new("solo");
    graph.add_node(FnNode::new(
        NodeSpec::new("seed").with_outputs(["seeded"]),
        |ws| {
            ws.set("seeded", String::from("ready"));
            Ok(())
        },
    ));

    let ws = Workspace::new();
    graph.run(&ws, 4, false).unwrap();
    assert_eq!(ws.get::<String>("seeded").unwrap(), "ready");
}

#[test]
fn zero_threads_still_runs() {
    let mut graph = Graph::new("coerced");
    graph.add_node(add_one("add_one", "x", "y"));

    let ws = Workspace::new();
    ws.set("x", 1_i64);
    graph.run(&ws, 0, false).unwrap();
    assert_eq!(ws.get::<i64>("y").unwrap(), 2);
}

#[test]
fn empty_graph_returns_immediately() {
    let graph = Graph::new("empty");
    let ws = Workspace::new();
    graph.run(&ws, 8, false).unwrap();
    assert!(ws.is_empty());
}

#[test]
fn cycle_is_rejected_before_any_node_runs() {
    let touched = Arc::new(AtomicUsize::new(0));

    let mut graph = Graph::new("cyclic");
    for (name, input, output) in [("a", "b_out", "a_out"), ("b", "a_out", "b_out")] {
        let touched = Arc::clone(&touched);
        let input = input.to_string();
        let output = output.to_string();
        graph.add_node(FnNode::new(
            NodeSpec::new(name)
                .with_inputs([input.clone()])
                .with_outputs([output.clone()]),
            move |ws| {
                touched.fetch_add(1, Ordering::SeqCst);
                let value: i64 = ws.get(&input)?;
                ws.set(output.clone(), value);
                Ok(())
            },
        ));
    }

    let ws = Workspace::new();
    let err = graph.run(&ws, 2, false).unwrap_err();
    assert!(matches!(err, WeftError::CycleOrNoEntry));
    assert_eq!(touched.load(Ordering::SeqCst), 0);
}

#[test]
fn every_node_executes_exactly_once() {
    let executions = Arc::new(AtomicUsize::new(0));

    // A wide layer of independent nodes all feeding one join.
    let mut graph = Graph::new("fanout");
    let width = 24;
    for i in 0..width {
        let executions = Arc::clone(&executions);
        graph.add_node(FnNode::new(
            NodeSpec::new(format!("worker_{i}"))
                .with_inputs(["seed"])
                .with_outputs([format!("out_{i}")]),
            move |ws| {
                executions.fetch_add(1, Ordering::SeqCst);
                let seed: i64 = ws.get("seed")?;
                ws.set(format!("out_{i}"), seed + i as i64);
                Ok(())
            },
        ));
    }
    let join_inputs: Vec<String> = (0..width).map(|i| format!("out_{i}")).collect();
    let join_executions = Arc::clone(&executions);
    graph.add_node(FnNode::new(
        NodeSpec::new("join")
            .with_inputs(join_inputs.clone())
            .with_outputs(["sum"]),
        move |ws| {
            join_executions.fetch_add(1, Ordering::SeqCst);
            let mut sum = 0_i64;
            for key in &join_inputs {
                sum += ws.get::<i64>(key)?;
            }
            ws.set("sum", sum);
            Ok(())
        },
    ));

    let ws = Workspace::new();
    ws.set("seed", 100_i64);
    graph.run(&ws, 4, false).unwrap();

    assert_eq!(executions.load(Ordering::SeqCst), width + 1);
    let expected: i64 = (0..width as i64).map(|i| 100 + i).sum();
    assert_eq!(ws.get::<i64>("sum").unwrap(), expected);
}

#[test]
fn dependencies_resolve_before_consumers_run() {
    // A 40-deep chain: any ordering violation shows up as a missing key.
    let depth = 40;
    let mut graph = Graph::new("chain");
    for i in 0..depth {
        let input = if i == 0 {
            "seed".to_string()
        } else {
            format!("link_{}", i - 1)
        };
        graph.add_node(add_one(&format!("step_{i}"), &input, &format!("link_{i}")));
    }

    let ws = Workspace::new();
    ws.set("seed", 0_i64);
    graph.run(&ws, 8, false).unwrap();
    assert_eq!(
        ws.get::<i64>(&format!("link_{}", depth - 1)).unwrap(),
        depth as i64
    );
}

#[test]
fn fail_fast_surfaces_exactly_one_error() {
    let good_runs = Arc::new(AtomicUsize::new(0));

    let mut graph = Graph::new("failing");
    graph.add_node(FnNode::new(
        NodeSpec::new("seed").with_outputs(["seeded"]),
        |ws| {
            ws.set("seeded", 1_i64);
            Ok(())
        },
    ));
    let counted = Arc::clone(&good_runs);
    graph.add_node(FnNode::new(
        NodeSpec::new("good")
            .with_inputs(["seeded"])
            .with_outputs(["good_out"]),
        move |ws| {
            counted.fetch_add(1, Ordering::SeqCst);
            ws.set("good_out", 2_i64);
            Ok(())
        },
    ));
    graph.add_node(FnNode::new(
        NodeSpec::new("bad")
            .with_inputs(["seeded"])
            .with_outputs(["bad_out"]),
        |_| {
            Err(WeftError::NodeFailure {
                cause: "deliberate failure".to_string(),
            })
        },
    ));

    let ws = Workspace::new();
    let err = graph.run(&ws, 2, false).unwrap_err();

    match err {
        WeftError::NodeExecution { node, cause } => {
            assert_eq!(node, "bad");
            assert!(cause.contains("deliberate failure"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // "good" may or may not have been dispatched before the failure; both
    // outcomes are valid, and it can have run at most once.
    assert!(good_runs.load(Ordering::SeqCst) <= 1);
}

#[test]
fn store_error_inside_a_node_is_wrapped() {
    let mut graph = Graph::new("misread");
    graph.add_node(FnNode::new(
        NodeSpec::new("reader").with_inputs(["absent"]),
        |ws| {
            let _: i64 = ws.get("absent_key_nobody_wrote")?;
            Ok(())
        },
    ));

    let ws = Workspace::new();
    let err = graph.run(&ws, 1, false).unwrap_err();
    match err {
        WeftError::NodeExecution { node, cause } => {
            assert_eq!(node, "reader");
            assert!(cause.contains("E301"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn run_is_repeatable_on_the_same_graph() {
    let mut graph = Graph::new("twice");
    graph.add_node(add_one("add_one", "x", "y"));

    let first = Workspace::new();
    first.set("x", 1_i64);
    graph.run(&first, 2, false).unwrap();
    assert_eq!(first.get::<i64>("y").unwrap(), 2);

    let second = Workspace::new();
    second.set("x", 10_i64);
    graph.run(&second, 2, false).unwrap();
    assert_eq!(second.get::<i64>("y").unwrap(), 11);
}

#[test]
fn profiling_run_still_produces_outputs() {
    let mut graph = Graph::new("profiled");
    graph.add_node(add_one("add_one", "x", "y"));
    graph.add_node(times_two("times_two", "y", "z"));

    let ws = Workspace::new();
    ws.set("x", 3_i64);
    graph.run(&ws, 2, true).unwrap();
    assert_eq!(ws.get::<i64>("z").unwrap(), 8);
}
