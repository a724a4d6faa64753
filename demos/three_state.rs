//! Three-State Cycle
//!
//! This example runs the same up/down cycle through a graph machine, a
//! derived graph, and a reducer machine.
//!
//! Key concepts:
//! - Shape matchers built by `shape_enum!`
//! - Self-loops and invalid events
//! - Deriving a variant graph without touching the original
//! - Enter and exit listeners
//! - A reducer function as the whole dispatch table
//!
//! Run with: cargo run --example three_state

use switchboard::builder::{go_to, stay};
use switchboard::core::Transition;
use switchboard::machine::{Graph, ReducerMachine, StateMachine};
use switchboard::shape_enum;

shape_enum! {
    enum Level {
        One,
        Two,
        Three,
    }
}

shape_enum! {
    enum Move {
        Up,
        Down,
    }
}

const WALK: [Move; 6] = [Move::Up, Move::Up, Move::Up, Move::Down, Move::Down, Move::Down];

fn describe(transition: &Transition<Level, Move, ()>) -> String {
    match transition {
        Transition::Valid {
            from_state,
            event,
            to_state,
            ..
        } => format!("{from_state:?} --{event:?}--> {to_state:?}"),
        Transition::Invalid { from_state, event } => {
            format!("{from_state:?} --{event:?}--> (invalid)")
        }
    }
}

fn main() {
    println!("=== Three-State Cycle ===\n");

    let cycle: Graph<Level, Move, ()> = Graph::builder()
        .initial_state(Level::One)
        .state_shape("One", |s| s.on_shape("Up", go_to(Level::Two)))
        .state_shape("Two", |s| {
            s.on_shape("Up", go_to(Level::Three))
                .on_shape("Down", go_to(Level::One))
                .on_enter(|_, event| println!("  (entered Two via {event:?})"))
                .on_exit(|_, event| println!("  (left Two via {event:?})"))
        })
        .state_shape("Three", |s| {
            s.on_shape("Up", stay()).on_shape("Down", go_to(Level::Two))
        })
        .build()
        .unwrap();

    println!("Graph machine:");
    let machine = StateMachine::new(cycle.clone());
    for event in WALK {
        println!("{}", describe(&machine.transition(event).unwrap()));
    }

    println!("\nDerived graph (Down from One is a self-loop):");
    let derived = cycle
        .derive()
        .state_shape("One", |s| {
            s.on_shape("Up", go_to(Level::Two)).on_shape("Down", stay())
        })
        .build()
        .unwrap();
    let machine = StateMachine::new(derived);
    for event in [Move::Down, Move::Up] {
        println!("{}", describe(&machine.transition(event).unwrap()));
    }

    println!("\nReducer machine:");
    let reducer = ReducerMachine::state_only(Level::One, |level: &Level, event: &Move| {
        match (level, event) {
            (Level::One, Move::Up) => Some(Level::Two),
            (Level::Two, Move::Up) | (Level::Three, Move::Up) => Some(Level::Three),
            (Level::Three, Move::Down) => Some(Level::Two),
            (Level::Two, Move::Down) => Some(Level::One),
            (Level::One, Move::Down) => None,
        }
    });
    for event in WALK {
        println!("{}", describe(&reducer.transition(event)));
    }

    println!("\nFinal state: {:?}", reducer.state());
    println!("\n=== Example Complete ===");
}
