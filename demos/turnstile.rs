//! Turnstile State Machine
//!
//! This example demonstrates a graph machine with structured states and
//! side-effects.
//!
//! Key concepts:
//! - States and events carrying data (credit, coin value, saved state)
//! - Shape matchers and value matchers
//! - Side-effects reported on the transition record
//! - Recording a session with a transition listener
//!
//! Run with: RUST_LOG=switchboard=debug cargo run --example turnstile

use switchboard::builder::go_to_with;
use switchboard::core::{Matcher, Recorder, Transition};
use switchboard::machine::{StateMachine, TransitionTo};
use switchboard::shape_enum;

const FARE: u32 = 50;

shape_enum! {
    enum State {
        Locked { credit: u32 },
        Unlocked,
        Broken { old_state: Box<State> },
    }
}

shape_enum! {
    enum Event {
        InsertCoin(u32),
        AdmitPerson,
        MachineDidFail,
        MachineRepairDidComplete,
    }
}

#[derive(Clone, PartialEq, Debug)]
enum Command {
    SoundAlarm,
    CloseDoors,
    OpenDoors,
    OrderRepair,
    Refund,
}

fn break_down(state: &State, _: &Event) -> TransitionTo<State, Command> {
    TransitionTo::to_with(
        State::Broken {
            old_state: Box::new(state.clone()),
        },
        Command::OrderRepair,
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile State Machine ===\n");

    let recorder: Recorder<State, Event, Command> = Recorder::new();
    let machine = StateMachine::create(|graph| {
        graph
            .initial_state(State::Locked { credit: 0 })
            .state_shape("Locked", |s| {
                s.on_shape("InsertCoin", |state, event| match (state, event) {
                    (State::Locked { credit }, Event::InsertCoin(value)) if credit + value >= FARE => {
                        TransitionTo::to_with(State::Unlocked, Command::OpenDoors)
                    }
                    (State::Locked { credit }, Event::InsertCoin(value)) => {
                        TransitionTo::to(State::Locked { credit: credit + value })
                    }
                    _ => TransitionTo::stay(state),
                })
                .on(Matcher::eq(Event::AdmitPerson), |state, _| {
                    TransitionTo::stay_with(state, Command::SoundAlarm)
                })
                .on(Matcher::eq(Event::MachineDidFail), break_down)
            })
            .state_shape("Unlocked", |s| {
                s.on_shape("InsertCoin", |state, _| {
                    TransitionTo::stay_with(state, Command::Refund)
                })
                .on(
                    Matcher::eq(Event::AdmitPerson),
                    go_to_with(State::Locked { credit: 0 }, Command::CloseDoors),
                )
                .on(Matcher::eq(Event::MachineDidFail), break_down)
            })
            .state_shape("Broken", |s| {
                s.on(Matcher::eq(Event::MachineRepairDidComplete), |state, _| {
                    match state {
                        State::Broken { old_state } => TransitionTo::to((**old_state).clone()),
                        other => TransitionTo::stay(other),
                    }
                })
            })
            .on_transition(recorder.listener())
    })
    .unwrap();

    println!("Initial state: {:?}\n", machine.state());

    let events = vec![
        Event::InsertCoin(20),
        Event::AdmitPerson,
        Event::InsertCoin(30),
        Event::InsertCoin(5),
        Event::MachineDidFail,
        Event::AdmitPerson,
        Event::MachineRepairDidComplete,
        Event::AdmitPerson,
    ];

    for event in events {
        match machine.transition(event).unwrap() {
            Transition::Valid {
                event,
                to_state,
                side_effect,
                ..
            } => println!("{event:?} -> {to_state:?} (command: {side_effect:?})"),
            Transition::Invalid { from_state, event } => {
                println!("{event:?} rejected in {from_state:?}")
            }
        }
    }

    let log = recorder.snapshot();
    println!("\nRecorded {} transitions", log.entries().len());
    println!("Path taken: {:?}", log.get_path());
    println!("Final state: {:?}", machine.state());

    println!("\n=== Example Complete ===");
}
