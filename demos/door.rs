//! Door With A Lock
//!
//! This example walks a door through its lifecycle handlers.
//!
//! Key concepts:
//! - Wildcard and named handlers in the default order
//! - A handler vetoing a transition
//! - Pausing for slow work and resuming later
//! - A dynamic destination chosen from params
//!
//! Run with: cargo run --example door

use lifecycle_fsm::core::{DispatchPath, Phase};
use lifecycle_fsm::dispatch::{Event, HandlerOutcome};
use lifecycle_fsm::machine::StateMachine;
use lifecycle_fsm::state_enum;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};

state_enum! {
    enum Door {
        Closed,
        Open,
        Locked,
    }
}

struct House {
    alarm_armed: AtomicBool,
}

fn main() {
    println!("=== Door Lifecycle ===\n");

    let door = StateMachine::builder()
        .initial(Door::Closed)
        .target(House {
            alarm_armed: AtomicBool::new(true),
        })
        .transition("open", Door::Closed, Door::Open)
        .transition("close", Door::Open, Door::Closed)
        .transition("lock", Door::Closed, Door::Locked)
        .transition("unlock", Door::Locked, Door::Closed)
        .dynamic("slam", Door::Open, |_: &House, params: &[Value]| {
            if params.first().and_then(Value::as_bool).unwrap_or(false) {
                Door::Locked
            } else {
                Door::Closed
            }
        })
        .transition("latch", Door::Open, Door::Locked)
        .build()
        .unwrap();

    for phase in Phase::ALL {
        door.on(
            DispatchPath::any(phase),
            |event: &Event<Door>, _: &House, _: &[Value]| {
                println!("  {:<20} {:?} -> {:?}", event.path(), event.from(), event.to());
            },
        );
    }

    // Veto opening while the alarm is armed.
    door.on(
        DispatchPath::named("Closed", Phase::Leave),
        |event: &Event<Door>, house: &House, _: &[Value]| {
            let blocked = event.action() == "open" && house.alarm_armed.load(Ordering::SeqCst);
            if blocked {
                println!("  alarm armed, refusing to open");
                HandlerOutcome::Cancel
            } else {
                HandlerOutcome::Continue
            }
        },
    );

    println!("Opening with alarm armed:");
    door.fire("open", Vec::new()).unwrap();
    println!("State: {:?}\n", door.state());

    door.target().alarm_armed.store(false, Ordering::SeqCst);

    // Hold the transition until the hinges report back.
    door.on(
        DispatchPath::named("Open", Phase::Enter),
        |_: &Event<Door>, _: &House, _: &[Value]| {
            println!("  waiting for hinges...");
            true
        },
    );

    println!("Opening with alarm off:");
    door.fire("open", Vec::new()).unwrap();
    println!("Paused: {}, state: {:?}", door.is_paused(), door.state());
    door.resume().unwrap();
    println!("State: {:?}\n", door.state());

    println!("Slamming with the latch engaged:");
    let transition = door.fire("slam", vec![json!(true)]).unwrap();
    println!("Action taken: {}", transition.action());
    println!("State: {:?}\n", door.state());

    println!("Snapshot:");
    println!("{}", door.snapshot().to_json().unwrap());

    println!("\n=== Example Complete ===");
}
