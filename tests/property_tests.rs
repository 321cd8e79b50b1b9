//! Property-based tests for ordering and dispatch.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use lifecycle_fsm::core::{DispatchPath, Order, OrderToken, Phase, Subject};
use lifecycle_fsm::dispatch::Event;
use lifecycle_fsm::machine::StateMachine;
use lifecycle_fsm::state_enum;
use proptest::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

state_enum! {
    enum Light {
        Off,
        On,
    }
}

prop_compose! {
    fn arbitrary_token()(subject in 0..4u8, verb in 0..4u8) -> OrderToken {
        let subject = match subject {
            0 => Subject::Wildcard,
            1 => Subject::Action,
            2 => Subject::From,
            _ => Subject::To,
        };
        OrderToken::new(subject, Phase::ALL[verb as usize])
    }
}

fn arbitrary_phase() -> impl Strategy<Value = Phase> {
    prop::sample::select(Phase::ALL.to_vec())
}

fn phase_lists() -> impl Strategy<Value = Vec<Phase>> {
    prop::collection::vec(arbitrary_phase(), 1..16)
}

fn token_lists() -> impl Strategy<Value = Vec<OrderToken>> {
    prop::collection::vec(arbitrary_token(), 1..12)
}

fn light_machine() -> StateMachine<Light, ()> {
    StateMachine::builder()
        .initial(Light::Off)
        .target(())
        .transition("flip", Light::Off, Light::On)
        .build()
        .unwrap()
}

/// Position of a phase's wildcard slot in the default template.
fn default_rank(phase: Phase) -> usize {
    let path = DispatchPath::any(phase);
    Order::default()
        .expand("flip", "Off", "On")
        .position(|p| p == path)
        .unwrap()
}

proptest! {
    #[test]
    fn order_text_round_trips(tokens in token_lists()) {
        let order = Order::new(tokens);
        let parsed = Order::parse(order.to_strings()).unwrap();
        prop_assert_eq!(parsed, order);
    }

    #[test]
    fn every_bad_token_is_reported(good in 0..5usize, bad in 1..5usize) {
        let mut tokens: Vec<String> = (0..good).map(|_| "*.start".to_string()).collect();
        tokens.extend((0..bad).map(|i| format!("nowhere{i}.start")));

        let errors = Order::parse(&tokens).unwrap_err();
        prop_assert_eq!(errors.len(), bad);
    }

    #[test]
    fn phases_dispatch_in_template_order(phases in phase_lists()) {
        let machine = light_machine();
        let log = Arc::new(Mutex::new(Vec::new()));

        for (i, phase) in phases.iter().enumerate() {
            let log = Arc::clone(&log);
            machine.on(
                DispatchPath::any(*phase),
                move |event: &Event<Light>, _: &(), _: &[Value]| {
                    log.lock().unwrap().push((event.phase(), i));
                },
            );
        }

        machine.fire("flip", Vec::new()).unwrap();

        let seen = log.lock().unwrap().clone();
        prop_assert_eq!(seen.len(), phases.len());

        // Sorted by template slot first, registration order second.
        let mut expected: Vec<(Phase, usize)> =
            phases.iter().copied().enumerate().map(|(i, p)| (p, i)).collect();
        expected.sort_by_key(|(phase, i)| (default_rank(*phase), *i));
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn expanded_paths_follow_token_subjects(tokens in token_lists()) {
        let order = Order::new(tokens.clone());

        for (token, path) in tokens.iter().zip(order.expand("flip", "Off", "On")) {
            prop_assert_eq!(path.phase(), token.verb);
            let expected = match token.subject {
                Subject::Wildcard => "*",
                Subject::Action => "flip",
                Subject::From => "Off",
                Subject::To => "On",
            };
            prop_assert_eq!(path.name().as_str(), expected);
        }
    }
}
