//! End-to-end scenarios: full cycles of signals and traffic driven through
//! the public API.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::arithmetic_side_effects
)]

use crossing_core::config::CrossingConfig;
use crossing_core::geometry::{CLEAR_X, STOP_X, STOP_Z};
use crossing_core::tick::{SimulationState, run_tick};
use crossing_types::{ActorKind, Axis, FrameSnapshot, HeadState, Phase, VehicleLamp};

fn run_frames(state: &mut SimulationState, step_ms: u64, frames: u64) -> Vec<FrameSnapshot> {
    (0..frames)
        .map(|i| run_tick(state, i * step_ms, false))
        .collect()
}

fn stock() -> SimulationState {
    SimulationState::from_config(&CrossingConfig::default()).unwrap()
}

#[test]
fn phase_sequence_over_two_cycles() {
    let mut state = stock();
    let frames = run_frames(&mut state, 10, 1_601);
    let changes: Vec<(u64, Phase)> = frames
        .iter()
        .filter(|f| f.phase_changed)
        .map(|f| (f.elapsed_ms, f.phase))
        .collect();
    assert_eq!(
        changes,
        vec![
            (3_000, Phase::AAmber),
            (4_000, Phase::BGreen),
            (7_000, Phase::BAmber),
            (8_000, Phase::AGreen),
            (11_000, Phase::AAmber),
            (12_000, Phase::BGreen),
            (15_000, Phase::BAmber),
            (16_000, Phase::AGreen),
        ]
    );
}

#[test]
fn never_two_greens_at_once() {
    let mut state = stock();
    for frame in run_frames(&mut state, 16, 2_000) {
        assert!(!(frame.flags.go_x && frame.flags.go_z));
        let greens = frame
            .fixture_updates
            .iter()
            .filter(|c| c.state == HeadState::Vehicle(VehicleLamp::Green))
            .count();
        assert!(greens == 0 || greens == 2, "{greens} green heads");
    }
}

#[test]
fn z_queue_waits_then_clears_on_its_green() {
    let mut state = stock();
    let z_lead = state
        .actors
        .iter()
        .position(|a| a.kind == ActorKind::Vehicle && a.signal_axis == Axis::Z)
        .unwrap();

    // Throughout AGreen and AAmber the Z queue is red.
    let _ = run_frames(&mut state, 16, 250);
    assert!(state.actors[z_lead].position <= STOP_Z);

    // Keep going into BGreen: the lead vehicle moves on.
    let start = state.actors[z_lead].position;
    for i in 250..400_u64 {
        let _ = run_tick(&mut state, i * 16, false);
    }
    assert_eq!(state.phase.phase(), Phase::BGreen);
    assert!(state.actors[z_lead].position > start);
}

#[test]
fn x_vehicles_never_stop_inside_the_box() {
    let mut state = stock();
    for i in 0..3_000_u64 {
        let before: Vec<f64> = state.actors.iter().map(|a| a.position).collect();
        let frame = run_tick(&mut state, i * 16, false);
        for (actor, prev) in state.actors.iter().zip(before) {
            if actor.kind == ActorKind::Vehicle && prev >= CLEAR_X && actor.position > -20.0 {
                assert!(
                    actor.position > prev,
                    "vehicle stalled at {prev} in {:?}",
                    frame.phase
                );
            }
        }
    }
}

#[test]
fn stopped_x_vehicles_stay_behind_the_line() {
    let mut state = stock();
    for i in 0..3_000_u64 {
        let before: Vec<f64> = state.actors.iter().map(|a| a.position).collect();
        let frame = run_tick(&mut state, i * 16, false);
        if frame.flags.go_x {
            continue;
        }
        for (actor, prev) in state.actors.iter().zip(before) {
            if actor.kind == ActorKind::Vehicle && actor.signal_axis == Axis::X && prev <= STOP_X {
                assert!(actor.position <= STOP_X, "ran the line from {prev}");
            }
        }
    }
}

#[test]
fn pedestrians_cross_and_return_to_the_curb() {
    let mut state = stock();
    let walker = state
        .actors
        .iter()
        .position(|a| a.kind == ActorKind::Pedestrian && a.signal_axis == Axis::Z)
        .unwrap();
    let mut wrapped = false;
    let mut last = state.actors[walker].position;
    for i in 0..2_000_u64 {
        let _ = run_tick(&mut state, i * 16, false);
        let now = state.actors[walker].position;
        if now < last {
            wrapped = true;
            assert_eq!(now, -3.6);
        }
        last = now;
    }
    assert!(wrapped);
}

#[test]
fn long_stall_advances_a_single_phase() {
    let mut state = stock();
    let _ = run_tick(&mut state, 0, false);
    let frame = run_tick(&mut state, 60_000, false);
    assert!(frame.phase_changed);
    assert_eq!(frame.phase, Phase::AAmber);
    assert_eq!(frame.phase_remaining_ms, 1_000);
}

#[test]
fn frames_serialize_to_json() {
    let mut state = stock();
    let frame = run_tick(&mut state, 0, false);
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["phase"], "AGreen");
    assert_eq!(json["fixture_updates"].as_array().map(Vec::len), Some(8));
    assert_eq!(json["actors"].as_array().map(Vec::len), Some(12));
}
