//! Signal phase cycle, actor motion, and frame loop for the crossing simulation.
//!
//! This crate owns everything between the frame clock and the renderer
//! boundary. Each frame runs the same sequence: read the clock, advance the
//! signal phase, derive the movement flags, move every actor, and hand a
//! [`FrameSnapshot`] to the renderer.
//!
//! # Modules
//!
//! - [`clock`] -- [`FrameClock`] trait with a monotonic and a manual clock.
//! - [`config`] -- Configuration loading from `crossing-config.yaml`.
//! - [`geometry`] -- Stop lines, clearance coordinates, and curb positions.
//! - [`phase`] -- The four-state fixed-duration [`PhaseController`].
//! - [`motion`] -- Vehicle and pedestrian position updates.
//! - [`scene`] -- Lamp states, bulb colours, and lighting for the renderer.
//! - [`tick`] -- [`SimulationState`] and the single-frame tick function.
//! - [`operator`] -- Shared pause, stop, speed, and day/night controls.
//! - [`runner`] -- The async frame loop.
//!
//! [`FrameSnapshot`]: crossing_types::FrameSnapshot
//! [`FrameClock`]: clock::FrameClock
//! [`PhaseController`]: phase::PhaseController
//! [`SimulationState`]: tick::SimulationState

pub mod clock;
pub mod config;
pub mod geometry;
pub mod motion;
pub mod operator;
pub mod phase;
pub mod runner;
pub mod scene;
pub mod tick;
