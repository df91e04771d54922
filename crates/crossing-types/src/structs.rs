//! Core structs shared between the simulation and the renderer boundary.
//!
//! [`SignalFlags`] is derived from a [`Phase`] and never stored on its own.
//! Everything else in this module is a per-frame value handed to the
//! renderer inside a [`FrameSnapshot`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    ActorKind, Axis, BulbColor, LightingMode, PedestrianLamp, Phase, SignalHead, VehicleLamp,
};
use crate::ids::ActorId;

// ---------------------------------------------------------------------------
// Signal flags
// ---------------------------------------------------------------------------

/// Movement permissions derived from the current phase.
///
/// Pedestrians on an axis walk while vehicles on the *other* axis have the
/// green, so they cross in the gap left by the perpendicular flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SignalFlags {
    /// Vehicles on the X road may proceed.
    pub go_x: bool,
    /// Vehicles on the Z road may proceed.
    pub go_z: bool,
    /// The X-gated pedestrian may step off the curb.
    pub walk_x: bool,
    /// The Z-gated pedestrian may step off the curb.
    pub walk_z: bool,
}

impl SignalFlags {
    /// Derive the flags for a phase.
    pub const fn for_phase(phase: Phase) -> Self {
        Self {
            go_x: matches!(phase, Phase::AGreen),
            go_z: matches!(phase, Phase::BGreen),
            walk_x: matches!(phase, Phase::BGreen),
            walk_z: matches!(phase, Phase::AGreen),
        }
    }

    /// Vehicle permission for the given axis.
    pub const fn go(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.go_x,
            Axis::Z => self.go_z,
        }
    }

    /// Pedestrian permission for the given axis.
    pub const fn walk(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.walk_x,
            Axis::Z => self.walk_z,
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point in world space. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// World X coordinate.
    pub x: f64,
    /// World Y coordinate (height above the road surface).
    pub y: f64,
    /// World Z coordinate.
    pub z: f64,
}

// ---------------------------------------------------------------------------
// Signal heads
// ---------------------------------------------------------------------------

/// The lamp state shown by one signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HeadState {
    /// State of a vehicular head.
    Vehicle(VehicleLamp),
    /// State of a pedestrian head.
    Pedestrian(PedestrianLamp),
}

/// Material parameters for one bulb on a signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bulb {
    /// Which bulb this is.
    pub color: BulbColor,
    /// Whether the bulb is lit.
    pub lit: bool,
    /// Diffuse colour as `0xRRGGBB`.
    pub rgb: u32,
    /// Emissive colour as `0xRRGGBB` (black when unlit).
    pub emissive: u32,
}

/// Instruction for the renderer to switch one physical head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FixtureCommand {
    /// The physical head to update.
    pub head: SignalHead,
    /// The lamp that must be lit.
    pub state: HeadState,
    /// Material parameters for every bulb on the head, top to bottom.
    pub bulbs: Vec<Bulb>,
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Render-facing view of one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActorSnapshot {
    /// Actor identity.
    pub id: ActorId,
    /// Vehicle or pedestrian.
    pub kind: ActorKind,
    /// The axis whose signal gates this actor.
    pub signal_axis: Axis,
    /// The world axis the actor moves along.
    pub travel_axis: Axis,
    /// World position.
    pub position: Position,
    /// Body colour as `0xRRGGBB`.
    pub color: u32,
}

// ---------------------------------------------------------------------------
// Lighting
// ---------------------------------------------------------------------------

/// Sky and light parameters for a lighting mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LightingProfile {
    /// The mode these parameters belong to.
    pub mode: LightingMode,
    /// Sun elevation above the horizon in degrees.
    pub sun_elevation_deg: f64,
    /// Sun azimuth in degrees.
    pub sun_azimuth_deg: f64,
    /// Hemisphere (ambient) light intensity.
    pub hemisphere_intensity: f64,
    /// Directional (sun) light intensity.
    pub directional_intensity: f64,
    /// Scene background colour as `0xRRGGBB`.
    pub background: u32,
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// Everything the renderer needs after one tick.
///
/// Fixture commands and the lighting profile are only present on frames
/// where they changed; the first frame of a run carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FrameSnapshot {
    /// Frame number, starting at 1 for the first tick.
    pub frame: u64,
    /// Milliseconds since the run started.
    pub elapsed_ms: u64,
    /// Current signal phase.
    pub phase: Phase,
    /// Whether the phase changed during this tick.
    pub phase_changed: bool,
    /// Milliseconds left in the current phase.
    pub phase_remaining_ms: u64,
    /// Flags derived from `phase`.
    pub flags: SignalFlags,
    /// Heads that must switch this frame.
    pub fixture_updates: Vec<FixtureCommand>,
    /// Every actor's position after this tick.
    pub actors: Vec<ActorSnapshot>,
    /// Current lighting mode.
    pub lighting_mode: LightingMode,
    /// New lighting parameters, when the mode changed this frame.
    pub lighting_update: Option<LightingProfile>,
}
