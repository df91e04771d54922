//! Enumeration types for the crossing simulation.
//!
//! Signal phases, axes, actor kinds, lamp states, lighting modes, and the
//! physical signal heads installed at the four corners of the crossing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Signal phases
// ---------------------------------------------------------------------------

/// One of the four states of the signal cycle.
///
/// The cyclic order is fixed: `AGreen -> AAmber -> BGreen -> BAmber -> AGreen`.
/// Axis A is the X road, axis B is the Z road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Phase {
    /// X traffic flows, Z pedestrians walk.
    AGreen,
    /// X traffic clears the crossing, nobody walks.
    AAmber,
    /// Z traffic flows, X pedestrians walk.
    BGreen,
    /// Z traffic clears the crossing, nobody walks.
    BAmber,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [Self::AGreen, Self::AAmber, Self::BGreen, Self::BAmber];

    /// Return the phase that follows this one in the fixed cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::AGreen => Self::AAmber,
            Self::AAmber => Self::BGreen,
            Self::BGreen => Self::BAmber,
            Self::BAmber => Self::AGreen,
        }
    }

    /// Return the axis whose vehicles this phase addresses (green or amber).
    pub const fn axis(self) -> Axis {
        match self {
            Self::AGreen | Self::AAmber => Axis::X,
            Self::BGreen | Self::BAmber => Axis::Z,
        }
    }

    /// Whether this is one of the two green phases.
    pub const fn is_green(self) -> bool {
        matches!(self, Self::AGreen | Self::BGreen)
    }
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// One of the two perpendicular roads through the crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Axis {
    /// The road running along the world X axis.
    X,
    /// The road running along the world Z axis.
    Z,
}

impl Axis {
    /// Return the perpendicular axis.
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Z,
            Self::Z => Self::X,
        }
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// The kind of a moving actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActorKind {
    /// A car on one of the two roads.
    Vehicle,
    /// A pedestrian on one of the two crosswalks.
    Pedestrian,
}

// ---------------------------------------------------------------------------
// Lamps
// ---------------------------------------------------------------------------

/// The lit lamp of a vehicular signal head. Exactly one is lit at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum VehicleLamp {
    /// Stop.
    Red,
    /// Clear the crossing.
    Amber,
    /// Go.
    Green,
}

/// The lit lamp of a pedestrian signal head. Exactly one is lit at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PedestrianLamp {
    /// Red figure.
    DontWalk,
    /// Green figure.
    Walk,
}

/// The kind of bulb on a signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum BulbColor {
    /// Red bulb.
    Red,
    /// Amber bulb (vehicular heads only).
    Amber,
    /// Green bulb.
    Green,
}

// ---------------------------------------------------------------------------
// Signal heads
// ---------------------------------------------------------------------------

/// A physical signal head installed at a corner of the crossing.
///
/// Which logical axis a head serves is decided by the scene adapter, so a
/// scene built rotated by 90 degrees can swap the assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SignalHead {
    /// Vehicular head at the south-west corner, facing +X.
    VehicleSouthWest,
    /// Vehicular head at the north-east corner, facing -X.
    VehicleNorthEast,
    /// Vehicular head at the south-east corner, facing +Z.
    VehicleSouthEast,
    /// Vehicular head at the north-west corner, facing -Z.
    VehicleNorthWest,
    /// Pedestrian head on the south crosswalk.
    PedestrianSouth,
    /// Pedestrian head on the north crosswalk.
    PedestrianNorth,
    /// Pedestrian head on the east crosswalk.
    PedestrianEast,
    /// Pedestrian head on the west crosswalk.
    PedestrianWest,
}

// ---------------------------------------------------------------------------
// Lighting
// ---------------------------------------------------------------------------

/// Scene lighting mode, toggled by the operator.
///
/// Only affects the visual parameters handed to the renderer; it never
/// changes signal timing or motion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum LightingMode {
    /// High sun, bright sky.
    #[default]
    Day,
    /// Low sun, dark sky.
    Night,
}

impl LightingMode {
    /// Return the mode for the given night flag.
    pub const fn from_night(night: bool) -> Self {
        if night { Self::Night } else { Self::Day }
    }
}
