//! Fixed geometry of the crossing.
//!
//! All coordinates are scalar positions along an actor's travel axis, in
//! world units. Both roads are laid out identically, so the X and Z stop
//! lines coincide; they are kept as separate names so motion code reads the
//! same for either axis.

use crossing_types::Axis;

/// Half the width of the crossing box.
pub const BOX_HALF: f64 = 3.0;

/// Distance from the edge of the box back to the stop line.
pub const STOP_OFFSET: f64 = 0.25;

/// Stop line on the X road. Vehicles behind it halt on red and amber.
pub const STOP_X: f64 = -(BOX_HALF + STOP_OFFSET);

/// Stop line on the Z road.
pub const STOP_Z: f64 = -(BOX_HALF + STOP_OFFSET);

/// Clearance coordinate on the X road. A vehicle at or past it finishes
/// crossing regardless of the signal.
pub const CLEAR_X: f64 = 0.0;

/// Clearance coordinate on the Z road.
pub const CLEAR_Z: f64 = 0.0;

/// A vehicle beyond this coordinate leaves the modelled road and respawns.
pub const VEHICLE_WRAP_AT: f64 = 22.0;

/// Base respawn coordinate for a vehicle that wrapped.
pub const VEHICLE_RESPAWN_AT: f64 = -22.0;

/// Extra respawn distance for vehicles in the odd lane.
pub const VEHICLE_RESPAWN_STAGGER: f64 = 2.0;

/// Starting coordinate of the first vehicle in each queue.
pub const VEHICLE_QUEUE_HEAD: f64 = -14.0;

/// Gap between consecutive vehicles in the starting queue.
pub const VEHICLE_QUEUE_GAP: f64 = 4.0;

/// Cross-axis offset of the two lanes from the road centre line.
pub const VEHICLE_LANE_OFFSET: f64 = 1.2;

/// Where a pedestrian waits on the near curb.
pub const PEDESTRIAN_START: f64 = -BOX_HALF - 0.6;

/// A pedestrian past this coordinate has stepped off the curb and keeps
/// walking whatever the signal shows.
pub const PEDESTRIAN_CURB: f64 = -BOX_HALF - 0.55;

/// A pedestrian past this coordinate has reached the far curb and returns
/// to [`PEDESTRIAN_START`].
pub const PEDESTRIAN_FAR_CURB: f64 = BOX_HALF + 0.7;

/// Fixed cross-axis coordinate of both crosswalk paths.
pub const PEDESTRIAN_PATH: f64 = -BOX_HALF - 0.4;

/// Return the stop line for a road.
pub const fn stop_line(axis: Axis) -> f64 {
    match axis {
        Axis::X => STOP_X,
        Axis::Z => STOP_Z,
    }
}

/// Return the clearance coordinate for a road.
pub const fn clearance(axis: Axis) -> f64 {
    match axis {
        Axis::X => CLEAR_X,
        Axis::Z => CLEAR_Z,
    }
}
