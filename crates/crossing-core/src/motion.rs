//! Actor motion: vehicles and pedestrians moving through the crossing.
//!
//! Every actor moves along a single axis in the positive direction. Each
//! frame [`step`] reads the [`SignalFlags`] and moves every actor by
//! `speed * dt`, subject to these rules:
//!
//! - A vehicle moves while its axis is green, or once it has reached the
//!   clearance coordinate (it never stops inside the box). Otherwise it
//!   holds its position, except that a vehicle about to run the stop line
//!   parks exactly on it.
//! - A pedestrian moves while its walk flag is set, or once it has stepped
//!   off the curb.
//! - Both kinds wrap around: vehicles past the far end respawn behind the
//!   queue, pedestrians reaching the far curb return to the near one.

use crossing_types::{ActorId, ActorKind, Axis, Position, SignalFlags};

use crate::geometry::{
    PEDESTRIAN_CURB, PEDESTRIAN_FAR_CURB, PEDESTRIAN_PATH, PEDESTRIAN_START, VEHICLE_LANE_OFFSET,
    VEHICLE_QUEUE_GAP, VEHICLE_QUEUE_HEAD, VEHICLE_RESPAWN_AT, VEHICLE_RESPAWN_STAGGER,
    VEHICLE_WRAP_AT, clearance, stop_line,
};

/// Default vehicle speed in units per second.
pub const DEFAULT_VEHICLE_SPEED: f64 = 2.2;

/// Default pedestrian speed in units per second.
pub const DEFAULT_PEDESTRIAN_SPEED: f64 = 1.2;

/// Body colour of the first vehicle on the X road.
const X_BASE_COLOR: u32 = 0x3a_7b_d5;

/// Per-vehicle colour shift on the X road.
const X_COLOR_STEP: u32 = 0x11_11_00;

/// Body colour of the first vehicle on the Z road.
const Z_BASE_COLOR: u32 = 0xff_70_43;

/// Per-vehicle colour shift on the Z road.
const Z_COLOR_STEP: u32 = 0x00_11_00;

/// Colour of the pedestrian gated by `walk_x`.
const PEDESTRIAN_X_COLOR: u32 = 0xb0_8d_f5;

/// Colour of the pedestrian gated by `walk_z`.
const PEDESTRIAN_Z_COLOR: u32 = 0xf5_8d_8d;

/// Mask keeping colours within `0xRRGGBB`.
const RGB_MASK: u32 = 0xff_ff_ff;

/// A vehicle or pedestrian.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Identity.
    pub id: ActorId,
    /// Vehicle or pedestrian.
    pub kind: ActorKind,
    /// The axis whose flag gates this actor.
    pub signal_axis: Axis,
    /// Position along the travel axis.
    pub position: f64,
    /// Fixed cross-axis coordinate.
    pub lane: f64,
    /// Units per second.
    pub speed: f64,
    /// Where the actor reappears after passing the wrap threshold.
    pub respawn_at: f64,
    /// Body colour as `0xRRGGBB`.
    pub color: u32,
}

impl Actor {
    /// Create the `index`-th vehicle of the queue on `axis`.
    ///
    /// Vehicles alternate between the two lanes and start spaced out behind
    /// the stop line.
    pub fn vehicle(axis: Axis, index: u32, speed: f64) -> Self {
        let odd = index & 1 == 1;
        let (base, step) = match axis {
            Axis::X => (X_BASE_COLOR, X_COLOR_STEP),
            Axis::Z => (Z_BASE_COLOR, Z_COLOR_STEP),
        };
        let shift = index.wrapping_mul(step);
        let color = match axis {
            Axis::X => base.wrapping_add(shift),
            Axis::Z => base.wrapping_sub(shift),
        } & RGB_MASK;

        Self {
            id: ActorId::new(),
            kind: ActorKind::Vehicle,
            signal_axis: axis,
            position: VEHICLE_QUEUE_HEAD - VEHICLE_QUEUE_GAP * f64::from(index),
            lane: if odd {
                VEHICLE_LANE_OFFSET
            } else {
                -VEHICLE_LANE_OFFSET
            },
            speed,
            respawn_at: if odd {
                VEHICLE_RESPAWN_AT - VEHICLE_RESPAWN_STAGGER
            } else {
                VEHICLE_RESPAWN_AT
            },
            color,
        }
    }

    /// Create the pedestrian gated by the walk flag of `signal_axis`.
    ///
    /// The pedestrian crosses the *other* road, so it travels along the
    /// perpendicular axis. It starts waiting on the near curb.
    pub fn pedestrian(signal_axis: Axis, speed: f64) -> Self {
        Self {
            id: ActorId::new(),
            kind: ActorKind::Pedestrian,
            signal_axis,
            position: PEDESTRIAN_START,
            lane: PEDESTRIAN_PATH,
            speed,
            respawn_at: PEDESTRIAN_START,
            color: match signal_axis {
                Axis::X => PEDESTRIAN_X_COLOR,
                Axis::Z => PEDESTRIAN_Z_COLOR,
            },
        }
    }

    /// The world axis this actor moves along.
    pub const fn travel_axis(&self) -> Axis {
        match self.kind {
            ActorKind::Vehicle => self.signal_axis,
            ActorKind::Pedestrian => self.signal_axis.other(),
        }
    }

    /// World position of the actor on the road surface.
    pub const fn world_position(&self) -> Position {
        match self.travel_axis() {
            Axis::X => Position {
                x: self.position,
                y: 0.0,
                z: self.lane,
            },
            Axis::Z => Position {
                x: self.lane,
                y: 0.0,
                z: self.position,
            },
        }
    }
}

/// Build the starting cast: `vehicles_per_axis` vehicles on each road
/// (X first) followed by the X-gated and Z-gated pedestrians.
pub fn initial_actors(
    vehicles_per_axis: u32,
    vehicle_speed: f64,
    pedestrian_speed: f64,
) -> Vec<Actor> {
    let mut actors: Vec<Actor> = [Axis::X, Axis::Z]
        .into_iter()
        .flat_map(|axis| {
            (0..vehicles_per_axis).map(move |index| Actor::vehicle(axis, index, vehicle_speed))
        })
        .collect();
    actors.push(Actor::pedestrian(Axis::X, pedestrian_speed));
    actors.push(Actor::pedestrian(Axis::Z, pedestrian_speed));
    actors
}

/// Advance every actor by `dt_secs` under the given flags.
///
/// A negative or non-finite `dt_secs` is treated as 0.
pub fn step(actors: &mut [Actor], flags: SignalFlags, dt_secs: f64) {
    let dt = sanitize_dt(dt_secs);
    for actor in actors.iter_mut() {
        actor.position = match actor.kind {
            ActorKind::Vehicle => next_vehicle_position(
                actor.position,
                actor.signal_axis,
                flags.go(actor.signal_axis),
                actor.speed,
                dt,
                actor.respawn_at,
            ),
            ActorKind::Pedestrian => next_pedestrian_position(
                actor.position,
                flags.walk(actor.signal_axis),
                actor.speed,
                dt,
                actor.respawn_at,
            ),
        };
    }
}

/// Position of a vehicle after `dt` seconds.
///
/// `go` is the green flag of the vehicle's axis.
pub fn next_vehicle_position(
    position: f64,
    axis: Axis,
    go: bool,
    speed: f64,
    dt: f64,
    respawn_at: f64,
) -> f64 {
    let stop = stop_line(axis);
    let past_clear = position >= clearance(axis);
    let next = speed.mul_add(dt, position);

    if go || past_clear {
        if next > VEHICLE_WRAP_AT {
            respawn_at
        } else {
            next
        }
    } else if position < stop && next > stop {
        stop
    } else {
        position
    }
}

/// Position of a pedestrian after `dt` seconds.
///
/// `walk` is the pedestrian's walk flag. Past the far curb the pedestrian
/// goes back to `respawn_at`.
pub fn next_pedestrian_position(
    position: f64,
    walk: bool,
    speed: f64,
    dt: f64,
    respawn_at: f64,
) -> f64 {
    if !(walk || position > PEDESTRIAN_CURB) {
        return position;
    }
    let next = speed.mul_add(dt, position);
    if next > PEDESTRIAN_FAR_CURB {
        respawn_at
    } else {
        next
    }
}

/// Clamp a frame delta to a usable value.
fn sanitize_dt(dt_secs: f64) -> f64 {
    if dt_secs.is_finite() && dt_secs > 0.0 {
        dt_secs
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use crossing_types::Phase;

    use super::*;
    use crate::geometry::{BOX_HALF, CLEAR_X, STOP_X, STOP_Z};

    const EPS: f64 = 1e-9;

    fn red() -> SignalFlags {
        SignalFlags::for_phase(Phase::BGreen)
    }

    fn green_x() -> SignalFlags {
        SignalFlags::for_phase(Phase::AGreen)
    }

    fn vehicle_at(axis: Axis, position: f64) -> Actor {
        let mut v = Actor::vehicle(axis, 0, DEFAULT_VEHICLE_SPEED);
        v.position = position;
        v
    }

    #[test]
    fn clamps_exactly_at_the_stop_line() {
        // 0.05 behind the line; unclamped it would end 2.15 past it.
        let mut actors = vec![vehicle_at(Axis::X, STOP_X - 0.05)];
        step(&mut actors, red(), 1.0);
        assert_eq!(actors[0].position, STOP_X);
    }

    #[test]
    fn clamp_applies_to_the_z_road() {
        let mut actors = vec![vehicle_at(Axis::Z, STOP_Z - 0.5)];
        step(&mut actors, green_x(), 1.0);
        assert_eq!(actors[0].position, STOP_Z);
    }

    #[test]
    fn parked_vehicle_stays_on_the_line() {
        let mut actors = vec![vehicle_at(Axis::X, STOP_X)];
        for _ in 0..10 {
            step(&mut actors, red(), 0.5);
        }
        assert_eq!(actors[0].position, STOP_X);
    }

    #[test]
    fn vehicle_far_from_the_line_holds_on_red() {
        let mut actors = vec![vehicle_at(Axis::X, -14.0)];
        step(&mut actors, red(), 0.1);
        assert_eq!(actors[0].position, -14.0);
    }

    #[test]
    fn vehicle_moves_on_green() {
        let mut actors = vec![vehicle_at(Axis::X, -14.0)];
        step(&mut actors, green_x(), 0.5);
        assert!((actors[0].position - (-14.0 + 1.1)).abs() < EPS);
    }

    #[test]
    fn past_clear_overrides_red() {
        let mut actors = vec![vehicle_at(Axis::X, CLEAR_X), vehicle_at(Axis::X, 1.0)];
        step(&mut actors, red(), 1.0);
        assert!((actors[0].position - 2.2).abs() < EPS);
        assert!((actors[1].position - 3.2).abs() < EPS);
    }

    #[test]
    fn vehicle_inside_box_before_clearance_holds_on_red() {
        let mut actors = vec![vehicle_at(Axis::Z, -1.0)];
        step(&mut actors, green_x(), 1.0);
        assert_eq!(actors[0].position, -1.0);
    }

    #[test]
    fn vehicle_wraps_to_the_back_of_the_road() {
        let even = vehicle_at(Axis::X, 21.9);
        let mut odd = Actor::vehicle(Axis::X, 1, DEFAULT_VEHICLE_SPEED);
        odd.position = 21.9;
        let mut actors = vec![even, odd];
        step(&mut actors, red(), 1.0);
        assert_eq!(actors[0].position, -22.0);
        assert_eq!(actors[1].position, -24.0);
        for actor in &actors {
            assert!(actor.position <= -22.0);
        }
    }

    #[test]
    fn landing_on_the_threshold_does_not_wrap() {
        assert_eq!(
            next_vehicle_position(21.0, Axis::X, true, 1.0, 1.0, -22.0),
            22.0
        );
    }

    #[test]
    fn no_vehicle_escapes_the_modelled_range() {
        let mut actors = initial_actors(5, DEFAULT_VEHICLE_SPEED, DEFAULT_PEDESTRIAN_SPEED);
        for i in 0..2_000 {
            let flags = if i % 200 < 100 { green_x() } else { red() };
            step(&mut actors, flags, 0.05);
            for actor in &actors {
                assert!(actor.position <= 22.0);
                assert!(actor.position >= -24.0 - 16.0);
            }
        }
    }

    #[test]
    fn zero_and_invalid_dt_do_not_move() {
        let mut actors = vec![vehicle_at(Axis::X, -10.0)];
        step(&mut actors, green_x(), 0.0);
        step(&mut actors, green_x(), -1.0);
        step(&mut actors, green_x(), f64::NAN);
        step(&mut actors, green_x(), f64::INFINITY);
        assert_eq!(actors[0].position, -10.0);
    }

    #[test]
    fn pedestrian_waits_on_the_curb_until_walk() {
        let mut ped = vec![Actor::pedestrian(Axis::X, DEFAULT_PEDESTRIAN_SPEED)];
        step(&mut ped, green_x(), 1.0);
        assert_eq!(ped[0].position, PEDESTRIAN_START);

        // walk_x is set during B green.
        step(&mut ped, red(), 1.0);
        assert!((ped[0].position - (PEDESTRIAN_START + 1.2)).abs() < EPS);
    }

    #[test]
    fn pedestrian_off_the_curb_finishes_crossing() {
        let mut ped = vec![Actor::pedestrian(Axis::Z, DEFAULT_PEDESTRIAN_SPEED)];
        ped[0].position = 0.0;
        // walk_z is false during B green.
        step(&mut ped, red(), 1.0);
        assert!((ped[0].position - 1.2).abs() < EPS);
    }

    #[test]
    fn pedestrian_returns_to_near_curb() {
        let mut ped = vec![Actor::pedestrian(Axis::Z, DEFAULT_PEDESTRIAN_SPEED)];
        ped[0].position = BOX_HALF + 0.6;
        step(&mut ped, red(), 1.0);
        assert_eq!(ped[0].position, PEDESTRIAN_START);
        // Back behind the curb, so it waits again.
        step(&mut ped, red(), 1.0);
        assert_eq!(ped[0].position, PEDESTRIAN_START);
    }

    #[test]
    fn pedestrian_returns_to_its_own_respawn_point() {
        let mut ped = vec![Actor::pedestrian(Axis::X, DEFAULT_PEDESTRIAN_SPEED)];
        ped[0].respawn_at = -5.0;
        ped[0].position = BOX_HALF + 0.6;
        step(&mut ped, green_x(), 1.0);
        assert_eq!(ped[0].position, -5.0);
        assert_eq!(next_pedestrian_position(3.6, true, 1.0, 1.0, -4.0), -4.0);
        assert_eq!(next_pedestrian_position(3.0, true, 1.0, 0.5, -4.0), 3.5);
    }

    #[test]
    fn initial_cast_layout() {
        let actors = initial_actors(5, DEFAULT_VEHICLE_SPEED, DEFAULT_PEDESTRIAN_SPEED);
        assert_eq!(actors.len(), 12);

        let x_cars: Vec<&Actor> = actors
            .iter()
            .filter(|a| a.kind == ActorKind::Vehicle && a.signal_axis == Axis::X)
            .collect();
        assert_eq!(x_cars.len(), 5);
        let positions: Vec<f64> = x_cars.iter().map(|a| a.position).collect();
        assert_eq!(positions, vec![-14.0, -18.0, -22.0, -26.0, -30.0]);
        assert_eq!(x_cars[0].lane, -1.2);
        assert_eq!(x_cars[1].lane, 1.2);
        assert_eq!(x_cars[0].color, 0x3a_7b_d5);
        assert_eq!(x_cars[1].color, 0x4b_8c_d5);

        let z_first = actors
            .iter()
            .find(|a| a.kind == ActorKind::Vehicle && a.signal_axis == Axis::Z)
            .unwrap();
        assert_eq!(z_first.color, 0xff_70_43);

        let pedestrians = actors
            .iter()
            .filter(|a| a.kind == ActorKind::Pedestrian)
            .count();
        assert_eq!(pedestrians, 2);
        for actor in &actors {
            assert!(actor.position < STOP_X, "{actor:?} starts past the line");
        }
    }

    #[test]
    fn pedestrian_crosses_the_other_road() {
        let ped = Actor::pedestrian(Axis::Z, DEFAULT_PEDESTRIAN_SPEED);
        assert_eq!(ped.travel_axis(), Axis::X);
        let pos = ped.world_position();
        assert_eq!(pos.x, PEDESTRIAN_START);
        assert_eq!(pos.z, PEDESTRIAN_PATH);
    }

    #[test]
    fn vehicle_world_position_uses_lane() {
        let car = Actor::vehicle(Axis::Z, 1, DEFAULT_VEHICLE_SPEED);
        let pos = car.world_position();
        assert_eq!(pos.x, 1.2);
        assert_eq!(pos.z, -18.0);
        assert_eq!(pos.y, 0.0);
    }
}
