//! Renderer boundary: lamp states, bulb colours, lighting, actor views.
//!
//! The simulation never touches materials. It decides which lamp each
//! signal head shows, and this module maps that state to plain colour
//! values the renderer copies onto its materials.
//!
//! # Signal heads
//!
//! | Group          | Heads (default)                           |
//! |----------------|-------------------------------------------|
//! | Vehicles, X    | `VehicleSouthWest`, `VehicleNorthEast`    |
//! | Vehicles, Z    | `VehicleSouthEast`, `VehicleNorthWest`    |
//! | Pedestrians, X | `PedestrianSouth`, `PedestrianNorth`      |
//! | Pedestrians, Z | `PedestrianEast`, `PedestrianWest`        |
//!
//! With `map_swap` the X and Z assignments trade places, for scenes that
//! were built rotated by 90 degrees.

use crossing_types::{
    ActorSnapshot, Axis, Bulb, BulbColor, FixtureCommand, HeadState, LightingMode,
    LightingProfile, PedestrianLamp, Phase, SignalFlags, SignalHead, VehicleLamp,
};

use crate::motion::Actor;

/// Emissive strength of a lit bulb, as a fraction of its lit colour.
const EMISSIVE_NUMERATOR: u16 = 3;
/// See [`EMISSIVE_NUMERATOR`].
const EMISSIVE_DENOMINATOR: u16 = 5;

/// Lighting parameters for daytime.
pub const DAY_PROFILE: LightingProfile = LightingProfile {
    mode: LightingMode::Day,
    sun_elevation_deg: 55.0,
    sun_azimuth_deg: 180.0,
    hemisphere_intensity: 0.8,
    directional_intensity: 1.0,
    background: 0xbf_df_ff,
};

/// Lighting parameters for night.
pub const NIGHT_PROFILE: LightingProfile = LightingProfile {
    mode: LightingMode::Night,
    sun_elevation_deg: 10.0,
    sun_azimuth_deg: 170.0,
    hemisphere_intensity: 0.25,
    directional_intensity: 0.35,
    background: 0x0a_0f_1a,
};

/// Lamp shown by the vehicular heads of `axis` during `phase`.
pub const fn vehicle_lamp(phase: Phase, axis: Axis) -> VehicleLamp {
    match (phase.axis(), axis) {
        (Axis::X, Axis::X) | (Axis::Z, Axis::Z) if phase.is_green() => VehicleLamp::Green,
        (Axis::X, Axis::X) | (Axis::Z, Axis::Z) => VehicleLamp::Amber,
        _ => VehicleLamp::Red,
    }
}

/// Lamp shown by the pedestrian heads of `axis` under `flags`.
pub const fn pedestrian_lamp(flags: SignalFlags, axis: Axis) -> PedestrianLamp {
    if flags.walk(axis) {
        PedestrianLamp::Walk
    } else {
        PedestrianLamp::DontWalk
    }
}

/// Lighting parameters for a mode.
pub const fn lighting_profile(mode: LightingMode) -> LightingProfile {
    match mode {
        LightingMode::Day => DAY_PROFILE,
        LightingMode::Night => NIGHT_PROFILE,
    }
}

/// Diffuse colour of a bulb, lit or unlit.
pub const fn bulb_rgb(color: BulbColor, lit: bool) -> u32 {
    match (color, lit) {
        (BulbColor::Red, true) => 0xff_3b_3b,
        (BulbColor::Red, false) => 0x33_00_00,
        (BulbColor::Amber, true) => 0xff_dd_6a,
        (BulbColor::Amber, false) => 0x33_22_00,
        (BulbColor::Green, true) => 0x30_ff_66,
        (BulbColor::Green, false) => 0x00_33_00,
    }
}

/// Material parameters for every bulb on a head, top to bottom.
pub fn bulbs(state: HeadState) -> Vec<Bulb> {
    let lit_color = match state {
        HeadState::Vehicle(VehicleLamp::Red) | HeadState::Pedestrian(PedestrianLamp::DontWalk) => {
            BulbColor::Red
        }
        HeadState::Vehicle(VehicleLamp::Amber) => BulbColor::Amber,
        HeadState::Vehicle(VehicleLamp::Green) | HeadState::Pedestrian(PedestrianLamp::Walk) => {
            BulbColor::Green
        }
    };
    let layout: &[BulbColor] = match state {
        HeadState::Vehicle(_) => &[BulbColor::Red, BulbColor::Amber, BulbColor::Green],
        HeadState::Pedestrian(_) => &[BulbColor::Red, BulbColor::Green],
    };
    layout
        .iter()
        .map(|&color| {
            let lit = color == lit_color;
            let rgb = bulb_rgb(color, lit);
            Bulb {
                color,
                lit,
                rgb,
                emissive: if lit { scale_rgb(rgb) } else { 0 },
            }
        })
        .collect()
}

/// Scale each channel of `0xRRGGBB` by the emissive fraction.
///
/// The scaling is applied to the sRGB bytes as given, not in linear space.
fn scale_rgb(rgb: u32) -> u32 {
    let [_, r, g, b] = rgb.to_be_bytes();
    u32::from_be_bytes([0, scale_channel(r), scale_channel(g), scale_channel(b)])
}

/// Scale one colour channel by the emissive fraction.
fn scale_channel(channel: u8) -> u8 {
    let scaled = u16::from(channel)
        .saturating_mul(EMISSIVE_NUMERATOR)
        .checked_div(EMISSIVE_DENOMINATOR)
        .unwrap_or(0);
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

/// Maps simulation state to what the renderer must change.
///
/// Remembers what was last emitted so fixture commands go out only when
/// the phase changes, and a lighting profile only when the mode changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneAdapter {
    /// Swap the physical head assignment between the two axes.
    map_swap: bool,
    /// Phase whose fixture commands were last emitted.
    shown_phase: Option<Phase>,
    /// Lighting mode whose profile was last emitted.
    shown_lighting: Option<LightingMode>,
}

impl SceneAdapter {
    /// Create an adapter that has not emitted anything yet.
    pub const fn new(map_swap: bool) -> Self {
        Self {
            map_swap,
            shown_phase: None,
            shown_lighting: None,
        }
    }

    /// Whether the head assignment is swapped.
    pub const fn map_swap(&self) -> bool {
        self.map_swap
    }

    /// Physical vehicular heads serving `axis`.
    pub const fn vehicle_heads(&self, axis: Axis) -> [SignalHead; 2] {
        match self.physical_axis(axis) {
            Axis::X => [SignalHead::VehicleSouthWest, SignalHead::VehicleNorthEast],
            Axis::Z => [SignalHead::VehicleSouthEast, SignalHead::VehicleNorthWest],
        }
    }

    /// Physical pedestrian heads serving `axis`.
    pub const fn pedestrian_heads(&self, axis: Axis) -> [SignalHead; 2] {
        match self.physical_axis(axis) {
            Axis::X => [SignalHead::PedestrianSouth, SignalHead::PedestrianNorth],
            Axis::Z => [SignalHead::PedestrianEast, SignalHead::PedestrianWest],
        }
    }

    /// Commands setting every head for `phase`.
    pub fn fixture_commands(&self, phase: Phase) -> Vec<FixtureCommand> {
        let flags = SignalFlags::for_phase(phase);
        let mut commands = Vec::with_capacity(8);
        for axis in [Axis::X, Axis::Z] {
            let state = HeadState::Vehicle(vehicle_lamp(phase, axis));
            commands.extend(self.vehicle_heads(axis).map(|head| command(head, state)));
        }
        for axis in [Axis::X, Axis::Z] {
            let state = HeadState::Pedestrian(pedestrian_lamp(flags, axis));
            commands.extend(self.pedestrian_heads(axis).map(|head| command(head, state)));
        }
        commands
    }

    /// Commands for `phase` if it differs from what was last emitted,
    /// otherwise nothing.
    pub fn fixture_updates(&mut self, phase: Phase) -> Vec<FixtureCommand> {
        if self.shown_phase == Some(phase) {
            return Vec::new();
        }
        self.shown_phase = Some(phase);
        self.fixture_commands(phase)
    }

    /// Profile for `mode` if it differs from what was last emitted.
    pub fn lighting_update(&mut self, mode: LightingMode) -> Option<LightingProfile> {
        if self.shown_lighting == Some(mode) {
            return None;
        }
        self.shown_lighting = Some(mode);
        Some(lighting_profile(mode))
    }

    /// Render views of every actor.
    pub fn actor_snapshots(actors: &[Actor]) -> Vec<ActorSnapshot> {
        actors
            .iter()
            .map(|actor| ActorSnapshot {
                id: actor.id,
                kind: actor.kind,
                signal_axis: actor.signal_axis,
                travel_axis: actor.travel_axis(),
                position: actor.world_position(),
                color: actor.color,
            })
            .collect()
    }

    /// The physical road whose heads serve the logical `axis`.
    const fn physical_axis(&self, axis: Axis) -> Axis {
        if self.map_swap { axis.other() } else { axis }
    }
}

/// Build the command for one head.
fn command(head: SignalHead, state: HeadState) -> FixtureCommand {
    FixtureCommand {
        head,
        state,
        bulbs: bulbs(state),
    }
}
