//! Shared type definitions for the four-way crossing simulation.
//!
//! This crate is the single source of truth for the types exchanged between
//! the simulation core and the renderer. Types defined here flow downstream
//! to `TypeScript` via `ts-rs` for the browser renderer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for actors and runs
//! - [`enums`] -- Phases, axes, lamps, signal heads, lighting modes
//! - [`structs`] -- Signal flags and the per-frame snapshot handed to the renderer

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActorKind, Axis, BulbColor, LightingMode, PedestrianLamp, Phase, SignalHead, VehicleLamp,
};
pub use ids::{ActorId, RunId};
pub use structs::{
    ActorSnapshot, Bulb, FixtureCommand, FrameSnapshot, HeadState, LightingProfile, Position,
    SignalFlags,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the renderer.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ActorId::export_all();
        let _ = crate::ids::RunId::export_all();

        // Enums
        let _ = crate::enums::Phase::export_all();
        let _ = crate::enums::Axis::export_all();
        let _ = crate::enums::ActorKind::export_all();
        let _ = crate::enums::VehicleLamp::export_all();
        let _ = crate::enums::PedestrianLamp::export_all();
        let _ = crate::enums::BulbColor::export_all();
        let _ = crate::enums::SignalHead::export_all();
        let _ = crate::enums::LightingMode::export_all();

        // Structs
        let _ = crate::structs::SignalFlags::export_all();
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::HeadState::export_all();
        let _ = crate::structs::Bulb::export_all();
        let _ = crate::structs::FixtureCommand::export_all();
        let _ = crate::structs::ActorSnapshot::export_all();
        let _ = crate::structs::LightingProfile::export_all();
        let _ = crate::structs::FrameSnapshot::export_all();
    }
}
