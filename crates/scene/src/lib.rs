//! Rotating point-cloud "neural network" backdrop: scene seeding, drag
//! physics, perspective projection, picking and overlay binding, plus the
//! scrolling terrain grid. Nothing here touches a browser; hosts replay the
//! produced [`draw::DrawList`]s onto their own surface.
//!
//! Diagnostics are emitted as `tracing` events and only show up where the
//! host installs a subscriber. The wasm host installs none; it logs the
//! structured records from [`Engine::drain_events`] to the console instead,
//! so every reseed, selection change and rejected config key reaches it.

pub mod annotation;
pub mod cloud;
pub mod config;
pub mod content;
pub mod draw;
pub mod engine;
pub mod input;
pub mod physics;
pub mod picking;
pub mod projection;
pub mod render;
pub mod selection;
pub mod terrain;

pub use engine::*;

// ── Tests: Interaction Contracts ────────────────────────────────────────────
//
// End-to-end checks through the public API:
//
//  1. Sphere sampling is uniform in area (cos(phi) is flat, phi is not).
//  2. The camera-space origin projects to the viewport centre at scale 1.
//  3. Points at or behind the camera never produce screen coordinates.
//  4. Untouched velocities settle on the ambient spin, not on zero.
//  5. Overlapping hits resolve to the point nearest the camera.
//  6. Press/release in place is a click; a 50px drag is never a click.
//  7. A point always shows the same fact, however often it is reselected.
