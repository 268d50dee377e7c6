//! # querent-resolver
//!
//! The query-resolution control loop. A question enters at `CacheCheck`,
//! visits `Generate` only on a cache miss, is executed once, and ends at
//! `Terminal` with its SQL, rows or error, feedback context, and an ordered
//! step trail.
//!
//! `QuerentEngine` wires the controller to concrete collaborators and exposes
//! the feedback operations alongside `resolve`.

pub mod controller;
pub mod engine;
pub mod stage;
pub mod state;

pub use controller::ResolutionController;
pub use engine::QuerentEngine;
pub use stage::Stage;
pub use state::ResolutionState;
