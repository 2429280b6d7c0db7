//! Emberfall — an interactive particle-emitter sandbox.
//!
//! Coloured particles stream out of moving and draggable emitters, fall under
//! gravity, and bounce off user-placed rectangular obstacles. The simulation
//! core (ring buffers, emitters, contact-plane collision) is plain Rust; Bevy
//! supplies the window, input, and gizmo rendering around it.

pub mod config;
pub mod constants;
pub mod emitter;
pub mod error;
pub mod obstacle;
pub mod particle;
pub mod rendering;
pub mod ring;
pub mod save;
pub mod simulation;
pub mod viewport;
pub mod world;
