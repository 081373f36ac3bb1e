//! Animation primitives shared by the engine and the terminal host.
//!
//! Pure data types with no IO, no async, no rendering dependency.

mod animation;
mod easing;
mod keyframes;

pub use animation::{AnimPhase, EffectTimer};
pub use easing::{CubicBezier, Easing};
pub use keyframes::{Keyframes, KeyframesError, Stop};
