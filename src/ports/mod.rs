//! Ports (trait boundaries) for external collaborators.
//!
//! The training pipeline reports through these traits; concrete observers
//! live in [`crate::pipeline::observers`].

pub mod observer;

pub use observer::Observer;
