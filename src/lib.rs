//! Quadrature-point constitutive laws for explicit dynamics
//!
//! This crate evaluates the stress response at a collection of independent
//! quadrature points for an external finite element driver. Each point carries
//! committed (start-of-step) and trial (proposed) internal variables, and the
//! laws are routed by a [material::LawDispatcher].

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
