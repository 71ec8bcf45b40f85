//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.
//!
//! * [`features`]: the registry of license feature names, their value types and the
//!   unlimited-quota sentinel.
//! * [`config`]: deserializable configuration shapes shared by the apps.

pub mod config;
pub mod features;
