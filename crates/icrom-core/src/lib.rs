//! icrom core types
//!
//! This crate provides the foundational types shared by the icrom crates:
//!
//! - **Geometry**: points and bounding boxes in millimetres ([`geometry`] module)
//! - **Units**: physical lengths and their units ([`units`] module)
//! - **Eagle**: the Eagle CAD document model and its XML writer ([`eagle`] module)

pub mod eagle;
pub mod geometry;
pub mod units;
