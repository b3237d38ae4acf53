//! Shared primitive types used across the lpvet stages

pub mod position;

pub use position::Position;
