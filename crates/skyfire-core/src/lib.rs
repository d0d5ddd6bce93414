//! Core types and definitions for the SKYFIRE simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, input frames, snapshots, configuration documents, errors
//! and constants. It has no dependency on a runtime or a renderer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod legacy;
pub mod state;
pub mod types;

pub use glam::Vec2;
