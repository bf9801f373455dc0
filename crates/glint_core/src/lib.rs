//! Glint Core - renderer-agnostic data for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Radiance and material types**: `Color`, `Component`, `Material`
//! - **Scene setup types**: `Camera`, `Light`
//! - **Pixel storage**: `Dimensions`, `Canvas`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Canvas, Dimensions};
//!
//! // Load a photo to use as an environment map
//! let environment = Canvas::open("studio.png")?;
//! println!("Loaded {}x{} environment", environment.width(), environment.height());
//! ```

pub mod camera;
pub mod canvas;
pub mod color;
pub mod error;

// Re-export commonly used types
pub use camera::{Camera, Light};
pub use canvas::{Canvas, Dimensions};
pub use color::{Color, Component, Material, GAMMA};
pub use error::{Error, Result};
