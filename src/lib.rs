//! Elden Banner Library
//!
//! Full-screen, click-through overlay that shows a glowing text banner,
//! optionally plays a sound, zooms and fades for three seconds, then exits.
//!
//! Architecture:
//! - `args` / `usage` turn the command line into a request or a help dialog
//! - `scene` describes the layers, `timeline` animates them
//! - `render` composites the layers in software, `platform` presents them
//! - `banner` owns the window and its lifecycle on the winit event loop

pub mod args;
pub mod banner;
pub mod config;
pub mod font;
pub mod platform;
pub mod render;
pub mod scene;
pub mod sound;
pub mod style;
pub mod timeline;
pub mod usage;

pub use args::{BannerRequest, Invocation, UsageError};
