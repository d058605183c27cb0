// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]

//! Gesture-driven 3D holiday particle scene built on wgpu.
//!
//! Tinsel arranges 1500 ornaments by default (cubes, spheres, candy canes and
//! framed photos) into a spiral tree, scatters them across a shell, or pulls
//! a single photo forward for a closer look. A hand tracked by an external
//! landmark detector picks the arrangement and steers the scene's rotation.
//!
//! # Key entry points
//!
//! - [`engine::SceneEngine`] - GPU context, scene, and renderer in one place
//! - [`scene::Scene`] - the particle choreographer, usable without a GPU
//! - [`gesture::GestureTracker`] - per-frame detector polling and
//!   classification
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Two independent per-frame loops drive the system. The gesture loop polls
//! a [`gesture::HandDetector`], classifies the first hand into an
//! [`gesture::InteractionMode`] plus an optional pointer, and feeds the
//! report to the engine. The render loop advances every particle toward the
//! target of the current mode with exponential easing and draws the frame:
//! instanced ornaments, textured photo panels, then the dust field.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod schedule;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{SceneCommand, SceneEngine};
pub use error::TinselError;
pub use gesture::{
    DetectorError, DetectorPoll, GestureReport, GestureTracker, HandDetector,
    HandLandmarks, InteractionMode,
};
pub use options::Options;
pub use scene::Scene;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
