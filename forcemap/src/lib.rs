//! forcemap - force-directed graph layout and SVG rendering.
//!
//! Consumes a graph description (nodes and links), lays it out with a CPU
//! force simulation, and renders it as a static SVG, a laid-out JSON, or an
//! interactive HTML viewer backed by the `forcemap-viz` WASM crate.

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod html_writer;
pub mod io;
pub mod json_reader;
pub mod layout_writer;
pub mod palette;
pub mod scene;
#[cfg(feature = "cli")]
pub mod server;
pub mod simulation;
pub mod svg_writer;
pub mod yaml_reader;
