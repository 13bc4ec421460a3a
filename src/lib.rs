//! chart-kit: donut/pie, line, and radar charts as draw primitives.
//!
//! Every chart is a stateless composer: validated data, styles, and an
//! externally driven animation progress go in, a backend-agnostic
//! `RenderFrame` comes out. Backends implement `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{Chart, ChartSpec};
pub use error::{ChartError, ChartResult};
