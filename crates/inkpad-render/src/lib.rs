//! Inkpad Render Library
//!
//! Renderer abstraction and implementations for Inkpad. The default
//! implementation is a software rasterizer over an RGBA pixel buffer,
//! which also backs the raster export boundary.

mod export;
mod raster;
mod renderer;

pub use export::{export_image, ExportError, ExportFormat, ExportedImage};
pub use raster::{RasterRenderer, PAGE_COLOR, RULE_COLOR, RULE_SPACING};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, StrokeMode};
