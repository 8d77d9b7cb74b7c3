//! Draws a short scribble headlessly and exports it as handwritten.png
//! in the current directory.

use inkpad_core::{BackgroundStyle, BrushKind, SerializableColor, SketchSession};
use inkpad_render::{export_image, ExportFormat, RasterRenderer, RenderContext, Renderer};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut session = SketchSession::new();
    session.set_background(BackgroundStyle::Lined);

    // A pen wave across the page.
    session.pointer_down(100.0, 300.0);
    for i in 1..=60 {
        let x = 100.0 + i as f64 * 10.0;
        let y = 300.0 + 40.0 * (i as f64 * 0.3).sin();
        session.pointer_move(x, y);
    }
    session.pointer_up(700.0, 300.0);

    // A marker highlight over it.
    session.set_brush(BrushKind::Marker);
    session.set_color(SerializableColor::new(255, 200, 0, 255));
    session.set_width(18.0);
    session.pointer_down(100.0, 300.0);
    session.pointer_move(700.0, 300.0);
    session.pointer_up(700.0, 300.0);

    let mut renderer = RasterRenderer::for_session(&session)?;
    renderer.render(&RenderContext::new(&session))?;

    let exported = export_image(renderer.pixels(), ExportFormat::Png)?;
    let path = exported.write_to_dir(Path::new("."))?;
    println!("wrote {}", path.display());
    Ok(())
}
