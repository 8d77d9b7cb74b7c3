//! Software raster renderer over an RGBA pixel buffer.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError, StrokeMode};
use image::{Rgba, RgbaImage};
use inkpad_core::background::BackgroundStyle;
use inkpad_core::session::SketchSession;
use inkpad_core::stroke::Stroke;
use kurbo::{ParamCurve, Point, QuadBez, Rect};

/// Spacing between rule lines, and the offset of the first rule.
pub const RULE_SPACING: f64 = 40.0;

/// Page fill color (white).
pub const PAGE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Rule line color (light gray).
pub const RULE_COLOR: Rgba<u8> = Rgba([0xE0, 0xE0, 0xE0, 255]);

/// Software rasterizer.
///
/// Every pass clears the covered region to the background pattern and
/// replays the stroke log over it; a pass restricted by a dirty region
/// leaves pixels outside that region untouched.
pub struct RasterRenderer {
    pixels: RgbaImage,
}

impl RasterRenderer {
    /// Create a renderer with a white surface of the given size.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RendererError::InitFailed(format!(
                "surface must be non-empty, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, PAGE_COLOR),
        })
    }

    /// Create a renderer sized to a session's drawing surface.
    pub fn for_session(session: &SketchSession) -> RenderResult<Self> {
        let size = session.surface_size();
        Self::new(size.width as u32, size.height as u32)
    }

    /// The current pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the renderer, returning the pixel buffer.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn surface_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Paint the background pattern within `clip`: white fill, then rule
    /// lines depending on style. Rules sit at 40, 80, ... strictly inside
    /// the surface, one pixel wide.
    fn paint_background(&mut self, clip: Rect, style: BackgroundStyle) {
        let Some((x0, y0, x1, y1)) = pixel_bounds(clip, self.width(), self.height()) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, PAGE_COLOR);
            }
        }

        let lined = matches!(style, BackgroundStyle::Lined | BackgroundStyle::Grid);
        let grid = style == BackgroundStyle::Grid;

        if lined {
            let mut y = RULE_SPACING;
            while y < self.height() as f64 {
                let row = y as u32;
                if row >= y0 && row < y1 {
                    for x in x0..x1 {
                        self.pixels.put_pixel(x, row, RULE_COLOR);
                    }
                }
                y += RULE_SPACING;
            }
        }

        if grid {
            let mut x = RULE_SPACING;
            while x < self.width() as f64 {
                let col = x as u32;
                if col >= x0 && col < x1 {
                    for y in y0..y1 {
                        self.pixels.put_pixel(col, y, RULE_COLOR);
                    }
                }
                x += RULE_SPACING;
            }
        }
    }

    /// Rasterize one stroke within `clip`.
    ///
    /// The whole stroke is accumulated into a coverage mask first and
    /// composited once, so self-overlapping segments never double-darken;
    /// this matches a single path stroke at constant alpha. The brush alpha
    /// is a local of this call and cannot leak into later drawing.
    fn draw_stroke(&mut self, stroke: &Stroke, mode: StrokeMode, clip: Rect) {
        if stroke.points.len() < 2 {
            return;
        }

        // The smoothed pass draws at full opacity; only raw rendering (and
        // the < 3-point fallback, which goes through it) applies the brush
        // alpha.
        let (polyline, width, brush_alpha) = match mode {
            StrokeMode::Smoothed if stroke.points.len() >= 3 => (
                smooth_polyline(&stroke.points),
                stroke.style.width * 0.9,
                1.0,
            ),
            _ => (
                stroke.points.clone(),
                stroke.style.width,
                stroke.style.brush.alpha(),
            ),
        };
        if width <= 0.0 {
            return;
        }
        let radius = width / 2.0;

        let Some(bounds) = stroke.bounds() else {
            return;
        };
        let area = bounds.intersect(clip);
        let Some((mx0, my0, mx1, my1)) = pixel_bounds(area, self.width(), self.height()) else {
            return;
        };
        let mw = (mx1 - mx0) as usize;
        let mh = (my1 - my0) as usize;
        let mut mask = vec![0f32; mw * mh];

        for seg in polyline.windows(2) {
            accumulate_segment(&mut mask, (mx0, my0, mx1, my1), seg[0], seg[1], radius);
        }

        let rgba = peniko::Color::from(stroke.style.color).to_rgba8();
        let src = [rgba.r, rgba.g, rgba.b];
        let src_alpha = brush_alpha * rgba.a as f64 / 255.0;

        for y in my0..my1 {
            for x in mx0..mx1 {
                let cov = mask[(y - my0) as usize * mw + (x - mx0) as usize];
                if cov <= 0.0 {
                    continue;
                }
                let alpha = (cov as f64 * src_alpha).clamp(0.0, 1.0);
                let dst = self.pixels.get_pixel_mut(x, y);
                for c in 0..3 {
                    dst[c] = (src[c] as f64 * alpha + dst[c] as f64 * (1.0 - alpha)).round() as u8;
                }
                dst[3] = (255.0 * alpha + dst[3] as f64 * (1.0 - alpha)).round() as u8;
            }
        }
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderResult<()> {
        let clip = match ctx.dirty_region {
            Some(region) => {
                let clip = region.intersect(self.surface_rect());
                if clip.width() <= 0.0 || clip.height() <= 0.0 {
                    return Ok(());
                }
                clip
            }
            None => self.surface_rect(),
        };

        self.paint_background(clip, ctx.session.background);

        for stroke in &ctx.session.document.strokes {
            let Some(bounds) = stroke.bounds() else {
                continue;
            };
            let overlap = bounds.intersect(clip);
            if overlap.width() <= 0.0 || overlap.height() <= 0.0 {
                continue;
            }
            self.draw_stroke(stroke, ctx.mode, clip);
        }

        // The live gesture always previews as a raw polyline; the smoothed
        // pass only applies to the committed stroke set.
        if let Some(preview) = ctx.session.preview_stroke() {
            self.draw_stroke(&preview, StrokeMode::Raw, clip);
        }

        Ok(())
    }
}

/// Integer pixel bounds of `rect` clamped to the surface, end-exclusive.
fn pixel_bounds(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.x0.floor().max(0.0) as u32;
    let y0 = rect.y0.floor().max(0.0) as u32;
    let x1 = (rect.x1.ceil().max(0.0) as u32).min(width);
    let y1 = (rect.y1.ceil().max(0.0) as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

/// Midpoint smoothing: quadratic curves with point `i` as control and the
/// midpoint of points `i` and `i + 1` as endpoint, then a straight run to
/// the final point. Flattened back to a dense polyline for rasterization.
fn smooth_polyline(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    let mut out = vec![points[0]];
    let mut cursor = points[0];

    for i in 1..n.saturating_sub(2) {
        let mid = Point::new(
            (points[i].x + points[i + 1].x) / 2.0,
            (points[i].y + points[i + 1].y) / 2.0,
        );
        flatten_quad(QuadBez::new(cursor, points[i], mid), &mut out);
        cursor = mid;
    }

    out.push(points[n - 1]);
    out
}

/// Sample a quadratic onto the polyline, roughly one point per pixel of
/// control-polygon length. Skips t = 0, which is already present.
fn flatten_quad(quad: QuadBez, out: &mut Vec<Point>) {
    let poly_len = (quad.p1 - quad.p0).hypot() + (quad.p2 - quad.p1).hypot();
    let steps = (poly_len.ceil() as usize).clamp(2, 64);
    for k in 1..=steps {
        out.push(quad.eval(k as f64 / steps as f64));
    }
}

/// Max-accumulate the coverage of one capsule (segment with round caps)
/// into the mask. Coverage falls off linearly over one pixel at the edge.
fn accumulate_segment(
    mask: &mut [f32],
    (mx0, my0, mx1, my1): (u32, u32, u32, u32),
    a: Point,
    b: Point,
    radius: f64,
) {
    let mw = (mx1 - mx0) as usize;
    let pad = radius + 1.0;
    let bbox = Rect::from_points(a, b).inflate(pad, pad);

    let x0 = (bbox.x0.floor().max(mx0 as f64)) as u32;
    let y0 = (bbox.y0.floor().max(my0 as f64)) as u32;
    let x1 = (bbox.x1.ceil().min(mx1 as f64)).max(0.0) as u32;
    let y1 = (bbox.y1.ceil().min(my1 as f64)).max(0.0) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let d = distance_to_segment(center, a, b);
            let cov = (radius + 0.5 - d).clamp(0.0, 1.0) as f32;
            if cov > 0.0 {
                let idx = (y - my0) as usize * mw + (x - mx0) as usize;
                mask[idx] = mask[idx].max(cov);
            }
        }
    }
}

/// Distance from a point to a line segment.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq < f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let proj = a + ab * t;
    (p - proj).hypot()
}
