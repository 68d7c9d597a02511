//! Badge Module
//!
//! Procedurally drawn media badges: a play button for video and a page
//! glyph for documents. Both are drawn fully opaque; callers apply opacity
//! when compositing.

use image::{Rgba, RgbaImage};

const BADGE_FILL: [u8; 3] = [245, 245, 245];
const BADGE_INK: [u8; 3] = [40, 40, 40];

// == Play Badge ==
/// A filled circle carrying a right-pointing triangle.
pub fn play_badge(side: u32) -> RgbaImage {
    let side = side.max(1);
    let s = side as f32;
    let c = s / 2.0;
    let r = s / 2.0;
    let triangle = [
        (c - r * 0.3, c - r * 0.45),
        (c - r * 0.3, c + r * 0.45),
        (c + r * 0.5, c),
    ];

    RgbaImage::from_fn(side, side, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let distance = ((px - c).powi(2) + (py - c).powi(2)).sqrt();
        let coverage = (r - distance + 0.5).clamp(0.0, 1.0);
        if coverage == 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let rgb = if in_triangle((px, py), triangle) {
            BADGE_INK
        } else {
            BADGE_FILL
        };
        Rgba([rgb[0], rgb[1], rgb[2], (coverage * 255.0).round() as u8])
    })
}

// == Document Badge ==
/// A page outline with a folded top-right corner.
pub fn document_badge(side: u32) -> RgbaImage {
    let side = side.max(1);
    let s = side as f32;
    let (left, right) = (s * 0.15, s * 0.85);
    let (top, bottom) = (s * 0.05, s * 0.95);
    let fold = s * 0.25;
    let stroke = (s / 16.0).max(1.0);

    RgbaImage::from_fn(side, side, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        if px < left || px > right || py < top || py > bottom {
            return Rgba([0, 0, 0, 0]);
        }

        // Corner region beyond the fold diagonal is cut away.
        let dx = px - (right - fold);
        let dy = py - top;
        if dx > 0.0 && dy < fold {
            if dx > dy {
                return Rgba([0, 0, 0, 0]);
            }
            return Rgba([BADGE_INK[0], BADGE_INK[1], BADGE_INK[2], 255]);
        }

        let on_edge = px - left < stroke
            || right - px < stroke
            || py - top < stroke
            || bottom - py < stroke;
        let rgb = if on_edge { BADGE_INK } else { BADGE_FILL };
        Rgba([rgb[0], rgb[1], rgb[2], 255])
    })
}

fn in_triangle(p: (f32, f32), [a, b, c]: [(f32, f32); 3]) -> bool {
    let edge = |(x1, y1): (f32, f32), (x2, y2): (f32, f32)| {
        (p.0 - x2) * (y1 - y2) - (x1 - x2) * (p.1 - y2)
    };
    let d1 = edge(a, b);
    let d2 = edge(b, c);
    let d3 = edge(c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
