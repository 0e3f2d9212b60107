//! Raster primitives on top of `RgbaImage`. All of them clip to the canvas.

use image::{Rgba, RgbaImage};

pub fn put(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

pub fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..y + h as i32 {
        for px in x..x + w as i32 {
            put(img, px, py, color);
        }
    }
}

/// Rectangle with corners of radius `r` cut round, outlined with `border`.
pub fn fill_rounded_rect(
    img: &mut RgbaImage,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    r: u32,
    fill: Rgba<u8>,
    border: Rgba<u8>,
) {
    let (w, h, r) = (w as i32, h as i32, r as i32);
    let inside = |px: i32, py: i32, shrink: i32| -> bool {
        let (left, top) = (x + shrink, y + shrink);
        let (right, bottom) = (x + w - 1 - shrink, y + h - 1 - shrink);
        if px < left || px > right || py < top || py > bottom {
            return false;
        }
        let rr = (r - shrink).max(0);
        let cx = if px < left + rr {
            left + rr
        } else if px > right - rr {
            right - rr
        } else {
            return true;
        };
        let cy = if py < top + rr {
            top + rr
        } else if py > bottom - rr {
            bottom - rr
        } else {
            return true;
        };
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= rr * rr
    };

    for py in y..y + h {
        for px in x..x + w {
            if inside(px, py, 1) {
                put(img, px, py, fill);
            } else if inside(px, py, 0) {
                put(img, px, py, border);
            }
        }
    }
}

pub fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, r: i32, color: Rgba<u8>) {
    for py in cy - r..=cy + r {
        for px in cx - r..=cx + r {
            let (dx, dy) = (px - cx, py - cy);
            if dx * dx + dy * dy <= r * r {
                put(img, px, py, color);
            }
        }
    }
}

/// Thick line: a disc of diameter `width` stamped along a Bresenham walk.
pub fn draw_line(
    img: &mut RgbaImage,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    width: u32,
    color: Rgba<u8>,
) {
    let radius = (width as i32 / 2).max(0);
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
    let (mut x, mut y, mut err) = (x0, y0, dx + dy);
    loop {
        if radius == 0 {
            put(img, x, y, color);
        } else {
            fill_circle(img, x, y, radius, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Even-odd fill, sampling pixel centers.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }
    let min_x = points.iter().map(|p| p.0).fold(f32::INFINITY, f32::min).floor() as i32;
    let max_x = points.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor() as i32;
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let (sx, sy) = (px as f32 + 0.5, py as f32 + 0.5);
            let mut inside = false;
            let mut j = points.len() - 1;
            for i in 0..points.len() {
                let (xi, yi) = points[i];
                let (xj, yj) = points[j];
                if (yi > sy) != (yj > sy) && sx < (xj - xi) * (sy - yi) / (yj - yi) + xi {
                    inside = !inside;
                }
                j = i;
            }
            if inside {
                put(img, px, py, color);
            }
        }
    }
}

/// Five-pointed star with its top point straight up.
pub fn star_points(cx: f32, cy: f32, outer: f32) -> Vec<(f32, f32)> {
    let inner = outer * 0.45;
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// Filled triangular head pointing from `from` toward `tip`.
pub fn arrow_head(
    img: &mut RgbaImage,
    from: (f32, f32),
    tip: (f32, f32),
    length: f32,
    half_width: f32,
    color: Rgba<u8>,
) {
    let (dx, dy) = (tip.0 - from.0, tip.1 - from.1);
    let norm = (dx * dx + dy * dy).sqrt();
    if norm == 0.0 {
        return;
    }
    let (ux, uy) = (dx / norm, dy / norm);
    let base = (tip.0 - ux * length, tip.1 - uy * length);
    let left = (base.0 - uy * half_width, base.1 + ux * half_width);
    let right = (base.0 + uy * half_width, base.1 - ux * half_width);
    fill_polygon(img, &[tip, left, right], color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(20, 20, WHITE)
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut img = canvas();
        draw_line(&mut img, (2, 3), (15, 12), 1, RED);
        assert_eq!(*img.get_pixel(2, 3), RED);
        assert_eq!(*img.get_pixel(15, 12), RED);
        assert_eq!(*img.get_pixel(15, 3), WHITE);
    }

    #[test]
    fn star_fills_its_center_not_its_corners() {
        let mut img = canvas();
        fill_polygon(&mut img, &star_points(10.0, 10.0, 9.0), RED);
        assert_eq!(*img.get_pixel(10, 10), RED);
        assert_eq!(*img.get_pixel(1, 18), WHITE);
        assert_eq!(*img.get_pixel(18, 18), WHITE);
    }

    #[test]
    fn rounded_rect_has_border_and_soft_corners() {
        let border = Rgba([0, 0, 0, 255]);
        let mut img = canvas();
        fill_rounded_rect(&mut img, 0, 0, 20, 20, 5, RED, border);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(10, 0), border);
        assert_eq!(*img.get_pixel(10, 10), RED);
    }

    #[test]
    fn primitives_clip_at_edges() {
        let mut img = canvas();
        fill_circle(&mut img, 0, 0, 5, RED);
        fill_rect(&mut img, 18, 18, 10, 10, RED);
        draw_line(&mut img, (-5, -5), (25, 25), 3, RED);
        assert_eq!(*img.get_pixel(19, 19), RED);
    }
}
