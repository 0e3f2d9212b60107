//! PNG plot of a planned route: grid cells, obstacles, the path with step
//! numbers and arrows, start/goal markers and a legend.

pub mod draw;
pub mod font;

use crate::algorithms::common::Path;
use crate::error::{PlanError, PlanResult};
use crate::grid::Position;
use crate::scenario::Scenario;
use draw::{
    arrow_head, draw_line, fill_circle, fill_polygon, fill_rect, fill_rounded_rect, star_points,
};
use font::TextRenderer;
use image::{Rgba, RgbaImage};
use log::{info, warn};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OBSTACLE: Rgba<u8> = Rgba([0x1B, 0x2A, 0x4A, 255]);
const FREE: Rgba<u8> = Rgba([0xF0, 0xF0, 0xF0, 255]);
const CELL_BORDER: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 255]);
const GUIDE: Rgba<u8> = Rgba([0xDD, 0xDD, 0xDD, 255]);
const LABEL_DARK: Rgba<u8> = Rgba([0x44, 0x44, 0x44, 255]);
const LABEL_LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PATH_RED: Rgba<u8> = Rgba([0xE7, 0x4C, 0x3C, 255]);
const ARROW_RED: Rgba<u8> = Rgba([0xC0, 0x39, 0x2B, 255]);
const START_GREEN: Rgba<u8> = Rgba([0x27, 0xAE, 0x60, 255]);
const GOAL_GOLD: Rgba<u8> = Rgba([0xF1, 0xC4, 0x0F, 255]);
const GOAL_LABEL: Rgba<u8> = Rgba([0xDA, 0xA5, 0x20, 255]);
const INK: Rgba<u8> = Rgba([0x22, 0x22, 0x22, 255]);

pub const MIN_CELL_PX: u32 = 40;
/// Upper bound on plot area; larger grids get smaller cells, then an error.
pub const MAX_PLOT_PIXELS: u64 = 64 * 1024 * 1024;

/// Pixel geometry shared by every drawing step.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub cell: u32,
    pub grid_size: u32,
    pub left: u32,
    pub top: u32,
    pub legend_x: u32,
    pub width: u32,
    pub height: u32,
    label_px: f32,
    legend_row: u32,
}

impl Layout {
    /// Fits the plot under [`MAX_PLOT_PIXELS`], shrinking cells from
    /// `cell_px` down to [`MIN_CELL_PX`] before giving up.
    pub fn new(
        grid_size: usize,
        cell_px: u32,
        legend_labels: &[String],
        text: &TextRenderer,
    ) -> PlanResult<Self> {
        let requested = cell_px.max(MIN_CELL_PX);
        let mut cell = requested;
        loop {
            if let Some(layout) = Self::measure(grid_size, cell, legend_labels, text) {
                if u64::from(layout.width) * u64::from(layout.height) <= MAX_PLOT_PIXELS {
                    if cell < requested {
                        warn!(
                            "Plot cells shrunk from {}px to {}px to fit a {}x{} grid",
                            requested, cell, grid_size, grid_size
                        );
                    }
                    return Ok(layout);
                }
            }
            if cell == MIN_CELL_PX {
                return Err(PlanError::PlotTooLarge {
                    grid_size,
                    cell_px: MIN_CELL_PX,
                });
            }
            cell = (cell * 3 / 4).max(MIN_CELL_PX);
        }
    }

    /// Geometry for one cell size, or `None` if it overflows `u32` pixels.
    fn measure(
        grid_size: usize,
        cell: u32,
        legend_labels: &[String],
        text: &TextRenderer,
    ) -> Option<Self> {
        let label_px = (cell as f32 * 0.12).max(9.0);
        let line = text.line_height(label_px);
        let legend_row = line + line / 2;
        let widest = legend_labels
            .iter()
            .map(|l| text.text_width(l, label_px))
            .max()
            .unwrap_or(0);

        let n = u64::try_from(grid_size).ok()?;
        let c = u64::from(cell);
        let span = n.checked_mul(c)?;
        let left = c;
        let top = c * 3 / 4;
        let bottom = c * 3 / 4;
        let legend_width = c / 2 + u64::from(line) + u64::from(widest) + c / 4;
        let legend_height = legend_labels.len() as u64 * u64::from(legend_row) + c / 4;

        let legend_x = left.checked_add(span)?.checked_add(c / 4)?;
        let width = legend_x.checked_add(legend_width + c / 4)?;
        let height = span.max(legend_height).checked_add(top + bottom)?;

        Some(Layout {
            cell,
            grid_size: u32::try_from(n).ok()?,
            left: u32::try_from(left).ok()?,
            top: u32::try_from(top).ok()?,
            legend_x: u32::try_from(legend_x).ok()?,
            width: u32::try_from(width).ok()?,
            height: u32::try_from(height).ok()?,
            label_px,
            legend_row,
        })
    }

    /// Pixel center of a grid cell; y grows upward on the plot.
    pub fn center(&self, pos: Position) -> (i32, i32) {
        let c = self.cell as i32;
        let n = self.grid_size as i32;
        (
            self.left as i32 + pos.x * c + c / 2,
            self.top as i32 + (n - 1 - pos.y) * c + c / 2,
        )
    }

    fn frac(&self, f: f32) -> i32 {
        (self.cell as f32 * f).round() as i32
    }
}

fn legend_labels(scenario: &Scenario) -> Vec<String> {
    vec![
        "Obstacle".to_string(),
        "Free Cell".to_string(),
        "Robot Path".to_string(),
        format!("Start ({},{})", scenario.start.x, scenario.start.y),
        format!("Goal ({},{})", scenario.goal.x, scenario.goal.y),
    ]
}

/// Draws the plot in memory. Fails before allocating if the grid cannot
/// fit under [`MAX_PLOT_PIXELS`].
pub fn render_plot(scenario: &Scenario, path: &Path, cell_px: u32) -> PlanResult<RgbaImage> {
    let text = TextRenderer::builtin()?;
    let labels = legend_labels(scenario);
    let layout = Layout::new(scenario.grid.size, cell_px, &labels, &text)?;
    let mut img = RgbaImage::from_pixel(layout.width, layout.height, BACKGROUND);

    draw_title(&mut img, &layout, &text);
    draw_guides(&mut img, &layout);
    draw_cells(&mut img, &layout, &text, scenario);
    draw_path(&mut img, &layout, &text, path);
    draw_endpoints(&mut img, &layout, &text, scenario);
    draw_axes(&mut img, &layout, &text);
    draw_legend(&mut img, &layout, &text, &labels);
    Ok(img)
}

/// Draws the plot and writes it as PNG to `output`.
pub fn save_plot(
    scenario: &Scenario,
    path: &Path,
    cell_px: u32,
    output: impl AsRef<std::path::Path>,
) -> PlanResult<()> {
    let img = render_plot(scenario, path, cell_px)?;
    img.save(output.as_ref())?;
    info!(
        "Plot saved as {} ({}x{})",
        output.as_ref().display(),
        img.width(),
        img.height()
    );
    Ok(())
}

fn draw_title(img: &mut RgbaImage, layout: &Layout, text: &TextRenderer) {
    let title = "Robot Path Planning (BFS)";
    let mut px = layout.cell as f32 * 0.25;
    while px > 10.0 && text.text_width(title, px) + layout.cell / 4 > layout.width {
        px -= 2.0;
    }
    text.draw_text_centered(
        img,
        layout.width as i32 / 2,
        layout.top as i32 / 2,
        title,
        px,
        INK,
    );
}

/// Dashed guide lines through every cell center, under everything else.
fn draw_guides(img: &mut RgbaImage, layout: &Layout) {
    let n = layout.grid_size as i32;
    let (x0, y_top) = (layout.left as i32, layout.top as i32);
    let span = n * layout.cell as i32;
    let dash = (layout.cell as i32 / 20).max(2);
    for i in 0..n {
        let (cx, cy) = layout.center(Position::new(i, n - 1 - i));
        for t in (0..span).step_by((dash * 2) as usize) {
            fill_rect(img, cx, y_top + t, 1, dash as u32, GUIDE);
            fill_rect(img, x0 + t, cy, dash as u32, 1, GUIDE);
        }
    }
}

fn draw_cells(img: &mut RgbaImage, layout: &Layout, text: &TextRenderer, scenario: &Scenario) {
    let grid = &scenario.grid;
    let half = layout.frac(0.45);
    let radius = layout.frac(0.06).max(2) as u32;

    for y in 0..layout.grid_size as i32 {
        for x in 0..layout.grid_size as i32 {
            let pos = Position::new(x, y);
            let (cx, cy) = layout.center(pos);
            let blocked = grid.is_obstacle(pos);
            let (fill, ink) = if blocked {
                (OBSTACLE, LABEL_LIGHT)
            } else {
                (FREE, LABEL_DARK)
            };
            fill_rounded_rect(
                img,
                cx - half,
                cy - half,
                (half * 2) as u32,
                (half * 2) as u32,
                radius,
                fill,
                CELL_BORDER,
            );
            text.draw_text_centered(
                img,
                cx,
                cy + layout.frac(0.32),
                &format!("({},{})", x, y),
                layout.label_px,
                ink,
            );

            if blocked {
                let arm = layout.frac(0.16);
                let mid = cy - layout.frac(0.08);
                let width = (layout.cell / 16).max(2);
                draw_line(img, (cx - arm, mid - arm), (cx + arm, mid + arm), width, PATH_RED);
                draw_line(img, (cx - arm, mid + arm), (cx + arm, mid - arm), width, PATH_RED);
            }
        }
    }
}

fn draw_path(img: &mut RgbaImage, layout: &Layout, text: &TextRenderer, path: &Path) {
    let centers: Vec<(i32, i32)> = path.cells().iter().map(|p| layout.center(*p)).collect();
    let line_width = (layout.cell / 24).max(2);
    let dot = layout.frac(0.07).max(3);

    for pair in centers.windows(2) {
        draw_line(img, pair[0], pair[1], line_width, PATH_RED);
    }

    // Arrow heads stop short of the next dot so both stay visible.
    for pair in centers.windows(2) {
        let from = (pair[0].0 as f32, pair[0].1 as f32);
        let to = (pair[1].0 as f32, pair[1].1 as f32);
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let norm = (dx * dx + dy * dy).sqrt();
        let back = (dot + 2) as f32;
        let tip = (to.0 - dx / norm * back, to.1 - dy / norm * back);
        arrow_head(
            img,
            from,
            tip,
            layout.cell as f32 * 0.14,
            layout.cell as f32 * 0.07,
            ARROW_RED,
        );
    }

    for &(cx, cy) in &centers {
        fill_circle(img, cx, cy, dot + 2, LABEL_LIGHT);
        fill_circle(img, cx, cy, dot, PATH_RED);
    }

    let px = layout.label_px;
    let pad = (px / 4.0).ceil() as u32;
    for (i, &(cx, cy)) in centers.iter().enumerate() {
        let label = i.to_string();
        let w = text.text_width(&label, px) + 2 * pad;
        let h = text.line_height(px) + pad;
        let (bx, by) = (cx - w as i32 / 2, cy - layout.frac(0.18) - h as i32 / 2);
        fill_rounded_rect(img, bx, by, w, h, pad, PATH_RED, PATH_RED);
        text.draw_text_centered(img, cx, by + h as i32 / 2, &label, px, LABEL_LIGHT);
    }
}

fn draw_endpoints(img: &mut RgbaImage, layout: &Layout, text: &TextRenderer, scenario: &Scenario) {
    let px = layout.label_px;

    let (sx, sy) = layout.center(scenario.start);
    let half = layout.frac(0.09).max(4);
    fill_rect(img, sx - half - 2, sy - half - 2, (half * 2 + 4) as u32, (half * 2 + 4) as u32, LABEL_LIGHT);
    fill_rect(img, sx - half, sy - half, (half * 2) as u32, (half * 2) as u32, START_GREEN);
    text.draw_text_centered(img, sx, sy - layout.frac(0.40), "START", px, START_GREEN);

    let (gx, gy) = layout.center(scenario.goal);
    let outer = layout.cell as f32 * 0.13;
    fill_polygon(img, &star_points(gx as f32, gy as f32, outer + 2.0), LABEL_LIGHT);
    fill_polygon(img, &star_points(gx as f32, gy as f32, outer), GOAL_GOLD);
    text.draw_text_centered(img, gx, gy - layout.frac(0.40), "GOAL", px, GOAL_LABEL);
}

fn draw_axes(img: &mut RgbaImage, layout: &Layout, text: &TextRenderer) {
    let px = layout.label_px;
    let n = layout.grid_size as i32;
    let grid_bottom = (layout.top + layout.grid_size * layout.cell) as i32;
    let tick_gap = layout.frac(0.15);

    for i in 0..n {
        let (cx, _) = layout.center(Position::new(i, 0));
        text.draw_text_centered(img, cx, grid_bottom + tick_gap, &i.to_string(), px, INK);
        let (_, cy) = layout.center(Position::new(0, i));
        text.draw_text_centered(img, layout.left as i32 - tick_gap, cy, &i.to_string(), px, INK);
    }

    let axis_px = px * 1.4;
    let grid_mid_x = layout.left as i32 + n * layout.cell as i32 / 2;
    let grid_mid_y = layout.top as i32 + n * layout.cell as i32 / 2;
    text.draw_text_centered(img, grid_mid_x, grid_bottom + layout.frac(0.45), "X", axis_px, INK);
    text.draw_text_centered(img, layout.frac(0.3), grid_mid_y, "Y", axis_px, INK);
}

fn draw_legend(img: &mut RgbaImage, layout: &Layout, text: &TextRenderer, labels: &[String]) {
    let px = layout.label_px;
    let row = layout.legend_row as i32;
    let swatch = text.line_height(px) as i32;
    let x = layout.legend_x as i32;
    let text_x = x + swatch + swatch / 2;

    for (i, label) in labels.iter().enumerate() {
        let y = layout.top as i32 + i as i32 * row;
        let (mx, my) = (x + swatch / 2, y + swatch / 2);
        match i {
            0 => fill_rounded_rect(img, x, y, swatch as u32, swatch as u32, 2, OBSTACLE, CELL_BORDER),
            1 => fill_rounded_rect(img, x, y, swatch as u32, swatch as u32, 2, FREE, CELL_BORDER),
            2 => {
                draw_line(img, (x, my), (x + swatch, my), 2, PATH_RED);
                fill_circle(img, mx, my, swatch / 4, PATH_RED);
            }
            3 => fill_rect(img, x + swatch / 4, y + swatch / 4, (swatch / 2) as u32, (swatch / 2) as u32, START_GREEN),
            _ => fill_polygon(img, &star_points(mx as f32, my as f32, swatch as f32 / 2.0), GOAL_GOLD),
        }
        text.draw_text(img, text_x, y, label, px, INK);
    }
}
