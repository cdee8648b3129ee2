//! Chart rendering using plotters (SVG output)
//!
//! Uses SVG backend to avoid system font dependencies.

use crate::constants;
use crate::error::{GdpError, Result};
use crate::world_map::GdpMap;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

const LEGEND_HEIGHT: u32 = 60;
const MISSING_COLOR: RGBColor = RGBColor(200, 200, 200);
const NO_DATA_COLOR: RGBColor = RGBColor(240, 190, 120);

/// What a render call produced
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub output_file: PathBuf,
    /// entries drawn with data
    pub plotted: usize,
    /// entries not found in the GDP file
    pub unmatched: usize,
    /// entries found but without data
    pub no_value: usize,
}

fn render_err<E: Display>(e: E) -> GdpError {
    GdpError::Render(e.to_string())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Draw the GDP map as a tile grid: one tile per country code, shaded by log GDP.
/// Codes missing from the data and codes without a value get their own fixed colours.
pub fn draw_world_map(
    path: &Path,
    size: (u32, u32),
    title: &str,
    value_label: &str,
    map: &GdpMap,
) -> Result<()> {
    ensure_parent_dir(path)?;
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let body = root
        .titled(title, ("sans-serif", 22).into_font().color(&BLACK))
        .map_err(render_err)?;

    let (body_w, body_h) = body.dim_in_pixel();
    let (tiles_area, legend_area) = body.split_vertically(body_h.saturating_sub(LEGEND_HEIGHT) as i32);

    let mut tiles: Vec<(&str, RGBColor)> = Vec::with_capacity(map.len());
    let (lo, hi) = map
        .values
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    for (code, v) in &map.values {
        let t = if hi > lo { (v - lo) / (hi - lo) } else { 1.0 };
        tiles.push((code.as_str(), gdp_color(t)));
    }
    for code in &map.no_value {
        tiles.push((code.as_str(), NO_DATA_COLOR));
    }
    for code in &map.unmatched {
        tiles.push((code.as_str(), MISSING_COLOR));
    }
    tiles.sort_by(|a, b| a.0.cmp(b.0));

    if tiles.is_empty() {
        tiles_area
            .draw(&Text::new(
                constants::LEGEND_NO_GDP_DATA,
                (body_w as i32 / 2 - 50, (body_h / 2) as i32),
                ("sans-serif", 20).into_font().color(&BLACK),
            ))
            .map_err(render_err)?;
    } else {
        let (area_w, area_h) = tiles_area.dim_in_pixel();
        let (cols, rows) = grid_shape(tiles.len(), area_w, area_h);
        let tile_w = (area_w / cols).max(1) as i32;
        let tile_h = (area_h / rows).max(1) as i32;
        let font_size = (tile_h.min(tile_w) / 3).clamp(6, 14);

        for (i, (code, color)) in tiles.iter().enumerate() {
            let col = (i as u32 % cols) as i32;
            let row = (i as u32 / cols) as i32;
            let (x0, y0) = (col * tile_w, row * tile_h);
            tiles_area
                .draw(&Rectangle::new(
                    [(x0 + 1, y0 + 1), (x0 + tile_w - 1, y0 + tile_h - 1)],
                    color.filled(),
                ))
                .map_err(render_err)?;
            tiles_area
                .draw(&Text::new(
                    code.to_string(),
                    (x0 + 3, y0 + 3),
                    ("sans-serif", font_size as f64).into_font().color(&BLACK),
                ))
                .map_err(render_err)?;
        }
    }

    let entries = [
        (value_label.to_string(), gdp_color(1.0)),
        (constants::LEGEND_MISSING_FROM_SOURCE.to_string(), MISSING_COLOR),
        (constants::LEGEND_NO_GDP_DATA.to_string(), NO_DATA_COLOR),
    ];
    let slot = (body_w / entries.len() as u32) as i32;
    for (i, (label, color)) in entries.iter().enumerate() {
        let x = i as i32 * slot + 10;
        legend_area
            .draw(&Rectangle::new([(x, 20), (x + 18, 38)], color.filled()))
            .map_err(render_err)?;
        legend_area
            .draw(&Text::new(
                label.clone(),
                (x + 26, 22),
                ("sans-serif", 14).into_font().color(&BLACK),
            ))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Draw one line per country over the year window. Countries without points still
/// get a legend entry.
pub fn draw_xy_plot(
    path: &Path,
    size: (u32, u32),
    title: &str,
    years: RangeInclusive<i32>,
    series: &[(String, Vec<(i32, f64)>)],
) -> Result<()> {
    ensure_parent_dir(path)?;
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let max_gdp = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(_, v)| *v))
        .fold(f64::NEG_INFINITY, f64::max);

    if series.is_empty() || !max_gdp.is_finite() {
        let (w, h) = size;
        root.draw(&Text::new(
            title.to_string(),
            (20, 20),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(render_err)?;
        root.draw(&Text::new(
            constants::LEGEND_NO_GDP_DATA,
            (w as i32 / 2 - 50, h as i32 / 2),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(render_err)?;
        for (i, (name, _)) in series.iter().enumerate() {
            root.draw(&Text::new(
                name.clone(),
                (20, h as i32 / 2 + 30 + 20 * i as i32),
                ("sans-serif", 14).into_font().color(&Palette99::pick(i)),
            ))
            .map_err(render_err)?;
        }
        root.present().map_err(render_err)?;
        return Ok(());
    }

    let min_year = *years.start();
    let max_year = (*years.end()).max(min_year.saturating_add(1));
    let y_top = if max_gdp > 0.0 { max_gdp * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(min_year..max_year, 0f64..y_top)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(constants::XY_X_TITLE)
        .y_desc(constants::XY_Y_TITLE)
        .y_label_formatter(&|v| format!("{:.2e}", v))
        .draw()
        .map_err(render_err)?;

    for (i, (name, points)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(render_err)?
            .label(name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Columns and rows for `n` tiles filling a `w` x `h` area with roughly square tiles
fn grid_shape(n: usize, w: u32, h: u32) -> (u32, u32) {
    let n = n.max(1) as f64;
    let aspect = if h > 0 { w as f64 / h as f64 } else { 1.0 };
    let cols = (n * aspect).sqrt().ceil().max(1.0) as u32;
    let rows = (n / cols as f64).ceil().max(1.0) as u32;
    (cols, rows)
}

/// Map [0, 1] to a light-to-dark green
fn gdp_color(value: f64) -> RGBColor {
    let v = value.clamp(0.0, 1.0);
    RGBColor(
        (220.0 - 200.0 * v) as u8,
        (245.0 - 125.0 * v) as u8,
        (220.0 - 190.0 * v) as u8,
    )
}
