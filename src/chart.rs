//! Bar chart rendering for the summary page
//!
//! Charts are drawn with plotters into an in-memory RGB buffer and encoded as
//! PNG, so nothing touches the filesystem and no system fonts are required.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::style::{FontStyle, FontTransform};
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{CHART_HEIGHT, CHART_WIDTH, ROTATE_LABELS_AFTER};

const FONT_FAMILY: &str = "sans-serif";
const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Fill of the upload count series
const ORANGE: RGBColor = RGBColor(255, 127, 14);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Series lengths differ: {labels} labels, {images} image totals, {uploads} upload totals")]
    MismatchedSeries {
        labels: usize,
        images: usize,
        uploads: usize,
    },

    #[error("Font registration failed: {0}")]
    Font(String),

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Input of one chart: category labels paired with two numeric series
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub labels: Vec<String>,
    pub images: Vec<i64>,
    pub uploads: Vec<i64>,
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn register_font() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
                .map_err(|_| "bundled font is not a valid TrueType file".to_string())
        })
        .clone()
        .map_err(ChartError::Font)
}

/// Render the series as overlaid bars and return PNG bytes
///
/// An empty series yields a blank image of the same size.
pub fn render_bar_chart(series: &ChartSeries) -> Result<Vec<u8>, ChartError> {
    if series.images.len() != series.labels.len() || series.uploads.len() != series.labels.len() {
        return Err(ChartError::MismatchedSeries {
            labels: series.labels.len(),
            images: series.images.len(),
            uploads: series.uploads.len(),
        });
    }

    let mut buffer = vec![255u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];

    if !series.labels.is_empty() {
        register_font()?;
        draw_bars(series, &mut buffer)?;
    }

    encode_png(&buffer, CHART_WIDTH, CHART_HEIGHT)
}

/// Tallest bar the y axis is scaled for; larger totals are drawn at this height
const BAR_CEILING: u64 = 1 << 53;

/// Bar height for a count, clamped to `0..=BAR_CEILING`
fn bar_value(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0).min(BAR_CEILING)
}

fn draw_bars(series: &ChartSeries, buffer: &mut [u8]) -> Result<(), ChartError> {
    let count = series.labels.len();
    let max_value = series
        .images
        .iter()
        .chain(series.uploads.iter())
        .map(|v| bar_value(*v))
        .max()
        .unwrap_or(0)
        .max(1);
    // 10% headroom above the tallest bar
    let y_max = max_value.saturating_add(max_value / 10).saturating_add(1);
    let rotate_labels = count > ROTATE_LABELS_AFTER;

    let root = BitMapBackend::with_buffer(buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&series.title, (FONT_FAMILY, 24).into_font())
        .margin(16)
        .x_label_area_size(if rotate_labels { 120 } else { 48 })
        .y_label_area_size(80)
        .build_cartesian_2d((0..count).into_segmented(), 0u64..y_max)
        .map_err(draw_err)?;

    let label_of = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(i) => series.labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(count)
            .x_label_formatter(&label_of)
            .x_desc(series.x_desc.as_str())
            .y_desc(series.y_desc.as_str())
            .label_style((FONT_FAMILY, 14).into_font());
        if rotate_labels {
            mesh.x_label_style(
                (FONT_FAMILY, 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            );
        }
        mesh.draw().map_err(draw_err)?;
    }

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(12)
                .data(series.images.iter().enumerate().map(|(i, v)| (i, bar_value(*v)))),
        )
        .map_err(draw_err)?
        .label("Total Images")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], BLUE.mix(0.7).filled()));

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(ORANGE.mix(0.7).filled())
                .margin(12)
                .data(series.uploads.iter().enumerate().map(|(i, v)| (i, bar_value(*v)))),
        )
        .map_err(draw_err)?
        .label("Total Uploads")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], ORANGE.mix(0.7).filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT_FAMILY, 14).into_font())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;

    Ok(())
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(buffer, width, height, ColorType::Rgb8)?;
    Ok(png)
}

/// Wrap PNG bytes as a data URI for an `<img src>` attribute
pub fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
