use std::fs;
use std::io::Cursor;
use std::ops::Range;
use std::path::{Path, PathBuf};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::info;
use plotters::prelude::*;
use crate::drivers::error::PipelineError;
use crate::drivers::table::Table;
use crate::types::{Channel, CHANNEL_COUNT};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub line: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            background: WHITE,
            foreground: BLACK,
            line: RGBColor(31, 119, 180),
        }
    }
}
pub fn plot_file_name(channel: Channel) -> String {
    format!("{channel}_graph.png")
}
pub fn ensure_output_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
/// Writes one chart per channel into `output_dir`, replacing existing files.
pub fn export_channel_plots(
    table: &Table,
    output_dir: &Path,
    style: &PlotStyle,
) -> Result<Vec<PathBuf>, PipelineError> {
    ensure_output_dir(output_dir)?;
    let mut written = Vec::with_capacity(CHANNEL_COUNT);
    for channel in Channel::ALL {
        let png = render_channel_png(table, channel, style)?;
        let path = output_dir.join(plot_file_name(channel));
        fs::write(&path, png).map_err(|source| PipelineError::WritePlot {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
/// Runs of consecutive present values; a missing value breaks the line.
pub fn line_segments(table: &Table, channel: Channel) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for reading in table.readings() {
        match reading.value(channel) {
            Some(v) => current.push((reading.time_s, v)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
pub fn render_channel_png(
    table: &Table,
    channel: Channel,
    style: &PlotStyle,
) -> Result<Vec<u8>, PipelineError> {
    let segments = line_segments(table, channel);
    let x_range = padded_range(table.readings().iter().map(|r| r.time_s));
    let y_range = padded_range(segments.iter().flatten().map(|&(_, y)| y));
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(
                format!("{channel} Graph"),
                ("sans-serif", 24).into_font().color(&style.foreground),
            )
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Amplitude")
            .axis_desc_style(("sans-serif", 16).into_font().color(&style.foreground))
            .label_style(("sans-serif", 12).into_font().color(&style.foreground))
            .bold_line_style(&style.foreground.mix(0.2))
            .light_line_style(&style.foreground.mix(0.05))
            .draw()?;
        let color = style.line;
        // Empty series carries the legend entry so it shows even without data.
        chart
            .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), &color))?
            .label(format!("{channel} Data"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        for segment in segments {
            chart.draw_series(LineSeries::new(segment, &color))?;
        }
        chart
            .configure_series_labels()
            .label_font(("sans-serif", 14).into_font().color(&style.foreground))
            .border_style(&style.foreground.mix(0.3))
            .background_style(&style.background.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Axis range over the finite values with 5% headroom; flat or empty data
/// gets a fixed-width range instead.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if hi - lo < f64::EPSILON {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PipelineError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PipelineError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
