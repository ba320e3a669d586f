//! Layout preview command.
//!
//! Runs the same geometry the tiling engine uses and prints the resulting
//! frames, so padding and taskbar settings can be checked without a live
//! window system.

use std::path::Path;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, TaskbarPosition, TilingConfig};
use crate::error::SwitchbarError;
use crate::modules::tiling::Rect;
use crate::modules::tiling::layout::LayoutGeometry;

/// Arguments of `switchbar layout`.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Screen width in pixels.
    #[arg(long, short = 'W')]
    pub width: f64,

    /// Screen height in pixels.
    #[arg(long, short = 'H')]
    pub height: f64,

    /// Number of windows; 1 shows the fullscreen frame.
    #[arg(long, short = 'n', default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..))]
    pub count: u8,

    /// Padding around and between windows (overrides the configuration).
    #[arg(long)]
    pub padding: Option<f64>,

    /// Taskbar band height (overrides the configuration).
    #[arg(long, value_name = "PX")]
    pub taskbar_height: Option<f64>,

    /// Taskbar edge, `top` or `bottom` (overrides the configuration).
    #[arg(long, value_name = "EDGE")]
    pub taskbar_position: Option<TaskbarPosition>,

    /// Output as JSON instead of a table.
    #[arg(long, short)]
    pub json: bool,
}

/// Frames computed for one `layout` invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPreview {
    pub screen: Rect,
    pub taskbar_band: Rect,
    pub available_area: Rect,
    pub frames: Vec<Rect>,
}

#[derive(Tabled)]
struct FrameRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "Height")]
    height: String,
}

impl FrameRow {
    fn new(index: usize, frame: &Rect) -> Self {
        Self {
            index,
            x: format_px(frame.x),
            y: format_px(frame.y),
            width: format_px(frame.width),
            height: format_px(frame.height),
        }
    }
}

/// Formats a coordinate without a trailing `.0` for whole pixels.
fn format_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Applies the command-line overrides to the tiling configuration.
fn effective_config(args: &LayoutArgs, mut tiling: TilingConfig) -> TilingConfig {
    if let Some(padding) = args.padding {
        tiling.padding = padding;
    }
    if let Some(height) = args.taskbar_height {
        tiling.taskbar.height = height;
    }
    if let Some(position) = args.taskbar_position {
        tiling.taskbar.position = position;
    }
    tiling
}

/// Computes the frames for `args` under `tiling`.
///
/// # Errors
///
/// Returns [`SwitchbarError::InvalidArguments`] if the screen leaves no
/// usable area, or the columns of the split would have no width.
pub fn compute(args: &LayoutArgs, tiling: &TilingConfig) -> Result<LayoutPreview, SwitchbarError> {
    if !(args.width > 0.0 && args.height > 0.0) {
        return Err(SwitchbarError::InvalidArguments(
            "Screen width and height must be positive".to_string(),
        ));
    }

    let screen = Rect::new(0.0, 0.0, args.width, args.height);
    let geometry = LayoutGeometry::new(screen, tiling.taskbar, tiling.padding).ok_or_else(|| {
        SwitchbarError::InvalidArguments(
            "The taskbar band and padding leave no usable area on this screen".to_string(),
        )
    })?;

    let frames = if args.count == 1 {
        vec![geometry.fullscreen_bounds()]
    } else {
        geometry
            .split_bounds(usize::from(args.count))
            .ok_or_else(|| {
                SwitchbarError::InvalidArguments(format!(
                    "{} windows do not fit side by side on this screen",
                    args.count
                ))
            })?
            .into_vec()
    };

    Ok(LayoutPreview {
        screen,
        taskbar_band: geometry.taskbar_band(),
        available_area: geometry.available_area(),
        frames,
    })
}

/// Execute `switchbar layout`.
///
/// # Errors
///
/// Returns an error if the frames cannot be computed or serialized.
pub fn execute(args: &LayoutArgs, config_path: Option<&Path>) -> Result<(), SwitchbarError> {
    let (config, _) = config::load_or_default(config_path);
    let tiling = effective_config(args, config.tiling);
    let preview = compute(args, &tiling)?;

    if args.json {
        output::print_json(&preview)?;
        return Ok(());
    }

    let rows: Vec<FrameRow> =
        preview.frames.iter().enumerate().map(|(i, frame)| FrameRow::new(i + 1, frame)).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(0..5)).with(Alignment::right()))
        .to_string();

    let title = if preview.frames.len() == 1 {
        "Fullscreen".to_string()
    } else {
        format!("Split ({} columns)", preview.frames.len())
    };
    let area = preview.available_area;
    println!("{}", title.bold());
    println!(
        "{} {}x{} at {}, {} (padding {}, taskbar {:?} {})",
        "Available:".dimmed(),
        format_px(area.width),
        format_px(area.height),
        format_px(area.x),
        format_px(area.y),
        format_px(tiling.padding),
        tiling.taskbar.position,
        format_px(tiling.taskbar.height),
    );
    println!("{table}");

    Ok(())
}
