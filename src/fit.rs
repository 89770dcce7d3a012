//! Mapping a source image onto the display area.
//!
//! [`plan_fit`] is pure geometry: it turns source dimensions, a display area
//! and a [`FitPolicy`] into a [`FitPlan`]. [`apply_plan`] then renders that
//! plan with `image::imageops`. All pixel sizes truncate toward zero so the
//! same inputs always give the same output.

use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

const RESIZE_FILTER: FilterType = FilterType::Triangle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitPolicy {
    /// Fill the whole area, cropping whatever overflows.
    #[default]
    CenterCrop,
    /// Show the whole image, padding the leftover space.
    PaddedFit,
    /// Resize to the area, ignoring aspect ratio.
    Stretch,
    /// Show the image as-is.
    NoOp,
}

impl FitPolicy {
    /// Next policy for the cycle key. `NoOp` is only reachable from the CLI.
    pub fn cycle(self) -> Self {
        match self {
            FitPolicy::CenterCrop => FitPolicy::PaddedFit,
            FitPolicy::PaddedFit => FitPolicy::Stretch,
            FitPolicy::Stretch | FitPolicy::NoOp => FitPolicy::CenterCrop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The host reports (1, 1) until layout has assigned real space.
    pub fn is_unassigned(&self) -> bool {
        self.width == 1 && self.height == 1
    }
}

/// Size of the rendering surface the fitted image must occupy.
pub type DisplayArea = Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPlan {
    Unchanged,
    Stretch {
        to: Size,
    },
    /// Optionally scale (aspect preserved), then cut `crop` out of the result.
    CenterCrop {
        scale_to: Option<Size>,
        crop: CropBox,
    },
    /// Scale to `scale_to` and paste at `offset` on a `canvas`-sized fill.
    Padded {
        scale_to: Size,
        canvas: Size,
        offset: (u32, u32),
    },
}

impl FitPlan {
    pub fn output_size(&self, source: Size) -> Size {
        match *self {
            FitPlan::Unchanged => source,
            FitPlan::Stretch { to } => to,
            FitPlan::CenterCrop { crop, .. } => Size::new(crop.width, crop.height),
            FitPlan::Padded { canvas, .. } => canvas,
        }
    }
}

pub fn plan_fit(source: Size, area: DisplayArea, policy: FitPolicy) -> FitPlan {
    if area.is_unassigned() || source.width == 0 || source.height == 0 {
        return FitPlan::Unchanged;
    }
    let aspect = source.width as f64 / source.height as f64;
    let plan = match policy {
        FitPolicy::NoOp => FitPlan::Unchanged,
        FitPolicy::Stretch => FitPlan::Stretch { to: area },
        FitPolicy::CenterCrop => plan_center_crop(source, area, aspect),
        FitPolicy::PaddedFit => plan_padded(area, aspect),
    };
    log::debug!(
        "[fit] {:?}: {}x{} (ar {:.2}) -> {:?} in area {}x{}",
        policy,
        source.width,
        source.height,
        aspect,
        plan.output_size(source),
        area.width,
        area.height,
    );
    plan
}

fn plan_center_crop(source: Size, area: DisplayArea, aspect: f64) -> FitPlan {
    let covered = source.width >= area.width && source.height >= area.height;
    let scaled = if covered {
        source
    } else {
        let width_deficit = source.width as i64 - area.width as i64;
        let height_deficit = source.height as i64 - area.height as i64;
        let by_width = Size::new(area.width, floor_px(area.width as f64 / aspect));
        let by_height = Size::new(floor_px(area.height as f64 * aspect), area.height);
        let (first, second) = if width_deficit <= height_deficit {
            (by_width, by_height)
        } else {
            (by_height, by_width)
        };
        // The deficit comparison can pick an axis whose scale still leaves the
        // other axis short (e.g. 100x10 into 150x50); fall back to the other.
        if covers(first, area) {
            first
        } else if covers(second, area) {
            second
        } else {
            // Only float truncation can land here; clamp up by one pixel.
            Size::new(second.width.max(area.width), second.height.max(area.height))
        }
    };
    FitPlan::CenterCrop {
        scale_to: (!covered).then_some(scaled),
        crop: CropBox {
            x: (scaled.width - area.width) / 2,
            y: (scaled.height - area.height) / 2,
            width: area.width,
            height: area.height,
        },
    }
}

fn plan_padded(area: DisplayArea, aspect: f64) -> FitPlan {
    let candidate_height = floor_px(area.width as f64 / aspect);
    let scale_to = if candidate_height <= area.height {
        Size::new(area.width, candidate_height)
    } else {
        Size::new(floor_px(area.height as f64 * aspect).min(area.width), area.height)
    };
    FitPlan::Padded {
        scale_to,
        canvas: area,
        offset: (
            (area.width - scale_to.width) / 2,
            (area.height - scale_to.height) / 2,
        ),
    }
}

fn covers(size: Size, area: DisplayArea) -> bool {
    size.width >= area.width && size.height >= area.height
}

fn floor_px(v: f64) -> u32 {
    (v.floor() as u32).max(1)
}

/// Render `plan` against `image`. `pad` fills the bars of a padded fit.
pub fn apply_plan(image: &DynamicImage, plan: &FitPlan, pad: Rgba<u8>) -> RgbaImage {
    match *plan {
        FitPlan::Unchanged => image.to_rgba8(),
        FitPlan::Stretch { to } => imageops::resize(image, to.width, to.height, RESIZE_FILTER),
        FitPlan::CenterCrop { scale_to, crop } => {
            let scaled = match scale_to {
                Some(s) => imageops::resize(image, s.width, s.height, RESIZE_FILTER),
                None => image.to_rgba8(),
            };
            imageops::crop_imm(&scaled, crop.x, crop.y, crop.width, crop.height).to_image()
        }
        FitPlan::Padded {
            scale_to,
            canvas,
            offset,
        } => {
            let scaled = imageops::resize(image, scale_to.width, scale_to.height, RESIZE_FILTER);
            let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, pad);
            imageops::overlay(&mut out, &scaled, offset.0 as i64, offset.1 as i64);
            out
        }
    }
}

/// Parse a six-digit hex color such as `1f1f1f` (a leading `#` is allowed).
pub fn parse_hex_color(s: &str) -> Option<Rgba<u8>> {
    let hex = s.trim().trim_start_matches('#');
    // `from_str_radix` alone would accept a sign such as "+1".
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}
