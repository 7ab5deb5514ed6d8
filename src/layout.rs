//! Fit and alignment of content inside a stage
//!
//! Produces the default target quad for a surface: the content rectangle
//! scaled by a [`FitMode`] and anchored by an [`Alignment`] within the stage.

use crate::geometry::{Quad, Rect};
use serde::{Deserialize, Serialize};

/// How content is sized to the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Fill the stage, ignoring aspect ratio
    #[default]
    Stretch,
    /// Largest aspect-preserving size inside the stage
    Contain,
    /// Smallest aspect-preserving size covering the stage
    Cover,
}

impl FitMode {
    /// Returns a human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            FitMode::Stretch => "Stretch",
            FitMode::Contain => "Contain",
            FitMode::Cover => "Cover",
        }
    }

    /// All available fit modes.
    pub fn all() -> &'static [FitMode] {
        &[FitMode::Stretch, FitMode::Contain, FitMode::Cover]
    }
}

/// Where the fitted content sits within the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Alignment {
    /// Returns a human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Alignment::Center => "Center",
            Alignment::TopLeft => "Top Left",
            Alignment::TopRight => "Top Right",
            Alignment::BottomLeft => "Bottom Left",
            Alignment::BottomRight => "Bottom Right",
        }
    }

    /// All available alignments.
    pub fn all() -> &'static [Alignment] {
        &[
            Alignment::Center,
            Alignment::TopLeft,
            Alignment::TopRight,
            Alignment::BottomLeft,
            Alignment::BottomRight,
        ]
    }

    /// Fraction of the free space placed before the content on each axis
    fn anchor(&self) -> (f64, f64) {
        match self {
            Alignment::Center => (0.5, 0.5),
            Alignment::TopLeft => (0.0, 0.0),
            Alignment::TopRight => (1.0, 0.0),
            Alignment::BottomLeft => (0.0, 1.0),
            Alignment::BottomRight => (1.0, 1.0),
        }
    }
}

/// Rectangle the content occupies in stage coordinates
///
/// Non-positive content dimensions fall back to the stage dimension on that
/// axis. With `Cover` the result may extend past the stage (negative offset).
pub fn fit_rect(
    stage_width: f64,
    stage_height: f64,
    content_width: f64,
    content_height: f64,
    fit: FitMode,
    align: Alignment,
) -> Rect {
    let content_width = if content_width > 0.0 { content_width } else { stage_width };
    let content_height = if content_height > 0.0 { content_height } else { stage_height };

    let (width, height) = match fit {
        FitMode::Stretch => (stage_width, stage_height),
        FitMode::Contain => {
            let scale = (stage_width / content_width).min(stage_height / content_height);
            (content_width * scale, content_height * scale)
        }
        FitMode::Cover => {
            let scale = (stage_width / content_width).max(stage_height / content_height);
            (content_width * scale, content_height * scale)
        }
    };

    let (ax, ay) = align.anchor();
    Rect::new(
        (stage_width - width) * ax,
        (stage_height - height) * ay,
        width,
        height,
    )
}

/// Target quad for "fill the stage" placement
pub fn fullscreen_quad(
    stage_width: f64,
    stage_height: f64,
    content_width: f64,
    content_height: f64,
    fit: FitMode,
    align: Alignment,
) -> Quad {
    fit_rect(stage_width, stage_height, content_width, content_height, fit, align).to_quad()
}
