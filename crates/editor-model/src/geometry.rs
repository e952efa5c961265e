//! Output geometry and aspect-ratio locking.
//!
//! The base resolution is the decoded size of the source media. It is
//! captured once and never changes, so repeated edits always solve the
//! companion dimension against the original ratio and never drift.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pixel resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; zero for a degenerate height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `1920x1080`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w
            .trim()
            .parse()
            .map_err(|e| format!("invalid width '{w}': {e}"))?;
        let height = h
            .trim()
            .parse()
            .map_err(|e| format!("invalid height '{h}': {e}"))?;
        Ok(Self { width, height })
    }
}

/// One user-edited dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionEdit {
    Width(u32),
    Height(u32),
}

/// Solve the companion of an edited dimension against the base ratio.
///
/// Returns the full `(width, height)` pair. The companion is
/// `round(edited * other_base / edited_base)` and may be zero for very
/// small edits or a degenerate base; callers must not write a zero
/// companion back to the field.
pub fn solve_aspect(base: Resolution, edit: DimensionEdit) -> Resolution {
    match edit {
        DimensionEdit::Width(width) => Resolution {
            width,
            height: scale(width, base.height, base.width),
        },
        DimensionEdit::Height(height) => Resolution {
            width: scale(height, base.width, base.height),
            height,
        },
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (value as f64 * numerator as f64 / denominator as f64).round() as u32
}

/// Base resolution plus the user-adjusted output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaGeometry {
    base: Resolution,
    pub width: u32,
    pub height: u32,
}

impl MediaGeometry {
    /// Geometry whose output size starts at the base resolution.
    pub fn new(base: Resolution) -> Self {
        Self {
            base,
            width: base.width,
            height: base.height,
        }
    }

    /// The captured source resolution.
    pub fn base(&self) -> Resolution {
        self.base
    }

    /// Current output size.
    pub fn output(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Apply a committed edit and co-vary the companion dimension.
    ///
    /// The edited value is bounded to `[1, base]`. Returns the solved
    /// companion, or `None` when it came out as zero and was left alone.
    pub fn apply(&mut self, edit: DimensionEdit) -> Option<u32> {
        let edit = match edit {
            DimensionEdit::Width(w) => DimensionEdit::Width(w.clamp(1, self.base.width.max(1))),
            DimensionEdit::Height(h) => {
                DimensionEdit::Height(h.clamp(1, self.base.height.max(1)))
            }
        };
        let solved = solve_aspect(self.base, edit);

        match edit {
            DimensionEdit::Width(w) => {
                self.width = w;
                (solved.height != 0).then(|| {
                    self.height = solved.height;
                    solved.height
                })
            }
            DimensionEdit::Height(h) => {
                self.height = h;
                (solved.width != 0).then(|| {
                    self.width = solved.width;
                    solved.width
                })
            }
        }
    }
}
