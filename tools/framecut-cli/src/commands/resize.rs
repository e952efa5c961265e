//! Solve an aspect-locked output size.

use framecut_editor_model::geometry::{DimensionEdit, MediaGeometry, Resolution};

/// Apply one dimension edit to `base` and return the resulting size.
pub fn solve(
    base: Resolution,
    width: Option<u32>,
    height: Option<u32>,
) -> anyhow::Result<Resolution> {
    let edit = match (width, height) {
        (Some(w), None) => DimensionEdit::Width(w),
        (None, Some(h)) => DimensionEdit::Height(h),
        _ => anyhow::bail!("Give exactly one of --width or --height"),
    };
    if base.width == 0 || base.height == 0 {
        anyhow::bail!("Base size must be non-zero, got {base}");
    }

    let mut geometry = MediaGeometry::new(base);
    if geometry.apply(edit).is_none() {
        tracing::warn!(%base, ?edit, "Companion dimension rounds to zero; left unchanged");
    }
    Ok(geometry.output())
}

pub fn run(base: Resolution, width: Option<u32>, height: Option<u32>) -> anyhow::Result<()> {
    let output = solve(base, width, height)?;
    println!("{output}");
    Ok(())
}
