//! CLI command implementations

pub mod bake;
pub mod eval;
pub mod list;

use anyhow::{Context, Result};
use grade_color::GradingParameters;
use std::path::Path;

use crate::GradeArgs;

/// Load grading parameters from YAML
pub fn load_config(path: &Path) -> Result<GradingParameters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("Failed to parse: {}", path.display()))
}

/// Resolve the effective parameters: file, then flags, then clamping.
pub fn resolve_params(args: &GradeArgs) -> Result<GradingParameters> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => GradingParameters::default(),
    };

    let mut builder = base.clamped().to_builder();
    if let Some(tm) = args.tone_mapper {
        builder = builder.tone_mapper(tm);
    }
    if let Some(ev) = args.exposure {
        builder = builder.exposure(ev);
    }
    if let Some(night) = args.night {
        builder = builder.night_adaptation(night);
    }
    if args.temperature.is_some() || args.tint.is_some() {
        builder = builder.white_balance(
            args.temperature.unwrap_or(base.temperature),
            args.tint.unwrap_or(base.tint),
        );
    }
    if let Some(c) = args.contrast {
        builder = builder.contrast(c);
    }
    if let Some(v) = args.vibrance {
        builder = builder.vibrance(v);
    }
    if let Some(s) = args.saturation {
        builder = builder.saturation(s);
    }
    if args.luminance_scaling {
        builder = builder.luminance_scaling(true);
    }
    if args.gamut_mapping {
        builder = builder.gamut_mapping(true);
    }
    if let Some(oetf) = args.oetf {
        builder = builder.output(oetf);
    }
    Ok(builder.build())
}
