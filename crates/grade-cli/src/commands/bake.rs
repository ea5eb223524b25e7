//! LUT bake command

use crate::BakeArgs;
use anyhow::{Context, Result};
use grade_lut::{ColorGrading, LutBaker, LutKind, MemorySurface, write_cube};
use std::time::Instant;
use tracing::{debug, info};

pub fn run(args: BakeArgs, verbose: bool) -> Result<()> {
    let mut builder = super::resolve_params(&args.grade)?.to_builder();
    if let Some(dim) = args.dimension {
        builder = builder.dimension(dim);
    }
    if let Some(format) = args.format {
        builder = builder.format(format);
    }
    let params = builder.build();

    if args.print_config {
        print!("{}", serde_yaml::to_string(&params).context("Failed to serialize parameters")?);
    }

    let baker = LutBaker::new(&params);
    if verbose {
        match baker.kind() {
            LutKind::OneDimensional => println!(
                "Baking {} curve ({} entries)",
                params.tone_mapper.name(),
                baker.dimension()
            ),
            LutKind::ThreeDimensional => println!(
                "Baking {} cube ({}^3, {:?})",
                params.tone_mapper.name(),
                baker.dimension(),
                params.format
            ),
        }
    }

    let start = Instant::now();
    let grid = baker.bake();
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Bake finished");

    let title = args.title.clone().unwrap_or_else(|| {
        args.output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "grade".into())
    });
    write_cube(&args.output, &grid, &title)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;
    info!(path = %args.output.display(), "Wrote LUT");

    // Hand the grid to an in-memory device to report what a renderer would get
    let mut surface = MemorySurface::new();
    let grading = ColorGrading::upload(&mut surface, grid).context("Texture upload failed")?;
    if verbose {
        if let Some(tex) = surface.texture(grading.handle()) {
            let desc = tex.desc();
            println!(
                "Texture: {:?} {}x{}x{}, {} bytes",
                desc.format,
                desc.width,
                desc.height,
                desc.depth,
                tex.bytes().len()
            );
        }
        println!("Done.");
    }
    grading.destroy(&mut surface);

    Ok(())
}
