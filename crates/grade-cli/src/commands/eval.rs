//! Single color evaluation command

use crate::EvalArgs;
use anyhow::{Result, bail};
use grade_color::ColorGradingPipeline;
use grade_color::transfer::log_c;
use grade_math::Vec3;

pub fn run(args: EvalArgs, verbose: bool) -> Result<()> {
    let [r, g, b] = args.rgb[..] else {
        bail!("Expected 3 values, got {}", args.rgb.len());
    };
    let params = super::resolve_params(&args.grade)?;
    let pipeline = ColorGradingPipeline::new(&params);

    let input = Vec3::new(r, g, b);
    let out = if args.log {
        pipeline.evaluate(input)
    } else {
        pipeline.grade(input.max(Vec3::ZERO))
    };

    if verbose {
        let linear = if args.log { input.map(log_c::decode) } else { input };
        let coord = if args.log { input } else { input.map(log_c::encode) };
        println!("Tone mapper: {}", params.tone_mapper.name());
        println!("Output:      {}", params.output.name());
        println!("Linear in:   {:.6} {:.6} {:.6}", linear.x, linear.y, linear.z);
        println!("LogC coord:  {:.6} {:.6} {:.6}", coord.x, coord.y, coord.z);
    }
    println!("{:.6} {:.6} {:.6}", out.x, out.y, out.z);
    Ok(())
}
