//! Tone mapper listing

use anyhow::Result;
use grade_color::tonemap::ToneMapper;

pub fn run() -> Result<()> {
    println!("{:<16} {:<4} {:<4}", "NAME", "1D", "LDR");
    for tm in ToneMapper::ALL {
        let mark = |b: bool| if b { "yes" } else { "-" };
        println!(
            "{:<16} {:<4} {:<4}",
            tm.name(),
            mark(tm.is_one_dimensional()),
            mark(tm.is_ldr())
        );
    }
    Ok(())
}
