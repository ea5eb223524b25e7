//! Adobe/Resolve `.cube` export of baked LUTs.
//!
//! The input domain of a baked LUT is LogC (EI 800) encoded scene linear,
//! except for LDR curves which take linear input. Output is display
//! encoded. Cube data is written red fastest, which is also the memory
//! order of [`LutGrid`], so cells are written sequentially.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! 0.000000 0.000000 0.000000
//! ...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{LutError, LutResult};
use crate::grid::{LutGrid, LutKind};

/// Contents of a parsed `.cube` file.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFile {
    /// Title, if present.
    pub title: Option<String>,
    /// Curve or cube.
    pub kind: LutKind,
    /// Entries of a 1D LUT, or the edge length of a 3D LUT.
    pub size: usize,
    /// RGB rows in file order.
    pub data: Vec<[f32; 3]>,
}

/// Writes `grid` to a `.cube` file at `path`.
pub fn write_cube<P: AsRef<Path>>(path: P, grid: &LutGrid, title: &str) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_cube_to(&mut writer, grid, title)?;
    writer.flush()?;
    Ok(())
}

/// Writes `grid` in `.cube` format to any writer.
pub fn write_cube_to<W: Write>(writer: &mut W, grid: &LutGrid, title: &str) -> LutResult<()> {
    writeln!(writer, "# Generated by grade-lut")?;
    writeln!(writer, "TITLE \"{}\"", title.replace('"', "'"))?;
    match grid.kind() {
        LutKind::OneDimensional => writeln!(writer, "LUT_1D_SIZE {}", grid.dimension())?,
        LutKind::ThreeDimensional => writeln!(writer, "LUT_3D_SIZE {}", grid.dimension())?,
    }
    writeln!(writer)?;

    let data = grid.data();
    for i in 0..data.len() {
        let [r, g, b] = data.rgb(i);
        writeln!(writer, "{r:.6} {g:.6} {b:.6}")?;
    }
    Ok(())
}

/// Reads a `.cube` file.
pub fn read_cube<P: AsRef<Path>>(path: P) -> LutResult<CubeFile> {
    let file = File::open(path.as_ref())?;
    parse_cube(BufReader::new(file))
}

/// Parses `.cube` data. Domain lines are accepted and ignored.
pub fn parse_cube<R: BufRead>(reader: R) -> LutResult<CubeFile> {
    let mut title = None;
    let mut header: Option<(LutKind, usize)> = None;
    let mut data = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("TITLE") {
            title = Some(rest.trim().trim_matches('"').to_string());
        } else if line.starts_with("LUT_1D_SIZE") {
            header = Some((LutKind::OneDimensional, parse_size(line)?));
        } else if line.starts_with("LUT_3D_SIZE") {
            header = Some((LutKind::ThreeDimensional, parse_size(line)?));
        } else if line.starts_with("DOMAIN_MIN") || line.starts_with("DOMAIN_MAX") {
            continue;
        } else {
            data.push(parse_rgb(line)?);
        }
    }

    let (kind, size) = header.ok_or_else(|| LutError::Parse("missing LUT size".into()))?;
    let expected = match kind {
        LutKind::OneDimensional => size,
        LutKind::ThreeDimensional => size
            .checked_mul(size)
            .and_then(|s| s.checked_mul(size))
            .ok_or_else(|| LutError::Parse(format!("LUT size {size} too large")))?,
    };
    if data.len() != expected {
        return Err(LutError::Parse(format!(
            "expected {expected} entries, found {}",
            data.len()
        )));
    }

    Ok(CubeFile { title, kind, size, data })
}

fn parse_size(line: &str) -> LutResult<usize> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| LutError::Parse("invalid size line".into()))?
        .parse()
        .map_err(|_| LutError::Parse(format!("invalid size value: {line}")))
}

fn parse_rgb(line: &str) -> LutResult<[f32; 3]> {
    let mut parts = line.split_whitespace().map(str::parse::<f32>);
    let mut next = || match parts.next() {
        Some(Ok(v)) => Ok(v),
        _ => Err(LutError::Parse(format!("invalid RGB line: {line}"))),
    };
    Ok([next()?, next()?, next()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_3d() {
        let text = "TITLE \"Test\"\nLUT_3D_SIZE 2\nDOMAIN_MIN 0 0 0\n\
            0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
        let cube = parse_cube(Cursor::new(text)).unwrap();
        assert_eq!(cube.title.as_deref(), Some("Test"));
        assert_eq!(cube.kind, LutKind::ThreeDimensional);
        assert_eq!(cube.size, 2);
        assert_eq!(cube.data[1], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parse_rejects_short_data() {
        let text = "LUT_1D_SIZE 4\n0 0 0\n1 1 1\n";
        assert!(matches!(parse_cube(Cursor::new(text)), Err(LutError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let text = "LUT_1D_SIZE 1\n0 zero 0\n";
        assert!(parse_cube(Cursor::new(text)).is_err());
        assert!(parse_cube(Cursor::new("0 0 0\n")).is_err());
    }

    #[test]
    fn test_parse_rejects_huge_size() {
        let text = "LUT_3D_SIZE 10000000\n0 0 0\n";
        assert!(matches!(parse_cube(Cursor::new(text)), Err(LutError::Parse(_))));
        let text = format!("LUT_3D_SIZE {}\n0 0 0\n", usize::MAX);
        assert!(matches!(parse_cube(Cursor::new(text)), Err(LutError::Parse(_))));
    }
}
