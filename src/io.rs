//! Point-record file loading for the CLI drivers.
//!
//! One point per line, `x,y` (comma or whitespace separated). Blank lines
//! and `#` comments are skipped. The clustering engine itself never touches
//! the filesystem.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ScanError;
use crate::types::Point2;

/// Load a point file.
pub fn load_points(path: &Path) -> Result<Vec<Point2>, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut points = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| ScanError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        points.push(parse_record(trimmed).map_err(|message| ScanError::Parse {
            path: path.display().to_string(),
            line: idx + 1,
            message,
        })?);
    }
    Ok(points)
}

fn parse_record(line: &str) -> Result<Point2, String> {
    if !line.contains(',') {
        return parse_record_whitespace(line);
    }
    let mut fields = line.splitn(3, ',');

    let x = parse_coord(fields.next(), line)?;
    let y = parse_coord(fields.next(), line)?;
    if let Some(rest) = fields.next() {
        if !rest.trim().is_empty() {
            return Err(format!("trailing fields in record '{}'", line));
        }
    }
    Ok(Point2::new(x, y))
}

fn parse_record_whitespace(line: &str) -> Result<Point2, String> {
    let mut fields = line.split_whitespace();
    let x = parse_coord(fields.next(), line)?;
    let y = parse_coord(fields.next(), line)?;
    if fields.next().is_some() {
        return Err(format!("trailing fields in record '{}'", line));
    }
    Ok(Point2::new(x, y))
}

fn parse_coord(field: Option<&str>, line: &str) -> Result<f64, String> {
    let field = field.ok_or_else(|| format!("expected 'x,y', got '{}'", line))?;
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad coordinate '{}': {}", field.trim(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "spatial_scan_io_test_{}_{}.csv",
            std::process::id(),
            contents.len()
        ));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_comma_and_whitespace() {
        let path = write_temp("# header comment\n1.5,2.5\n\n3.0 4.0\n  5,6  \n");
        let points = load_points(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            points,
            vec![
                Point2::new(1.5, 2.5),
                Point2::new(3.0, 4.0),
                Point2::new(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn test_load_reports_bad_record() {
        let path = write_temp("1,2\nnope,4\n");
        let err = load_points(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        match err {
            ScanError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_points(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
