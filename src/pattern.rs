//! Seed loaders: plain `(x, y)` point lists and run-length encoded patterns.
//!
//! Loading is best-effort. Lines or characters that do not parse are logged
//! and skipped rather than aborting the load; only I/O failures and an RLE
//! body without a usable header are errors.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::PatternError;
use crate::life::Life;
use crate::point::Point;

/// Outcome of a load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// `add_point` calls issued (duplicates included).
    pub cells: usize,
    /// Input lines that were not understood, verbatim.
    pub skipped: Vec<String>,
}

/// Parse a single `(x, y)` line. Trailing spaces are allowed.
pub fn parse_point(line: &str) -> Option<Point> {
    let inner = line.trim_end().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    if x.starts_with(' ') || !y.starts_with(' ') {
        return None;
    }
    let x = x.parse::<i64>().ok()?;
    let y = y[1..].parse::<i64>().ok()?;
    Some(Point::new(x, y))
}

/// Seed `life` from a point list, one `(x, y)` per line.
pub fn load_points<R: BufRead>(reader: R, life: &mut dyn Life) -> Result<LoadReport, PatternError> {
    let mut report = LoadReport::default();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_point(&line) {
            Some(p) => {
                life.add_point(p);
                report.cells += 1;
            }
            None => {
                warn!(line = %line, "unrecognized line in point list");
                report.skipped.push(line);
            }
        }
    }
    Ok(report)
}

/// Open `path` and seed `life` from its RLE contents.
pub fn load_rle_file(path: impl AsRef<Path>, life: &mut dyn Life) -> Result<LoadReport, PatternError> {
    let file = File::open(path.as_ref())?;
    load_rle(BufReader::new(file), life)
}

/// `(width, height)` from an `x = W, y = H[, rule = ...]` header line.
fn parse_header(line: &str) -> Option<(i64, i64)> {
    let mut parts = line.split(',').map(str::trim);
    let mut value_of = |key: &str| -> Option<i64> {
        let (k, v) = parts.next()?.split_once('=')?;
        if k.trim() != key {
            return None;
        }
        v.trim().parse::<i64>().ok().filter(|n| *n >= 0)
    };
    let width = value_of("x")?;
    let height = value_of("y")?;
    if let Some(rule) = parts.find_map(|p| p.split_once('=').filter(|(k, _)| k.trim() == "rule")) {
        let rule = rule.1.trim();
        if !rule.eq_ignore_ascii_case("B3/S23") && rule != "23/3" {
            warn!(rule, "pattern declares a non-Conway rule; simulating B3/S23 anyway");
        }
    }
    Some((width, height))
}

fn is_header(line: &str) -> bool {
    line.trim_start().starts_with('x')
}

struct RleCursor {
    origin_x: i64,
    width: i64,
    x: i64,
    y: i64,
    count: Option<i64>,
}

impl RleCursor {
    fn new(width: i64, height: i64) -> Self {
        // Centre the pattern on the origin; rows run downward.
        let origin_x = -width / 2;
        Self {
            origin_x,
            width,
            x: origin_x,
            y: height / 2,
            count: None,
        }
    }

    fn push_digit(&mut self, digit: u8) -> Result<(), PatternError> {
        let next = self
            .count
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(digit - b'0')));
        match next {
            Some(n) => {
                self.count = Some(n);
                Ok(())
            }
            None => Err(PatternError::InvalidCount {
                token: format!("{}{}", self.count.unwrap_or(0), digit as char),
            }),
        }
    }

    fn take_count(&mut self) -> i64 {
        self.count.take().unwrap_or(1)
    }

    /// Columns already consumed in the current row.
    fn column(&self) -> i64 {
        self.x.saturating_sub(self.origin_x)
    }

    fn live_run(&mut self, n: i64) -> Result<i64, PatternError> {
        // A run of live cells must stay inside the header's width.
        if n > self.width.saturating_sub(self.column()) {
            return Err(Self::bad_run(n, 'o'));
        }
        let start = self.x;
        self.x = start.checked_add(n).ok_or_else(|| Self::bad_run(n, 'o'))?;
        Ok(start)
    }

    fn skip_run(&mut self, n: i64) -> Result<(), PatternError> {
        self.x = self.x.checked_add(n).ok_or_else(|| Self::bad_run(n, 'b'))?;
        Ok(())
    }

    fn end_rows(&mut self, n: i64) -> Result<(), PatternError> {
        self.y = self.y.checked_sub(n).ok_or_else(|| Self::bad_run(n, '$'))?;
        self.x = self.origin_x;
        Ok(())
    }

    fn bad_run(n: i64, tag: char) -> PatternError {
        PatternError::InvalidCount {
            token: format!("{n}{tag}"),
        }
    }
}

/// Seed `life` from an RLE pattern.
///
/// `#` lines are comments. The header fixes the pattern's size, which places
/// its top-left cell at `(-W/2, H/2)`. In the body `No` adds N live cells,
/// `Nb` skips N cells, `N$` ends N rows and `!` ends the pattern; a missing
/// count means 1. A count that would move the cursor outside the `i64`
/// plane, or a live run wider than the header, is rejected with
/// [`PatternError::InvalidCount`].
pub fn load_rle<R: BufRead>(reader: R, life: &mut dyn Life) -> Result<LoadReport, PatternError> {
    let mut report = LoadReport::default();
    let mut cursor: Option<RleCursor> = None;

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if cursor.is_none() {
            if !is_header(trimmed) {
                return Err(PatternError::MissingHeader { line: line_no });
            }
            let (width, height) =
                parse_header(trimmed).ok_or(PatternError::InvalidHeader { line: line_no })?;
            debug!(width, height, "rle header");
            cursor = Some(RleCursor::new(width, height));
            continue;
        }
        let Some(cur) = cursor.as_mut() else {
            continue;
        };

        for &b in trimmed.as_bytes() {
            match b {
                b'0'..=b'9' => cur.push_digit(b)?,
                b'o' => {
                    let n = cur.take_count();
                    let start = cur.live_run(n)?;
                    for dx in 0..n {
                        life.add_point(Point::new(start + dx, cur.y));
                    }
                    report.cells += n as usize;
                }
                b'b' => {
                    let n = cur.take_count();
                    cur.skip_run(n)?;
                }
                b'$' => {
                    let n = cur.take_count();
                    cur.end_rows(n)?;
                }
                b'!' => return Ok(report),
                b if b.is_ascii_whitespace() => {}
                other => {
                    debug!(line = line_no, ch = %(other as char), "ignoring RLE character");
                    cur.count = None;
                }
            }
        }
    }

    if cursor.is_none() {
        warn!("RLE input has no header; nothing loaded");
    }
    Ok(report)
}
