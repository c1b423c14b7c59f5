//! Text input parsing and solution output.
//!
//! The input format is a header line `N K` followed by `N` lines `x y w`.
//! The output format is the cost, the enclosed point count, the edge count,
//! and one `x1 y1 x2 y2` line per boundary edge, all in fixed notation with
//! six fractional digits.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::point::Point;
use crate::solver::Solution;

/// A parsed problem instance.
#[derive(Debug, Clone)]
pub struct Instance {
    /// The weighted points.
    pub points: Vec<Point>,
    /// Minimum number of points the polygon must enclose.
    pub coverage_target: usize,
}

/// Parses an instance from whitespace-separated text.
///
/// Blank lines are skipped; every non-blank line must carry exactly the
/// expected token count. Feasibility of the coverage target against the point
/// count is checked by the solver, not here.
pub fn parse_instance<R: BufRead>(reader: R) -> Result<Instance> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line));

    let (n, k) = loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(invalid(0, "missing header line"));
        };
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 2 {
            return Err(invalid(line_no, "header must be `N K`"));
        }
        let n: usize = parse_token(tokens[0], line_no, "point count")?;
        let k: usize = parse_token(tokens[1], line_no, "coverage target")?;
        if n == 0 {
            return Err(invalid(line_no, "point count must be at least 1"));
        }
        if k == 0 {
            return Err(invalid(line_no, "coverage target must be at least 1"));
        }
        break (n, k);
    };

    let mut points = Vec::with_capacity(n);
    for (line_no, line) in lines {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if points.len() == n {
            return Err(invalid(line_no, format!("expected {n} point lines")));
        }
        if tokens.len() != 3 {
            return Err(invalid(line_no, "point line must be `x y w`"));
        }
        let x: f64 = parse_token(tokens[0], line_no, "x coordinate")?;
        let y: f64 = parse_token(tokens[1], line_no, "y coordinate")?;
        let w: f64 = parse_token(tokens[2], line_no, "weight")?;
        points.push(Point::new(x, y, w));
    }

    if points.len() != n {
        return Err(invalid(
            0,
            format!("expected {n} point lines, found {}", points.len()),
        ));
    }

    Ok(Instance {
        points,
        coverage_target: k,
    })
}

/// Writes a solution in the text output format.
pub fn write_solution<W: Write>(writer: &mut W, solution: &Solution) -> Result<()> {
    writeln!(writer, "{:.6}", solution.cost)?;
    writeln!(writer, "{}", solution.enclosed)?;
    writeln!(writer, "{}", solution.edges.len())?;
    for e in &solution.edges {
        writeln!(writer, "{:.6} {:.6} {:.6} {:.6}", e.x1, e.y1, e.x2, e.y2)?;
    }
    Ok(())
}

fn parse_token<T: std::str::FromStr>(token: &str, line: usize, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| invalid(line, format!("invalid {what} `{token}`")))
}

fn invalid(line: usize, reason: impl Into<String>) -> Error {
    Error::InvalidInput {
        line,
        reason: reason.into(),
    }
}
