//! Display formatting for Y-bus entries.
//!
//! Every entry is printed as `a + bj` / `a - bj` with exactly five fractional
//! digits in fixed-point notation.
//!
//! Rounding is that of Rust's `{:.5}`: the exact binary value of the `f64`
//! is rounded, and exact ties go to the even digit. So `0.015625` prints as
//! `0.01562` and `0.046875` as `0.04688`. Decimal literals such as `1.000005`
//! are not ties at all once stored as `f64`; they round by whichever side of
//! the tie their binary value falls on.
//!
//! The separator follows the sign of the imaginary part itself, not of its
//! rounded text, so `-0.000004j` renders as `- 0.00000j`. The real part is
//! printed exactly as `{:.5}` prints it, sign included (`-0.00000`).

use num_complex::Complex64;
use serde::Serialize;
use std::io::{self, Write};
use tabwriter::TabWriter;
use ybus_core::node_label;

use crate::ybus::YBus;

/// Fractional digits shown for each part.
pub const DECIMALS: usize = 5;

/// `"<re> + <im>j"` when `im >= 0`, else `"<re> - <|im|>j"`, five fractional
/// digits each.
pub fn format_complex(z: Complex64) -> String {
    let (sign, im) = if z.im < 0.0 { ('-', -z.im) } else { ('+', z.im) };
    format!("{:.*} {} {:.*}j", DECIMALS, z.re, sign, DECIMALS, im)
}

/// Labeled, formatted view of a [`YBus`].
///
/// Rows and columns share the labels `Node 1 .. Node N`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmittanceTable {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<String>>,
}

impl AdmittanceTable {
    pub fn from_ybus(ybus: &YBus) -> Self {
        let labels = (0..ybus.n_nodes()).map(node_label).collect();
        let cells = ybus
            .rows()
            .map(|row| row.iter().copied().map(format_complex).collect())
            .collect();
        Self { labels, cells }
    }

    pub fn n_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Formatted cell by 0-based row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Write a tab-aligned table with a header row and a label column.
    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> {
        let mut tw = TabWriter::new(out).padding(2);
        write!(tw, " ")?;
        for label in &self.labels {
            write!(tw, "\t{}", label)?;
        }
        writeln!(tw)?;
        for (label, row) in self.labels.iter().zip(&self.cells) {
            write!(tw, "{}", label)?;
            for cell in row {
                write!(tw, "\t{}", cell)?;
            }
            writeln!(tw)?;
        }
        tw.flush()
    }

    /// The table rendered by [`write_to`](Self::write_to), as a `String`.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
