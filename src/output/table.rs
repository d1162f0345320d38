//! Aligned text tables.
//!
//! Column widths are measured with `unicode-width`, so translated text in
//! wide scripts lines up. Cells longer than `max_width` are cut with `...`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a single cell may get before it is truncated.
const DEFAULT_MAX_WIDTH: usize = 60;

/// A simple table formatter.
#[derive(Debug)]
pub struct TableFormatter {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_width: usize,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self { headers: Vec::new(), rows: Vec::new(), max_width: DEFAULT_MAX_WIDTH }
    }
}

impl TableFormatter {
    /// Create a new table formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column headers.
    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Add a row to the table.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Set the widest a cell may be.
    pub fn max_width(&mut self, width: usize) -> &mut Self {
        self.max_width = width;
        self
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).chain([self.headers.len()]).max().unwrap_or(0);

        let mut widths = vec![0usize; columns];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width().min(self.max_width));
            }
        }
        widths
    }

    /// Render the table as a string, one line per row.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();

        if !self.headers.is_empty() {
            output.push_str(&render_row(&self.headers, &widths));
            output.push('\n');
            let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            output.push_str(&separator.join("  "));
            output.push('\n');
        }

        for row in &self.rows {
            output.push_str(&render_row(row, &widths));
            output.push('\n');
        }

        output
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths.iter().copied().chain(std::iter::repeat(0)))
        .map(|(cell, width)| fit(cell, width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

const ELLIPSIS: &str = "...";

/// Pad `cell` to exactly `width` columns, shortening it with `...` if needed.
fn fit(cell: &str, width: usize) -> String {
    let text = if cell.width() > width { ellipsize(cell, width) } else { cell.to_string() };
    let padding = width.saturating_sub(text.width());
    text + &" ".repeat(padding)
}

/// Longest prefix of `cell` that fits in `width` columns together with `...`.
fn ellipsize(cell: &str, width: usize) -> String {
    let Some(budget) = width.checked_sub(ELLIPSIS.len()).filter(|budget| *budget > 0) else {
        return ".".repeat(width);
    };

    let mut used = 0;
    let end = cell
        .char_indices()
        .find_map(|(index, c)| {
            used += c.width().unwrap_or(0);
            (used > budget).then_some(index)
        })
        .unwrap_or(cell.len());
    format!("{}{ELLIPSIS}", &cell[..end])
}
