//! Table Output
//!
//! Shared rendering for the cart, catalog and receipt tables.

use std::io;

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};

/// Layout options for a rendered table. Row 0 is the header.
#[derive(Debug, Clone)]
pub(crate) struct TableLayout {
    /// Rows that start a new block and get a separator line above them.
    pub boundary_rows: SmallVec<[usize; 16]>,

    /// Columns from this index onwards are right aligned.
    pub right_aligned_from: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            boundary_rows: SmallVec::new(),
            right_aligned_from: 1,
        }
    }
}

/// Renders a table with a separator under the header and at each boundary row.
pub(crate) fn render_table(builder: Builder, layout: &TableLayout) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in &layout.boundary_rows {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Columns::new(layout.right_aligned_from..), Alignment::right());

    table.to_string()
}

/// Visible width of a rendered table (its widest line).
pub(crate) fn rendered_width(rendered: &str) -> usize {
    rendered
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or_default()
}

/// Writes `text` centered in `width` columns.
pub(crate) fn write_centered(out: &mut impl io::Write, text: &str, width: usize) -> io::Result<()> {
    writeln!(out, "{text:^width$}")
}

/// Writes a horizontal rule `width` columns wide.
pub(crate) fn write_rule(out: &mut impl io::Write, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(width))
}

/// Writes a titled table: the title is centered above the table.
pub(crate) fn write_table(
    out: &mut impl io::Write,
    title: &str,
    builder: Builder,
    layout: &TableLayout,
) -> io::Result<()> {
    let table = render_table(builder, layout);
    let width = rendered_width(&table).max(title.len());

    write_centered(out, title, width)?;
    writeln!(out, "{table}")
}

/// Writes a label and value on one line, with the value flush right at `width`.
pub(crate) fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    width: usize,
) -> io::Result<()> {
    let value_width = width.saturating_sub(label.chars().count());

    writeln!(out, "{label}{value:>value_width$}")
}
