//! Receipt rendering

use std::io;

use tabled::builder::Builder;

use crate::{
    display::{
        TableLayout, render_table, rendered_width, write_centered, write_rule, write_summary_line,
    },
    receipt::{Receipt, ReceiptError, percent_points},
};

/// Store name printed at the top of every receipt.
pub const STORE_NAME: &str = "Supermarket";

/// Narrowest the receipt is ever rendered.
const MIN_WIDTH: usize = 40;

impl Receipt {
    /// Writes the receipt as text: header, deals (if any), full price items and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the savings cannot be calculated or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let deals_table = if self.has_deals() {
            Some(self.deals_table())
        } else {
            None
        };
        let items_table = self.items_table();

        let width = deals_table
            .as_deref()
            .map_or(0, rendered_width)
            .max(rendered_width(&items_table))
            .max(MIN_WIDTH);

        let out = &mut out;

        write_rule(out, width)?;
        write_centered(out, STORE_NAME, width)?;
        write_centered(out, "Customer Receipt", width)?;
        write_centered(
            out,
            &self.issued_at().strftime("%Y-%m-%d %H:%M").to_string(),
            width,
        )?;
        write_rule(out, width)?;

        if let Some(deals_table) = deals_table {
            write_centered(out, "Deals", width)?;
            writeln!(out, "{deals_table}")?;

            let percent = percent_points(self.savings_percent()?);
            writeln!(out, "You saved {} ({percent}%)!", self.savings())?;

            write_rule(out, width)?;
            write_centered(out, "Remaining Items", width)?;
        } else {
            write_centered(out, "Items", width)?;
        }

        writeln!(out, "{items_table}")?;
        write_rule(out, width)?;
        write_summary_line(out, "Grand Total:", &self.total().to_string(), width)?;
        write_rule(out, width)?;
        write_centered(out, "Thank you for shopping with us!", width)?;
        write_rule(out, width)?;

        Ok(())
    }

    fn deals_table(&self) -> String {
        let mut builder = Builder::default();
        let mut layout = TableLayout::default();
        let mut current_group = None;

        builder.push_record(["Item", "Price"]);

        for (row_idx, row) in self.deal_rows().iter().enumerate() {
            if current_group != Some(row.group) {
                layout.boundary_rows.push(row_idx + 1);
                current_group = Some(row.group);
            }

            let price = if row.is_free {
                "FREE".to_string()
            } else {
                row.price.to_string()
            };

            builder.push_record([row.label.clone(), price]);
        }

        render_table(builder, &layout)
    }

    fn items_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Price"]);

        for row in self.remaining_rows() {
            builder.push_record([
                format!("{} ({})", row.item_name, row.quantity),
                row.line_total.to_string(),
            ]);
        }

        render_table(builder, &TableLayout::default())
    }
}
