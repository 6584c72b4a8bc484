//! # Quote Document Rendering
//!
//! Turns a stored [`Quote`] into a standalone HTML document.
//!
//! ## Layout
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Quote #<id>              Date: <issued>  │
//! ├───────────────────────────────────────────┤
//! │  Customer Information                     │
//! │    Name / Email / Customer type           │
//! ├───────────────────────────────────────────┤
//! │  Description │ Quantity │ Unit │ Total    │
//! │  ...         │ ...      │ ...  │ ...      │
//! ├───────────────────────────────────────────┤
//! │                         Subtotal          │
//! │                         Discount (if any) │
//! │                         Tax               │
//! │                         Total             │
//! ├───────────────────────────────────────────┤
//! │  Notes (optional)  Valid until (optional) │
//! └───────────────────────────────────────────┘
//! ```
//!
//! The totals block prints `quote.totals` as stored. Rendering never reprices,
//! so a document always agrees with what the customer was quoted even if the
//! rules changed since.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::{self, Write};

use crate::money::round_currency;
use crate::types::Quote;

const STYLE: &str = "\
    body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
    .header { border-bottom: 2px solid #333; padding-bottom: 20px; margin-bottom: 20px; }
    .customer-info { margin-bottom: 30px; }
    table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }
    th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background-color: #f4f4f4; }
    .totals { text-align: right; margin-top: 20px; }
    .total-row { font-weight: bold; font-size: 1.2em; }";

/// Renders `quote` as an HTML page dated `issued_on`.
///
/// All customer-supplied text is escaped.
pub fn render_quote_html(quote: &Quote, issued_on: NaiveDate) -> String {
    let mut out = String::with_capacity(4096);
    // fmt::Write for String is infallible
    let _ = write_document(&mut out, quote, issued_on);
    out
}

fn write_document(out: &mut String, quote: &Quote, issued_on: NaiveDate) -> fmt::Result {
    let id = escape_html(&quote.id);

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"UTF-8\">")?;
    writeln!(out, "  <title>Quote #{}</title>", id)?;
    writeln!(out, "  <style>\n{}\n  </style>", STYLE)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    writeln!(out, "  <div class=\"header\">")?;
    writeln!(out, "    <h1>Quote #{}</h1>", id)?;
    writeln!(out, "    <p>Date: {}</p>", issued_on.format("%Y-%m-%d"))?;
    writeln!(out, "  </div>")?;

    writeln!(out, "  <div class=\"customer-info\">")?;
    writeln!(out, "    <h2>Customer Information</h2>")?;
    writeln!(out, "    <p><strong>Name:</strong> {}</p>", escape_html(&quote.customer_name))?;
    writeln!(out, "    <p><strong>Email:</strong> {}</p>", escape_html(&quote.customer_email))?;
    writeln!(out, "    <p><strong>Customer type:</strong> {}</p>", quote.customer_type.label())?;
    writeln!(out, "  </div>")?;

    writeln!(out, "  <table>")?;
    writeln!(
        out,
        "    <thead><tr><th>Description</th><th>Quantity</th><th>Unit Price</th><th>Total</th></tr></thead>"
    )?;
    writeln!(out, "    <tbody>")?;
    for item in &quote.items {
        let line_total = item
            .extended_price()
            .map(format_amount)
            .unwrap_or_else(|_| "-".to_string());
        writeln!(
            out,
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&item.description),
            item.quantity,
            format_amount(item.unit_price),
            line_total
        )?;
    }
    writeln!(out, "    </tbody>")?;
    writeln!(out, "  </table>")?;

    let totals = &quote.totals;
    writeln!(out, "  <div class=\"totals\">")?;
    writeln!(out, "    <p>Subtotal: {}</p>", totals.subtotal)?;
    if !totals.discount.is_zero() {
        writeln!(out, "    <p>Discount: -{}</p>", totals.discount)?;
    }
    writeln!(out, "    <p>Tax: {}</p>", totals.tax)?;
    writeln!(out, "    <p class=\"total-row\">Total: {}</p>", totals.total)?;
    writeln!(out, "  </div>")?;

    if let Some(notes) = quote.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        writeln!(out, "  <div><h3>Notes</h3><p>{}</p></div>", escape_html(notes))?;
    }
    if let Some(valid_until) = quote.valid_until {
        writeln!(
            out,
            "  <p><em>Valid until: {}</em></p>",
            valid_until.format("%Y-%m-%d")
        )?;
    }

    writeln!(out, "</body>")?;
    write!(out, "</html>")
}

fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", round_currency(amount))
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
