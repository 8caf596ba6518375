//! Terminal output for the CLI.
//!
//! Human output goes to stdout with status lines on stderr. In `--json` mode
//! only machine-readable documents are printed; status lines are dropped and
//! errors become `{"error": ...}` objects on stderr.

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::catalog::VariantPrice;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warn,
    Debug,
}

impl Tone {
    fn glyph(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Debug => style("→").dim(),
        }
    }
}

/// Output handler shared by every command.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn status(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        match tone {
            Tone::Info | Tone::Success => println!("{} {}", tone.glyph(), msg),
            Tone::Warn => eprintln!("{} {}", tone.glyph(), msg),
            Tone::Debug => eprintln!("{} {}", tone.glyph(), style(msg).dim()),
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.status(Tone::Warn, msg);
    }

    /// Only printed with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.status(Tone::Debug, msg);
        }
    }

    /// Errors are printed in both modes.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Print a document as pretty JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Could not encode output: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Start a fixed-width table and print its heading row.
    pub fn table(&self, columns: &[(&str, usize)]) -> Table {
        let table = Table {
            widths: columns.iter().map(|(_, w)| *w).collect(),
            hidden: self.json,
        };
        let titles: Vec<&str> = columns.iter().map(|(title, _)| *title).collect();
        if !table.hidden {
            println!("  {}", style(table.render(&titles)).dim());
        }
        table
    }

    /// Spinner on stderr while a request is outstanding; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Rows of cells padded and cut to fixed column widths.
pub struct Table {
    widths: Vec<usize>,
    hidden: bool,
}

impl Table {
    pub fn row(&self, cells: &[&str]) {
        if !self.hidden {
            println!("  {}", self.render(cells));
        }
    }

    fn render(&self, cells: &[&str]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| format!("{:width$}", truncate(cell, *width), width = *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    }
}

/// Stock column for a product row.
pub fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "in stock"
    } else {
        "sold out"
    }
}

/// "from $12.00", or "-" when there are no prices.
pub fn price_cell(price: Option<&VariantPrice>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("from {}", p.display()))
}

/// Cut `text` to `width` characters, ending in "…" when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Trail Boot", 20), "Trail Boot");
        assert_eq!(truncate("Waterproof Trail Boot", 10), "Waterproo…");
    }

    #[test]
    fn test_price_cell() {
        let price = VariantPrice {
            amount: 1999,
            currency_code: "usd".to_string(),
        };
        assert_eq!(price_cell(Some(&price)), "from $19.99");
        assert_eq!(price_cell(None), "-");
    }

    #[test]
    fn test_table_render_pads_and_cuts() {
        let table = Table {
            widths: vec![6, 4],
            hidden: true,
        };
        assert_eq!(table.render(&["Boot", "12"]), "Boot    12");
        assert_eq!(table.render(&["Trail Boot", "in stock"]), "Trail…  in …");
    }
}
