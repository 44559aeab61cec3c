//! Terminal rendering for the `stock` CLI.

use chrono::{DateTime, Local};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal output. In `--json` mode only machine-readable output reaches
/// stdout and errors go to stderr as `{"error": ...}`.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn human(&self, print: impl FnOnce()) {
        if !self.json {
            print();
        }
    }

    pub fn info(&self, msg: &str) {
        self.human(|| println!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.human(|| println!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        self.human(|| eprintln!("{} {}", style("⚠").yellow(), msg));
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.human(|| eprintln!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    pub fn header(&self, msg: &str) {
        self.human(|| println!("\n{}", style(msg).bold().underlined()));
    }

    /// Pretty-printed JSON on stdout, in either mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to render JSON: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.human(|| println!("  {:<12} {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.human(|| println!("  {} {}", style("•").dim(), item));
    }

    /// One table row. Cells are padded to `widths` and cut with `…` when
    /// longer.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        self.human(|| {
            let cells: Vec<String> = cols
                .iter()
                .zip(widths)
                .map(|(col, width)| format!("{:width$}", fit(col, *width), width = *width))
                .collect();
            println!("  {}", cells.join("  ").trim_end());
        });
    }

    /// Spinner shown while waiting on the upstream. Hidden in `--json` mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Truncate `text` to `width` characters, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Colored availability status.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "in stock" => style(status).green().to_string(),
        "low stock" => style(status).yellow().to_string(),
        "out of stock" => style(status).red().to_string(),
        _ => style(status).dim().to_string(),
    }
}

/// Render an RFC 3339 timestamp in local time. Unparseable input is returned
/// unchanged.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Format a price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("Lamp", 10), "Lamp");
        assert_eq!(fit("Essence Mascara Lash Princess", 8), "Essence…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_status_badge_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(status_badge("Low Stock"), "Low Stock");
        assert_eq!(status_badge("Unknown"), "Unknown");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        let rendered = format_timestamp("2024-05-01T09:00:00.000Z");
        assert!(rendered.starts_with("2024-05-01") || rendered.starts_with("2024-04-30"));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(9.5), "$9.50");
        assert_eq!(format_price(1899.999), "$1900.00");
    }
}
