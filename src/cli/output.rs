//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the rival CLI.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the rival banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
"#,
                " ____  _____     ___    _     ".bright_magenta().bold(),
                "|  _ \\|_ _\\ \\   / / \\  | |    ".magenta().bold(),
                "| |_) || | \\ \\ / / _ \\ | |___ ".purple().bold(),
                "|_| \\_\\___| \\_/ /_/ \\_\\|_____|".purple().bold(),
            );
            println!(
                "   {} {}\n",
                "Competitor-analysis research pipeline".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 ____  _____     ___    _
|  _ \|_ _\ \   / / \  | |
| |_) || | \ \ / / _ \ | |___
|_| \_\___| \_/ /_/ \_\|_____|

   Competitor-analysis research pipeline v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a numbered list entry (1-based)
    pub fn numbered(&self, index: usize, item: &str) {
        if self.colored {
            println!("    {} {}", format!("{}.", index).blue(), item);
        } else {
            println!("    {}. {}", index, item);
        }
    }

    /// Print a block of text indented under the current section
    pub fn block(&self, text: &str) {
        for line in text.lines() {
            println!("    {}", line);
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header: String = columns
            .iter()
            .map(|c| format!("{:<15}", c))
            .collect::<Vec<_>>()
            .join(" ");
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(columns.len() * 16).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(columns.len() * 16));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[&str]) {
        let row: String = values
            .iter()
            .map(|v| format!("{:<15}", v))
            .collect::<Vec<_>>()
            .join(" ");
        println!("    {}", row);
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_constructors() {
        assert!(Output::new().colored);
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_table_formatting_edge_cases() {
        let output = Output::no_color();

        output.table_header(&["Stage", "Duration", "Status"]);
        output.table_header(&[]);
        output.table_row(&["research_node", "12 ms", "ok"]);
        output.table_row(&[]);
    }

    #[test]
    fn test_block_handles_empty_and_multiline_text() {
        let output = Output::no_color();
        output.block("");
        output.block("# Report\n\n- item");
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.header("Test Header");
            output.subheader("Test Subheader");
            output.kv("key", "value");
            output.numbered(1, "item");
            output.newline();
        }
    }
}
