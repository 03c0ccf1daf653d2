//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the ragdoc CLI.

use crate::types::{Answer, Chunk};
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

    /// Print the startup banner
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "ragdoc".bright_cyan().bold(),
                version.dimmed(),
                "Retrieval-augmented PDF question answering".bright_white()
            );
        } else {
            println!(
                "\n   ragdoc {}\n   Retrieval-augmented PDF question answering\n",
                version
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

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print the server listening address
    pub fn server_running(&self, host: &str, port: u16) {
        let url = format!("http://{}:{}", host, port);
        if self.colored {
            println!(
                "\n  {} {}\n",
                "Listening on".bright_white(),
                url.bright_cyan().underline()
            );
        } else {
            println!("\n  Listening on {}\n", url);
        }
    }

    /// Print an answer followed by the pages it drew on
    pub fn answer(&self, answer: &Answer) {
        self.header("Answer");
        println!();
        for line in answer.text.lines() {
            println!("    {}", line);
        }

        self.header("Sources");
        for source in &answer.sources {
            let label = format!(
                "chunk {} (page {})",
                source.chunk.chunk_index, source.chunk.page
            );
            let score = format!("{:.3}", source.score);
            if self.colored {
                println!("    {} {} {}", "•".blue(), label, score.dimmed());
            } else {
                println!("    - {} {}", label, score);
            }
        }
    }

    /// Print one chunk summary line, optionally with its text
    pub fn chunk(&self, chunk: &Chunk, show_text: bool) {
        let label = format!(
            "#{:<4} page {:<4} chars {:<5} [{}..{}]",
            chunk.chunk_index,
            chunk.page,
            chunk.char_len(),
            chunk.start,
            chunk.end
        );
        if self.colored {
            println!("    {}", label.bright_white());
        } else {
            println!("    {}", label);
        }
        if show_text {
            let text = chunk.content.replace('\n', " ");
            if self.colored {
                println!("      {}", text.dimmed());
            } else {
                println!("      {}", text);
            }
        }
    }
}
