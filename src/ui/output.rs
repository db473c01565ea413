//! Colored status lines

use colored::*;
use is_terminal::IsTerminal;

pub fn success(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message.green());
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".bright_yellow().bold(), message.yellow());
}

pub fn failure(message: &str) {
    println!("{} {}", "✗".bright_red().bold(), message.red());
}

/// Clear the screen for a clean interactive experience
pub fn clear_screen() {
    if std::io::stdout().is_terminal() {
        print!("\x1B[2J\x1B[1;1H");
    }
}

/// Force colors off, e.g. for `--no-color` or when piping output.
pub fn disable_colors() {
    colored::control::set_override(false);
}
