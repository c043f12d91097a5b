//! Terminal capability detection and colouring

use owo_colors::{OwoColorize, colors::css};
use reqtract::{Category, CategoryLabel};

/// Detects whether coloured output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colourising output
pub trait Colorize {
    /// Colour as success (green)
    fn success(&self) -> String;
    /// Colour as warning (amber)
    fn warning(&self) -> String;
    /// Colour as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
    /// Colour by requirement category
    fn category(&self, label: &CategoryLabel) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn category(&self, label: &CategoryLabel) -> String {
        match label.category() {
            Some(Category::Functional) => self.info(),
            Some(Category::NonFunctional) => {
                if supports_color() {
                    self.fg::<css::MediumPurple>().to_string()
                } else {
                    self.to_string()
                }
            }
            None => self.warning(),
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn category(&self, label: &CategoryLabel) -> String {
        self.as_str().category(label)
    }
}

/// Truncate `text` to at most `width` characters, marking the cut with an
/// ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::truncate;

    #[test_case("short", 10, "short"; "fits")]
    #[test_case("exactly", 7, "exactly"; "exact")]
    #[test_case("a longer sentence", 8, "a longe…"; "cut")]
    #[test_case("naïve café", 4, "naï…"; "multibyte")]
    fn truncation(text: &str, width: usize, expected: &str) {
        assert_eq!(truncate(text, width), expected);
    }
}
