/// Width oracle used by the wrapper.
///
/// Implementations must be deterministic: the same string measures the same every time.
pub trait TextMeasure {
    /// Advance width of `text` in canvas pixels, trailing whitespace included.
    fn measure(&mut self, text: &str) -> f64;
}

/// Measurer that gives every `char` the same advance.
///
/// Used when no font is registered, and in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character.
    pub advance: f64,
}

impl FixedAdvance {
    /// Rough advance for bold Latin text at `font_size`.
    pub fn approximate(font_size: f64) -> Self {
        Self {
            advance: font_size * 0.6,
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn measure(&mut self, text: &str) -> f64 {
        (**self).measure(text)
    }
}

/// Greedy single-pass word wrap.
///
/// Words are split on single spaces. A word moves to a new line when `line + word + " "` measures
/// wider than `max_width`; a word that overflows on its own still gets a line of its own. Lines
/// are returned without their trailing separator.
pub fn wrap_words(text: &str, max_width: f64, measure: &mut dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = format!("{line}{word} ");
        if !line.is_empty() && measure.measure(&candidate) > max_width {
            lines.push(stored(&line));
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(stored(&line));
    lines
}

fn stored(line: &str) -> String {
    line.strip_suffix(' ').unwrap_or(line).to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
