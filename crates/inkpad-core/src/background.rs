//! Background pattern styles for the drawing surface.

use serde::{Deserialize, Serialize};

/// Background style painted beneath the ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    /// Solid white page, no rules.
    #[default]
    Plain,
    /// Horizontal rule lines.
    Lined,
    /// Horizontal and vertical rule lines.
    Grid,
}

impl BackgroundStyle {
    /// Cycle to the next background style.
    pub fn next(self) -> Self {
        match self {
            BackgroundStyle::Plain => BackgroundStyle::Lined,
            BackgroundStyle::Lined => BackgroundStyle::Grid,
            BackgroundStyle::Grid => BackgroundStyle::Plain,
        }
    }

    /// Get display name for this background style.
    pub fn name(self) -> &'static str {
        match self {
            BackgroundStyle::Plain => "Plain",
            BackgroundStyle::Lined => "Lined",
            BackgroundStyle::Grid => "Grid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_cycle() {
        let mut style = BackgroundStyle::Plain;
        style = style.next();
        assert_eq!(style, BackgroundStyle::Lined);
        style = style.next();
        assert_eq!(style, BackgroundStyle::Grid);
        style = style.next();
        assert_eq!(style, BackgroundStyle::Plain);
    }

    #[test]
    fn test_style_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BackgroundStyle::Lined).unwrap(),
            "\"lined\""
        );
    }
}
