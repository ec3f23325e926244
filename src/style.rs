use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Default,
}

impl Hue {
    /// Unknown names map to `Hue::Default`, which is never colored.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            _ => Self::Default,
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            Self::Red => Some(Color::BrightRed),
            Self::Green => Some(Color::BrightGreen),
            Self::Yellow => Some(Color::BrightYellow),
            Self::Blue => Some(Color::BrightBlue),
            Self::Magenta => Some(Color::BrightMagenta),
            Self::Cyan => Some(Color::BrightCyan),
            Self::White => Some(Color::BrightWhite),
            Self::Default => None,
        }
    }
}

/// Terminal styling switch. Built once from configuration and handed to the
/// renderer.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, hue: Hue) -> String {
        match (self.enabled, hue.color()) {
            (true, Some(color)) => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }

    pub fn paint_bold(&self, text: &str, hue: Hue) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match hue.color() {
            Some(color) => text.color(color).bold().to_string(),
            None => text.bold().to_string(),
        }
    }
}
