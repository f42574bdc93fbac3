use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Board frame and dialog border color
    pub frame: Color,
    /// Fill for the empty cell
    pub empty: Color,
    /// Menu bar background
    pub menu_bg: Color,
    /// Dialog background
    pub dialog_bg: Color,
    /// Error color
    pub error: Color,
    /// Success/solved color
    pub success: Color,
    /// Status text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            frame: Color::Rgb { r: 130, g: 140, b: 170 },
            empty: Color::Rgb { r: 200, g: 200, b: 200 },
            menu_bg: Color::Rgb { r: 35, g: 40, b: 55 },
            dialog_bg: Color::Rgb { r: 30, g: 30, b: 40 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            frame: Color::Rgb { r: 60, g: 60, b: 80 },
            empty: Color::Rgb { r: 200, g: 200, b: 200 },
            menu_bg: Color::Rgb { r: 230, g: 232, b: 242 },
            dialog_bg: Color::Rgb { r: 235, g: 235, b: 245 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            frame: Color::White,
            empty: Color::Grey,
            menu_bg: Color::DarkBlue,
            dialog_bg: Color::Black,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}

/// Convert hue (0.0-1.0) to fully saturated RGB
pub fn hue_to_rgb(hue: f32) -> [u8; 3] {
    let h = hue.rem_euclid(1.0) * 6.0;
    let x = ((1.0 - (h % 2.0 - 1.0).abs()) * 255.0) as u8;

    match h as i32 % 6 {
        0 => [255, x, 0],
        1 => [x, 255, 0],
        2 => [0, 255, x],
        3 => [0, x, 255],
        4 => [x, 0, 255],
        _ => [255, 0, x],
    }
}

/// [`hue_to_rgb`] as a terminal color
pub fn hue_color(hue: f32) -> Color {
    let [r, g, b] = hue_to_rgb(hue);
    Color::Rgb { r, g, b }
}
