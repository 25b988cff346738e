use coolor::{Hsl, Rgb};
use ratatui::style::Color;

pub struct ColorConverter;

impl ColorConverter {
    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        let (r, g, b) = match color {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Black => (0, 0, 0),
            Color::Red => (170, 0, 0),
            Color::Green => (0, 170, 0),
            Color::Yellow => (170, 85, 0),
            Color::Blue => (0, 0, 170),
            Color::Magenta => (170, 0, 170),
            Color::Cyan => (0, 170, 170),
            Color::Gray => (170, 170, 170),
            Color::DarkGray => (85, 85, 85),
            Color::LightRed => (255, 85, 85),
            Color::LightGreen => (85, 255, 85),
            Color::LightYellow => (255, 255, 85),
            Color::LightBlue => (85, 85, 255),
            Color::LightMagenta => (255, 85, 255),
            Color::LightCyan => (85, 255, 255),
            _ => (255, 255, 255),
        };

        Rgb::new(r, g, b).to_hsl()
    }

    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}
