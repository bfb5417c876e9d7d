//! Fixed color palette and alacritty color conversion.
//!
//! There is no theming: one dark palette covers the terminal grid and the
//! surrounding chrome.

use alacritty_terminal::term::color::Colors as TermColors;
use alacritty_terminal::vte::ansi::{Color, NamedColor, Rgb};
use gpui::{hsla, rgb, Hsla, Rgba};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Hsla,
    pub foreground: Hsla,
    pub cursor: Hsla,
    // ANSI colors
    pub black: Hsla,
    pub red: Hsla,
    pub green: Hsla,
    pub yellow: Hsla,
    pub blue: Hsla,
    pub magenta: Hsla,
    pub cyan: Hsla,
    pub white: Hsla,
    // Bright ANSI colors
    pub bright_black: Hsla,
    pub bright_red: Hsla,
    pub bright_green: Hsla,
    pub bright_yellow: Hsla,
    pub bright_blue: Hsla,
    pub bright_magenta: Hsla,
    pub bright_cyan: Hsla,
    pub bright_white: Hsla,
    // Chrome
    pub sidebar: Hsla,
    pub surface: Hsla,
    pub surface_hover: Hsla,
    pub border: Hsla,
    pub muted: Hsla,
    pub accent: Hsla,
    pub overlay: Hsla,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(0x1d1f21).into(),
            foreground: rgb(0xc5c8c6).into(),
            cursor: rgb(0xe0e0e0).into(),
            black: rgb(0x282a2e).into(),
            red: rgb(0xa54242).into(),
            green: rgb(0x8c9440).into(),
            yellow: rgb(0xde935f).into(),
            blue: rgb(0x5f819d).into(),
            magenta: rgb(0x85678f).into(),
            cyan: rgb(0x5e8d87).into(),
            white: rgb(0x707880).into(),
            bright_black: rgb(0x373b41).into(),
            bright_red: rgb(0xcc6666).into(),
            bright_green: rgb(0xb5bd68).into(),
            bright_yellow: rgb(0xf0c674).into(),
            bright_blue: rgb(0x81a2be).into(),
            bright_magenta: rgb(0xb294bb).into(),
            bright_cyan: rgb(0x8abeb7).into(),
            bright_white: rgb(0xeaeaea).into(),
            sidebar: rgb(0x17181a).into(),
            surface: rgb(0x26282b).into(),
            surface_hover: rgb(0x303236).into(),
            border: rgb(0x33353a).into(),
            muted: rgb(0x8a8f98).into(),
            accent: rgb(0x81a2be).into(),
            overlay: hsla(0.0, 0.0, 0.0, 0.55),
        }
    }
}

/// Convert RGB to Hsla.
pub fn rgb_to_hsla(rgb: Rgb) -> Hsla {
    Hsla::from(Rgba {
        r: rgb.r as f32 / 255.0,
        g: rgb.g as f32 / 255.0,
        b: rgb.b as f32 / 255.0,
        a: 1.0,
    })
}

/// Convert an alacritty color, preferring colors the client set over the palette.
pub fn color_to_hsla(color: Color, term_colors: &TermColors, palette: &Palette) -> Hsla {
    match color {
        Color::Named(named) => term_colors[named]
            .map(rgb_to_hsla)
            .unwrap_or_else(|| named_color_to_hsla(named, palette)),
        Color::Spec(rgb) => rgb_to_hsla(rgb),
        Color::Indexed(idx) => term_colors[idx as usize]
            .map(rgb_to_hsla)
            .unwrap_or_else(|| indexed_color_to_hsla(idx, palette)),
    }
}

pub fn named_color_to_hsla(color: NamedColor, palette: &Palette) -> Hsla {
    match color {
        NamedColor::Black => palette.black,
        NamedColor::Red => palette.red,
        NamedColor::Green => palette.green,
        NamedColor::Yellow => palette.yellow,
        NamedColor::Blue => palette.blue,
        NamedColor::Magenta => palette.magenta,
        NamedColor::Cyan => palette.cyan,
        NamedColor::White => palette.white,
        NamedColor::BrightBlack => palette.bright_black,
        NamedColor::BrightRed => palette.bright_red,
        NamedColor::BrightGreen => palette.bright_green,
        NamedColor::BrightYellow => palette.bright_yellow,
        NamedColor::BrightBlue => palette.bright_blue,
        NamedColor::BrightMagenta => palette.bright_magenta,
        NamedColor::BrightCyan => palette.bright_cyan,
        NamedColor::BrightWhite => palette.bright_white,
        NamedColor::Background => palette.background,
        NamedColor::Cursor => palette.cursor,
        _ => palette.foreground,
    }
}

/// Convert an indexed color (0-255) to Hsla.
///
/// 0-15 are the named colors, 16-231 a 6x6x6 cube, 232-255 a grayscale ramp.
pub fn indexed_color_to_hsla(idx: u8, palette: &Palette) -> Hsla {
    const ANSI: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightBlack,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];
    match idx {
        0..=15 => named_color_to_hsla(ANSI[idx as usize], palette),
        16..=231 => {
            let idx = idx - 16;
            let r = (idx / 36) as f32 / 5.0;
            let g = ((idx % 36) / 6) as f32 / 5.0;
            let b = (idx % 6) as f32 / 5.0;
            Hsla::from(Rgba { r, g, b, a: 1.0 })
        }
        232..=255 => {
            let gray = (idx - 232) as f32 / 23.0 * 0.9 + 0.08;
            hsla(0.0, 0.0, gray, 1.0)
        }
    }
}

/// Reduce lightness by a third.
pub fn apply_dim(color: Hsla) -> Hsla {
    hsla(color.h, color.s, color.l * 0.66, color.a)
}

/// Bright variant for bold text in one of the eight base colors.
pub fn bright_variant(color: Color, term_colors: &TermColors, palette: &Palette) -> Hsla {
    let idx = match color {
        Color::Named(named) if (named as usize) < 8 => named as u8,
        Color::Indexed(idx) if idx < 8 => idx,
        other => return color_to_hsla(other, term_colors, palette),
    };
    let bright = idx + 8;
    term_colors[bright as usize]
        .map(rgb_to_hsla)
        .unwrap_or_else(|| indexed_color_to_hsla(bright, palette))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn pure_red_has_full_saturation() {
        let red = rgb_to_hsla(Rgb { r: 255, g: 0, b: 0 });
        assert!(red.h.abs() < 0.01 || (red.h - 1.0).abs() < 0.01);
        assert!((red.s - 1.0).abs() < 0.01);
    }

    #[test]
    fn grayscale_ramp_gets_lighter() {
        let palette = Palette::default();
        let dark = indexed_color_to_hsla(232, &palette);
        let light = indexed_color_to_hsla(255, &palette);
        assert!(dark.l < light.l);
    }

    #[test_case(1, NamedColor::Red ; "red")]
    #[test_case(4, NamedColor::Blue ; "blue")]
    #[test_case(15, NamedColor::BrightWhite ; "bright white")]
    fn low_indices_are_named_colors(idx: u8, named: NamedColor) {
        let palette = Palette::default();
        assert_eq!(
            indexed_color_to_hsla(idx, &palette),
            named_color_to_hsla(named, &palette)
        );
    }

    #[test]
    fn client_colors_override_palette() {
        let palette = Palette::default();
        let mut term_colors = TermColors::default();
        term_colors[NamedColor::Red] = Some(Rgb { r: 0, g: 0, b: 255 });

        let color = color_to_hsla(Color::Named(NamedColor::Red), &term_colors, &palette);
        assert_eq!(color, rgb_to_hsla(Rgb { r: 0, g: 0, b: 255 }));
    }

    #[test]
    fn bold_base_color_uses_bright_variant() {
        let palette = Palette::default();
        let colors = TermColors::default();
        assert_eq!(
            bright_variant(Color::Named(NamedColor::Green), &colors, &palette),
            palette.bright_green
        );
        assert_eq!(
            bright_variant(Color::Indexed(3), &colors, &palette),
            palette.bright_yellow
        );
    }

    #[test]
    fn bright_variant_leaves_other_colors_alone() {
        let palette = Palette::default();
        let colors = TermColors::default();
        assert_eq!(
            bright_variant(Color::Named(NamedColor::Foreground), &colors, &palette),
            palette.foreground
        );
    }

    #[test]
    fn dim_reduces_lightness_only() {
        let original = hsla(0.5, 0.5, 0.5, 1.0);
        let dimmed = apply_dim(original);
        assert!((dimmed.l - 0.33).abs() < 0.01);
        assert_eq!(dimmed.h, original.h);
        assert_eq!(dimmed.a, original.a);
    }
}
