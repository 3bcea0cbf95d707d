use std::collections::HashMap;

use palette::{FromColor, Lch, Srgb};

use crate::engine::grid::Card;

// cards 2 through 2^COLORED_EXPONENTS get their own color
const COLORED_EXPONENTS: u32 = 17;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub(crate) fn from_lch(lch: Lch) -> Self {
        let rgb = Srgb::from_color(lch).into_format::<u8>();
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        self.r
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        self.g
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        self.b
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

/// ColorMode adjusts card colors to the terminal background.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum ColorMode {
    /// Mid-lightness colors that avoid pure black and white.
    #[default]
    Default,
    /// Bright colors for dark terminal backgrounds.
    Dark,
    /// Deep colors for light terminal backgrounds.
    Light,
}

impl ColorMode {
    fn lightness(&self) -> f32 {
        match self {
            Self::Default => 65.0,
            Self::Dark => 85.0,
            Self::Light => 40.0,
        }
    }

    fn fallback(&self) -> Rgb {
        match self {
            Self::Default => Rgb::new(160, 160, 160),
            Self::Dark => Rgb::new(255, 255, 255),
            Self::Light => Rgb::new(0, 0, 0),
        }
    }
}

/// Theme maps card values to foreground colors.
#[derive(Clone, Debug)]
pub(crate) struct Theme {
    card_colors: HashMap<Card, Rgb>,
    fallback: Rgb,
}

impl Theme {
    pub(crate) fn new(mode: ColorMode) -> Self {
        let lightness = mode.lightness();
        let card_colors = HashMap::from_iter((1..=COLORED_EXPONENTS).map(|i| {
            let hue = (i - 1) as f32 * 360.0 / 11.0;
            (2u32.pow(i), Rgb::from_lch(Lch::new(lightness, 90.0, hue)))
        }));
        Self {
            card_colors,
            fallback: mode.fallback(),
        }
    }

    pub(crate) fn card_color(&self, card: Card) -> Rgb {
        *self.card_colors.get(&card).unwrap_or(&self.fallback)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorMode::default())
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::default(ColorMode::Default)]
    #[case::dark(ColorMode::Dark)]
    #[case::light(ColorMode::Light)]
    fn neighbouring_cards_differ(#[case] mode: ColorMode) {
        let theme = Theme::new(mode);
        for i in 1..COLORED_EXPONENTS {
            assert_ne!(
                theme.card_color(2u32.pow(i)),
                theme.card_color(2u32.pow(i + 1)),
                "2^{} vs 2^{}",
                i,
                i + 1
            );
        }
    }

    #[test]
    fn unknown_cards_use_fallback() {
        let theme = Theme::new(ColorMode::Light);
        assert_eq!(Rgb::new(0, 0, 0), theme.card_color(3));
        assert_eq!(Rgb::new(0, 0, 0), theme.card_color(2u32.pow(20)));
    }

    #[test]
    fn dark_mode_is_brighter_than_light_mode() {
        let dark = Theme::new(ColorMode::Dark).card_color(2);
        let light = Theme::new(ColorMode::Light).card_color(2);
        let sum = |c: Rgb| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(dark) > sum(light));
    }

    #[test]
    fn into_crossterm_color() {
        let color: crossterm::style::Color = Rgb::new(1, 2, 3).into();
        assert_eq!(crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 }, color);
    }
}
