use boardgames_core::config::ThemeConfig;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight: Color,
    pub danger: Color,
    pub on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            highlight: Color::Rgb(58, 58, 90),
            danger: Color::Red,
            on_accent: Color::Black,
        }
    }
}

impl Theme {
    /// Apply configured colours over the defaults. Returns the theme and
    /// one note per value that could not be parsed.
    pub fn from_config(config: &ThemeConfig) -> (Self, Vec<String>) {
        let mut theme = Theme::default();
        let mut problems = Vec::new();

        let slots: [(&str, &Option<String>, &mut Color); 4] = [
            ("accent", &config.accent, &mut theme.accent),
            ("muted", &config.muted, &mut theme.muted),
            ("highlight", &config.highlight, &mut theme.highlight),
            ("danger", &config.danger, &mut theme.danger),
        ];
        for (name, raw, slot) in slots {
            let Some(raw) = raw else {
                continue;
            };
            match parse_hex_color(raw) {
                Some(color) => *slot = color,
                None => problems.push(format!("theme.{name}: cannot parse {raw:?}")),
            }
        }

        theme.on_accent = contrast_color(&theme.accent, Color::Black);
        (theme, problems)
    }
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn contrast_color(color: &Color, fallback: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luminance = 0.299 * f64::from(*r) + 0.587 * f64::from(*g) + 0.114 * f64::from(*b);
            if luminance > 186.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => fallback,
    }
}
