/// Brand colours, fixed at startup and rendered once as CSS custom properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub highlight: &'static str,
    pub primary_light: &'static str,
    pub neutral_light: &'static str,
}

impl Theme {
    pub const SPRICHWEG: Theme = Theme {
        primary: "#504E76",
        secondary: "#F1642E",
        accent: "#A3B565",
        highlight: "#FCD99D",
        primary_light: "#C4C3E3",
        neutral_light: "#FDF8E2",
    };

    pub fn css_variables(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in [
            ("primary-color", self.primary),
            ("secondary-color", self.secondary),
            ("accent-color", self.accent),
            ("highlight-color", self.highlight),
            ("primary-light-color", self.primary_light),
            ("neutral-light-color", self.neutral_light),
        ] {
            css.push_str(&format!("  --{}: {};\n", name, value));
        }
        // gradients in the page mix these with alpha
        for (name, value) in [("primary-color-rgb", self.primary), ("secondary-color-rgb", self.secondary)] {
            if let Some((r, g, b)) = hex_to_rgb(value) {
                css.push_str(&format!("  --{}: {}, {}, {};\n", name, r, g, b));
            }
        }
        css.push('}');
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::SPRICHWEG
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_variable() {
        let css = Theme::SPRICHWEG.css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--primary-color: #504E76;"));
        assert!(css.contains("--neutral-light-color: #FDF8E2;"));
        assert!(css.contains("--secondary-color-rgb: 241, 100, 46;"));
        assert!(css.ends_with('}'));
    }

    #[test]
    fn rgb_skips_malformed_colours() {
        let theme = Theme {
            primary: "rebeccapurple",
            ..Theme::SPRICHWEG
        };
        let css = theme.css_variables();
        assert!(css.contains("--primary-color: rebeccapurple;"));
        assert!(!css.contains("--primary-color-rgb"));
    }

    #[test]
    fn parses_hex() {
        assert_eq!(hex_to_rgb("#504E76"), Some((80, 78, 118)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("504E76"), None);
        assert_eq!(hex_to_rgb("#zz0000"), None);
    }
}
