//! Background/foreground color themes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorThemeDef {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
}

/// All themes in selector order. The first entry is the default.
pub static COLOR_THEMES: &[ColorThemeDef] = &[
    ColorThemeDef {
        name: "Light",
        background: "#ffffff",
        foreground: "#000000",
    },
    ColorThemeDef {
        name: "Dark",
        background: "#1a1a2e",
        foreground: "#f0f0f5",
    },
    ColorThemeDef {
        name: "Black",
        background: "#000000",
        foreground: "#ffffff",
    },
    ColorThemeDef {
        name: "Sepia",
        background: "#f4ecd8",
        foreground: "#5b4636",
    },
    ColorThemeDef {
        name: "Slate",
        background: "#2f3e46",
        foreground: "#cad2c5",
    },
];

pub fn default_theme() -> &'static ColorThemeDef {
    &COLOR_THEMES[0]
}

pub fn find(name: &str) -> Option<&'static ColorThemeDef> {
    COLOR_THEMES.iter().find(|t| t.name == name)
}

/// Name of the theme with exactly these colors, case-insensitively.
pub fn name_from_value(background: &str, foreground: &str) -> Option<&'static str> {
    COLOR_THEMES
        .iter()
        .find(|t| {
            t.background.eq_ignore_ascii_case(background)
                && t.foreground.eq_ignore_ascii_case(foreground)
        })
        .map(|t| t.name)
}
