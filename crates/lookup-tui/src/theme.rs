use ratatui::style::Color;

/// Nord palette, trimmed to the slots this UI uses.
pub struct NordTheme {
    // Polar Night
    pub nord0: Color, // darkest background
    pub nord1: Color, // secondary background, highlighted row
    pub nord2: Color, // borders, separators
    pub nord3: Color, // muted text

    // Snow Storm
    pub nord4: Color, // primary text
    pub nord6: Color, // bright text, cursor-adjacent UI

    // Frost
    pub nord8: Color, // ice blue, active element

    // Aurora
    pub nord11: Color, // red, errors / validation
    pub nord13: Color, // yellow, hints
    pub nord14: Color, // green, success / confirmed
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(76, 86, 106),
            nord3: Color::Rgb(150, 160, 180),
            nord4: Color::Rgb(216, 222, 233),
            nord6: Color::Rgb(236, 239, 244),
            nord8: Color::Rgb(136, 192, 208),
            nord11: Color::Rgb(191, 97, 106),
            nord13: Color::Rgb(235, 203, 139),
            nord14: Color::Rgb(163, 190, 140),
        }
    }
}

impl NordTheme {
    // Semantic aliases
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }
    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn fg_bright(&self) -> Color {
        self.nord6
    }
    pub fn active(&self) -> Color {
        self.nord8
    }
    pub fn red(&self) -> Color {
        self.nord11
    }
    pub fn yellow(&self) -> Color {
        self.nord13
    }
    pub fn green(&self) -> Color {
        self.nord14
    }
}
