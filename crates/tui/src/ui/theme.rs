use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub bar: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(18, 18, 18),
            surface: Color::Rgb(24, 26, 30),
            border: Color::Rgb(70, 74, 80),
            border_focused: Color::Rgb(80, 160, 160),
            text: Color::Rgb(230, 230, 230),
            text_muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            bar: Color::Rgb(31, 119, 180),
            positive: Color::Rgb(90, 180, 110),
            negative: Color::Rgb(200, 80, 80),
            warning: Color::Rgb(220, 170, 60),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
