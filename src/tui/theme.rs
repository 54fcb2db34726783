use ratatui::style::{Color, Modifier, Style};

// Night-sky palette: deep blue base, moonlit gold accents.
pub const BG: Color = Color::Rgb(13, 17, 28);
pub const SURFACE: Color = Color::Rgb(20, 26, 40);
pub const BORDER: Color = Color::Rgb(42, 52, 74);
pub const TEXT: Color = Color::Rgb(212, 218, 230);
pub const TEXT_DIM: Color = Color::Rgb(110, 120, 142);
pub const GOLD: Color = Color::Rgb(212, 175, 96);
pub const GREEN: Color = Color::Rgb(96, 154, 108);
pub const AMBER: Color = Color::Rgb(214, 144, 70);
pub const RED: Color = Color::Rgb(188, 86, 72);
pub const BLUE: Color = Color::Rgb(108, 142, 196);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn blue() -> Style {
    Style::default().fg(BLUE)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(GOLD)
    } else {
        Style::default().fg(BORDER)
    }
}
