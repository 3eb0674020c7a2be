use crate::config::Config;
use crate::page::{BadgeVariant, NoteVariant};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub heading: Color,
    pub cursor: Color,
    pub copied: Color,
    pub badge_default: Color,
    pub badge_active: Color,
    pub badge_network: Color,
    pub badge_erc20: Color,
    pub badge_multi: Color,
    pub badge_litecoin: Color,
    pub coming_soon: Color,
    pub note_info: Color,
    pub note_warning: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub notification_bg: Color,
    pub notification_fg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::Gray,
            heading: Color::Cyan,
            cursor: Color::Cyan,
            copied: Color::Green,
            badge_default: Color::Gray,
            badge_active: Color::Green,
            badge_network: Color::LightRed,
            badge_erc20: Color::LightBlue,
            badge_multi: Color::LightGreen,
            badge_litecoin: Color::Gray,
            coming_soon: Color::Magenta,
            note_info: Color::Cyan,
            note_warning: Color::Yellow,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            notification_bg: Color::Green,
            notification_fg: Color::Black,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            muted: Color::DarkGray,
            badge_litecoin: Color::DarkGray,
            ..Self::default_theme()
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            muted: Color::DarkGray,
            heading: Color::Blue,
            cursor: Color::Blue,
            badge_network: Color::Red,
            badge_erc20: Color::Blue,
            badge_multi: Color::Green,
            badge_litecoin: Color::DarkGray,
            note_info: Color::Blue,
            note_warning: Color::Red,
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
            ..Self::default_theme()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }

    pub fn badge(&self, variant: Option<BadgeVariant>) -> Color {
        match variant {
            Some(BadgeVariant::Active) => self.badge_active,
            Some(BadgeVariant::Network) => self.badge_network,
            Some(BadgeVariant::Erc20) => self.badge_erc20,
            Some(BadgeVariant::Multi) => self.badge_multi,
            Some(BadgeVariant::Litecoin) => self.badge_litecoin,
            None => self.badge_default,
        }
    }

    pub fn note(&self, variant: NoteVariant) -> Color {
        match variant {
            NoteVariant::Info => self.note_info,
            NoteVariant::Warning => self.note_warning,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
