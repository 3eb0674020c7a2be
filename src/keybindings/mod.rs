use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// All bindable actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    NextSection,
    PrevSection,
    First,
    Last,

    // Clipboard
    Copy,
    Dismiss,

    // UI
    ToggleHelp,
    CloseHelp,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::First => "first",
            Action::Last => "last",
            Action::Copy => "copy",
            Action::Dismiss => "dismiss",
            Action::ToggleHelp => "toggle_help",
            Action::CloseHelp => "close_help",
            Action::Quit => "quit",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "move_up" => Ok(Action::MoveUp),
            "move_down" => Ok(Action::MoveDown),
            "next_section" => Ok(Action::NextSection),
            "prev_section" => Ok(Action::PrevSection),
            "first" => Ok(Action::First),
            "last" => Ok(Action::Last),
            "copy" => Ok(Action::Copy),
            "dismiss" => Ok(Action::Dismiss),
            "toggle_help" => Ok(Action::ToggleHelp),
            "close_help" => Ok(Action::CloseHelp),
            "quit" => Ok(Action::Quit),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        // Shifted characters arrive as the uppercase char with SHIFT set.
        let modifiers = match event.code {
            KeyCode::BackTab | KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("A");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }

        let key_str = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };

        parts.push(&key_str);

        if parts.len() > 1 || key_str.chars().count() > 1 {
            write!(f, "<{}>", parts.join("-"))
        } else {
            write!(f, "{}", key_str)
        }
    }
}

/// Parse "j", "?", "<Space>", "<C-c>", "<S-Tab>" etc.
impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
            let inner = &s[1..s.len() - 1];
            return parse_bracket_notation(inner);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyBinding::new(KeyCode::Char(c), KeyModifiers::NONE)),
            _ => Err(format!("Invalid key binding: {}", s)),
        }
    }
}

fn parse_bracket_notation(s: &str) -> Result<KeyBinding, String> {
    // A trailing "-" is the minus key itself, as in "<C-->".
    let (prefix, key_part) = match s.strip_suffix("--") {
        Some(prefix) => (prefix, "-"),
        None => match s.rsplit_once('-') {
            Some((prefix, key)) => (prefix, key),
            None => ("", s),
        },
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('-').filter(|p| !p.is_empty()) {
        match part.to_uppercase().as_str() {
            "C" | "CTRL" | "CONTROL" => modifiers |= KeyModifiers::CONTROL,
            "A" | "ALT" | "M" | "META" => modifiers |= KeyModifiers::ALT,
            "S" | "SHIFT" => modifiers |= KeyModifiers::SHIFT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }

    let mut code = parse_key_code(key_part)?;

    // Events carry shifted characters as the uppercase char without SHIFT,
    // and Shift+Tab as BackTab. Bindings are stored the same way.
    if modifiers.contains(KeyModifiers::SHIFT) {
        match code {
            KeyCode::Tab => {
                code = KeyCode::BackTab;
                modifiers -= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c) => {
                let mut upper = c.to_uppercase();
                if let (Some(u), None) = (upper.next(), upper.next()) {
                    code = KeyCode::Char(u);
                }
                modifiers -= KeyModifiers::SHIFT;
            }
            _ => {}
        }
    }

    Ok(KeyBinding::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let s_lower = s.to_lowercase();

    match s_lower.as_str() {
        "space" => Ok(KeyCode::Char(' ')),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "enter" | "return" | "cr" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        f if f.starts_with('f') && f.len() > 1 => {
            let n: u8 = f[1..].parse().map_err(|_| format!("Invalid F key: {}", s))?;
            Ok(KeyCode::F(n))
        }
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key: {}", s)),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeybindingCache {
    bindings: HashMap<KeyBinding, Action>,
}

impl KeybindingCache {
    /// Build the lookup table. Entries that fail to parse are skipped.
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let bindings = config
            .bindings
            .iter()
            .filter_map(|(key_str, action_str)| {
                Some((key_str.parse::<KeyBinding>().ok()?, action_str.parse::<Action>().ok()?))
            })
            .collect();
        Self { bindings }
    }

    pub fn lookup(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// Keys bound to `action`, sorted for stable display.
    pub fn keys_for(&self, action: Action) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.to_string())
            .collect();
        keys.sort();
        keys
    }
}

impl Default for KeybindingCache {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_bindings")]
    pub bindings: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }
}

impl KeybindingsConfig {
    /// Fill in defaults for every key the user did not bind.
    pub fn merge_with_defaults(mut self) -> Self {
        for (key, action) in default_bindings() {
            self.bindings.entry(key).or_insert(action);
        }
        self
    }
}

fn default_bindings() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("k".to_string(), "move_up".to_string());
    m.insert("j".to_string(), "move_down".to_string());
    m.insert("<Up>".to_string(), "move_up".to_string());
    m.insert("<Down>".to_string(), "move_down".to_string());
    m.insert("<Tab>".to_string(), "next_section".to_string());
    m.insert("<BackTab>".to_string(), "prev_section".to_string());
    m.insert("g".to_string(), "first".to_string());
    m.insert("G".to_string(), "last".to_string());
    m.insert("<Home>".to_string(), "first".to_string());
    m.insert("<End>".to_string(), "last".to_string());
    m.insert("<Enter>".to_string(), "copy".to_string());
    m.insert("y".to_string(), "copy".to_string());
    m.insert("c".to_string(), "copy".to_string());
    m.insert("<Esc>".to_string(), "dismiss".to_string());
    m.insert("?".to_string(), "toggle_help".to_string());
    m.insert("q".to_string(), "quit".to_string());
    m.insert("<C-c>".to_string(), "quit".to_string());

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding: KeyBinding = "j".parse().unwrap();
        assert_eq!(binding.code, KeyCode::Char('j'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_special_key() {
        let binding: KeyBinding = "<Space>".parse().unwrap();
        assert_eq!(binding.code, KeyCode::Char(' '));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_modifier_key() {
        let binding: KeyBinding = "<C-c>".parse().unwrap();
        assert_eq!(binding.code, KeyCode::Char('c'));
        assert!(binding.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_parse_shift_tab_as_backtab() {
        let binding: KeyBinding = "<S-Tab>".parse().unwrap();
        assert_eq!(binding, KeyBinding::new(KeyCode::BackTab, KeyModifiers::NONE));
    }

    #[test]
    fn test_parse_minus_with_modifier() {
        let binding: KeyBinding = "<C-->".parse().unwrap();
        assert_eq!(binding.code, KeyCode::Char('-'));
        assert!(binding.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("jj".parse::<KeyBinding>().is_err());
        assert!("<X-j>".parse::<KeyBinding>().is_err());
        assert!("".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["j", "?", "<Enter>", "<C-c>", "<BackTab>"] {
            let binding: KeyBinding = s.parse().unwrap();
            assert_eq!(binding.to_string(), s);
        }
    }

    #[test]
    fn test_cache_lookup() {
        let cache = KeybindingCache::from_config(&KeybindingsConfig::default());

        let event = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(cache.lookup(&event), Some(Action::MoveDown));

        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(cache.lookup(&event), Some(Action::Copy));

        let event = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(cache.lookup(&event), None);
    }

    #[test]
    fn test_uppercase_with_shift_matches() {
        let cache = KeybindingCache::from_config(&KeybindingsConfig::default());
        let event = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(cache.lookup(&event), Some(Action::Last));
    }

    #[test]
    fn test_shifted_char_binding_matches_event() {
        let binding: KeyBinding = "<S-a>".parse().unwrap();
        assert_eq!(binding, KeyBinding::new(KeyCode::Char('A'), KeyModifiers::NONE));

        let mut bindings = HashMap::new();
        bindings.insert("<S-a>".to_string(), "copy".to_string());
        bindings.insert("<C-S-x>".to_string(), "quit".to_string());
        let cache = KeybindingCache::from_config(&KeybindingsConfig { bindings });

        let event = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(cache.lookup(&event), Some(Action::Copy));
        let event = KeyEvent::new(
            KeyCode::Char('X'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(cache.lookup(&event), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let cache = KeybindingCache::from_config(&KeybindingsConfig::default());
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(cache.lookup(&event), Some(Action::Quit));
    }

    #[test]
    fn test_user_binding_overrides_default() {
        let mut bindings = HashMap::new();
        bindings.insert("q".to_string(), "dismiss".to_string());
        let config = KeybindingsConfig { bindings }.merge_with_defaults();
        let cache = KeybindingCache::from_config(&config);

        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(cache.lookup(&event), Some(Action::Dismiss));
        let event = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(cache.lookup(&event), Some(Action::MoveDown));
    }

    #[test]
    fn test_keys_for_action() {
        let cache = KeybindingCache::from_config(&KeybindingsConfig::default());
        assert_eq!(cache.keys_for(Action::Copy), vec!["<Enter>", "c", "y"]);
    }

    #[test]
    fn test_action_roundtrip() {
        let action = Action::NextSection;
        let s = action.to_string();
        let parsed: Action = s.parse().unwrap();
        assert_eq!(action, parsed);
    }
}
