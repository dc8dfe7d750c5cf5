use once_cell::sync::Lazy;

/// A key press with modifiers. `modifier` covers both Ctrl and ⌘.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: String,
    pub modifier: bool,
    pub shift: bool,
    pub alt: bool,
}

impl std::fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.modifier {
            parts.push("mod");
        }
        if self.shift {
            parts.push("shift");
        }
        if self.alt {
            parts.push("alt");
        }
        parts.push(&self.key);
        write!(f, "{}", parts.join("+"))
    }
}

/// Parse a combo string like "Ctrl+K", "mod+shift+p" or "Escape".
pub fn parse_combo(s: &str) -> Option<KeyCombo> {
    let mut modifier = false;
    let mut shift = false;
    let mut alt = false;
    let mut key: Option<String> = None;

    for part in s.split('+') {
        let lower = part.trim().to_ascii_lowercase();
        match lower.as_str() {
            "mod" | "ctrl" | "control" | "cmd" | "meta" | "⌘" => modifier = true,
            "shift" => shift = true,
            "alt" | "option" => alt = true,
            "" => return None,
            "esc" => key = Some("escape".into()),
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(lower);
            }
        }
    }

    key.map(|key| KeyCombo {
        key,
        modifier,
        shift,
        alt,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    TogglePalette,
    OpenCreate,
    CloseAll,
}

pub static DEFAULT_BINDINGS: Lazy<Vec<(KeyCombo, HotkeyAction)>> = Lazy::new(|| {
    [
        ("mod+k", HotkeyAction::TogglePalette),
        ("mod+n", HotkeyAction::OpenCreate),
        ("escape", HotkeyAction::CloseAll),
    ]
    .into_iter()
    .filter_map(|(combo, action)| parse_combo(combo).map(|c| (c, action)))
    .collect()
});

pub fn lookup(combo: &KeyCombo) -> Option<HotkeyAction> {
    DEFAULT_BINDINGS
        .iter()
        .find(|(c, _)| c == combo)
        .map(|(_, action)| *action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_and_cmd_are_the_same_modifier() {
        assert_eq!(parse_combo("Ctrl+K"), parse_combo("cmd+k"));
        assert_eq!(parse_combo("mod+k").unwrap().to_string(), "mod+k");
    }

    #[test]
    fn invalid_combos() {
        assert!(parse_combo("ctrl+").is_none());
        assert!(parse_combo("ctrl+shift").is_none());
        assert!(parse_combo("a+b").is_none());
    }

    #[test]
    fn default_bindings_resolve() {
        assert_eq!(
            lookup(&parse_combo("Ctrl+K").unwrap()),
            Some(HotkeyAction::TogglePalette)
        );
        assert_eq!(
            lookup(&parse_combo("mod+n").unwrap()),
            Some(HotkeyAction::OpenCreate)
        );
        assert_eq!(lookup(&parse_combo("Esc").unwrap()), Some(HotkeyAction::CloseAll));
        assert_eq!(lookup(&parse_combo("mod+shift+k").unwrap()), None);
    }
}
