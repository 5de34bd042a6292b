use super::action::Action;
use super::state::AppMode;
use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub palette: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            palette: "ctrl+k".to_string(),
        }
    }
}

type Binding = (KeyCode, KeyModifiers);

#[derive(Debug, Clone)]
pub struct KeyMap {
    pub palette: Binding,
    pub global: HashMap<Binding, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_bindings((KeyCode::Char('k'), KeyModifiers::CONTROL))
    }
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig) -> Result<Self> {
        Ok(Self::from_bindings(parse_binding(&config.palette)?))
    }

    fn from_bindings(palette: Binding) -> Self {
        let mut global = HashMap::new();

        global.insert(palette, Action::OpenPalette);
        global.insert(key('q'), Action::Quit);
        global.insert(key('?'), Action::ToggleHelp);
        global.insert(key('t'), Action::CycleTheme);
        global.insert(key('g'), Action::Navigate("/".to_string()));
        global.insert((KeyCode::Esc, KeyModifiers::NONE), Action::CancelMode);

        Self { palette, global }
    }

    pub fn get_action(&self, event: KeyEvent, mode: AppMode) -> Option<Action> {
        let binding = normalize(event);
        if mode == AppMode::Help && binding != self.palette {
            // Any other key dismisses the overlay.
            return Some(Action::CancelMode);
        }
        self.global.get(&binding).cloned()
    }

    #[must_use]
    pub fn is_palette_key(&self, event: KeyEvent) -> bool {
        normalize(event) == self.palette
    }

    /// Display form of the palette shortcut, e.g. `Ctrl+K`.
    #[must_use]
    pub fn palette_label(&self) -> String {
        let (code, modifiers) = self.palette;
        let mut parts = Vec::new();
        if modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        parts.push(match code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        parts.join("+")
    }
}

fn key(c: char) -> Binding {
    (KeyCode::Char(c), KeyModifiers::NONE)
}

/// Terminals report shifted characters with SHIFT set; the character itself
/// already carries that information.
fn normalize(event: KeyEvent) -> Binding {
    let mut modifiers = event.modifiers;
    let code = match event.code {
        KeyCode::Char(c) => {
            modifiers.remove(KeyModifiers::SHIFT);
            if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                KeyCode::Char(c.to_ascii_lowercase())
            } else {
                KeyCode::Char(c)
            }
        }
        other => other,
    };
    (code, modifiers)
}

/// Parses bindings such as `ctrl+k`, `alt+space` or `f2`.
pub fn parse_binding(text: &str) -> Result<(KeyCode, KeyModifiers)> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code = None;

    for part in text.split('+').map(|p| p.trim().to_ascii_lowercase()) {
        match part.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ if code.is_some() => return Err(anyhow!("more than one key in binding: {text}")),
            "space" => code = Some(KeyCode::Char(' ')),
            "enter" => code = Some(KeyCode::Enter),
            "tab" => code = Some(KeyCode::Tab),
            key if key.len() == 1 => code = key.chars().next().map(KeyCode::Char),
            key if key.starts_with('f') => {
                let n: u8 = key[1..]
                    .parse()
                    .map_err(|_| anyhow!("unknown key in binding: {text}"))?;
                code = Some(KeyCode::F(n));
            }
            _ => return Err(anyhow!("unknown key in binding: {text}")),
        }
    }

    let code = code.ok_or_else(|| anyhow!("binding has no key: {text}"))?;
    Ok(normalize(KeyEvent::new(code, modifiers)))
}
