use crate::internal::ui::app::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Where a key press is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyBindingContext {
    Global,
    /// Stories page in normal mode
    List,
    /// Typing into the story form
    Form,
}

/// Maps key events to actions
#[derive(Debug, Clone, Default)]
pub struct KeyBindingMap {
    global: HashMap<KeyEvent, Action>,
    list: HashMap<KeyEvent, Action>,
    form: HashMap<KeyEvent, Action>,
}

impl KeyBindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, context: KeyBindingContext) -> &HashMap<KeyEvent, Action> {
        match context {
            KeyBindingContext::Global => &self.global,
            KeyBindingContext::List => &self.list,
            KeyBindingContext::Form => &self.form,
        }
    }

    /// Get the action for a key in a context.
    ///
    /// List bindings fall back to global ones. The form context does not, so
    /// plain characters reach the focused field.
    pub fn get_action(&self, key: &KeyEvent, context: KeyBindingContext) -> Option<Action> {
        if let Some(action) = self.map(context).get(key) {
            return Some(action.clone());
        }

        match context {
            KeyBindingContext::Form => None,
            _ => self.global.get(key).cloned(),
        }
    }

    pub fn add_binding(&mut self, context: KeyBindingContext, key: KeyEvent, action: Action) {
        let map = match context {
            KeyBindingContext::Global => &mut self.global,
            KeyBindingContext::List => &mut self.list,
            KeyBindingContext::Form => &mut self.form,
        };
        map.insert(key, action);
    }

    /// Merge custom keybindings from configuration
    pub fn merge_config(&mut self, config: &crate::config::KeyBindingConfig) {
        let mut merge = |ctx: KeyBindingContext, bindings: &HashMap<String, String>| {
            for (key_str, action_name) in bindings {
                match (parse_key_str(key_str), Action::from_config_name(action_name)) {
                    (Some(key_event), Some(action)) => self.add_binding(ctx, key_event, action),
                    (None, _) => tracing::warn!("Invalid key string in config: {}", key_str),
                    (_, None) => tracing::warn!("Unknown action in config: {}", action_name),
                }
            }
        };

        merge(KeyBindingContext::Global, &config.global);
        merge(KeyBindingContext::List, &config.list);
        merge(KeyBindingContext::Form, &config.form);
    }
}

/// Parse a key string into a KeyEvent
/// Supported formats:
/// - Single char: "j", "k", "1"
/// - Special keys: "Enter", "Tab", "BackTab", "Esc", "Up", "Down", "Left", "Right"
/// - With modifiers: "Ctrl+S", "Shift+Tab"
pub fn parse_key_str(key_str: &str) -> Option<KeyEvent> {
    let parts: Vec<&str> = key_str.split('+').collect();

    let mut modifiers = KeyModifiers::empty();
    let key_part = match parts.split_last() {
        Some((last, mods)) => {
            for modifier in mods {
                match modifier.to_lowercase().as_str() {
                    "ctrl" => modifiers |= KeyModifiers::CONTROL,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    _ => return None,
                }
            }
            *last
        }
        None => return None,
    };

    let code = match key_part {
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Esc" => KeyCode::Esc,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Backspace" => KeyCode::Backspace,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}
