//! Key bindings shared by the dashboard views.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the short help text shown in the footer. Views expose their
//! bindings through the [`KeyMap`] trait so the [`crate::help`] bar can render
//! them.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Required modifiers. `KeyModifiers::NONE` matches any unmodified press
    /// as well as shifted characters.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text attached to a binding, e.g. `("→/l", "next page")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// How the keys are shown to the user.
    pub key: String,
    /// What the action does.
    pub desc: String,
}

/// A named action triggered by any of its key presses.
///
/// # Examples
///
/// ```rust
/// use posboard::key::Binding;
/// use crossterm::event::KeyCode;
///
/// let next = Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
///     .with_help("→/l", "next page");
/// assert_eq!(next.help().desc, "next page");
/// assert!(next.enabled());
/// ```
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Attaches help text.
    pub fn with_help(mut self, key: &str, desc: &str) -> Self {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
        self
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns the key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Whether the binding currently responds to input and shows in help.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true if the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|press| {
            press.code == msg.key
                && (press.modifiers == msg.modifiers
                    || (press.modifiers == KeyModifiers::NONE
                        && msg.modifiers == KeyModifiers::SHIFT))
        })
    }
}

/// Returns true if any of the bindings matches the key message.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Implemented by anything that can describe its key bindings to the help bar.
pub trait KeyMap {
    /// Bindings for the single-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_matches_plain_and_shifted() {
        let b = Binding::new(vec![KeyCode::Char('G')]);
        assert!(b.matches(&press(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert!(b.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(!b.matches(&press(KeyCode::Char('g'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_modifier_binding_requires_modifier() {
        let b = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
        assert!(b.matches(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply");
        b.set_enabled(false);
        assert!(!b.enabled());
        assert!(!matches(&press(KeyCode::Enter, KeyModifiers::NONE), &[&b]));
    }
}
