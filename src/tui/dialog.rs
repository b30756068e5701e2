//! Modal dialogs. Each one is a small state machine fed key events by the
//! input layer and drawn by `render::dialog`; none of them block the
//! polling loop.

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::sort::SortChoice;
use crate::util::unicode;

/// Result of feeding one key to a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    /// Still open
    Pending,
    Done(T),
    Cancelled,
}

/// Vertical pick list. Movement wraps around at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    pub title: String,
    pub options: Vec<(T, String)>,
    pub selected: usize,
}

impl<T: Copy> Menu<T> {
    pub fn new(title: impl Into<String>, options: Vec<(T, String)>, selected: usize) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        Menu {
            title: title.into(),
            options,
            selected,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<T> {
        let len = self.options.len();
        if len == 0 {
            return DialogOutcome::Cancelled;
        }
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancelled,
            KeyCode::Enter => return DialogOutcome::Done(self.options[self.selected].0),
            KeyCode::Down => self.selected = (self.selected + 1) % len,
            KeyCode::Up => self.selected = (self.selected + len - 1) % len,
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = len - 1,
            _ => {}
        }
        DialogOutcome::Pending
    }
}

/// Yes/No question. Starts on "No".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YesNo {
    pub message: String,
    pub yes: bool,
}

impl YesNo {
    pub fn new(message: impl Into<String>) -> Self {
        YesNo {
            message: message.into(),
            yes: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<bool> {
        match key.code {
            KeyCode::Char('y') => return DialogOutcome::Done(true),
            KeyCode::Char('n') => return DialogOutcome::Done(false),
            KeyCode::Tab => self.yes = !self.yes,
            KeyCode::Left => self.yes = true,
            KeyCode::Right => self.yes = false,
            KeyCode::Enter | KeyCode::Char(' ') => return DialogOutcome::Done(self.yes),
            KeyCode::Esc => return DialogOutcome::Cancelled,
            _ => {}
        }
        DialogOutcome::Pending
    }
}

pub const NUMBER_HELP: [&str; 2] = ["up/down    +/- 100", "left/right +/-  10"];

/// Digits that always fit a `u64`
const MAX_DIGITS: usize = 19;

/// Non-negative integer entry with arrow-key nudging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberInput {
    pub prompt: String,
    pub buffer: String,
    /// Widest the entry can get, in digits
    pub max_len: usize,
}

impl NumberInput {
    pub fn new(prompt: impl Into<String>, initial: i64) -> Self {
        let prompt = prompt.into();
        let max_len = std::iter::once(prompt.as_str())
            .chain(NUMBER_HELP)
            .map(unicode::display_width)
            .max()
            .unwrap_or(0)
            .min(MAX_DIGITS);
        NumberInput {
            prompt,
            buffer: initial.max(0).to_string(),
            max_len,
        }
    }

    pub fn value(&self) -> u64 {
        self.buffer.parse().unwrap_or(u64::MAX)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<u64> {
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancelled,
            KeyCode::Enter => return DialogOutcome::Done(self.value()),
            KeyCode::Backspace | KeyCode::Delete => {
                self.buffer.pop();
                if self.buffer.is_empty() {
                    self.buffer.push('0');
                }
            }
            // a full field only accepts Esc, Enter and deletion
            _ if self.buffer.len() >= self.max_len => {}
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.buffer == "0" {
                    self.buffer.clear();
                }
                self.buffer.push(c);
            }
            KeyCode::Left => self.set(self.value().saturating_sub(10)),
            KeyCode::Right => self.set(self.value().saturating_add(10)),
            KeyCode::Down => self.set(self.value().saturating_sub(100)),
            KeyCode::Up => self.set(self.value().saturating_add(100)),
            _ => {}
        }
        DialogOutcome::Pending
    }

    fn set(&mut self, value: u64) {
        self.buffer = value.to_string();
    }
}

/// Which daemon-wide speed cap a number dialog edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Upload,
    Download,
}

impl LimitKind {
    pub fn prompt(self) -> &'static str {
        match self {
            LimitKind::Upload => "Upload limit in K/s",
            LimitKind::Download => "Download limit in K/s",
        }
    }
}

/// The dialog currently covering the task list
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Sort(Menu<SortChoice>),
    Remove { id: i64, prompt: YesNo },
    Limit { kind: LimitKind, input: NumberInput },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn menu() -> Menu<u8> {
        Menu::new(
            "Pick",
            vec![(1, "One".into()), (2, "Two".into()), (3, "Three".into())],
            0,
        )
    }

    #[test]
    fn menu_wraps_both_ways() {
        let mut m = menu();
        assert_eq!(m.handle_key(key(KeyCode::Up)), DialogOutcome::Pending);
        assert_eq!(m.selected, 2);
        m.handle_key(key(KeyCode::Down));
        assert_eq!(m.selected, 0);
        m.handle_key(key(KeyCode::End));
        assert_eq!(m.selected, 2);
        m.handle_key(key(KeyCode::Home));
        m.handle_key(key(KeyCode::Down));
        assert_eq!(m.handle_key(key(KeyCode::Enter)), DialogOutcome::Done(2));
    }

    #[test]
    fn menu_escape_cancels() {
        let mut m = menu();
        assert_eq!(m.handle_key(key(KeyCode::Esc)), DialogOutcome::Cancelled);
    }

    #[test]
    fn menu_clamps_initial_selection() {
        let m = Menu::new("x", vec![(1u8, "a".into())], 7);
        assert_eq!(m.selected, 0);
    }

    #[test]
    fn yes_no_defaults_to_no() {
        let mut d = YesNo::new("Remove x?");
        assert_eq!(d.handle_key(key(KeyCode::Enter)), DialogOutcome::Done(false));

        let mut d = YesNo::new("Remove x?");
        d.handle_key(key(KeyCode::Tab));
        assert!(d.yes);
        assert_eq!(d.handle_key(key(KeyCode::Char(' '))), DialogOutcome::Done(true));
    }

    #[test]
    fn yes_no_keys() {
        let mut d = YesNo::new("?");
        d.handle_key(key(KeyCode::Left));
        assert!(d.yes);
        d.handle_key(key(KeyCode::Right));
        assert!(!d.yes);
        assert_eq!(d.handle_key(key(KeyCode::Char('y'))), DialogOutcome::Done(true));
        assert_eq!(d.handle_key(key(KeyCode::Char('n'))), DialogOutcome::Done(false));
        assert_eq!(d.handle_key(key(KeyCode::Esc)), DialogOutcome::Cancelled);
        assert_eq!(d.handle_key(key(KeyCode::Char('x'))), DialogOutcome::Pending);
    }

    #[test]
    fn number_input_arrows_and_floor() {
        let mut n = NumberInput::new("Upload limit in K/s", 50);
        n.handle_key(key(KeyCode::Up));
        assert_eq!(n.value(), 150);
        n.handle_key(key(KeyCode::Right));
        assert_eq!(n.value(), 160);
        n.handle_key(key(KeyCode::Down));
        n.handle_key(key(KeyCode::Down));
        assert_eq!(n.value(), 0);
        n.handle_key(key(KeyCode::Left));
        assert_eq!(n.buffer, "0");
    }

    #[test]
    fn number_input_typing() {
        let mut n = NumberInput::new("Download limit in K/s", 0);
        n.handle_key(key(KeyCode::Char('4')));
        n.handle_key(key(KeyCode::Char('2')));
        n.handle_key(key(KeyCode::Char('x')));
        assert_eq!(n.buffer, "42");
        n.handle_key(key(KeyCode::Backspace));
        n.handle_key(key(KeyCode::Backspace));
        assert_eq!(n.buffer, "0");
        assert_eq!(n.handle_key(key(KeyCode::Enter)), DialogOutcome::Done(0));
    }

    #[test]
    fn number_input_length_is_bounded() {
        let mut n = NumberInput::new("Limit", 0);
        // the help lines are the widest text
        assert_eq!(n.max_len, 18);
        for _ in 0..40 {
            n.handle_key(key(KeyCode::Char('9')));
        }
        assert_eq!(n.buffer.len(), 18);
        assert_eq!(n.value(), 999_999_999_999_999_999);
    }

    #[test]
    fn long_prompt_does_not_overflow_value() {
        let mut n = NumberInput::new(LimitKind::Download.prompt(), 0);
        assert_eq!(n.max_len, 19);
        for _ in 0..30 {
            n.handle_key(key(KeyCode::Char('9')));
        }
        assert_eq!(n.buffer, "9".repeat(19));
        assert_eq!(
            n.handle_key(key(KeyCode::Enter)),
            DialogOutcome::Done(9_999_999_999_999_999_999)
        );
    }

    #[test]
    fn negative_initial_value_starts_at_zero() {
        let n = NumberInput::new("Limit", -1);
        assert_eq!(n.buffer, "0");
        let mut n = n;
        assert_eq!(n.handle_key(key(KeyCode::Esc)), DialogOutcome::Cancelled);
    }
}
