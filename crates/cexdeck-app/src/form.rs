//! Input widgets state shared by all modals
//!
//! A [`Form`] is an ordered list of [`FormField`]s with one focused field.
//! Keys are routed to the focused field; Tab/BackTab move focus.

use cexdeck_core::types::ModuleCode;

use crate::input_key::InputKey;

// ─────────────────────────────────────────────────────────────────────────────
// Single-line text
// ─────────────────────────────────────────────────────────────────────────────

/// Single-line text input. Editing happens at the end of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Render as bullets (passwords, tokens)
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: true,
            masked: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Value to display, bullets when masked.
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn handle_key(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Backspace => {
                self.value.pop();
                true
            }
            InputKey::CharCtrl('u') => {
                self.value.clear();
                true
            }
            other => match other.printable() {
                Some(c) => {
                    self.value.push(c);
                    true
                }
                None => false,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Multi-line text
// ─────────────────────────────────────────────────────────────────────────────

/// Multi-line text editor with a (row, column) cursor.
///
/// Columns count chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    pub label: &'static str,
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl TextArea {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }

    /// Editor seeded with `text`, cursor at the start.
    pub fn with_text(label: &'static str, text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            label,
            lines,
            row: 0,
            col: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, rest);
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_vertical(&mut self, down: bool) {
        if down && self.row + 1 < self.lines.len() {
            self.row += 1;
        } else if !down && self.row > 0 {
            self.row -= 1;
        }
        self.col = self.col.min(self.line_len(self.row));
    }

    pub(crate) fn handle_key(&mut self, key: InputKey) -> bool {
        match key {
            InputKey::Enter => self.insert_newline(),
            InputKey::Backspace => self.backspace(),
            InputKey::Delete => self.delete(),
            InputKey::Left => self.move_left(),
            InputKey::Right => self.move_right(),
            InputKey::Up => self.move_vertical(false),
            InputKey::Down => self.move_vertical(true),
            InputKey::Home => self.col = 0,
            InputKey::End => self.col = self.line_len(self.row),
            other => match other.printable() {
                Some(c) => self.insert_char(c),
                None => return false,
            },
        }
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Choice fields
// ─────────────────────────────────────────────────────────────────────────────

/// One value out of a list, cycled with Space or ←/→.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceField {
    pub label: &'static str,
    /// (value, display label)
    pub options: Vec<(String, String)>,
    pub selected: Option<usize>,
}

impl ChoiceField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            options: Vec::new(),
            selected: None,
        }
    }

    /// Replace the options. Nothing is selected afterwards.
    pub fn set_options(&mut self, options: Vec<(String, String)>) {
        self.options = options;
        self.selected = None;
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|(value, _)| value.as_str())
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|(_, label)| label.as_str())
    }

    fn cycle(&mut self, forward: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text(TextField),
    Area(TextArea),
    Toggle { label: &'static str, value: bool },
    Module { label: &'static str, value: ModuleCode },
    Choice(ChoiceField),
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Text(f) => f.label,
            FormField::Area(a) => a.label,
            FormField::Toggle { label, .. } | FormField::Module { label, .. } => *label,
            FormField::Choice(c) => c.label,
        }
    }

    /// Whether Enter belongs to the field rather than submitting the form.
    pub fn captures_enter(&self) -> bool {
        matches!(self, FormField::Area(_))
    }

    fn handle_key(&mut self, key: InputKey) -> bool {
        match self {
            FormField::Text(f) => f.handle_key(key),
            FormField::Area(a) => a.handle_key(key),
            FormField::Toggle { value, .. } => match key {
                InputKey::Char(' ') | InputKey::Left | InputKey::Right => {
                    *value = !*value;
                    true
                }
                _ => false,
            },
            FormField::Module { value, .. } => match key {
                InputKey::Char(' ') | InputKey::Right => {
                    *value = value.next();
                    true
                }
                InputKey::Left => {
                    *value = value.prev();
                    true
                }
                _ => false,
            },
            FormField::Choice(c) => match key {
                InputKey::Char(' ') | InputKey::Right => {
                    c.cycle(true);
                    true
                }
                InputKey::Left => {
                    c.cycle(false);
                    true
                }
                _ => false,
            },
        }
    }
}

/// Ordered fields with one focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    /// Route an editing key to the focused field.
    pub fn handle_key(&mut self, key: InputKey) -> bool {
        match self.fields.get_mut(self.focus) {
            Some(field) => field.handle_key(key),
            None => false,
        }
    }

    pub fn text(&self, index: usize) -> Option<&TextField> {
        match self.fields.get(index) {
            Some(FormField::Text(f)) => Some(f),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, index: usize) -> Option<&mut TextField> {
        match self.fields.get_mut(index) {
            Some(FormField::Text(f)) => Some(f),
            _ => None,
        }
    }

    pub fn area(&self, index: usize) -> Option<&TextArea> {
        match self.fields.get(index) {
            Some(FormField::Area(a)) => Some(a),
            _ => None,
        }
    }

    pub fn area_mut(&mut self, index: usize) -> Option<&mut TextArea> {
        match self.fields.get_mut(index) {
            Some(FormField::Area(a)) => Some(a),
            _ => None,
        }
    }

    pub fn toggle(&self, index: usize) -> Option<bool> {
        match self.fields.get(index) {
            Some(FormField::Toggle { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub fn module(&self, index: usize) -> Option<ModuleCode> {
        match self.fields.get(index) {
            Some(FormField::Module { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub fn choice(&self, index: usize) -> Option<&ChoiceField> {
        match self.fields.get(index) {
            Some(FormField::Choice(c)) => Some(c),
            _ => None,
        }
    }

    pub fn choice_mut(&mut self, index: usize) -> Option<&mut ChoiceField> {
        match self.fields.get_mut(index) {
            Some(FormField::Choice(c)) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut Form, s: &str) {
        for c in s.chars() {
            form.handle_key(InputKey::Char(c));
        }
    }

    #[test]
    fn test_text_field_editing() {
        let mut form = Form::new(vec![FormField::Text(TextField::new("Name"))]);
        type_str(&mut form, "abc");
        form.handle_key(InputKey::Backspace);
        assert_eq!(form.text(0).unwrap().value, "ab");

        form.handle_key(InputKey::CharCtrl('u'));
        assert_eq!(form.text(0).unwrap().value, "");
    }

    #[test]
    fn test_masked_display() {
        let field = TextField::new("Password").masked().with_value("hunter2");
        assert_eq!(field.display_value(), "•••••••");
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = Form::new(vec![
            FormField::Text(TextField::new("A")),
            FormField::Toggle {
                label: "B",
                value: true,
            },
        ]);
        form.focus_next();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_toggle_and_module_cycle_with_space() {
        let mut form = Form::new(vec![
            FormField::Toggle {
                label: "HTTPS",
                value: true,
            },
            FormField::Module {
                label: "Module",
                value: ModuleCode::Cls,
            },
        ]);
        form.handle_key(InputKey::Char(' '));
        assert_eq!(form.toggle(0), Some(false));

        form.focus_next();
        form.handle_key(InputKey::Char(' '));
        assert_eq!(form.module(1), Some(ModuleCode::Cto));
        form.handle_key(InputKey::Left);
        form.handle_key(InputKey::Left);
        assert_eq!(form.module(1), Some(ModuleCode::Cfc));
    }

    #[test]
    fn test_choice_cycles_and_resets_on_new_options() {
        let mut choice = ChoiceField::new("Tenant");
        choice.cycle(true);
        assert_eq!(choice.selected, None);

        choice.set_options(vec![
            ("a".into(), "Alpha".into()),
            ("b".into(), "Beta".into()),
        ]);
        choice.cycle(true);
        assert_eq!(choice.selected_value(), Some("a"));
        choice.cycle(true);
        assert_eq!(choice.selected_label(), Some("Beta"));
        choice.cycle(true);
        assert_eq!(choice.selected_value(), Some("a"));

        choice.set_options(vec![("c".into(), "Gamma".into())]);
        assert_eq!(choice.selected_value(), None);
    }

    #[test]
    fn test_text_area_newlines_and_joins() {
        let mut area = TextArea::new("Payload");
        for c in "{}".chars() {
            area.insert_char(c);
        }
        area.handle_key(InputKey::Left);
        area.handle_key(InputKey::Enter);
        assert_eq!(area.text(), "{\n}");
        assert_eq!(area.cursor(), (1, 0));

        area.backspace();
        assert_eq!(area.text(), "{}");
        assert_eq!(area.cursor(), (0, 1));

        area.handle_key(InputKey::End);
        area.delete();
        assert_eq!(area.text(), "{}");
    }

    #[test]
    fn test_text_area_multibyte_chars() {
        let mut area = TextArea::with_text("Payload", "é\nü");
        area.handle_key(InputKey::Right);
        area.insert_char('x');
        assert_eq!(area.text(), "éx\nü");

        area.handle_key(InputKey::Down);
        assert_eq!(area.cursor(), (1, 1));
        area.backspace();
        assert_eq!(area.text(), "éx\n");
    }

    #[test]
    fn test_area_captures_enter() {
        assert!(FormField::Area(TextArea::new("x")).captures_enter());
        assert!(!FormField::Text(TextField::new("x")).captures_enter());
    }
}
