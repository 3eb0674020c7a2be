use crate::keybindings::KeybindingCache;
use crate::page::{FieldRef, Page, PaymentDetail};
use crate::ui::theme::Theme;

pub struct AppState {
    pub page: Page,
    pub fields: Vec<FieldRef>,
    pub cursor_position: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub keybindings: KeybindingCache,
    pub notification_message: String,
}

impl AppState {
    pub fn new(page: Page, theme: Theme, keybindings: KeybindingCache, notification_message: String) -> Self {
        let fields = page.copyable_fields();
        Self {
            page,
            fields,
            cursor_position: 0,
            should_quit: false,
            show_help: false,
            theme,
            keybindings,
            notification_message,
        }
    }

    pub fn selected_field(&self) -> Option<FieldRef> {
        self.fields.get(self.cursor_position).copied()
    }

    pub fn selected_detail(&self) -> Option<&PaymentDetail> {
        self.page.detail(self.selected_field()?)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_position + 1 < self.fields.len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_last(&mut self) {
        self.cursor_position = self.fields.len().saturating_sub(1);
    }

    /// Jump to the first field of the next section that has one.
    pub fn next_section(&mut self) {
        let Some(current) = self.selected_field() else {
            return;
        };
        if let Some(offset) = self.fields[self.cursor_position..]
            .iter()
            .position(|f| !same_section(f, &current))
        {
            self.cursor_position += offset;
        }
    }

    /// Jump to the first field of the current section, or of the previous
    /// section when already there.
    pub fn prev_section(&mut self) {
        let Some(current) = self.selected_field() else {
            return;
        };
        let start = self.section_start(self.cursor_position, &current);
        if start < self.cursor_position || start == 0 {
            self.cursor_position = start;
            return;
        }
        let previous = self.fields[start - 1];
        self.cursor_position = self.section_start(start - 1, &previous);
    }

    fn section_start(&self, index: usize, field: &FieldRef) -> usize {
        let mut start = index;
        while start > 0 && same_section(&self.fields[start - 1], field) {
            start -= 1;
        }
        start
    }
}

fn same_section(a: &FieldRef, b: &FieldRef) -> bool {
    a.group == b.group && a.section == b.section
}
