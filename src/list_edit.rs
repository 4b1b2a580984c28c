/// In-place editor for a comma-separated field value.
///
/// The selection is clamped, never wrapped. While open there is always at
/// least one entry to type into unless the user deletes every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEditor {
    items: Vec<String>,
    selected: usize,
}

impl ListEditor {
    pub fn open(value: &str) -> Self {
        let mut items = parse_list(value);
        if items.is_empty() {
            items.push(String::new());
        }
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn add_item(&mut self) {
        self.items.push(String::new());
        self.selected = self.items.len() - 1;
    }

    pub fn delete_item(&mut self) {
        if self.selected < self.items.len() {
            self.items.remove(self.selected);
        }
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(item) = self.items.get_mut(self.selected) {
            item.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(item) = self.items.get_mut(self.selected) {
            item.pop();
        }
    }

    /// Flattens the entries back into a field value.
    pub fn close(self) -> String {
        join_list(self.items.iter().map(String::as_str))
    }
}

/// Splits on commas, trims each part and drops empties.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn join_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
