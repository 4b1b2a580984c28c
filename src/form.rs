use crate::list_edit::ListEditor;
use crate::model::{is_current_token, parse_month_year, parse_year};
use thiserror::Error;

/// Shape check applied to a non-empty field value on commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldFormat {
    #[default]
    Text,
    /// Integer year or `current`.
    Year,
    /// `YYYY-MM` or `current`.
    MonthYear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub placeholder: &'static str,
    pub multiline: bool,
    pub is_list: bool,
    pub format: FieldFormat,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn format(mut self, format: FieldFormat) -> Self {
        self.format = format;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the required field: {label}")]
    MissingField { index: usize, label: &'static str },

    #[error("Invalid year in {label} (e.g. 2020 or \"current\")")]
    InvalidYear { index: usize, label: &'static str },

    #[error("Invalid date in {label} (e.g. 2022-06 or \"current\")")]
    InvalidMonthYear { index: usize, label: &'static str },
}

impl ValidationError {
    pub fn field_index(&self) -> usize {
        match self {
            ValidationError::MissingField { index, .. }
            | ValidationError::InvalidYear { index, .. }
            | ValidationError::InvalidMonthYear { index, .. } => *index,
        }
    }
}

/// The editable inputs of the current step plus the field cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
    current: usize,
    list: Option<ListEditor>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            current: 0,
            list: None,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Trimmed value of the field at `index`.
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.trim()).unwrap_or("")
    }

    pub fn list_editor(&self) -> Option<&ListEditor> {
        self.list.as_ref()
    }

    pub fn list_editor_mut(&mut self) -> Option<&mut ListEditor> {
        self.list.as_mut()
    }

    pub fn is_editing_list(&self) -> bool {
        self.list.is_some()
    }

    pub fn next_field(&mut self) {
        if self.current + 1 < self.fields.len() {
            self.current += 1;
        }
    }

    pub fn prev_field(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.current) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current) {
            field.value.pop();
        }
    }

    /// Inserts a line break; single-line fields ignore it.
    pub fn newline(&mut self) {
        if let Some(field) = self.fields.get_mut(self.current) {
            if field.multiline {
                field.value.push('\n');
            }
        }
    }

    /// Opens the list editor on the current field. Returns false for non-list fields.
    pub fn open_list(&mut self) -> bool {
        match self.fields.get(self.current) {
            Some(field) if field.is_list && self.list.is_none() => {
                self.list = Some(ListEditor::open(&field.value));
                true
            }
            _ => false,
        }
    }

    /// Writes the list editor back into the current field.
    pub fn apply_list(&mut self) {
        if let Some(editor) = self.list.take() {
            if let Some(field) = self.fields.get_mut(self.current) {
                field.value = editor.close();
            }
        }
    }

    pub fn discard_list(&mut self) {
        self.list = None;
    }

    /// Checks required fields first, then date shapes. Moves the cursor to the
    /// offending field on failure.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let result = check_fields(&self.fields);
        if let Err(err) = &result {
            self.current = err.field_index();
        }
        result
    }
}

fn check_fields(fields: &[FormField]) -> Result<(), ValidationError> {
    for (index, field) in fields.iter().enumerate() {
        if field.required && field.value.trim().is_empty() {
            return Err(ValidationError::MissingField {
                index,
                label: field.label,
            });
        }
    }

    for (index, field) in fields.iter().enumerate() {
        let value = field.value.trim();
        if value.is_empty() || is_current_token(value) {
            continue;
        }
        match field.format {
            FieldFormat::Text => {}
            FieldFormat::Year => {
                if parse_year(value, 1).is_none() {
                    return Err(ValidationError::InvalidYear {
                        index,
                        label: field.label,
                    });
                }
            }
            FieldFormat::MonthYear => {
                if parse_month_year(value).is_none() {
                    return Err(ValidationError::InvalidMonthYear {
                        index,
                        label: field.label,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        Form::new(vec![
            FormField::new("Name").required(),
            FormField::new("Website"),
            FormField::new("Start year").required().format(FieldFormat::Year),
            FormField::new("Skills").list(),
        ])
    }

    #[test]
    fn field_cursor_clamps_at_both_ends() {
        let mut form = form();
        form.prev_field();
        assert_eq!(form.current(), 0);
        for _ in 0..10 {
            form.next_field();
        }
        assert_eq!(form.current(), 3);
    }

    #[test]
    fn whitespace_only_required_field_fails_and_moves_cursor() {
        let mut form = form();
        form.next_field();
        form.next_field();
        form.insert_char('2');
        form.prev_field();
        form.prev_field();
        form.insert_char(' ');

        let err = form.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                index: 0,
                label: "Name"
            }
        );
        assert!(err.to_string().contains("Name"));
        assert_eq!(form.current(), 0);
    }

    #[test]
    fn year_fields_accept_integers_and_current_only() {
        for (input, ok) in [
            ("2020", true),
            ("current", true),
            ("abc", false),
            ("2020-01", false),
        ] {
            let mut form = Form::new(vec![FormField::new("End year")
                .required()
                .format(FieldFormat::Year)
                .value(input)]);
            assert_eq!(form.validate().is_ok(), ok, "input {input:?}");
        }
    }

    #[test]
    fn month_year_fields_need_a_separator() {
        for (input, ok) in [("2022-06", true), ("current", true), ("2022", false)] {
            let mut form = Form::new(vec![FormField::new("Start")
                .format(FieldFormat::MonthYear)
                .value(input)]);
            assert_eq!(form.validate().is_ok(), ok, "input {input:?}");
        }
    }

    #[test]
    fn format_error_points_at_the_date_field() {
        let mut form = form();
        form.fields[0].value = "Alice".into();
        form.fields[2].value = "soon".into();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidYear { index: 2, .. }));
        assert_eq!(form.current(), 2);
    }

    #[test]
    fn list_editor_opens_only_on_list_fields() {
        let mut form = form();
        assert!(!form.open_list());

        form.fields[3].value = "Go,,Rust ".into();
        for _ in 0..3 {
            form.next_field();
        }
        assert!(form.open_list());
        assert!(form.is_editing_list());
        if let Some(editor) = form.list_editor_mut() {
            editor.add_item();
            editor.insert_char('C');
        }
        form.apply_list();
        assert!(!form.is_editing_list());
        assert_eq!(form.value(3), "Go, Rust, C");
    }

    #[test]
    fn discarded_list_edits_leave_the_value_alone() {
        let mut form = form();
        form.fields[3].value = "Go".into();
        for _ in 0..3 {
            form.next_field();
        }
        form.open_list();
        if let Some(editor) = form.list_editor_mut() {
            editor.delete_item();
        }
        form.discard_list();
        assert_eq!(form.value(3), "Go");
    }

    #[test]
    fn newline_only_lands_in_multiline_fields() {
        let mut form = Form::new(vec![
            FormField::new("Title"),
            FormField::new("Details").multiline(),
        ]);
        form.newline();
        form.next_field();
        form.insert_char('a');
        form.newline();
        form.insert_char('b');
        assert_eq!(form.fields()[0].value, "");
        assert_eq!(form.fields()[1].value, "a\nb");
    }
}
