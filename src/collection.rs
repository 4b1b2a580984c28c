use crate::form::{Form, FormField, ValidationError};
use crate::model::{Experience, Project};
use crate::steps;
use chrono::NaiveDate;
use tracing::debug;

/// A record kind that can be listed, created and edited from a management view.
pub trait Entry: Clone {
    const KIND: &'static str;

    fn form_fields(existing: Option<&Self>) -> Vec<FormField>;
    fn from_form(form: &Form, existing: Option<&Self>, today: NaiveDate) -> Self;
    fn summary_line(&self) -> String;
}

impl Entry for Experience {
    const KIND: &'static str = "experience";

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        steps::experience_fields(existing)
    }

    fn from_form(form: &Form, existing: Option<&Self>, today: NaiveDate) -> Self {
        steps::commit_experience(form, existing, today)
    }

    fn summary_line(&self) -> String {
        Experience::summary_line(self)
    }
}

impl Entry for Project {
    const KIND: &'static str = "project";

    fn form_fields(existing: Option<&Self>) -> Vec<FormField> {
        steps::project_fields(existing)
    }

    fn from_form(form: &Form, existing: Option<&Self>, today: NaiveDate) -> Self {
        steps::commit_project(form, existing, today)
    }

    fn summary_line(&self) -> String {
        Project::summary_line(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEdit {
    pub target: EditTarget,
    pub form: Form,
}

/// Selection over a collection plus the entry form, when one is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manager {
    selected: usize,
    editing: Option<EntryEdit>,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn editing(&self) -> Option<&EntryEdit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EntryEdit> {
        self.editing.as_mut()
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn begin_new<T: Entry>(&mut self) {
        self.editing = Some(EntryEdit {
            target: EditTarget::New,
            form: Form::new(T::form_fields(None)),
        });
    }

    /// Opens the selected entry; an empty collection opens a blank one instead.
    pub fn begin_edit<T: Entry>(&mut self, items: &[T]) {
        match items.get(self.selected) {
            Some(entry) => {
                self.editing = Some(EntryEdit {
                    target: EditTarget::Existing(self.selected),
                    form: Form::new(T::form_fields(Some(entry))),
                });
            }
            None => self.begin_new::<T>(),
        }
    }

    /// Closes the entry form without touching the collection.
    pub fn cancel_edit(&mut self, len: usize) {
        self.editing = None;
        self.clamp(len);
    }

    /// Validates the open form and writes it into `items`. New entries are
    /// appended and selected; edits replace in place and keep their index.
    pub fn save<T: Entry>(
        &mut self,
        items: &mut Vec<T>,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        let Some(edit) = self.editing.as_mut() else {
            return Ok(());
        };
        edit.form.validate()?;

        match edit.target {
            EditTarget::Existing(index) if index < items.len() => {
                let entry = T::from_form(&edit.form, Some(&items[index]), today);
                items[index] = entry;
                self.selected = index;
                debug!(kind = T::KIND, index, "entry updated");
            }
            _ => {
                items.push(T::from_form(&edit.form, None, today));
                self.selected = items.len() - 1;
                debug!(kind = T::KIND, index = self.selected, "entry created");
            }
        }

        self.editing = None;
        Ok(())
    }

    pub fn delete_selected<T>(&mut self, items: &mut Vec<T>) {
        if self.selected < items.len() {
            items.remove(self.selected);
        }
        self.clamp(items.len());
    }

    fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub fn summary_lines<T: Entry>(items: &[T]) -> Vec<String> {
    items.iter().map(T::summary_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn fill(manager: &mut Manager, values: [&str; 6]) {
        let edit = manager.editing_mut().expect("entry form open");
        let mut fields = edit.form.fields().to_vec();
        for (field, value) in fields.iter_mut().zip(values) {
            field.value = value.to_string();
        }
        edit.form = Form::new(fields);
    }

    fn job(company: &str) -> [&str; 6] {
        [company, "Engineer", "Remote", "2021-01", "current", "Built things"]
    }

    #[test]
    fn creating_appends_and_selects_last() {
        let mut items: Vec<Experience> = Vec::new();
        let mut manager = Manager::new();

        manager.begin_new::<Experience>();
        assert_eq!(manager.editing().map(|e| e.target), Some(EditTarget::New));
        fill(&mut manager, job("Acme"));
        manager.save(&mut items, today()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(manager.selected(), 0);
        assert!(manager.editing().is_none());

        let first = items[0].clone();
        manager.begin_new::<Experience>();
        fill(&mut manager, job("Globex"));
        manager.save(&mut items, today()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(manager.selected(), 1);
        assert_eq!(items[0], first);
    }

    #[test]
    fn editing_replaces_in_place() {
        let mut items: Vec<Experience> = Vec::new();
        let mut manager = Manager::new();
        for company in ["A", "B", "C"] {
            manager.begin_new::<Experience>();
            fill(&mut manager, job(company));
            manager.save(&mut items, today()).unwrap();
        }

        manager.select_next(items.len());
        assert_eq!(manager.selected(), 0);
        manager.select_next(items.len());
        manager.begin_edit(&items);
        assert_eq!(
            manager.editing().map(|e| e.target),
            Some(EditTarget::Existing(1))
        );
        fill(&mut manager, job("B2"));
        manager.save(&mut items, today()).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(manager.selected(), 1);
        let companies: Vec<_> = items.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, ["A", "B2", "C"]);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut manager = Manager::new();
        manager.select_prev(3);
        assert_eq!(manager.selected(), 2);
        manager.select_next(3);
        assert_eq!(manager.selected(), 0);

        manager.select_next(0);
        manager.select_prev(0);
        assert_eq!(manager.selected(), 0);
    }

    #[test]
    fn invalid_form_stays_open() {
        let mut items: Vec<Project> = Vec::new();
        let mut manager = Manager::new();
        manager.begin_new::<Project>();
        let err = manager.save(&mut items, today()).unwrap_err();
        assert_eq!(err.field_index(), 0);
        assert!(manager.editing().is_some());
        assert!(items.is_empty());
    }

    #[test]
    fn cancel_keeps_collection_and_clamps_selection() {
        let mut items: Vec<Experience> = Vec::new();
        let mut manager = Manager::new();
        for company in ["A", "B"] {
            manager.begin_new::<Experience>();
            fill(&mut manager, job(company));
            manager.save(&mut items, today()).unwrap();
        }
        let before = items.clone();

        manager.begin_edit(&items);
        fill(&mut manager, job("Changed"));
        items.pop();
        manager.cancel_edit(items.len());
        assert!(manager.editing().is_none());
        assert_eq!(manager.selected(), 0);
        assert_eq!(items[..], before[..1]);
    }

    #[test]
    fn edit_on_empty_collection_creates() {
        let items: Vec<Experience> = Vec::new();
        let mut manager = Manager::new();
        manager.begin_edit(&items);
        assert_eq!(manager.editing().map(|e| e.target), Some(EditTarget::New));
    }

    #[test]
    fn delete_reclamps_selection() {
        let mut items: Vec<Experience> = Vec::new();
        let mut manager = Manager::new();
        for company in ["A", "B"] {
            manager.begin_new::<Experience>();
            fill(&mut manager, job(company));
            manager.save(&mut items, today()).unwrap();
        }
        manager.delete_selected(&mut items);
        assert_eq!(items.len(), 1);
        assert_eq!(manager.selected(), 0);
        manager.delete_selected(&mut items);
        manager.delete_selected(&mut items);
        assert!(items.is_empty());
        assert_eq!(manager.selected(), 0);
    }

    #[test]
    fn summary_lines_follow_collection_order() {
        let mut items: Vec<Experience> = Vec::new();
        let mut manager = Manager::new();
        for company in ["A", "B"] {
            manager.begin_new::<Experience>();
            fill(&mut manager, job(company));
            manager.save(&mut items, today()).unwrap();
        }
        let lines = summary_lines(&items);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("@ A"));
        assert!(lines[1].contains("Present"));
    }
}
