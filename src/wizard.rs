use crate::collection::{Entry, Manager};
use crate::document::{self, OutputPaths};
use crate::form::Form;
use crate::model::{Experience, Project, Resume};
use crate::steps;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Welcome,
    PersonalInfo,
    Summary,
    Education,
    Experience,
    Projects,
    Skills,
    CustomSections,
    Confirm,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Advance,
    Retreat,
    Saved,
}

impl Step {
    pub const ALL: [Step; 10] = [
        Step::Welcome,
        Step::PersonalInfo,
        Step::Summary,
        Step::Education,
        Step::Experience,
        Step::Projects,
        Step::Skills,
        Step::CustomSections,
        Step::Confirm,
        Step::Finish,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Welcome => "Welcome",
            Step::PersonalInfo => "Personal information",
            Step::Summary => "Summary",
            Step::Education => "Education",
            Step::Experience => "Work experience",
            Step::Projects => "Projects",
            Step::Skills => "Skills",
            Step::CustomSections => "Custom sections",
            Step::Confirm => "Confirm",
            Step::Finish => "Done",
        }
    }

    /// Completed fraction of the flow, 0.0 on `Welcome` and 1.0 on `Finish`.
    pub fn progress(self) -> f64 {
        self.index() as f64 / (Step::ALL.len() - 1) as f64
    }

    /// The whole step graph. Anything not listed stays where it is.
    pub fn transition(self, event: StepEvent) -> Step {
        use StepEvent::*;

        match (self, event) {
            (Step::Welcome, Advance) => Step::PersonalInfo,
            (Step::PersonalInfo, Advance) => Step::Summary,
            (Step::Summary, Advance) => Step::Education,
            (Step::Education, Advance) => Step::Experience,
            (Step::Experience, Advance) => Step::Projects,
            (Step::Projects, Advance) => Step::Skills,
            (Step::Skills, Advance) => Step::CustomSections,
            (Step::CustomSections, Advance) => Step::Confirm,
            (Step::Confirm, Saved) => Step::Finish,

            (Step::PersonalInfo, Retreat) => Step::Welcome,
            (Step::Summary, Retreat) => Step::PersonalInfo,
            (Step::Education, Retreat) => Step::Summary,
            (Step::Experience, Retreat) => Step::Education,
            (Step::Projects, Retreat) => Step::Experience,
            (Step::Skills, Retreat) => Step::Projects,
            (Step::CustomSections, Retreat) => Step::Skills,
            (Step::Confirm, Retreat) => Step::CustomSections,

            (step, _) => step,
        }
    }
}

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Enter: choose, open a list, apply a list, commit.
    Submit,
    /// Commit the step from any field.
    Save,
    /// Leave the step without committing.
    Skip,
    Back,
    Quit,
    Up,
    Down,
    NextField,
    PrevField,
    Input(char),
    Backspace,
    Newline,
    AddItem,
    DeleteItem,
    NewEntry,
    /// Leave a management view as-is.
    Continue,
}

/// Which key map applies right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Menu,
    Form,
    List,
    Manage,
    Confirm,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub const WELCOME_CHOICES: [&str; 2] = ["Start creating a resume", "Quit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Welcome { cursor: usize },
    Form(Form),
    Manage(Manager),
    Confirm,
    Finish,
}

enum Next {
    Stay,
    Advance,
    Retreat,
    Exit,
}

/// The interactive session: current step, its screen state and the record
/// being built.
pub struct Wizard {
    step: Step,
    screen: Screen,
    resume: Resume,
    error: Option<String>,
    output: OutputPaths,
    today: NaiveDate,
    saved: bool,
}

impl Wizard {
    pub fn new(resume: Resume, output: OutputPaths, today: NaiveDate) -> Self {
        Self {
            step: Step::Welcome,
            screen: Screen::Welcome { cursor: 0 },
            resume,
            error: None,
            output,
            today,
            saved: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn output(&self) -> &OutputPaths {
        &self.output
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn context(&self) -> KeyContext {
        match &self.screen {
            Screen::Welcome { .. } => KeyContext::Menu,
            Screen::Form(form) if form.is_editing_list() => KeyContext::List,
            Screen::Form(_) => KeyContext::Form,
            Screen::Manage(manager) if manager.editing().is_some() => KeyContext::Form,
            Screen::Manage(_) => KeyContext::Manage,
            Screen::Confirm => KeyContext::Confirm,
            Screen::Finish => KeyContext::Finish,
        }
    }

    pub fn handle(&mut self, action: Action) -> Flow {
        if action == Action::Quit {
            info!(step = ?self.step, "session cancelled");
            return Flow::Exit;
        }

        let next = match self.step {
            Step::Welcome => self.handle_welcome(action),
            Step::Experience => self.handle_collection(action, experience_of),
            Step::Projects => self.handle_collection(action, projects_of),
            Step::Confirm => self.handle_confirm(action),
            Step::Finish => Next::Exit,
            _ => self.handle_form(action),
        };

        match next {
            Next::Stay => {}
            Next::Advance => self.enter(self.step.transition(StepEvent::Advance)),
            Next::Retreat => self.enter(self.step.transition(StepEvent::Retreat)),
            Next::Exit => return Flow::Exit,
        }
        Flow::Continue
    }

    /// Rebuilds the screen for `step` from the record.
    fn enter(&mut self, step: Step) {
        self.step = step;
        self.error = None;
        self.screen = match step {
            Step::Welcome => Screen::Welcome { cursor: 0 },
            Step::PersonalInfo => Screen::Form(Form::new(steps::personal_info_fields(
                &self.resume.personal_info,
            ))),
            Step::Summary => Screen::Form(Form::new(steps::summary_fields(&self.resume.summary))),
            Step::Education => {
                Screen::Form(Form::new(steps::education_fields(self.resume.education.first())))
            }
            Step::Experience | Step::Projects => Screen::Manage(Manager::new()),
            Step::Skills => Screen::Form(Form::new(steps::skills_fields(
                &self.resume.skills,
                &self.resume.languages,
            ))),
            Step::CustomSections => Screen::Form(Form::new(steps::custom_section_fields())),
            Step::Confirm => Screen::Confirm,
            Step::Finish => Screen::Finish,
        };
        debug!(step = ?step, "entered step");
    }

    fn handle_welcome(&mut self, action: Action) -> Next {
        let Screen::Welcome { cursor } = &mut self.screen else {
            return Next::Stay;
        };
        match action {
            Action::Up => *cursor = cursor.saturating_sub(1),
            Action::Down => *cursor = (*cursor + 1).min(WELCOME_CHOICES.len() - 1),
            Action::Submit if *cursor == 0 => return Next::Advance,
            Action::Submit => return Next::Exit,
            _ => {}
        }
        Next::Stay
    }

    fn handle_form(&mut self, action: Action) -> Next {
        let Screen::Form(form) = &mut self.screen else {
            return Next::Stay;
        };

        if let Some(editor) = form.list_editor_mut() {
            match action {
                Action::Up => editor.select_prev(),
                Action::Down => editor.select_next(),
                Action::AddItem => editor.add_item(),
                Action::DeleteItem => editor.delete_item(),
                Action::Input(c) => editor.insert_char(c),
                Action::Backspace => editor.backspace(),
                Action::Submit => form.apply_list(),
                Action::Back => form.discard_list(),
                Action::NextField => {
                    form.apply_list();
                    form.next_field();
                }
                Action::PrevField => {
                    form.apply_list();
                    form.prev_field();
                }
                Action::Save => return self.commit_form(),
                Action::Skip => return Next::Advance,
                _ => {}
            }
            return Next::Stay;
        }

        match action {
            Action::Up | Action::PrevField => form.prev_field(),
            Action::Down | Action::NextField => form.next_field(),
            Action::Input(c) => form.insert_char(c),
            Action::Backspace => form.backspace(),
            Action::Newline => form.newline(),
            Action::Submit => {
                if !form.open_list() {
                    return self.commit_form();
                }
            }
            Action::Save => return self.commit_form(),
            Action::Skip => return Next::Advance,
            Action::Back => return Next::Retreat,
            _ => {}
        }
        Next::Stay
    }

    /// Validates the current form and writes it into the record.
    fn commit_form(&mut self) -> Next {
        let Screen::Form(form) = &mut self.screen else {
            return Next::Stay;
        };
        form.apply_list();

        if let Err(err) = form.validate() {
            debug!(step = ?self.step, %err, "validation failed");
            self.error = Some(err.to_string());
            return Next::Stay;
        }

        apply_step(self.step, form, &mut self.resume, self.today);
        info!(step = ?self.step, "step committed");
        Next::Advance
    }

    fn handle_collection<T: Entry>(
        &mut self,
        action: Action,
        items: fn(&mut Resume) -> &mut Vec<T>,
    ) -> Next {
        let Screen::Manage(manager) = &mut self.screen else {
            return Next::Stay;
        };
        let entries = items(&mut self.resume);

        if let Some(edit) = manager.editing_mut() {
            let form = &mut edit.form;
            match action {
                Action::Up | Action::PrevField => form.prev_field(),
                Action::Down | Action::NextField => form.next_field(),
                Action::Input(c) => form.insert_char(c),
                Action::Backspace => form.backspace(),
                Action::Newline => form.newline(),
                Action::Submit | Action::Save => match manager.save(entries, self.today) {
                    Ok(()) => self.error = None,
                    Err(err) => self.error = Some(err.to_string()),
                },
                Action::Back => {
                    manager.cancel_edit(entries.len());
                    self.error = None;
                }
                _ => {}
            }
            return Next::Stay;
        }

        match action {
            Action::Up => manager.select_prev(entries.len()),
            Action::Down => manager.select_next(entries.len()),
            Action::NewEntry => manager.begin_new::<T>(),
            Action::Submit => manager.begin_edit(entries),
            Action::DeleteItem => {
                manager.delete_selected(entries);
                debug!(kind = T::KIND, remaining = entries.len(), "entry deleted");
            }
            Action::Continue | Action::Skip | Action::Save => return Next::Advance,
            Action::Back => return Next::Retreat,
            _ => {}
        }
        Next::Stay
    }

    fn handle_confirm(&mut self, action: Action) -> Next {
        match action {
            Action::Submit | Action::Save => {
                self.save();
                Next::Stay
            }
            Action::Back => Next::Retreat,
            _ => Next::Stay,
        }
    }

    /// Hands the record to the renderer; failure keeps the session on `Confirm`.
    fn save(&mut self) {
        match document::save(&self.resume, &self.output) {
            Ok(()) => {
                info!(
                    yaml = %self.output.yaml.display(),
                    markdown = %self.output.markdown.display(),
                    "resume saved"
                );
                self.saved = true;
                self.enter(self.step.transition(StepEvent::Saved));
            }
            Err(err) => {
                warn!("save failed: {:#}", err);
                self.error = Some(format!("Save failed: {:#}", err));
            }
        }
    }
}

fn experience_of(resume: &mut Resume) -> &mut Vec<Experience> {
    &mut resume.experience
}

fn projects_of(resume: &mut Resume) -> &mut Vec<Project> {
    &mut resume.projects
}

fn apply_step(step: Step, form: &Form, resume: &mut Resume, today: NaiveDate) {
    match step {
        Step::PersonalInfo => resume.personal_info = steps::commit_personal_info(form),
        Step::Summary => resume.summary = steps::commit_summary(form),
        Step::Education => {
            let edu = steps::commit_education(form, resume.education.first(), today);
            match resume.education.first_mut() {
                Some(first) => *first = edu,
                None => resume.education.push(edu),
            }
        }
        Step::Skills => {
            let (skills, languages) = steps::commit_skills(form, &resume.skills);
            resume.skills = skills;
            resume.languages = languages;
        }
        Step::CustomSections => {
            if let Some(section) = steps::commit_custom_section(form) {
                resume.additional.push(section);
            }
        }
        Step::Welcome
        | Step::Experience
        | Step::Projects
        | Step::Confirm
        | Step::Finish => {}
    }
}
