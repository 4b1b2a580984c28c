use crate::collection::{summary_lines, EditTarget, Manager};
use crate::document::OutputPaths;
use crate::form::Form;
use crate::model::Resume;
use crate::wizard::{KeyContext, Screen, Step, Wizard, WELCOME_CHOICES};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const CURSOR: &str = "➤ ";
const NO_CURSOR: &str = "  ";

/// Rendered body text plus the line that should stay on screen.
pub struct Body {
    pub lines: Vec<Line<'static>>,
    pub focus: usize,
}

pub fn ui(f: &mut Frame<'_>, wizard: &Wizard) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // progress
                Constraint::Min(3),    // step body
                Constraint::Length(1), // status bar
            ]
            .as_ref(),
        )
        .split(size);

    let step = wizard.step();
    let header = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Resume wizard"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(step.progress())
        .label(format!(
            "Step {}/{}: {}",
            step.index() + 1,
            Step::ALL.len(),
            step.title()
        ));
    f.render_widget(header, chunks[0]);

    let body = body(wizard);
    let visible = chunks[1].height.saturating_sub(2) as usize;
    let scroll = (body.focus + 1).saturating_sub(visible) as u16;
    let body_widget = Paragraph::new(body.lines)
        .block(Block::default().borders(Borders::ALL).title(body_title(wizard)))
        .scroll((scroll, 0));
    f.render_widget(body_widget, chunks[1]);

    f.render_widget(Paragraph::new(status_line(wizard)), chunks[2]);
}

fn body_title(wizard: &Wizard) -> String {
    match wizard.screen() {
        Screen::Manage(manager) => match manager.editing() {
            Some(edit) if edit.target == EditTarget::New => {
                format!("{}: new entry", wizard.step().title())
            }
            Some(_) => format!("{}: edit entry", wizard.step().title()),
            None => wizard.step().title().to_string(),
        },
        _ => wizard.step().title().to_string(),
    }
}

pub fn body(wizard: &Wizard) -> Body {
    match wizard.screen() {
        Screen::Welcome { cursor } => Body {
            lines: welcome_lines(*cursor),
            focus: 0,
        },
        Screen::Form(form) => form_body(form),
        Screen::Manage(manager) => match manager.editing() {
            Some(edit) => form_body(&edit.form),
            None => {
                let summaries = match wizard.step() {
                    Step::Projects => summary_lines(&wizard.resume().projects),
                    _ => summary_lines(&wizard.resume().experience),
                };
                manage_body(&summaries, manager)
            }
        },
        Screen::Confirm => Body {
            lines: confirm_lines(wizard.resume(), wizard.output()),
            focus: 0,
        },
        Screen::Finish => Body {
            lines: finish_lines(wizard.output()),
            focus: 0,
        },
    }
}

pub fn welcome_lines(cursor: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Build a resume step by step.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Answers are saved as YAML and Markdown at the end."),
        Line::from(""),
    ];
    for (idx, choice) in WELCOME_CHOICES.iter().enumerate() {
        lines.push(selectable(choice.to_string(), idx == cursor));
    }
    lines
}

pub fn form_body(form: &Form) -> Body {
    let mut lines = Vec::new();
    let mut focus = 0;

    for (idx, field) in form.fields().iter().enumerate() {
        let is_current = idx == form.current();
        if is_current {
            focus = lines.len();
        }

        let marker = if is_current { CURSOR } else { NO_CURSOR };
        let required = if field.required { "*" } else { "" };
        let label = Span::styled(
            format!("{}{}{}: ", marker, field.label, required),
            if is_current {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            },
        );

        if field.value.is_empty() {
            let hint = if field.is_list && is_current {
                format!("{} (Enter to edit list)", field.placeholder)
            } else {
                field.placeholder.to_string()
            };
            lines.push(Line::from(vec![
                label,
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ]));
        } else {
            let mut parts = field.value.split('\n');
            let first = parts.next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![label, Span::raw(first)]));
            for part in parts {
                lines.push(Line::from(format!("    {}", part)));
            }
        }

        if is_current {
            if let Some(editor) = form.list_editor() {
                for (item_idx, item) in editor.items().iter().enumerate() {
                    let selected = item_idx == editor.selected();
                    if selected {
                        focus = lines.len();
                    }
                    lines.push(selectable(format!("  - {}", item), selected));
                }
            }
        }
    }

    Body { lines, focus }
}

pub fn manage_body(summaries: &[String], manager: &Manager) -> Body {
    if summaries.is_empty() {
        return Body {
            lines: vec![
                Line::from(Span::styled(
                    "No entries yet.",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from("Press n or Enter to add one, Tab to move on."),
            ],
            focus: 0,
        };
    }

    let lines = summaries
        .iter()
        .enumerate()
        .map(|(idx, summary)| selectable(summary.clone(), idx == manager.selected()))
        .collect();
    Body {
        lines,
        focus: manager.selected(),
    }
}

pub fn confirm_lines(resume: &Resume, output: &OutputPaths) -> Vec<Line<'static>> {
    let info = &resume.personal_info;
    let mut summary = resume.summary.lines().next().unwrap_or_default().to_string();
    if resume.summary.lines().count() > 1 {
        summary.push_str(" ...");
    }

    let mut lines = vec![
        field_line("Name", &info.name),
        field_line("Email", &info.email),
        field_line("Summary", &summary),
        Line::from(""),
        count_line("Education", resume.education.len()),
        count_line("Experience", resume.experience.len()),
        count_line("Projects", resume.projects.len()),
        count_line("Spoken languages", resume.languages.len()),
        count_line("Custom sections", resume.additional.len()),
        Line::from(""),
    ];
    lines.push(Line::from(format!(
        "Press Enter to save to {} and {}.",
        output.yaml.display(),
        output.markdown.display()
    )));
    lines
}

pub fn finish_lines(output: &OutputPaths) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Your resume has been saved.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line("YAML", &output.yaml.display().to_string()),
        field_line("Markdown", &output.markdown.display().to_string()),
        Line::from(""),
        Line::from("Press any key to exit."),
    ]
}

pub fn status_line(wizard: &Wizard) -> Line<'static> {
    match wizard.error() {
        Some(err) => Line::from(vec![
            Span::styled(" Error: ", Style::default().fg(Color::Red)),
            Span::styled(err.to_string(), Style::default().fg(Color::Red)),
        ]),
        None => Line::from(vec![
            Span::raw(" "),
            Span::raw(hint(wizard.context())),
            Span::raw(" | Ctrl+C quit"),
        ]),
    }
}

pub fn hint(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Menu => "Up/Down move, Enter choose",
        KeyContext::Form => {
            "Up/Down field, Enter next/list, Ctrl+S save, PgDn skip, Ctrl+J newline, Esc back"
        }
        KeyContext::List => "Up/Down item, Ctrl+N add, Del remove, Enter apply, Esc discard",
        KeyContext::Manage => "Up/Down select, n new, Enter edit, Del delete, Tab continue, Esc back",
        KeyContext::Confirm => "Enter save, Esc back",
        KeyContext::Finish => "Any key exits",
    }
}

fn selectable(text: String, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("{}{}", CURSOR, text),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("{}{}", NO_CURSOR, text))
    }
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn count_line(label: &str, count: usize) -> Line<'static> {
    Line::from(format!("{}: {}", label, count))
}
