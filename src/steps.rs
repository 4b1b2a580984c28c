//! Per-step field schemas and the mapping from a validated form back into the
//! résumé record.
//!
//! Every `*_fields` function pre-fills from the record so a step can be
//! revisited without losing data. Every `commit_*` function assumes the form
//! already passed [`Form::validate`].

use crate::form::{FieldFormat, Form, FormField};
use crate::list_edit::parse_list;
use crate::model::{
    is_current_token, month_year_input, parse_month_year, parse_year, year_input, Education,
    Experience, Language, PersonalInfo, Project, Section, Skills,
};
use chrono::NaiveDate;

// Education years map to the usual academic calendar.
const ACADEMIC_START_MONTH: u32 = 9;
const ACADEMIC_END_MONTH: u32 = 5;

// ------------------ personal info ------------------

pub fn personal_info_fields(info: &PersonalInfo) -> Vec<FormField> {
    vec![
        FormField::new("Name")
            .required()
            .placeholder("e.g. Jane Doe")
            .value(&info.name),
        FormField::new("Title")
            .placeholder("e.g. Backend Engineer (optional)")
            .value(&info.title),
        FormField::new("Email")
            .required()
            .placeholder("e.g. jane@example.com")
            .value(&info.email),
        FormField::new("Phone")
            .required()
            .placeholder("e.g. +1 555 0100")
            .value(&info.phone),
        FormField::new("Location")
            .required()
            .placeholder("e.g. Lisbon, Portugal")
            .value(&info.location),
        FormField::new("Website")
            .placeholder("e.g. janedoe.dev (optional)")
            .value(&info.website),
        FormField::new("GitHub")
            .placeholder("e.g. github.com/janedoe (optional)")
            .value(&info.github),
        FormField::new("LinkedIn")
            .placeholder("e.g. linkedin.com/in/janedoe (optional)")
            .value(&info.linkedin),
    ]
}

pub fn commit_personal_info(form: &Form) -> PersonalInfo {
    PersonalInfo {
        name: form.value(0).to_string(),
        title: form.value(1).to_string(),
        email: form.value(2).to_string(),
        phone: form.value(3).to_string(),
        location: form.value(4).to_string(),
        website: form.value(5).to_string(),
        github: form.value(6).to_string(),
        linkedin: form.value(7).to_string(),
    }
}

// ------------------ summary ------------------

pub fn summary_fields(summary: &str) -> Vec<FormField> {
    vec![FormField::new("Summary")
        .required()
        .multiline()
        .placeholder("e.g. Full-stack engineer with 3 years of experience in React and Node.js")
        .value(summary)]
}

pub fn commit_summary(form: &Form) -> String {
    form.value(0).to_string()
}

// ------------------ education ------------------

pub fn education_fields(existing: Option<&Education>) -> Vec<FormField> {
    let mut fields = vec![
        FormField::new("Institution")
            .required()
            .placeholder("e.g. University of Porto"),
        FormField::new("Degree")
            .required()
            .placeholder("e.g. BSc Computer Science"),
        FormField::new("Major").placeholder("e.g. Software Engineering (optional)"),
        FormField::new("Location").required().placeholder("e.g. Porto"),
        FormField::new("Start year")
            .required()
            .format(FieldFormat::Year)
            .placeholder("e.g. 2020"),
        FormField::new("End year")
            .required()
            .format(FieldFormat::Year)
            .placeholder("e.g. 2024 or current"),
        FormField::new("GPA").placeholder("e.g. 3.8/4.0 (optional)"),
        FormField::new("Relevant courses")
            .list()
            .placeholder("Enter to edit list"),
    ];

    if let Some(edu) = existing {
        let values = [
            edu.institution.clone(),
            edu.degree.clone(),
            edu.major.clone(),
            edu.location.clone(),
            year_input(edu.start_date),
            edu.end_input(),
            edu.gpa.clone(),
            edu.relevant_courses.join(", "),
        ];
        for (field, value) in fields.iter_mut().zip(values) {
            field.value = value;
        }
    }

    fields
}

/// Fields the form does not show (honors, description) carry over from `existing`.
pub fn commit_education(form: &Form, existing: Option<&Education>, today: NaiveDate) -> Education {
    let start_date = if is_current_token(form.value(4)) {
        today
    } else {
        parse_year(form.value(4), ACADEMIC_START_MONTH).unwrap_or(today)
    };
    let (end_date, current) = resolve_end(form.value(5), today, |v| {
        parse_year(v, ACADEMIC_END_MONTH)
    });

    Education {
        institution: form.value(0).to_string(),
        degree: form.value(1).to_string(),
        major: form.value(2).to_string(),
        location: form.value(3).to_string(),
        start_date,
        end_date,
        current,
        gpa: form.value(6).to_string(),
        relevant_courses: parse_list(form.value(7)),
        honors_awards: existing.map(|e| e.honors_awards.clone()).unwrap_or_default(),
        description: existing.map(|e| e.description.clone()).unwrap_or_default(),
    }
}

// ------------------ experience / projects ------------------

pub fn experience_fields(existing: Option<&Experience>) -> Vec<FormField> {
    let mut fields = vec![
        FormField::new("Company")
            .required()
            .placeholder("e.g. Initech"),
        FormField::new("Position")
            .required()
            .placeholder("e.g. Senior Software Engineer"),
        FormField::new("Location").required().placeholder("e.g. Remote"),
        FormField::new("Start (YYYY-MM)")
            .required()
            .format(FieldFormat::MonthYear)
            .placeholder("e.g. 2022-06"),
        FormField::new("End (YYYY-MM)")
            .required()
            .format(FieldFormat::MonthYear)
            .placeholder("e.g. 2024-08 or current"),
        FormField::new("Responsibilities")
            .required()
            .multiline()
            .placeholder("One per line, e.g. Built the billing service"),
    ];

    if let Some(exp) = existing {
        let values = [
            exp.company.clone(),
            exp.position.clone(),
            exp.location.clone(),
            month_year_input(exp.start_date),
            exp.end_input(),
            exp.responsibilities.join("\n"),
        ];
        for (field, value) in fields.iter_mut().zip(values) {
            field.value = value;
        }
    }

    fields
}

/// Achievements are not on the form and carry over from `existing`.
pub fn commit_experience(
    form: &Form,
    existing: Option<&Experience>,
    today: NaiveDate,
) -> Experience {
    let (end_date, current) = resolve_end(form.value(4), today, parse_month_year);
    Experience {
        company: form.value(0).to_string(),
        position: form.value(1).to_string(),
        location: form.value(2).to_string(),
        start_date: resolve_start(form.value(3), today),
        end_date,
        current,
        responsibilities: split_lines(form.value(5)),
        achievements: existing.map(|e| e.achievements.clone()).unwrap_or_default(),
    }
}

pub fn project_fields(existing: Option<&Project>) -> Vec<FormField> {
    let mut fields = vec![
        FormField::new("Project name")
            .required()
            .placeholder("e.g. Online learning platform"),
        FormField::new("Description")
            .required()
            .placeholder("e.g. Course platform built with React and Node.js"),
        FormField::new("Location").placeholder("e.g. Berlin (optional)"),
        FormField::new("Start (YYYY-MM)")
            .required()
            .format(FieldFormat::MonthYear)
            .placeholder("e.g. 2023-01"),
        FormField::new("End (YYYY-MM)")
            .required()
            .format(FieldFormat::MonthYear)
            .placeholder("e.g. 2023-06 or current"),
        FormField::new("Details")
            .required()
            .multiline()
            .placeholder("One per line, e.g. Designed the REST API"),
    ];

    if let Some(project) = existing {
        let values = [
            project.name.clone(),
            project.description.clone(),
            project.location.clone(),
            month_year_input(project.start_date),
            project.end_input(),
            project.details.join("\n"),
        ];
        for (field, value) in fields.iter_mut().zip(values) {
            field.value = value;
        }
    }

    fields
}

/// Technologies and links are not on the form and carry over from `existing`.
pub fn commit_project(form: &Form, existing: Option<&Project>, today: NaiveDate) -> Project {
    let (end_date, current) = resolve_end(form.value(4), today, parse_month_year);
    Project {
        name: form.value(0).to_string(),
        description: form.value(1).to_string(),
        location: form.value(2).to_string(),
        start_date: resolve_start(form.value(3), today),
        end_date,
        current,
        technologies: existing.map(|p| p.technologies.clone()).unwrap_or_default(),
        url: existing.map(|p| p.url.clone()).unwrap_or_default(),
        repository: existing.map(|p| p.repository.clone()).unwrap_or_default(),
        details: split_lines(form.value(5)),
    }
}

fn resolve_start(value: &str, today: NaiveDate) -> NaiveDate {
    if is_current_token(value) {
        return today;
    }
    parse_month_year(value).unwrap_or(today)
}

/// `current` pins the end date to today and raises the flag.
fn resolve_end(
    value: &str,
    today: NaiveDate,
    parse: impl Fn(&str) -> Option<NaiveDate>,
) -> (Option<NaiveDate>, bool) {
    if is_current_token(value) {
        (Some(today), true)
    } else {
        (parse(value), false)
    }
}

/// Splits multi-line text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

// ------------------ skills ------------------

pub fn skills_fields(skills: &Skills, languages: &[Language]) -> Vec<FormField> {
    let spoken: Vec<String> = languages.iter().map(language_item).collect();
    vec![
        FormField::new("Programming languages")
            .list()
            .placeholder("e.g. Rust, Go, TypeScript")
            .value(skills.languages.join(", ")),
        FormField::new("Frameworks / libraries")
            .list()
            .placeholder("e.g. React, Axum, Django")
            .value(skills.frameworks.join(", ")),
        FormField::new("Databases")
            .list()
            .placeholder("e.g. PostgreSQL, Redis")
            .value(skills.databases.join(", ")),
        FormField::new("Tools")
            .list()
            .placeholder("e.g. Git, Docker, Terraform")
            .value(skills.tools.join(", ")),
        FormField::new("Other")
            .list()
            .placeholder("e.g. Linux, AWS")
            .value(skills.other.join(", ")),
        FormField::new("Spoken languages")
            .list()
            .placeholder("e.g. English: native, German: fluent")
            .value(spoken.join(", ")),
    ]
}

/// Custom skill categories are not on the form and carry over from `existing`.
pub fn commit_skills(form: &Form, existing: &Skills) -> (Skills, Vec<Language>) {
    let skills = Skills {
        languages: parse_list(form.value(0)),
        frameworks: parse_list(form.value(1)),
        databases: parse_list(form.value(2)),
        tools: parse_list(form.value(3)),
        other: parse_list(form.value(4)),
        custom: existing.custom.clone(),
    };
    let languages = parse_list(form.value(5))
        .iter()
        .map(|item| parse_language(item))
        .collect();
    (skills, languages)
}

fn language_item(language: &Language) -> String {
    if language.level.is_empty() {
        language.name.clone()
    } else {
        format!("{}: {}", language.name, language.level)
    }
}

fn parse_language(item: &str) -> Language {
    match item.split_once(':') {
        Some((name, level)) => Language {
            name: name.trim().to_string(),
            level: level.trim().to_string(),
        },
        None => Language {
            name: item.trim().to_string(),
            level: String::new(),
        },
    }
}

// ------------------ custom sections ------------------

/// Always blank: custom sections are append-only.
pub fn custom_section_fields() -> Vec<FormField> {
    vec![
        FormField::new("Section title")
            .placeholder("e.g. Certifications, Awards, Volunteering (leave blank to skip)"),
        FormField::new("Items")
            .list()
            .placeholder("Enter to edit list"),
    ]
}

/// `None` unless both the title and at least one item are present.
pub fn commit_custom_section(form: &Form) -> Option<Section> {
    let title = form.value(0);
    let items = parse_list(form.value(1));
    if title.is_empty() || items.is_empty() {
        return None;
    }
    Some(Section {
        title: title.to_string(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn filled(fields: Vec<FormField>, values: &[&str]) -> Form {
        let fields = fields
            .into_iter()
            .zip(values)
            .map(|(field, value)| field.value(*value))
            .collect();
        Form::new(fields)
    }

    #[test]
    fn personal_info_round_trips_through_its_form() {
        let info = PersonalInfo {
            name: "Alice".into(),
            email: "a@x.com".into(),
            phone: "555".into(),
            location: "City".into(),
            github: "github.com/alice".into(),
            ..PersonalInfo::default()
        };
        let form = Form::new(personal_info_fields(&info));
        assert_eq!(commit_personal_info(&form), info);
    }

    #[test]
    fn current_end_date_is_pinned_to_today() {
        let form = filled(
            experience_fields(None),
            &["Acme", "Dev", "Remote", "2022-06", "current", "a\n\n  b  \n"],
        );
        let exp = commit_experience(&form, None, today());
        assert!(exp.current);
        assert_eq!(exp.end_date, Some(today()));
        assert_eq!(exp.start_date, NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
        assert_eq!(exp.responsibilities, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn experience_edit_keeps_achievements() {
        let form = filled(
            experience_fields(None),
            &["Acme", "Dev", "Remote", "2022-06", "2023-01", "Did work"],
        );
        let mut existing = commit_experience(&form, None, today());
        existing.achievements = vec!["Employee of the month".into()];

        let reopened = Form::new(experience_fields(Some(&existing)));
        assert_eq!(reopened.value(3), "2022-06");
        assert_eq!(reopened.value(4), "2023-01");

        let edited = commit_experience(&reopened, Some(&existing), today());
        assert_eq!(edited, existing);
    }

    #[test]
    fn project_edit_keeps_links() {
        let form = filled(
            project_fields(None),
            &["Site", "Static site", "", "2023-01", "current", "Wrote it"],
        );
        let mut existing = commit_project(&form, None, today());
        existing.url = "https://example.com".into();

        let reopened = Form::new(project_fields(Some(&existing)));
        assert_eq!(reopened.value(4), "current");
        let edited = commit_project(&reopened, Some(&existing), today());
        assert_eq!(edited.url, "https://example.com");
        assert!(edited.current);
    }

    #[test]
    fn education_years_use_academic_months() {
        let form = filled(
            education_fields(None),
            &["MIT", "BSc", "", "Cambridge", "2016", "2020", "", "Algorithms,,OS"],
        );
        let edu = commit_education(&form, None, today());
        assert_eq!(edu.start_date, NaiveDate::from_ymd_opt(2016, 9, 1).unwrap());
        assert_eq!(edu.end_date, NaiveDate::from_ymd_opt(2020, 5, 1));
        assert!(!edu.current);
        assert_eq!(edu.relevant_courses, vec!["Algorithms".to_string(), "OS".to_string()]);
    }

    #[test]
    fn skills_parse_lists_and_spoken_languages() {
        let existing = Skills::default();
        let form = filled(
            skills_fields(&existing, &[]),
            &["Go,  Rust ,,C++", "", "", "", "", "English: native, Latin"],
        );
        let (skills, languages) = commit_skills(&form, &existing);
        assert_eq!(skills.languages, vec!["Go", "Rust", "C++"]);
        assert!(skills.frameworks.is_empty());
        assert_eq!(
            languages,
            vec![
                Language {
                    name: "English".into(),
                    level: "native".into()
                },
                Language {
                    name: "Latin".into(),
                    level: String::new()
                },
            ]
        );

        let reopened = skills_fields(&skills, &languages);
        assert_eq!(reopened[5].value, "English: native, Latin");
    }

    #[test]
    fn custom_section_needs_title_and_items() {
        let blank = Form::new(custom_section_fields());
        assert_eq!(commit_custom_section(&blank), None);

        let no_items = filled(custom_section_fields(), &["Awards", " , "]);
        assert_eq!(commit_custom_section(&no_items), None);

        let full = filled(custom_section_fields(), &["Awards", "Hackathon winner"]);
        assert_eq!(
            commit_custom_section(&full),
            Some(Section {
                title: "Awards".into(),
                items: vec!["Hackathon winner".into()],
            })
        );
    }
}
