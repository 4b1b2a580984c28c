use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Token accepted in end-date fields to mark an ongoing entry.
pub const CURRENT_TOKEN: &str = "current";

/// Label shown instead of an end date for ongoing entries.
pub const PRESENT: &str = "Present";

const YEAR_FORMAT: &str = "%Y";
const MONTH_YEAR_DISPLAY: &str = "%b %Y";
const MONTH_YEAR_INPUT: &str = "%Y-%m";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub personal_info: PersonalInfo,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(default)]
    pub education: Vec<Education>,

    #[serde(default)]
    pub experience: Vec<Experience>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub skills: Skills,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,

    /// Custom sections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub website: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub github: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub major: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    /// Holds the day `current` was entered for ongoing entries; only the flag drives display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub current: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gpa: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relevant_courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub honors_awards: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub databases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Spoken language with a free-form proficiency (native, fluent, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
            && self.frameworks.is_empty()
            && self.databases.is_empty()
            && self.tools.is_empty()
            && self.other.is_empty()
            && self.custom.is_empty()
    }
}

impl Education {
    pub fn start_display(&self) -> String {
        self.start_date.format(YEAR_FORMAT).to_string()
    }

    pub fn end_display(&self) -> String {
        end_display(self.current, self.end_date, YEAR_FORMAT)
    }

    /// End value as typed back into the form.
    pub fn end_input(&self) -> String {
        end_input(self.current, self.end_date, year_input)
    }
}

impl Experience {
    pub fn start_display(&self) -> String {
        self.start_date.format(MONTH_YEAR_DISPLAY).to_string()
    }

    pub fn end_display(&self) -> String {
        end_display(self.current, self.end_date, MONTH_YEAR_DISPLAY)
    }

    pub fn end_input(&self) -> String {
        end_input(self.current, self.end_date, month_year_input)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} @ {} ({} - {})",
            self.position,
            self.company,
            self.start_display(),
            self.end_display()
        )
    }
}

impl Project {
    pub fn start_display(&self) -> String {
        self.start_date.format(MONTH_YEAR_DISPLAY).to_string()
    }

    pub fn end_display(&self) -> String {
        end_display(self.current, self.end_date, MONTH_YEAR_DISPLAY)
    }

    pub fn end_input(&self) -> String {
        end_input(self.current, self.end_date, month_year_input)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} ({} - {})",
            self.name,
            self.start_display(),
            self.end_display()
        )
    }
}

fn end_display(current: bool, end: Option<NaiveDate>, format: &str) -> String {
    if current {
        return PRESENT.to_string();
    }
    end.map(|d| d.format(format).to_string()).unwrap_or_default()
}

fn end_input(current: bool, end: Option<NaiveDate>, input: fn(NaiveDate) -> String) -> String {
    if current {
        return CURRENT_TOKEN.to_string();
    }
    end.map(input).unwrap_or_default()
}

// ------------------ date tokens ------------------

/// Parses a year-only token into the given month of that year.
pub fn parse_year(input: &str, month: u32) -> Option<NaiveDate> {
    let year: i32 = input.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Parses a `YYYY-MM` token into the first day of that month.
pub fn parse_month_year(input: &str) -> Option<NaiveDate> {
    let (year, month) = input.trim().split_once('-')?;
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn month_year_input(date: NaiveDate) -> String {
    date.format(MONTH_YEAR_INPUT).to_string()
}

pub fn year_input(date: NaiveDate) -> String {
    date.year().to_string()
}

pub fn is_current_token(input: &str) -> bool {
    input.trim() == CURRENT_TOKEN
}

// ------------------ document checks ------------------

impl Resume {
    /// Checks a loaded document for entries missing their key fields.
    pub fn validate(&self) -> Result<()> {
        for (i, edu) in self.education.iter().enumerate() {
            if edu.institution.trim().is_empty() {
                return Err(anyhow!("Education entry {} has an empty institution.", i));
            }
            if edu.degree.trim().is_empty() {
                return Err(anyhow!(
                    "Education entry '{}' has an empty degree.",
                    edu.institution
                ));
            }
        }

        for (i, exp) in self.experience.iter().enumerate() {
            if exp.company.trim().is_empty() {
                return Err(anyhow!("Experience entry {} has an empty company.", i));
            }
            if exp.position.trim().is_empty() {
                return Err(anyhow!(
                    "Experience entry '{}' has an empty position.",
                    exp.company
                ));
            }
        }

        for (i, project) in self.projects.iter().enumerate() {
            if project.name.trim().is_empty() {
                return Err(anyhow!("Project entry {} has an empty name.", i));
            }
        }

        for category in &self.skills.custom {
            if category.name.trim().is_empty() {
                return Err(anyhow!("A custom skill category has an empty name."));
            }
        }

        for (i, section) in self.additional.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(anyhow!("Additional section {} has an empty title.", i));
            }
        }

        Ok(())
    }
}
