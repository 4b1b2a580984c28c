use crate::model::Resume;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_YAML_PATH: &str = "my_resume.yaml";
pub const DEFAULT_MARKDOWN_PATH: &str = "my_resume.md";

/// Where a finished session writes its two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub yaml: PathBuf,
    pub markdown: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            yaml: PathBuf::from(DEFAULT_YAML_PATH),
            markdown: PathBuf::from(DEFAULT_MARKDOWN_PATH),
        }
    }
}

pub fn load(path: &Path) -> Result<Resume> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let resume: Resume = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML in {}", path.display()))?;
    resume
        .validate()
        .with_context(|| format!("{} failed validation", path.display()))?;
    Ok(resume)
}

pub fn render_yaml(resume: &Resume) -> Result<String> {
    serde_yaml::to_string(resume).context("Failed to serialize resume to YAML")
}

/// Writes `contents` to `path`, creating parent directories first.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Renders both documents before writing either.
pub fn save(resume: &Resume, paths: &OutputPaths) -> Result<()> {
    let yaml = render_yaml(resume)?;
    let markdown = render_markdown(resume);
    write_file(&paths.yaml, yaml.as_bytes()).context("Failed to save YAML")?;
    write_file(&paths.markdown, markdown.as_bytes()).context("Failed to save Markdown")?;
    Ok(())
}

pub fn render_markdown(resume: &Resume) -> String {
    let mut out = String::new();
    let info = &resume.personal_info;

    let _ = write!(out, "<div align=\"center\">\n\n# {}\n\n", info.name);
    if !info.title.is_empty() {
        let _ = write!(out, "**{}**\n\n", info.title);
    }
    let contact: Vec<&str> = [
        &info.phone,
        &info.email,
        &info.location,
        &info.website,
        &info.github,
        &info.linkedin,
    ]
    .into_iter()
    .map(String::as_str)
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        let _ = write!(out, "{}\n\n", contact.join(" | "));
    }
    out.push_str("</div>\n\n");

    if !resume.summary.is_empty() {
        section_heading(&mut out, "Summary");
        let _ = write!(out, "{}\n\n", resume.summary);
    }

    if !resume.education.is_empty() {
        section_heading(&mut out, "Education");
        for edu in &resume.education {
            let _ = write!(out, "### {}", edu.degree);
            if !edu.major.is_empty() {
                let _ = write!(out, " in {}", edu.major);
            }
            let _ = write!(
                out,
                "\n\n{} | {} - {}",
                edu.institution,
                edu.start_display(),
                edu.end_display()
            );
            if !edu.location.is_empty() {
                let _ = write!(out, " | {}", edu.location);
            }
            out.push_str("\n\n");
            if !edu.gpa.is_empty() {
                let _ = writeln!(out, "- **GPA:** {}", edu.gpa);
            }
            if !edu.relevant_courses.is_empty() {
                let _ = writeln!(
                    out,
                    "- **Relevant Courses:** {}",
                    edu.relevant_courses.join(", ")
                );
            }
            if !edu.honors_awards.is_empty() {
                let _ = writeln!(out, "- **Honors & Awards:** {}", edu.honors_awards.join(", "));
            }
            if !edu.description.is_empty() {
                let _ = writeln!(out, "- {}", edu.description);
            }
            out.push('\n');
        }
    }

    if !resume.experience.is_empty() {
        section_heading(&mut out, "Experience");
        for exp in &resume.experience {
            let _ = write!(
                out,
                "### {} · {}\n\n*{} - {}*",
                exp.position,
                exp.company,
                exp.start_display(),
                exp.end_display()
            );
            if !exp.location.is_empty() {
                let _ = write!(out, " | {}", exp.location);
            }
            out.push_str("\n\n");
            for line in &exp.responsibilities {
                let _ = writeln!(out, "- {}", line);
            }
            for line in &exp.achievements {
                let _ = writeln!(out, "- **Achievement:** {}", line);
            }
            out.push('\n');
        }
    }

    if !resume.projects.is_empty() {
        section_heading(&mut out, "Projects");
        for project in &resume.projects {
            let _ = write!(
                out,
                "### {}\n\n*{} - {}*",
                project.name,
                project.start_display(),
                project.end_display()
            );
            if !project.location.is_empty() {
                let _ = write!(out, " | {}", project.location);
            }
            out.push_str("\n\n");
            if !project.description.is_empty() {
                let _ = write!(out, "{}\n\n", project.description);
            }
            if !project.technologies.is_empty() {
                let _ = writeln!(out, "- **Technologies:** {}", project.technologies.join(", "));
            }
            if !project.url.is_empty() {
                let _ = writeln!(out, "- **URL:** {}", project.url);
            }
            if !project.repository.is_empty() {
                let _ = writeln!(out, "- **Repository:** {}", project.repository);
            }
            for line in &project.details {
                let _ = writeln!(out, "- {}", line);
            }
            out.push('\n');
        }
    }

    let skills = &resume.skills;
    if !skills.is_empty() {
        section_heading(&mut out, "Skills");
        for (label, items) in [
            ("Languages", &skills.languages),
            ("Frameworks", &skills.frameworks),
            ("Databases", &skills.databases),
            ("Tools", &skills.tools),
            ("Other", &skills.other),
        ] {
            if !items.is_empty() {
                let _ = writeln!(out, "- **{}:** {}", label, items.join(", "));
            }
        }
        for category in &skills.custom {
            let _ = writeln!(out, "- **{}:** {}", category.name, category.items.join(", "));
        }
        out.push('\n');
    }

    if !resume.languages.is_empty() {
        section_heading(&mut out, "Languages");
        for language in &resume.languages {
            if language.level.is_empty() {
                let _ = writeln!(out, "- {}", language.name);
            } else {
                let _ = writeln!(out, "- **{}:** {}", language.name, language.level);
            }
        }
        out.push('\n');
    }

    for section in &resume.additional {
        section_heading(&mut out, &section.title);
        for item in &section.items {
            let _ = writeln!(out, "- {}", item);
        }
        out.push('\n');
    }

    out
}

/// Separates sections with a rule after the header block.
fn section_heading(out: &mut String, title: &str) {
    if !out.ends_with("</div>\n\n") {
        out.push_str("---\n\n");
    }
    let _ = write!(out, "## {}\n\n", title);
}
