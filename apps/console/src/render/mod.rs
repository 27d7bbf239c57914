//! Render adapter. Maps a `ResumeDetail` onto an ordered list of section
//! descriptors the view can draw without touching the raw record.
//!
//! # Presence rules
//! - Identity: always
//! - AI Analysis: iff `llm_analysis` is present
//! - Education / Work Experience / Projects: iff the list is non-empty
//! - Skills: iff the skills object is present; each subsection iff non-empty
//! - Certifications / Awards: iff non-empty, drawn side by side as the final pair
//!
//! Missing scalars become `FieldValue::NotAvailable` instead of vanishing.

pub mod text;

use std::fmt;

use serde::Serialize;

use crate::models::{
    AwardEntry, CertificationEntry, ContactInfo, EducationEntry, LlmAnalysis, ProjectEntry,
    ResumeDetail, SkillItem, SkillSet, WorkExperienceEntry,
};

pub const NOT_AVAILABLE: &str = "N/A";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";
const STRONG_RATING: f64 = 7.0;

// ────────────────────────────────────────────────────────────────────────────
// Descriptor types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "text")]
pub enum FieldValue {
    Text(String),
    NotAvailable,
}

impl FieldValue {
    /// Blank strings count as missing.
    pub fn from_opt(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(text) if !text.is_empty() => FieldValue::Text(text.to_string()),
            _ => FieldValue::NotAvailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FieldValue::Text(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: FieldValue,
}

/// Drops blank parts before they are joined into a composite field.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn field(label: &'static str, value: Option<&str>) -> Field {
    Field {
        label,
        value: FieldValue::from_opt(value),
    }
}

/// A titled list inside an entry. Only built for non-empty lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledList {
    pub label: &'static str,
    pub items: Vec<String>,
}

fn push_list(lists: &mut Vec<LabeledList>, label: &'static str, items: &[String]) {
    if !items.is_empty() {
        lists.push(LabeledList {
            label,
            items: items.to_vec(),
        });
    }
}

/// One record inside a section: a heading, scalar rows, and sub-lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub heading: FieldValue,
    pub fields: Vec<Field>,
    pub lists: Vec<LabeledList>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTone {
    Strong,
    NeedsWork,
    Unrated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingView {
    pub score: FieldValue,
    /// 0–100, for a progress bar.
    pub percent: Option<u8>,
    pub tone: RatingTone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpskillView {
    pub skill: String,
    pub reason: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub rating: RatingView,
    pub feedback: FieldValue,
    pub lists: Vec<LabeledList>,
    pub upskill: Vec<UpskillView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum SectionBody {
    Identity(Entry),
    Analysis(AnalysisView),
    Entries(Vec<Entry>),
    Groups(Vec<LabeledList>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    FullWidth,
    SideBySide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Identity,
    AiAnalysis,
    Education,
    WorkExperience,
    Projects,
    Skills,
    Certifications,
    Awards,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 8] = [
        SectionKind::Identity,
        SectionKind::AiAnalysis,
        SectionKind::Education,
        SectionKind::WorkExperience,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Awards,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Identity => "Resume",
            SectionKind::AiAnalysis => "AI Analysis",
            SectionKind::Education => "Education",
            SectionKind::WorkExperience => "Work Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Skills => "Skills",
            SectionKind::Certifications => "Certifications",
            SectionKind::Awards => "Awards & Achievements",
        }
    }

    pub fn placement(self) -> Placement {
        match self {
            SectionKind::Certifications | SectionKind::Awards => Placement::SideBySide,
            _ => Placement::FullWidth,
        }
    }

    /// The presence predicate for this section.
    pub fn is_present(self, detail: &ResumeDetail) -> bool {
        match self {
            SectionKind::Identity => true,
            SectionKind::AiAnalysis => detail.llm_analysis.is_some(),
            SectionKind::Education => !detail.education.is_empty(),
            SectionKind::WorkExperience => !detail.work_experience.is_empty(),
            SectionKind::Projects => !detail.projects.is_empty(),
            SectionKind::Skills => detail.skills.is_some(),
            SectionKind::Certifications => !detail.certifications.is_empty(),
            SectionKind::Awards => !detail.awards.is_empty(),
        }
    }

    fn body(self, detail: &ResumeDetail) -> Option<SectionBody> {
        let body = match self {
            SectionKind::Identity => SectionBody::Identity(identity_entry(detail)),
            SectionKind::AiAnalysis => {
                SectionBody::Analysis(analysis_view(detail.llm_analysis.as_ref()?))
            }
            SectionKind::Education => {
                SectionBody::Entries(detail.education.iter().map(education_entry).collect())
            }
            SectionKind::WorkExperience => SectionBody::Entries(
                detail.work_experience.iter().map(experience_entry).collect(),
            ),
            SectionKind::Projects => {
                SectionBody::Entries(detail.projects.iter().map(project_entry).collect())
            }
            SectionKind::Skills => SectionBody::Groups(skill_groups(detail.skills.as_ref()?)),
            SectionKind::Certifications => SectionBody::Entries(
                detail.certifications.iter().map(certification_entry).collect(),
            ),
            SectionKind::Awards => {
                SectionBody::Entries(detail.awards.iter().map(award_entry).collect())
            }
        };
        Some(body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub placement: Placement,
    pub body: SectionBody,
}

// ────────────────────────────────────────────────────────────────────────────
// Adapter
// ────────────────────────────────────────────────────────────────────────────

/// Builds the ordered section list. Pure: reads `detail`, keeps no state.
pub fn render_detail(detail: &ResumeDetail) -> Vec<Section> {
    SectionKind::ORDER
        .iter()
        .copied()
        .filter(|kind| kind.is_present(detail))
        .filter_map(|kind| {
            kind.body(detail).map(|body| Section {
                kind,
                title: kind.title(),
                placement: kind.placement(),
                body,
            })
        })
        .collect()
}

fn identity_entry(detail: &ResumeDetail) -> Entry {
    let empty = ContactInfo::default();
    let contact = detail.contact_info.as_ref().unwrap_or(&empty);
    let uploaded = detail.uploaded_at.format(TIMESTAMP_FORMAT).to_string();

    Entry {
        heading: FieldValue::from_opt(contact.name.as_deref()),
        fields: vec![
            field("Email", contact.email.as_deref()),
            field("Phone", contact.phone.as_deref()),
            field("Address", contact.address.as_deref()),
            field("LinkedIn", contact.linkedin.as_deref()),
            field("GitHub", contact.github.as_deref()),
            field("Portfolio", contact.portfolio_url.as_deref()),
            field("Summary", detail.summary.as_deref()),
            field("Uploaded", Some(uploaded.as_str())),
            field("Filename", Some(detail.file_name.as_str())),
        ],
        lists: Vec::new(),
    }
}

fn rating_view(rating: Option<f64>) -> RatingView {
    match rating.filter(|r| r.is_finite()) {
        Some(r) => RatingView {
            score: FieldValue::Text(format!("{r}/10")),
            percent: Some((r * 10.0).round().clamp(0.0, 100.0) as u8),
            tone: if r >= STRONG_RATING {
                RatingTone::Strong
            } else {
                RatingTone::NeedsWork
            },
        },
        None => RatingView {
            score: FieldValue::NotAvailable,
            percent: None,
            tone: RatingTone::Unrated,
        },
    }
}

fn analysis_view(analysis: &LlmAnalysis) -> AnalysisView {
    let mut lists = Vec::new();
    push_list(&mut lists, "Strengths", &analysis.strength_areas);
    push_list(&mut lists, "Areas for Improvement", &analysis.improvement_areas);
    push_list(&mut lists, "Potential Roles", &analysis.potential_roles);
    push_list(&mut lists, "ATS Keywords", &analysis.suggested_keywords_for_ats);

    AnalysisView {
        rating: rating_view(analysis.resume_rating),
        feedback: FieldValue::from_opt(analysis.overall_feedback.as_deref()),
        lists,
        upskill: analysis
            .upskill_suggestions
            .iter()
            .map(|s| UpskillView {
                skill: s.skill.clone(),
                reason: s.reason.clone(),
                resources: s.resources.clone(),
            })
            .collect(),
    }
}

fn education_entry(edu: &EducationEntry) -> Entry {
    let degree = match (
        non_blank(edu.degree.as_deref()),
        non_blank(edu.major.as_deref()),
    ) {
        (Some(degree), Some(major)) => Some(format!("{degree} in {major}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    };

    let mut lists = Vec::new();
    push_list(&mut lists, "Relevant Coursework", &edu.relevant_coursework);

    Entry {
        heading: FieldValue::from_opt(edu.institution.as_deref()),
        fields: vec![
            field("Degree", degree.as_deref()),
            field("Location", edu.location.as_deref()),
            field("Start", edu.start_date.as_deref()),
            field("Graduation", edu.end_date.as_deref()),
            field("GPA", edu.gpa.as_deref()),
        ],
        lists,
    }
}

fn experience_entry(exp: &WorkExperienceEntry) -> Entry {
    let period = match (
        non_blank(exp.start_date.as_deref()),
        non_blank(exp.end_date.as_deref()),
    ) {
        (None, None) => None,
        (start, end) => Some(format!(
            "{} - {}",
            start.unwrap_or(NOT_AVAILABLE),
            end.unwrap_or("Present")
        )),
    };
    let duration = exp.duration_months.map(|months| format!("{months} months"));

    let mut lists = Vec::new();
    push_list(&mut lists, "Responsibilities", &exp.responsibilities);
    push_list(&mut lists, "Achievements", &exp.achievements);

    Entry {
        heading: FieldValue::from_opt(exp.company.as_deref()),
        fields: vec![
            field("Role", exp.role.as_deref()),
            field("Location", exp.location.as_deref()),
            field("Period", period.as_deref()),
            field("Duration", duration.as_deref()),
            field("Description", exp.description.as_deref()),
        ],
        lists,
    }
}

fn project_entry(project: &ProjectEntry) -> Entry {
    let mut lists = Vec::new();
    push_list(&mut lists, "Technologies", &project.technologies_used);

    Entry {
        heading: FieldValue::from_opt(project.name.as_deref()),
        fields: vec![
            field("Description", project.description.as_deref()),
            field("Link", project.link.as_deref()),
            field("Repository", project.repo_link.as_deref()),
        ],
        lists,
    }
}

fn certification_entry(cert: &CertificationEntry) -> Entry {
    Entry {
        heading: FieldValue::from_opt(cert.name.as_deref()),
        fields: vec![
            field("Issuer", cert.issuer.as_deref()),
            field("Issued", cert.issue_date.as_deref()),
            field("Expires", cert.expiration_date.as_deref()),
            field("Credential ID", cert.credential_id.as_deref()),
            field("Credential URL", cert.credential_url.as_deref()),
        ],
        lists: Vec::new(),
    }
}

fn award_entry(award: &AwardEntry) -> Entry {
    Entry {
        heading: FieldValue::from_opt(award.name.as_deref()),
        fields: vec![
            field("Issuer", award.issuer.as_deref()),
            field("Date", award.date.as_deref()),
            field("Description", award.description.as_deref()),
        ],
        lists: Vec::new(),
    }
}

fn skill_label(skill: &SkillItem) -> String {
    match skill.proficiency.as_deref().map(str::trim) {
        Some(level) if !level.is_empty() => format!("{} ({level})", skill.name),
        _ => skill.name.clone(),
    }
}

fn skill_groups(skills: &SkillSet) -> Vec<LabeledList> {
    let technical: Vec<String> = skills.technical.iter().map(skill_label).collect();
    let tools: Vec<String> = skills.tools.iter().map(skill_label).collect();

    let mut groups = Vec::new();
    push_list(&mut groups, "Technical", &technical);
    push_list(&mut groups, "Tools", &tools);
    push_list(&mut groups, "Languages", &skills.languages);
    push_list(&mut groups, "Soft Skills", &skills.soft);
    groups
}
