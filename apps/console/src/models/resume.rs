use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned resume identifier.
pub type ResumeId = i64;

/// One row of the history list returned by `GET /api/v1/resumes/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: ResumeId,
    pub file_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub uploaded_at: DateTime<Utc>,
}

/// The full analysed record returned by the upload and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDetail {
    pub id: ResumeId,
    pub file_name: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub uploaded_at: DateTime<Utc>,
    pub raw_text: Option<String>,
    pub summary: Option<String>,
    pub contact_info: Option<ContactInfo>,
    pub skills: Option<SkillSet>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub awards: Vec<AwardEntry>,
    pub llm_analysis: Option<LlmAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillItem {
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<SkillItem>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub tools: Vec<SkillItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies_used: Vec<String>,
    pub link: Option<String>,
    pub repo_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiration_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub major: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub relevant_coursework: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwardEntry {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpskillSuggestion {
    pub skill: String,
    pub reason: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Server-side assessment. `resume_rating` is on a 0–10 scale and may be null
/// when the model declined to score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmAnalysis {
    pub resume_rating: Option<f64>,
    pub overall_feedback: Option<String>,
    #[serde(default)]
    pub strength_areas: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub upskill_suggestions: Vec<UpskillSuggestion>,
    #[serde(default)]
    pub suggested_keywords_for_ats: Vec<String>,
    #[serde(default)]
    pub potential_roles: Vec<String>,
}
