pub mod resume;
pub mod timestamp;

pub use resume::{
    AwardEntry, CertificationEntry, ContactInfo, EducationEntry, LlmAnalysis, ProjectEntry,
    ResumeDetail, ResumeId, ResumeSummary, SkillItem, SkillSet, UpskillSuggestion,
    WorkExperienceEntry,
};
