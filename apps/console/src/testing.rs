//! Fixtures shared by the unit tests.

use serde_json::{json, Value};

use crate::models::{ResumeDetail, ResumeId, ResumeSummary};

pub(crate) fn summary_json(id: ResumeId, file_name: &str) -> Value {
    json!({
        "id": id,
        "file_name": file_name,
        "name": "Jane Doe",
        "email": "jane@example.com",
        "uploaded_at": "2024-06-01T12:00:00"
    })
}

pub(crate) fn summary(id: ResumeId, file_name: &str) -> ResumeSummary {
    serde_json::from_value(summary_json(id, file_name)).unwrap()
}

/// A fully populated record in the shape the analysis backend emits.
pub(crate) fn detail_json(id: ResumeId) -> Value {
    json!({
        "id": id,
        "file_name": format!("resume-{id}.pdf"),
        "uploaded_at": "2024-06-01T12:00:00.000123",
        "raw_text": "Jane Doe\nSenior Engineer",
        "summary": "Backend engineer focused on distributed systems.",
        "contact_info": {
            "name": "Jane Doe",
            "email": "jane@example.com",
            "address": null,
            "phone": null,
            "linkedin": "https://linkedin.com/in/janedoe",
            "github": "https://github.com/janedoe",
            "portfolio_url": null
        },
        "skills": {
            "technical": [{"name": "Rust", "proficiency": "Expert"}, {"name": "SQL", "proficiency": null}],
            "soft": ["Mentoring"],
            "languages": [],
            "tools": [{"name": "Docker", "proficiency": null}]
        },
        "work_experience": [
            {
                "company": "Acme",
                "role": "Staff Engineer",
                "location": "Berlin",
                "start_date": "2021-01",
                "end_date": null,
                "duration_months": 40,
                "responsibilities": ["Owned the ingestion pipeline"],
                "achievements": ["Cut p99 latency by 40%"]
            },
            {
                "company": "Initech",
                "role": "Engineer",
                "location": null,
                "start_date": null,
                "end_date": null,
                "duration_months": null,
                "responsibilities": []
            }
        ],
        "projects": [
            {
                "name": "tinykv",
                "description": "Embedded key-value store",
                "technologies_used": ["Rust", "io_uring"],
                "link": null,
                "repo_link": "https://github.com/janedoe/tinykv"
            }
        ],
        "certifications": [
            {"name": "CKA", "issuer": "CNCF", "issue_date": "2023-02", "expiration_date": null, "credential_id": null, "credential_url": null}
        ],
        "education": [
            {
                "institution": "TU Munich",
                "degree": "MSc",
                "major": "Computer Science",
                "start_date": "2014",
                "end_date": "2016",
                "gpa": "1.3",
                "location": "Munich",
                "relevant_coursework": ["Distributed Systems", "Compilers"]
            }
        ],
        "awards": [],
        "llm_analysis": {
            "resume_rating": 7.5,
            "overall_feedback": "Strong technical depth, light on leadership.",
            "strength_areas": ["Systems programming"],
            "improvement_areas": ["Quantify team impact"],
            "upskill_suggestions": [
                {"skill": "Kubernetes", "reason": "Common in target roles", "resources": ["CKAD course"]}
            ],
            "suggested_keywords_for_ats": ["Rust", "Distributed Systems"],
            "potential_roles": ["Staff Engineer", "Platform Engineer"]
        }
    })
}

pub(crate) fn detail(id: ResumeId) -> ResumeDetail {
    serde_json::from_value(detail_json(id)).unwrap()
}

/// The smallest record the backend can return: identity only.
pub(crate) fn bare_detail(id: ResumeId) -> ResumeDetail {
    serde_json::from_value(json!({
        "id": id,
        "file_name": "bare.pdf",
        "uploaded_at": "2024-06-01T12:00:00Z",
        "raw_text": "text",
        "contact_info": null,
        "skills": null,
        "llm_analysis": null
    }))
    .unwrap()
}
