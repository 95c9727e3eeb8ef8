use serde::{Deserialize, Serialize};

/// The canonical resume record returned by `POST /generate`.
/// Built from a normalized model reply; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub languages: Vec<String>,
    pub social_media: Vec<String>,
    pub undefined: Vec<UndefinedSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    /// `Mon YYYY` or empty.
    pub start_date: String,
    /// `Mon YYYY` or empty.
    pub end_date: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub responsibilities: Vec<String>,
}

/// A resume section the model could not map onto any known field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UndefinedSection {
    pub section: String,
    pub body: Vec<String>,
}
