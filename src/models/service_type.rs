use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Sunday,  // sunday
    Midweek, // midweek
    Youth,   // youth
    Special, // special
}

impl ServiceType {
    /// Code stored in the DB and accepted by `--type`.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::Sunday => "sunday",
            ServiceType::Midweek => "midweek",
            ServiceType::Youth => "youth",
            ServiceType::Special => "special",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "sunday" => Some(ServiceType::Sunday),
            "midweek" => Some(ServiceType::Midweek),
            "youth" => Some(ServiceType::Youth),
            "special" => Some(ServiceType::Special),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        ServiceType::from_db_str(&code.trim().to_lowercase())
    }
}
