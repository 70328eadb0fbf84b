use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdditionalInfo {
    pub legal_status: &'static str,
    pub insurance_impact: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExplanationRecord {
    pub title: &'static str,
    pub description: &'static str,
    pub legal_reference: &'static str,
    pub consequences: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub additional: AdditionalInfo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationCategory {
    Moving,
    NonMoving,
    Criminal,
}

impl ViolationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ViolationCategory::Moving => "Moving Violation",
            ViolationCategory::NonMoving => "Non-Moving Violation",
            ViolationCategory::Criminal => "Criminal Offense",
        }
    }
}

impl fmt::Display for ViolationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCategoryError(String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown violation category: '{}'", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for ViolationCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moving" => Ok(ViolationCategory::Moving),
            "non-moving" | "nonmoving" => Ok(ViolationCategory::NonMoving),
            "criminal" => Ok(ViolationCategory::Criminal),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViolationSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ViolationCategory,
}

/// Shape returned to callers of `explain`; they branch on `success`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExplainResponse {
    Found {
        success: bool,
        data: &'static ExplanationRecord,
    },
    Failure {
        success: bool,
        error: &'static str,
    },
}

impl ExplainResponse {
    pub fn found(data: &'static ExplanationRecord) -> Self {
        ExplainResponse::Found { success: true, data }
    }

    pub fn failure(error: &'static str) -> Self {
        ExplainResponse::Failure { success: false, error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExplainResponse::Found { .. })
    }
}
