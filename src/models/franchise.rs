use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(()),
        }
    }
}

/// Franchise application row. `message` carries the long-form questionnaire
/// answers as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct FranchiseApplication {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub investment_range: Option<String>,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Application form payload. The core identity fields are validated; the
/// rest of the questionnaire is folded into `message` verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseApplyRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub preferred_location: Option<String>,
    pub available_capital: Option<String>,
    pub id_number: Option<String>,
    pub birth_date: Option<String>,
    pub current_address: Option<String>,
    pub fb_experience: Option<String>,
    pub management_experience: Option<String>,
    pub current_occupation: Option<String>,
    pub space_size: Option<String>,
    pub expected_open_date: Option<String>,
    pub motivation: Option<String>,
}
