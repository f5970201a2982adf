use super::error::ValidationError;
use super::record::Record;
use super::validate::{check_date, require};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProblemStatus {
    #[default]
    Open,
    #[serde(rename = "Partially Solved")]
    PartiallySolved,
    Solved,
    Abandoned,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ProblemStatus {
    pub const ALL: [ProblemStatus; 5] = [
        ProblemStatus::Open,
        ProblemStatus::PartiallySolved,
        ProblemStatus::Solved,
        ProblemStatus::Abandoned,
        ProblemStatus::NotApplicable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProblemStatus::Open => "Open",
            ProblemStatus::PartiallySolved => "Partially Solved",
            ProblemStatus::Solved => "Solved",
            ProblemStatus::Abandoned => "Abandoned",
            ProblemStatus::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProblemStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown problem status: {}", s))
    }
}

/// A problem-solving worksheet: define, brainstorm, choose, plan, review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Problem Description")]
    pub problem_description: String,
    #[serde(rename = "Brainstormed Solutions")]
    pub brainstormed_solutions: String,
    #[serde(rename = "Chosen Solution")]
    pub chosen_solution: String,
    #[serde(rename = "Action Plan")]
    pub action_plan: String,
    #[serde(rename = "Outcome/Review")]
    pub outcome: String,
    #[serde(rename = "Problem Status")]
    pub problem_status: ProblemStatus,
}

impl ProblemRecord {
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record.clone().into_value())
    }

    pub fn to_record(&self) -> Result<Record, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        Ok(Record::from_value(value).unwrap_or_default())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_date(&self.date)?;
        require("Problem Description", &self.problem_description)?;
        require("Brainstormed Solutions", &self.brainstormed_solutions)?;
        require("Chosen Solution", &self.chosen_solution)?;
        require("Action Plan", &self.action_plan)?;
        require("Outcome/Review", &self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ProblemStatus::PartiallySolved).unwrap(),
            json!("Partially Solved")
        );
        assert_eq!(serde_json::to_value(ProblemStatus::NotApplicable).unwrap(), json!("N/A"));
        let status: ProblemStatus = serde_json::from_value(json!("Abandoned")).unwrap();
        assert_eq!(status, ProblemStatus::Abandoned);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("partially solved".parse(), Ok(ProblemStatus::PartiallySolved));
        assert_eq!("n/a".parse(), Ok(ProblemStatus::NotApplicable));
        assert!("Pending".parse::<ProblemStatus>().is_err());
    }

    #[test]
    fn test_record_round_trip_keeps_status() {
        let problem = ProblemRecord {
            date: "2024-05-10".to_string(),
            problem_description: "Rent is going up".to_string(),
            brainstormed_solutions: "Move, negotiate, find a roommate".to_string(),
            chosen_solution: "Negotiate".to_string(),
            action_plan: "Email landlord on Monday".to_string(),
            outcome: "Landlord agreed to a smaller increase".to_string(),
            problem_status: ProblemStatus::PartiallySolved,
        };
        let record = problem.to_record().unwrap();
        assert_eq!(record.get_str("Problem Status"), Some("Partially Solved"));
        assert_eq!(record.get_str("Outcome/Review"), Some("Landlord agreed to a smaller increase"));
        assert_eq!(ProblemRecord::from_record(&record).unwrap(), problem);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_plan() {
        let problem = ProblemRecord {
            date: "2024-05-10".to_string(),
            problem_description: "Rent is going up".to_string(),
            brainstormed_solutions: "Move".to_string(),
            chosen_solution: "Move".to_string(),
            ..Default::default()
        };
        assert_eq!(
            problem.validate(),
            Err(ValidationError::MissingField("Action Plan"))
        );
    }
}
