use super::error::ValidationError;
use super::record::Record;
use super::validate::{check_date, check_rating, require};
use serde::{Deserialize, Serialize};

pub const ACTIVITY_RATING_MAX: u8 = 10;

/// A behavioral activation entry: plan an activity, then review how it went.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "Activity Date")]
    pub activity_date: String,
    #[serde(rename = "Activity Name")]
    pub activity_name: String,
    #[serde(rename = "Predicted Pleasure")]
    pub predicted_pleasure: u8,
    #[serde(rename = "Predicted Mastery")]
    pub predicted_mastery: u8,
    #[serde(rename = "Actual Pleasure")]
    pub actual_pleasure: u8,
    #[serde(rename = "Actual Mastery")]
    pub actual_mastery: u8,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl Activity {
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record.clone().into_value())
    }

    pub fn to_record(&self) -> Result<Record, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        Ok(Record::from_value(value).unwrap_or_default())
    }

    pub fn validate_plan(&self) -> Result<(), ValidationError> {
        check_date(&self.activity_date)?;
        require("Activity Name", &self.activity_name)?;
        check_rating("Predicted Pleasure", self.predicted_pleasure, ACTIVITY_RATING_MAX)?;
        check_rating("Predicted Mastery", self.predicted_mastery, ACTIVITY_RATING_MAX)
    }

    pub fn validate_review(&self) -> Result<(), ValidationError> {
        check_rating("Actual Pleasure", self.actual_pleasure, ACTIVITY_RATING_MAX)?;
        check_rating("Actual Mastery", self.actual_mastery, ACTIVITY_RATING_MAX)?;

        if self.actual_pleasure == 0 && self.actual_mastery == 0 && self.notes.trim().is_empty() {
            return Err(ValidationError::EmptyReview);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_plan()?;
        self.validate_review()
    }
}
