use super::error::ValidationError;
use super::record::Record;
use super::validate::{check_date, check_rating, require};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const THOUGHT_RATING_MAX: u8 = 100;

pub const EMOTION_OPTIONS: &[&str] = &[
    "Sad",
    "Anxious",
    "Angry",
    "Frustrated",
    "Guilty",
    "Ashamed",
    "Hopeless",
    "Scared",
    "Embarrassed",
    "Discouraged",
];

/// Emotion name to intensity (0-100).
pub type EmotionRatings = BTreeMap<String, u8>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThoughtRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Situation")]
    pub situation: String,
    #[serde(rename = "Initial Emotions")]
    pub initial_emotions: EmotionRatings,
    #[serde(rename = "Automatic Thoughts")]
    pub automatic_thoughts: String,
    #[serde(rename = "Belief in Automatic Thoughts")]
    pub belief_in_automatic_thoughts: u8,
    #[serde(rename = "Evidence For")]
    pub evidence_for: String,
    #[serde(rename = "Evidence Against")]
    pub evidence_against: String,
    #[serde(rename = "Alternative Thought")]
    pub alternative_thought: String,
    #[serde(rename = "Belief in Alternative Thought")]
    pub belief_in_alternative_thought: u8,
    #[serde(rename = "Final Emotions")]
    pub final_emotions: EmotionRatings,
}

impl ThoughtRecord {
    /// Missing fields fall back to their defaults.
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record.clone().into_value())
    }

    pub fn to_record(&self) -> Result<Record, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        Ok(Record::from_value(value).unwrap_or_default())
    }

    /// Strongest initial emotion, ties broken alphabetically.
    pub fn main_emotion(&self) -> Option<(&str, u8)> {
        self.initial_emotions
            .iter()
            .fold(None, |best: Option<(&str, u8)>, (name, &rating)| match best {
                Some((_, top)) if top >= rating => best,
                _ => Some((name.as_str(), rating)),
            })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_date(&self.date)?;
        require("Situation", &self.situation)?;

        if self.initial_emotions.is_empty() {
            return Err(ValidationError::NoEmotions);
        }
        for (emotion, &rating) in &self.initial_emotions {
            check_rating(emotion, rating, THOUGHT_RATING_MAX)?;
        }

        require("Automatic Thoughts", &self.automatic_thoughts)?;
        check_rating(
            "Belief in Automatic Thoughts",
            self.belief_in_automatic_thoughts,
            THOUGHT_RATING_MAX,
        )?;

        require("Alternative Thought", &self.alternative_thought)?;
        check_rating(
            "Belief in Alternative Thought",
            self.belief_in_alternative_thought,
            THOUGHT_RATING_MAX,
        )?;

        for emotion in self.initial_emotions.keys() {
            match self.final_emotions.get(emotion) {
                Some(&rating) => check_rating(emotion, rating, THOUGHT_RATING_MAX)?,
                None => return Err(ValidationError::MissingFinalRating(emotion.clone())),
            }
        }

        Ok(())
    }
}
