use super::activity::Activity;
use super::collection::CollectionKind;
use super::problem::{ProblemRecord, ProblemStatus};
use super::record::Record;
use super::thought_record::ThoughtRecord;
use super::validate::DATE_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use std::collections::BTreeMap;

const MISSING: &str = "N/A";

/// Orders by the user-entered date, then by creation time.
pub fn sort_for_display(kind: CollectionKind, records: &mut [Record]) {
    let field = kind.date_field();
    records.sort_by(|a, b| {
        let a_date = a.get_str(field).unwrap_or_default();
        let b_date = b.get_str(field).unwrap_or_default();
        a_date.cmp(b_date).then_with(|| {
            a.identity()
                .unwrap_or_default()
                .cmp(b.identity().unwrap_or_default())
        })
    });
}

/// Normalizes stored dates (plain dates or full timestamps) to `YYYY-MM-DD`.
pub fn display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return MISSING.to_string();
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return date.format(DATE_FORMAT).to_string();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime.date().format(DATE_FORMAT).to_string();
    }
    raw.to_string()
}

pub fn headers(kind: CollectionKind) -> &'static [&'static str] {
    match kind {
        CollectionKind::ThoughtRecords => &[
            "Date",
            "Situation",
            "Emotion",
            "Automatic Thought",
            "Alternative Thought",
        ],
        CollectionKind::BehavioralActivation => {
            &["Date", "Activity", "P-P", "A-P", "P-M", "A-M", "Notes"]
        }
        CollectionKind::ProblemSolving => {
            &["Date", "Problem Description", "Chosen Solution", "Status"]
        }
    }
}

/// One table row per record, matching `headers(kind)`.
pub fn summary_row(kind: CollectionKind, record: &Record) -> Vec<String> {
    let text = |field: &str| record.get_str(field).unwrap_or(MISSING).to_string();
    let rating = |field: &str| {
        record
            .get_i64(field)
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING.to_string())
    };
    let date = display_date(record.get_str(kind.date_field()));

    match kind {
        CollectionKind::ThoughtRecords => {
            let emotion = ThoughtRecord::from_record(record)
                .ok()
                .and_then(|thought| {
                    thought
                        .main_emotion()
                        .map(|(name, value)| format!("{} {}%", name, value))
                })
                .unwrap_or_else(|| MISSING.to_string());
            vec![
                date,
                text("Situation"),
                emotion,
                text("Automatic Thoughts"),
                text("Alternative Thought"),
            ]
        }
        CollectionKind::BehavioralActivation => vec![
            date,
            text("Activity Name"),
            rating("Predicted Pleasure"),
            rating("Actual Pleasure"),
            rating("Predicted Mastery"),
            rating("Actual Mastery"),
            text("Notes"),
        ],
        CollectionKind::ProblemSolving => vec![
            date,
            text("Problem Description"),
            text("Chosen Solution"),
            text("Problem Status"),
        ],
    }
}

/// Converts raw records into a typed view, skipping the ones that do not fit.
pub fn typed<T>(records: &[Record], parse: fn(&Record) -> Result<T, serde_json::Error>) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| match parse(record) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    "Skipping record {}: {}",
                    record.identity().unwrap_or("<no identity>"),
                    e
                );
                None
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPoint {
    pub date: String,
    pub name: String,
    pub predicted_pleasure: u8,
    pub actual_pleasure: u8,
    pub predicted_mastery: u8,
    pub actual_mastery: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTrends {
    /// Ordered by activity date.
    pub points: Vec<ActivityPoint>,
    pub avg_predicted_pleasure: f64,
    pub avg_actual_pleasure: f64,
    pub avg_predicted_mastery: f64,
    pub avg_actual_mastery: f64,
}

impl ActivityTrends {
    pub fn pleasure_gap(&self) -> f64 {
        self.avg_actual_pleasure - self.avg_predicted_pleasure
    }

    pub fn mastery_gap(&self) -> f64 {
        self.avg_actual_mastery - self.avg_predicted_mastery
    }
}

pub fn activity_trends(activities: &[Activity]) -> Option<ActivityTrends> {
    if activities.is_empty() {
        return None;
    }

    let mut points: Vec<ActivityPoint> = activities
        .iter()
        .map(|a| ActivityPoint {
            date: display_date(Some(&a.activity_date)),
            name: a.activity_name.clone(),
            predicted_pleasure: a.predicted_pleasure,
            actual_pleasure: a.actual_pleasure,
            predicted_mastery: a.predicted_mastery,
            actual_mastery: a.actual_mastery,
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));

    let avg = |f: fn(&ActivityPoint) -> u8| mean(points.iter().map(|p| f64::from(f(p))));

    Some(ActivityTrends {
        avg_predicted_pleasure: avg(|p| p.predicted_pleasure),
        avg_actual_pleasure: avg(|p| p.actual_pleasure),
        avg_predicted_mastery: avg(|p| p.predicted_mastery),
        avg_actual_mastery: avg(|p| p.actual_mastery),
        points,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionShift {
    pub emotion: String,
    pub samples: usize,
    pub avg_initial: f64,
    pub avg_final: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThoughtTrends {
    pub count: usize,
    pub avg_belief_automatic: f64,
    pub avg_belief_alternative: f64,
    /// Only emotions rated both before and after, sorted by name.
    pub emotions: Vec<EmotionShift>,
}

pub fn thought_trends(records: &[ThoughtRecord]) -> Option<ThoughtTrends> {
    if records.is_empty() {
        return None;
    }

    let mut pairs: BTreeMap<&str, Vec<(u8, u8)>> = BTreeMap::new();
    for record in records {
        for (emotion, &initial) in &record.initial_emotions {
            if let Some(&last) = record.final_emotions.get(emotion) {
                pairs.entry(emotion.as_str()).or_default().push((initial, last));
            }
        }
    }

    let emotions = pairs
        .into_iter()
        .map(|(emotion, ratings)| EmotionShift {
            emotion: emotion.to_string(),
            samples: ratings.len(),
            avg_initial: mean(ratings.iter().map(|&(initial, _)| f64::from(initial))),
            avg_final: mean(ratings.iter().map(|&(_, last)| f64::from(last))),
        })
        .collect();

    Some(ThoughtTrends {
        count: records.len(),
        avg_belief_automatic: mean(
            records
                .iter()
                .map(|r| f64::from(r.belief_in_automatic_thoughts)),
        ),
        avg_belief_alternative: mean(
            records
                .iter()
                .map(|r| f64::from(r.belief_in_alternative_thought)),
        ),
        emotions,
    })
}

/// Every status is present, zero when unused.
pub fn status_counts(problems: &[ProblemRecord]) -> BTreeMap<ProblemStatus, usize> {
    let mut counts: BTreeMap<ProblemStatus, usize> =
        ProblemStatus::ALL.iter().map(|&status| (status, 0)).collect();
    for problem in problems {
        *counts.entry(problem.problem_status).or_default() += 1;
    }
    counts
}
