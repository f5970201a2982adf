use clap::ValueEnum;
use std::fmt;

/// The three independently persisted record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum CollectionKind {
    #[value(name = "thought")]
    ThoughtRecords,
    #[value(name = "activity")]
    BehavioralActivation,
    #[value(name = "problem")]
    ProblemSolving,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::ThoughtRecords,
        CollectionKind::BehavioralActivation,
        CollectionKind::ProblemSolving,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::ThoughtRecords => "thought_records.json",
            CollectionKind::BehavioralActivation => "behavioral_activation_activities.json",
            CollectionKind::ProblemSolving => "problem_solving_records.json",
        }
    }

    /// Key used for this collection in export documents.
    pub fn key(self) -> &'static str {
        match self {
            CollectionKind::ThoughtRecords => "thought_records",
            CollectionKind::BehavioralActivation => "behavioral_activation",
            CollectionKind::ProblemSolving => "problem_solving",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::ThoughtRecords => "Thought Records",
            CollectionKind::BehavioralActivation => "Activity Log",
            CollectionKind::ProblemSolving => "Problem Solving",
        }
    }

    /// User-entered date field that orders the history view.
    pub fn date_field(self) -> &'static str {
        match self {
            CollectionKind::BehavioralActivation => "Activity Date",
            CollectionKind::ThoughtRecords | CollectionKind::ProblemSolving => "Date",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
