pub mod activity;
pub mod breathing;
pub mod collection;
pub mod error;
pub mod history;
pub mod lesson;
pub mod problem;
pub mod record;
pub mod thought_record;
pub mod validate;

pub use activity::Activity;
pub use collection::CollectionKind;
pub use error::{StoreError, ValidationError};
pub use problem::{ProblemRecord, ProblemStatus};
pub use record::Record;
pub use thought_record::ThoughtRecord;
