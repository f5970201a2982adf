pub mod store;

pub use store::{CorruptPolicy, JsonCollection, RecordStore};
