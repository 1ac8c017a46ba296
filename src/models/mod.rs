pub mod exercise;
pub mod user;

pub use exercise::{CreateExercise, ExerciseRecord, LogFilter};
pub use user::{CreateUser, User};

use rusqlite::Row;
use serde::{Deserialize, Deserializer};

pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Deserialize an optional form field, treating an empty string as absent.
/// Browsers submit blank inputs as `""` rather than omitting the field.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}
