use std::fmt;

use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

pub const TASK_TYPES: [&str; 5] = [
  "TEST", "HOMEWORK", "MEETING",
  "TRAINING", "WORK"
];
pub const PRIORITIES: [&str; 3] =
  ["HIGH", "MEDIUM", "LOW"];
pub const REPETITIONS: [&str; 5] = [
  "NONE", "DAILY", "WEEKLY", "MONTHLY",
  "YEARLY"
];

const NOTES_TASK_TYPE: &str = "TEST";
const NO_REPETITION: &str = "NONE";

/// Host-issued identifier. The host may
/// send it as a string or a number; it
/// is always carried as text.
#[derive(
  Debug,
  Clone,
  Serialize,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn new(
    value: impl Into<String>
  ) -> Self {
    Self(value.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl<'de> Deserialize<'de> for TaskId {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
      Text(String),
      Number(serde_json::Number)
    }

    Ok(match RawId::deserialize(
      deserializer
    )? {
      | RawId::Text(text) => {
        Self(text)
      }
      | RawId::Number(number) => {
        Self(number.to_string())
      }
    })
  }
}

macro_rules! label_type {
  ($name:ident) => {
    #[derive(
      Debug,
      Clone,
      Serialize,
      Deserialize,
      PartialEq,
      Eq,
      Default,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(
        value: impl Into<String>
      ) -> Self {
        Self(value.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>
      ) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(value: &str) -> Self {
        Self::new(value)
      }
    }
  };
}

label_type!(TaskType);
label_type!(Priority);
label_type!(Repetition);

impl TaskType {
  /// Only `TEST` tasks open the notes
  /// editor.
  pub fn is_test(&self) -> bool {
    self.0 == NOTES_TASK_TYPE
  }
}

impl Repetition {
  pub fn is_none(&self) -> bool {
    self.0 == NO_REPETITION
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskRecord {
  pub id:         TaskId,
  #[serde(default)]
  pub name:       String,
  #[serde(default, alias = "dueDate")]
  pub deadline:   String,
  #[serde(
    rename = "type",
    alias = "taskType",
    default
  )]
  pub task_type:  TaskType,
  #[serde(default)]
  pub priority:   Priority,
  #[serde(default)]
  pub repetition: Repetition,
  #[serde(default)]
  pub color:      String,
  #[serde(default)]
  pub completed:  bool,
  #[serde(
    default,
    deserialize_with = "null_as_empty"
  )]
  pub notes:      String
}

fn null_as_empty<'de, D>(
  deserializer: D
) -> Result<String, D::Error>
where
  D: Deserializer<'de>
{
  Ok(
    Option::<String>::deserialize(
      deserializer
    )?
    .unwrap_or_default()
  )
}

/// Creation form fields, passed to the
/// host as-is.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDraft {
  pub name:       String,
  pub deadline:   String,
  #[serde(rename = "type")]
  pub task_type:  String,
  pub priority:   String,
  pub repetition: String
}

impl Default for TaskDraft {
  fn default() -> Self {
    Self {
      name:       String::new(),
      deadline:   String::new(),
      task_type:  TASK_TYPES[0]
        .to_string(),
      priority:   PRIORITIES[0]
        .to_string(),
      repetition: REPETITIONS[0]
        .to_string()
    }
  }
}
