use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::model::{
  TaskDraft,
  TaskId,
  TaskRecord
};

/// The five host calls the front end
/// is allowed to make.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Operation {
  ListTasks,
  CreateTask,
  DeleteTask,
  FetchTask,
  SetNotes
}

impl Operation {
  pub fn as_key(self) -> &'static str {
    match self {
      | Operation::ListTasks => {
        "list_tasks"
      }
      | Operation::CreateTask => {
        "create_task"
      }
      | Operation::DeleteTask => {
        "delete_task"
      }
      | Operation::FetchTask => {
        "fetch_task"
      }
      | Operation::SetNotes => {
        "set_notes"
      }
    }
  }

  /// Alert text for a host that
  /// answered with a falsy result.
  /// List and fetch replies have no
  /// falsy form, so they only ever
  /// raise and share the generic text.
  pub fn rejected_message(
    self
  ) -> &'static str {
    match self {
      | Operation::CreateTask => {
        "Error: Could not add task!"
      }
      | Operation::DeleteTask => {
        "Error: Could not delete task!"
      }
      | Operation::SetNotes => {
        "Error: Could not save notes!"
      }
      | Operation::ListTasks
      | Operation::FetchTask => {
        "Error: Host refused the request!"
      }
    }
  }

  /// Prefix for a call that raised.
  pub fn transport_prefix(
    self
  ) -> &'static str {
    match self {
      | Operation::ListTasks => {
        "Error loading tasks"
      }
      | Operation::CreateTask => {
        "Error adding task"
      }
      | Operation::DeleteTask => {
        "Error deleting task"
      }
      | Operation::FetchTask => {
        "Error loading task details"
      }
      | Operation::SetNotes => {
        "Error saving notes"
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum GatewayError {
  #[error("{} was rejected by the host", .operation.as_key())]
  Rejected { operation: Operation },
  #[error("{} failed: {message}", .operation.as_key())]
  Transport {
    operation: Operation,
    message:   String
  }
}

impl GatewayError {
  pub fn transport(
    operation: Operation,
    message: impl Into<String>
  ) -> Self {
    GatewayError::Transport {
      operation,
      message: message.into()
    }
  }

  pub fn operation(&self) -> Operation {
    match self {
      | GatewayError::Rejected {
        operation
      }
      | GatewayError::Transport {
        operation,
        ..
      } => *operation
    }
  }

  pub fn is_rejected(&self) -> bool {
    matches!(
      self,
      GatewayError::Rejected { .. }
    )
  }

  /// The blocking message shown to the
  /// user. Both kinds name the action;
  /// only the wording differs.
  pub fn user_message(&self) -> String {
    match self {
      | GatewayError::Rejected {
        operation
      } => operation
        .rejected_message()
        .to_string(),
      | GatewayError::Transport {
        operation,
        message
      } => format!(
        "{}: {message}",
        operation.transport_prefix()
      )
    }
  }
}

pub type CallResult<T> =
  Result<T, GatewayError>;

/// Host command interface. Calls are
/// never retried by the caller.
#[allow(async_fn_in_trait)]
pub trait CommandGateway {
  async fn list_tasks(
    &self
  ) -> CallResult<Vec<TaskRecord>>;

  async fn create_task(
    &self,
    draft: &TaskDraft
  ) -> CallResult<TaskId>;

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> CallResult<()>;

  async fn fetch_task(
    &self,
    id: &TaskId
  ) -> CallResult<TaskRecord>;

  async fn set_notes(
    &self,
    id: &TaskId,
    notes: &str
  ) -> CallResult<()>;
}

fn decode_json<T>(
  operation: Operation,
  text: &str
) -> CallResult<T>
where
  T: DeserializeOwned
{
  serde_json::from_str(text).map_err(
    |err| {
      GatewayError::transport(
        operation,
        format!("malformed reply: {err}")
      )
    }
  )
}

pub fn decode_task_list(
  text: &str
) -> CallResult<Vec<TaskRecord>> {
  decode_json(Operation::ListTasks, text)
}

/// A `null` reply means the id is
/// unknown to the host.
pub fn decode_task(
  reply: Option<&str>
) -> CallResult<TaskRecord> {
  let Some(text) = reply else {
    return Err(GatewayError::transport(
      Operation::FetchTask,
      "task not found"
    ));
  };

  match decode_json::<Option<TaskRecord>>(
    Operation::FetchTask,
    text
  )? {
    | Some(task) => Ok(task),
    | None => {
      Err(GatewayError::transport(
        Operation::FetchTask,
        "task not found"
      ))
    }
  }
}

/// Null, `false`, `0` and blank ids are
/// all falsy creation results.
pub fn decode_created_id(
  reply: &Value
) -> CallResult<TaskId> {
  let rejected =
    GatewayError::Rejected {
      operation: Operation::CreateTask
    };

  match reply {
    | Value::String(text)
      if !text.trim().is_empty() =>
    {
      Ok(TaskId::new(text.clone()))
    }
    | Value::Number(number)
      if number.as_f64()
        != Some(0.0) =>
    {
      Ok(TaskId::new(number.to_string()))
    }
    | Value::Null
    | Value::Bool(false)
    | Value::String(_)
    | Value::Number(_) => Err(rejected),
    | other => {
      Err(GatewayError::transport(
        Operation::CreateTask,
        format!("unexpected reply: {other}")
      ))
    }
  }
}

pub fn decode_flag(
  operation: Operation,
  reply: bool
) -> CallResult<()> {
  if reply {
    Ok(())
  } else {
    Err(GatewayError::Rejected {
      operation
    })
  }
}
