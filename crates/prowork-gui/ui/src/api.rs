use prowork_core::gateway::{
  decode_created_id,
  decode_flag,
  decode_task,
  decode_task_list
};
use prowork_core::{
  CallResult,
  CommandGateway,
  CommandNames,
  GatewayError,
  Operation,
  TaskDraft,
  TaskId,
  TaskRecord
};
use serde::{
  Serialize,
  de::DeserializeOwned
};
use serde_json::Value;
use tauri_wasm::{
  args,
  invoke
};

pub async fn invoke_tauri<R, A>(
  cmd: &str,
  args_payload: &A
) -> Result<R, String>
where
  R: DeserializeOwned,
  A: Serialize + ?Sized
{
  let payload = args(args_payload)
    .map_err(|e| {
      format!("failed to encode args: {e}")
    })?;
  let value = invoke(cmd)
    .with_args(payload)
    .await
    .map_err(|e| {
      format!("invoke error: {e:?}")
    })?;

  serde_wasm_bindgen::from_value(value)
    .map_err(|e| {
      format!("decode error: {e}")
    })
}

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct IdArgs<'a> {
  id: &'a str
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateArgs<'a> {
  name:       &'a str,
  deadline:   &'a str,
  task_type:  &'a str,
  priority:   &'a str,
  repetition: &'a str
}

#[derive(Serialize)]
struct NotesArgs<'a> {
  id:    &'a str,
  notes: &'a str
}

/// Gateway over the Tauri `invoke`
/// bridge.
pub struct TauriGateway {
  commands: CommandNames
}

impl TauriGateway {
  pub fn new(
    commands: CommandNames
  ) -> Self {
    Self { commands }
  }

  async fn call<R, A>(
    &self,
    operation: Operation,
    cmd: &str,
    payload: &A
  ) -> CallResult<R>
  where
    R: DeserializeOwned,
    A: Serialize + ?Sized
  {
    tracing::debug!(
      operation = operation.as_key(),
      cmd,
      "invoking host command"
    );
    invoke_tauri(cmd, payload)
      .await
      .map_err(|message| {
        GatewayError::transport(
          operation, message
        )
      })
  }
}

impl CommandGateway for TauriGateway {
  async fn list_tasks(
    &self
  ) -> CallResult<Vec<TaskRecord>> {
    let text: String = self
      .call(
        Operation::ListTasks,
        &self.commands.list,
        &NoArgs {}
      )
      .await?;
    decode_task_list(&text)
  }

  async fn create_task(
    &self,
    draft: &TaskDraft
  ) -> CallResult<TaskId> {
    let payload = CreateArgs {
      name:       &draft.name,
      deadline:   &draft.deadline,
      task_type:  &draft.task_type,
      priority:   &draft.priority,
      repetition: &draft.repetition
    };
    let reply: Value = self
      .call(
        Operation::CreateTask,
        &self.commands.create,
        &payload
      )
      .await?;
    decode_created_id(&reply)
  }

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> CallResult<()> {
    let removed: bool = self
      .call(
        Operation::DeleteTask,
        &self.commands.delete,
        &IdArgs {
          id: id.as_str()
        }
      )
      .await?;
    decode_flag(
      Operation::DeleteTask,
      removed
    )
  }

  async fn fetch_task(
    &self,
    id: &TaskId
  ) -> CallResult<TaskRecord> {
    let text: Option<String> = self
      .call(
        Operation::FetchTask,
        &self.commands.fetch,
        &IdArgs {
          id: id.as_str()
        }
      )
      .await?;
    decode_task(text.as_deref())
  }

  async fn set_notes(
    &self,
    id: &TaskId,
    notes: &str
  ) -> CallResult<()> {
    let saved: bool = self
      .call(
        Operation::SetNotes,
        &self.commands.set_notes,
        &NotesArgs {
          id: id.as_str(),
          notes
        }
      )
      .await?;
    decode_flag(Operation::SetNotes, saved)
  }
}
