use std::cell::{
  Cell,
  RefCell
};

use chrono::NaiveDate;
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::gateway::{
  CommandGateway,
  GatewayError
};
use crate::model::{
  TaskDraft,
  TaskId,
  TaskRecord
};
use crate::probe::ProbeError;
use crate::render::{
  TaskListView,
  render_tasks
};

pub const MISSING_ID_MESSAGE: &str =
  "Error: No task ID!";
pub const NO_OPEN_DETAIL_MESSAGE: &str =
  "Error: No task selected!";
pub const DELETE_CONFIRM_MESSAGE: &str =
  "Are you sure you want to delete this \
   task?";

/// Blocking user dialogs.
pub trait Dialogs {
  fn alert(&self, message: &str);

  fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
  Loading,
  Ready(TaskListView),
  Failed(String)
}

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct CreateForm {
  pub visible: bool,
  pub draft:   TaskDraft
}

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct DetailModal {
  pub visible:  bool,
  pub name:     String,
  pub deadline: String,
  pub priority: String,
  pub notes:    String
}

impl DetailModal {
  fn showing(task: TaskRecord) -> Self {
    Self {
      visible:  true,
      name:     task.name,
      deadline: task.deadline,
      priority: task.priority.to_string(),
      notes:    task.notes
    }
  }
}

/// Id of the task whose detail modal is
/// open. Only the detail open, close and
/// save transitions touch it.
#[derive(
  Debug, Clone, PartialEq, Default,
)]
struct OpenDetail(Option<TaskId>);

impl OpenDetail {
  fn open(&mut self, id: TaskId) {
    self.0 = Some(id);
  }

  fn clear(&mut self) {
    self.0 = None;
  }

  fn current(&self) -> Option<&TaskId> {
    self.0.as_ref()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
  pub list:        ListState,
  pub create_form: CreateForm,
  pub detail:      DetailModal,
  open_detail:     OpenDetail
}

impl Default for UiState {
  fn default() -> Self {
    Self {
      list:        ListState::Loading,
      create_form: CreateForm::default(),
      detail:      DetailModal::default(),
      open_detail: OpenDetail::default()
    }
  }
}

impl UiState {
  pub fn view(&self) -> Option<&TaskListView> {
    match &self.list {
      | ListState::Ready(view) => Some(view),
      | _ => None
    }
  }
}

/// Which part of a task row received a
/// click.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum RowTarget {
  Body,
  DeleteAffordance
}

type Subscriber = Box<dyn Fn(&UiState)>;

struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
  fn drop(&mut self) {
    self.0.set(false);
  }
}

pub struct Controller<G, D> {
  gateway:    G,
  dialogs:    D,
  state:      RefCell<UiState>,
  busy:       Cell<bool>,
  subscriber: RefCell<Option<Subscriber>>
}

impl<G, D> Controller<G, D>
where
  G: CommandGateway,
  D: Dialogs
{
  pub fn new(
    gateway: G,
    dialogs: D
  ) -> Self {
    Self {
      gateway,
      dialogs,
      state: RefCell::new(UiState::default()),
      busy: Cell::new(false),
      subscriber: RefCell::new(None)
    }
  }

  pub fn gateway(&self) -> &G {
    &self.gateway
  }

  pub fn dialogs(&self) -> &D {
    &self.dialogs
  }

  /// Registers the single listener that
  /// receives a snapshot after every
  /// transition.
  pub fn subscribe(
    &self,
    listener: impl Fn(&UiState) + 'static
  ) {
    *self.subscriber.borrow_mut() =
      Some(Box::new(listener));
  }

  pub fn snapshot(&self) -> UiState {
    self.state.borrow().clone()
  }

  fn update(
    &self,
    apply: impl FnOnce(&mut UiState)
  ) {
    let snapshot = {
      let mut state =
        self.state.borrow_mut();
      apply(&mut state);
      state.clone()
    };

    if let Some(listener) =
      self.subscriber.borrow().as_ref()
    {
      listener(&snapshot);
    }
  }

  fn begin(
    &self,
    gesture: &'static str
  ) -> Option<BusyGuard<'_>> {
    if self.busy.replace(true) {
      warn!(
        gesture,
        "host call in flight; gesture \
         dropped"
      );
      return None;
    }
    Some(BusyGuard(&self.busy))
  }

  fn report(&self, err: &GatewayError) {
    let operation =
      err.operation().as_key();
    if err.is_rejected() {
      warn!(operation, "host rejected call");
    } else {
      error!(operation, error = %err, "host call failed");
    }
    self.dialogs.alert(&err.user_message());
  }

  async fn reload_list(&self) {
    info!("reloading task list");
    match self.gateway.list_tasks().await {
      | Ok(tasks) => {
        let view = render_tasks(&tasks);
        debug!(
          count = tasks.len(),
          "rendered task list"
        );
        self.update(|state| {
          state.list = ListState::Ready(view);
        });
      }
      | Err(err) => {
        let message = err.user_message();
        self.update(|state| {
          state.list =
            ListState::Failed(message);
        });
        self.report(&err);
      }
    }
  }

  /// Full list reload, run as its own
  /// gesture (start-up, Refresh button).
  pub async fn reload(&self) {
    let Some(_busy) = self.begin("reload")
    else {
      return;
    };
    self.reload_list().await;
  }

  pub fn bridge_unavailable(
    &self,
    err: &ProbeError
  ) {
    error!(error = %err, "host bridge unavailable");
    let message =
      format!("Error loading tasks: {err}");
    self.update(|state| {
      state.list = ListState::Failed(message);
    });
  }

  pub fn open_create_form(
    &self,
    today: NaiveDate
  ) {
    debug!(%today, "opening creation form");
    self.update(|state| {
      state.create_form.visible = true;
      state.create_form.draft.deadline =
        today.format("%Y-%m-%d").to_string();
    });
  }

  pub fn edit_draft(
    &self,
    edit: impl FnOnce(&mut TaskDraft)
  ) {
    self.update(|state| {
      edit(&mut state.create_form.draft);
    });
  }

  pub fn close_create_form(&self) {
    debug!("closing creation form");
    self.update(|state| {
      state.create_form = CreateForm::default();
    });
  }

  pub async fn submit_create(&self) {
    let draft = {
      let state = self.state.borrow();
      if !state.create_form.visible {
        debug!(
          "submit ignored; creation form \
           is closed"
        );
        return;
      }
      state.create_form.draft.clone()
    };
    let Some(_busy) = self.begin("create")
    else {
      return;
    };

    info!(
      name_len = draft.name.len(),
      task_type = %draft.task_type,
      priority = %draft.priority,
      "creating task"
    );
    match self
      .gateway
      .create_task(&draft)
      .await
    {
      | Ok(id) => {
        info!(task_id = %id, "task created");
        self.update(|state| {
          state.create_form =
            CreateForm::default();
        });
        self.reload_list().await;
      }
      | Err(err) => self.report(&err)
    }
  }

  pub async fn request_delete(
    &self,
    id: &TaskId
  ) {
    if id.is_empty() {
      warn!(
        "delete requested without a task \
         id"
      );
      self.dialogs.alert(MISSING_ID_MESSAGE);
      return;
    }
    let Some(_busy) = self.begin("delete")
    else {
      return;
    };

    if !self
      .dialogs
      .confirm(DELETE_CONFIRM_MESSAGE)
    {
      info!(task_id = %id, "task deletion canceled");
      return;
    }

    info!(task_id = %id, "deleting task");
    match self.gateway.delete_task(id).await
    {
      | Ok(()) => self.reload_list().await,
      | Err(err) => self.report(&err)
    }
  }

  /// Opens the detail modal for a
  /// clickable row. Clicks that land on
  /// the delete affordance belong to the
  /// delete gesture.
  pub async fn click_row(
    &self,
    id: &TaskId,
    target: RowTarget
  ) {
    if target == RowTarget::DeleteAffordance
    {
      debug!(task_id = %id, "row click on delete affordance ignored");
      return;
    }

    let clickable = self
      .state
      .borrow()
      .view()
      .and_then(|view| view.row(id))
      .is_some_and(|row| row.clickable);
    if !clickable {
      debug!(task_id = %id, "row is not clickable");
      return;
    }
    let Some(_busy) = self.begin("detail")
    else {
      return;
    };

    info!(task_id = %id, "loading task detail");
    match self.gateway.fetch_task(id).await {
      | Ok(task) => {
        self.update(|state| {
          state.detail =
            DetailModal::showing(task);
          state.open_detail.open(id.clone());
        });
      }
      | Err(err) => self.report(&err)
    }
  }

  pub fn edit_notes(
    &self,
    notes: String
  ) {
    self.update(|state| {
      state.detail.notes = notes;
    });
  }

  pub fn close_detail(&self) {
    debug!("closing detail modal");
    self.update(close_detail_state);
  }

  pub async fn save_notes(&self) {
    let (id, notes) = {
      let state = self.state.borrow();
      (
        state.open_detail.current().cloned(),
        state.detail.notes.clone()
      )
    };
    let Some(id) = id else {
      warn!(
        "save requested with no open \
         detail"
      );
      self
        .dialogs
        .alert(NO_OPEN_DETAIL_MESSAGE);
      return;
    };
    let Some(_busy) = self.begin("notes")
    else {
      return;
    };

    info!(
      task_id = %id,
      notes_len = notes.len(),
      "saving task notes"
    );
    match self
      .gateway
      .set_notes(&id, &notes)
      .await
    {
      | Ok(()) => {
        self.update(close_detail_state);
        self.reload_list().await;
      }
      | Err(err) => self.report(&err)
    }
  }
}

fn close_detail_state(state: &mut UiState) {
  state.detail = DetailModal::default();
  state.open_detail.clear();
}
