use crate::model::{
  TaskId,
  TaskRecord
};

pub const EMPTY_PLACEHOLDER: &str =
  "No tasks yet. Add your first task!";
pub const NOTES_HINT: &str =
  "Click to add notes";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
  pub id:         TaskId,
  pub name:       String,
  pub type_label: String,
  pub deadline:   String,
  pub priority:   String,
  pub accent:     String,
  pub repetition: Option<String>,
  pub completed:  bool,
  pub clickable:  bool,
  pub hint:       Option<&'static str>
}

impl TaskRow {
  pub fn class(&self) -> &'static str {
    if self.clickable {
      "task-item clickable"
    } else {
      "task-item"
    }
  }

  pub fn accent_style(&self) -> String {
    format!(
      "border-left: 5px solid {}",
      self.accent
    )
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskListView {
  Empty,
  Tasks(Vec<TaskRow>)
}

impl TaskListView {
  pub fn rows(&self) -> &[TaskRow] {
    match self {
      | TaskListView::Empty => &[],
      | TaskListView::Tasks(rows) => rows
    }
  }

  pub fn row(
    &self,
    id: &TaskId
  ) -> Option<&TaskRow> {
    self
      .rows()
      .iter()
      .find(|row| &row.id == id)
  }
}

pub fn render_task(
  task: &TaskRecord
) -> TaskRow {
  let clickable = task.task_type.is_test();

  TaskRow {
    id: task.id.clone(),
    name: task.name.clone(),
    type_label: task
      .task_type
      .to_string(),
    deadline: task.deadline.clone(),
    priority: task.priority.to_string(),
    accent: task.color.clone(),
    repetition: (!task
      .repetition
      .is_none())
    .then(|| task.repetition.to_string()),
    completed: task.completed,
    clickable,
    hint: clickable.then_some(NOTES_HINT)
  }
}

/// Host order is kept as-is.
pub fn render_tasks(
  tasks: &[TaskRecord]
) -> TaskListView {
  if tasks.is_empty() {
    return TaskListView::Empty;
  }

  TaskListView::Tasks(
    tasks.iter().map(render_task).collect()
  )
}
