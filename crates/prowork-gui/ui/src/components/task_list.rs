use prowork_core::render::EMPTY_PLACEHOLDER;
use prowork_core::{
  ListState,
  RowTarget,
  TaskId,
  TaskListView
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub list:         ListState,
  pub on_delete:    Callback<TaskId>,
  pub on_row_click:
    Callback<(TaskId, RowTarget)>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let body = match &props.list {
    | ListState::Loading => html! {
        <p class="task-list-status">{ "Loading tasks..." }</p>
    },
    | ListState::Failed(message) => html! {
        <p class="task-list-status error">{ message }</p>
    },
    | ListState::Ready(TaskListView::Empty) => html! {
        <p class="task-list-status">{ EMPTY_PLACEHOLDER }</p>
    },
    | ListState::Ready(TaskListView::Tasks(rows)) => html! {
        <div class="tasks">
            {
                for rows.iter().cloned().map(|row| html! {
                    <TaskListRow
                        key={row.id.to_string()}
                        row={row.clone()}
                        on_delete={props.on_delete.clone()}
                        on_row_click={props.on_row_click.clone()}
                    />
                })
            }
        </div>
    }
  };

  html! {
      <div id="task-list" class="panel list">
          { body }
      </div>
  }
}
