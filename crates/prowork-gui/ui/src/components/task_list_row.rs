use prowork_core::{
  RowTarget,
  TaskId,
  TaskRow
};
use wasm_bindgen::JsCast;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

const DELETE_SELECTOR: &str = ".delete-btn";

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:          TaskRow,
  pub on_delete:    Callback<TaskId>,
  pub on_row_click:
    Callback<(TaskId, RowTarget)>
}

fn click_target(
  event: &MouseEvent
) -> RowTarget {
  let on_delete = event
    .target()
    .and_then(|target| {
      target
        .dyn_into::<web_sys::Element>()
        .ok()
    })
    .and_then(|element| {
      element
        .closest(DELETE_SELECTOR)
        .ok()
        .flatten()
    })
    .is_some();

  if on_delete {
    RowTarget::DeleteAffordance
  } else {
    RowTarget::Body
  }
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let row = &props.row;

  let on_delete = {
    let on_delete = props.on_delete.clone();
    let id = row.id.clone();
    Callback::from(move |e: MouseEvent| {
      e.stop_propagation();
      e.prevent_default();
      on_delete.emit(id.clone());
    })
  };

  let on_row_click = row.clickable.then(|| {
    let on_row_click =
      props.on_row_click.clone();
    let id = row.id.clone();
    Callback::from(move |e: MouseEvent| {
      on_row_click
        .emit((id.clone(), click_target(&e)));
    })
  });

  html! {
      <div
          class={row.class()}
          data-task-id={row.id.to_string()}
          style={row.accent_style()}
          onclick={on_row_click}
      >
          <div class="task-header">
              <h3>{ &row.name }</h3>
              <div class="task-actions">
                  <span class="task-type">{ &row.type_label }</span>
                  <button
                      class="delete-btn"
                      type="button"
                      data-task-id={row.id.to_string()}
                      onclick={on_delete}
                  >
                      { "Delete" }
                  </button>
              </div>
          </div>
          <div class="task-details">
              <span><span class="icon">{ "Date:" }</span>{ " " }{ &row.deadline }</span>
              <span><span class="icon">{ "Priority:" }</span>{ " " }{ &row.priority }</span>
              {
                  match &row.repetition {
                      | Some(repetition) => html! {
                          <span><span class="icon">{ "Repeat:" }</span>{ " " }{ repetition }</span>
                      },
                      | None => html! {}
                  }
              }
          </div>
          {
              if row.completed {
                  html! { <span class="task-completed">{ "Completed" }</span> }
              } else {
                  html! {}
              }
          }
          {
              match row.hint {
                  | Some(hint) => html! { <span class="task-hint">{ hint }</span> },
                  | None => html! {}
              }
          }
      </div>
  }
}
