use prowork_core::model::{
  PRIORITIES,
  REPETITIONS,
  TASK_TYPES
};
use prowork_core::{
  CreateForm,
  TaskDraft
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormModalProps {
  pub form:      CreateForm,
  pub on_change: Callback<TaskDraft>,
  pub on_submit: Callback<SubmitEvent>,
  pub on_cancel: Callback<MouseEvent>
}

fn select_options(
  values: &[&'static str],
  selected: &str
) -> Html {
  values
    .iter()
    .map(|value| {
      html! {
          <option value={*value} selected={*value == selected}>{ *value }</option>
      }
    })
    .collect()
}

#[function_component(TaskFormModal)]
pub fn task_form_modal(
  props: &TaskFormModalProps
) -> Html {
  if !props.form.visible {
    return html! {};
  }

  let draft = props.form.draft.clone();

  let edit_input =
    |apply: fn(&mut TaskDraft, String)| {
      let on_change =
        props.on_change.clone();
      let draft = draft.clone();
      Callback::from(
        move |e: yew::InputEvent| {
          let input: HtmlInputElement =
            e.target_unchecked_into();
          let mut next = draft.clone();
          apply(&mut next, input.value());
          on_change.emit(next);
        }
      )
    };

  let edit_select =
    |apply: fn(&mut TaskDraft, String)| {
      let on_change =
        props.on_change.clone();
      let draft = draft.clone();
      Callback::from(
        move |e: web_sys::Event| {
          let select: HtmlSelectElement =
            e.target_unchecked_into();
          let mut next = draft.clone();
          apply(&mut next, select.value());
          on_change.emit(next);
        }
      )
    };

  let on_name = edit_input(|draft, value| {
    draft.name = value;
  });
  let on_deadline =
    edit_input(|draft, value| {
      draft.deadline = value;
    });
  let on_type = edit_select(|draft, value| {
    draft.task_type = value;
  });
  let on_priority =
    edit_select(|draft, value| {
      draft.priority = value;
    });
  let on_repetition =
    edit_select(|draft, value| {
      draft.repetition = value;
    });

  html! {
      <div id="task-form-container" class="modal-backdrop">
          <form id="task-form" class="modal" onsubmit={props.on_submit.clone()}>
              <div class="header">{ "New Task" }</div>
              <div class="content">
                  <label>
                      { "Name" }
                      <input
                          id="task-name"
                          type="text"
                          required={true}
                          value={draft.name.clone()}
                          oninput={on_name}
                      />
                  </label>
                  <label>
                      { "Deadline" }
                      <input
                          id="task-deadline"
                          type="date"
                          value={draft.deadline.clone()}
                          oninput={on_deadline}
                      />
                  </label>
                  <label>
                      { "Type" }
                      <select id="task-type" onchange={on_type}>
                          { select_options(&TASK_TYPES, &draft.task_type) }
                      </select>
                  </label>
                  <label>
                      { "Priority" }
                      <select id="task-priority" onchange={on_priority}>
                          { select_options(&PRIORITIES, &draft.priority) }
                      </select>
                  </label>
                  <label>
                      { "Repeat" }
                      <select id="task-repetition" onchange={on_repetition}>
                          { select_options(&REPETITIONS, &draft.repetition) }
                      </select>
                  </label>
              </div>
              <div class="footer">
                  <button id="cancel-btn" class="btn" type="button" onclick={props.on_cancel.clone()}>
                      { "Cancel" }
                  </button>
                  <button class="btn ok" type="submit">{ "Add Task" }</button>
              </div>
          </form>
      </div>
  }
}
