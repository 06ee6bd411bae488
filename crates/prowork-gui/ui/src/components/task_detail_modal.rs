use prowork_core::DetailModal;
use web_sys::HtmlTextAreaElement;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskDetailModalProps {
  pub detail:         DetailModal,
  pub on_notes_input: Callback<String>,
  pub on_save:        Callback<MouseEvent>,
  pub on_close:       Callback<MouseEvent>
}

#[function_component(TaskDetailModal)]
pub fn task_detail_modal(
  props: &TaskDetailModalProps
) -> Html {
  let detail = &props.detail;
  if !detail.visible {
    return html! {};
  }

  let on_notes_input = {
    let on_notes_input =
      props.on_notes_input.clone();
    Callback::from(
      move |e: yew::InputEvent| {
        let area: HtmlTextAreaElement =
          e.target_unchecked_into();
        on_notes_input.emit(area.value());
      }
    )
  };

  html! {
      <div id="task-detail-modal" class="modal-backdrop">
          <div class="modal">
              <div class="header">
                  <h2 id="detail-task-name">{ &detail.name }</h2>
                  <button id="close-detail-btn" class="btn" type="button" onclick={props.on_close.clone()}>
                      { "×" }
                  </button>
              </div>
              <div class="content">
                  <div class="kv">
                      <strong>{ "Date" }</strong>
                      <div id="detail-deadline">{ &detail.deadline }</div>
                  </div>
                  <div class="kv">
                      <strong>{ "Priority" }</strong>
                      <div id="detail-priority">{ &detail.priority }</div>
                  </div>
                  <label>
                      { "Notes" }
                      <textarea
                          id="detail-notes"
                          value={detail.notes.clone()}
                          oninput={on_notes_input}
                      />
                  </label>
              </div>
              <div class="footer">
                  <button id="cancel-detail-btn" class="btn" type="button" onclick={props.on_close.clone()}>
                      { "Cancel" }
                  </button>
                  <button id="save-notes-btn" class="btn ok" type="button" onclick={props.on_save.clone()}>
                      { "Save Notes" }
                  </button>
              </div>
          </div>
      </div>
  }
}
