use std::rc::Rc;

use prowork_core::{
  Config,
  Controller,
  ProbeConfig,
  RowTarget,
  TaskDraft,
  TaskId,
  UiState,
  await_bridge
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  SubmitEvent,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};

use crate::api::TauriGateway;
use crate::bridge::{
  BrowserDialogs,
  host_available,
  sleep,
  ui_debug
};
use crate::components::{
  TaskDetailModal,
  TaskFormModal,
  TaskList
};

const PROWORK_CONFIG_TOML: &str =
  include_str!("../assets/prowork.toml");

type AppController =
  Controller<TauriGateway, BrowserDialogs>;

/// Runs one controller transition on the
/// browser task queue.
fn spawn_transition<F, Fut>(
  controller: &Rc<AppController>,
  transition: F
) where
  F: FnOnce(Rc<AppController>) -> Fut
    + 'static,
  Fut: std::future::Future<Output = ()>
    + 'static
{
  let controller = controller.clone();
  wasm_bindgen_futures::spawn_local(
    transition(controller)
  );
}

/// Waits for the host bridge, then
/// loads the list.
async fn connect_and_reload(
  controller: Rc<AppController>,
  probe: ProbeConfig
) {
  match await_bridge(
    host_available,
    sleep,
    &probe
  )
  .await
  {
    | Ok(_) => controller.reload().await,
    | Err(err) => {
      controller.bridge_unavailable(&err)
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| {
    Config::load_or_default(
      PROWORK_CONFIG_TOML
    )
  });
  let controller = {
    let commands =
      config.commands.clone();
    use_memo((), move |_| {
      Controller::new(
        TauriGateway::new(commands),
        BrowserDialogs
      )
    })
  };
  let ui = use_state(UiState::default);

  {
    let controller = controller.clone();
    let probe = config.probe.clone();
    let setter = ui.setter();
    use_effect_with((), move |_| {
      controller.subscribe(move |state| {
        setter.set(state.clone());
      });
      ui_debug(
        "app.mounted",
        "waiting for host bridge"
      );

      spawn_transition(
        &controller,
        move |controller| {
          connect_and_reload(controller, probe)
        }
      );
      || ()
    });
  }

  let on_refresh_click = {
    let controller = controller.clone();
    let probe = config.probe.clone();
    Callback::from(move |_: MouseEvent| {
      ui_debug(
        "action.refresh",
        "clicked Refresh"
      );
      let probe = probe.clone();
      spawn_transition(
        &controller,
        move |controller| {
          connect_and_reload(controller, probe)
        }
      );
    })
  };

  let on_add_click = {
    let controller = controller.clone();
    Callback::from(move |_: MouseEvent| {
      ui_debug(
        "action.form.open",
        "clicked Add Task"
      );
      controller.open_create_form(
        chrono::Local::now().date_naive()
      );
    })
  };

  let on_draft_change = {
    let controller = controller.clone();
    Callback::from(
      move |next: TaskDraft| {
        controller
          .edit_draft(|draft| *draft = next);
      }
    )
  };

  let on_form_submit = {
    let controller = controller.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      ui_debug(
        "action.form.submit",
        "submitted task form"
      );
      spawn_transition(
        &controller,
        |controller| async move {
          controller.submit_create().await;
        }
      );
    })
  };

  let on_form_cancel = {
    let controller = controller.clone();
    Callback::from(move |_: MouseEvent| {
      controller.close_create_form();
    })
  };

  let on_delete = {
    let controller = controller.clone();
    Callback::from(move |id: TaskId| {
      ui_debug(
        "action.delete",
        id.as_str()
      );
      spawn_transition(
        &controller,
        move |controller| async move {
          controller
            .request_delete(&id)
            .await;
        }
      );
    })
  };

  let on_row_click = {
    let controller = controller.clone();
    Callback::from(
      move |(id, target): (
        TaskId,
        RowTarget
      )| {
        spawn_transition(
          &controller,
          move |controller| async move {
            controller
              .click_row(&id, target)
              .await;
          }
        );
      }
    )
  };

  let on_notes_input = {
    let controller = controller.clone();
    Callback::from(move |notes: String| {
      controller.edit_notes(notes);
    })
  };

  let on_save_notes = {
    let controller = controller.clone();
    Callback::from(move |_: MouseEvent| {
      ui_debug(
        "action.notes.save",
        "clicked Save Notes"
      );
      spawn_transition(
        &controller,
        |controller| async move {
          controller.save_notes().await;
        }
      );
    })
  };

  let on_detail_close = {
    let controller = controller.clone();
    Callback::from(move |_: MouseEvent| {
      controller.close_detail();
    })
  };

  html! {
      <div class="app">
          <div class="toolbar">
              <h1>{ "ProWork" }</h1>
              <button id="refresh-btn" class="btn" type="button" onclick={on_refresh_click}>
                  { "Refresh" }
              </button>
              <button id="add-task-btn" class="btn ok" type="button" onclick={on_add_click}>
                  { "Add Task" }
              </button>
          </div>
          <TaskFormModal
              form={ui.create_form.clone()}
              on_change={on_draft_change}
              on_submit={on_form_submit}
              on_cancel={on_form_cancel}
          />
          <TaskList
              list={ui.list.clone()}
              on_delete={on_delete}
              on_row_click={on_row_click}
          />
          <TaskDetailModal
              detail={ui.detail.clone()}
              on_notes_input={on_notes_input}
              on_save={on_save_notes}
              on_close={on_detail_close}
          />
      </div>
  }
}
