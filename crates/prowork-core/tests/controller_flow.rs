use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use chrono::NaiveDate;
use prowork_core::controller::{
    DELETE_CONFIRM_MESSAGE, MISSING_ID_MESSAGE, NO_OPEN_DETAIL_MESSAGE,
};
use prowork_core::{
    CallResult, CommandGateway, Controller, Dialogs, GatewayError, ListState, Operation,
    RowTarget, TaskDraft, TaskId, TaskListView, TaskRecord,
};
use serde_json::json;

#[derive(Default)]
struct ScriptedHost {
    tasks: RefCell<Vec<TaskRecord>>,
    create_replies: RefCell<VecDeque<CallResult<TaskId>>>,
    delete_replies: RefCell<VecDeque<CallResult<()>>>,
    notes_replies: RefCell<VecDeque<CallResult<()>>>,
    list_failure: RefCell<Option<GatewayError>>,
    stall_list: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedHost {
    fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
        let host = Self::default();
        *host.tasks.borrow_mut() = tasks;
        host
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(name))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn next<T>(queue: &RefCell<VecDeque<CallResult<T>>>, operation: Operation) -> CallResult<T> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(GatewayError::transport(operation, "no scripted reply")))
}

impl CommandGateway for ScriptedHost {
    async fn list_tasks(&self) -> CallResult<Vec<TaskRecord>> {
        self.record("list".to_string());
        if self.stall_list.get() {
            tokio::task::yield_now().await;
        }
        match self.list_failure.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(self.tasks.borrow().clone()),
        }
    }

    async fn create_task(&self, draft: &TaskDraft) -> CallResult<TaskId> {
        self.record(format!("create:{}", draft.name));
        next(&self.create_replies, Operation::CreateTask)
    }

    async fn delete_task(&self, id: &TaskId) -> CallResult<()> {
        self.record(format!("delete:{id}"));
        next(&self.delete_replies, Operation::DeleteTask)
    }

    async fn fetch_task(&self, id: &TaskId) -> CallResult<TaskRecord> {
        self.record(format!("fetch:{id}"));
        self.tasks
            .borrow()
            .iter()
            .find(|task| &task.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::transport(Operation::FetchTask, "task not found"))
    }

    async fn set_notes(&self, id: &TaskId, notes: &str) -> CallResult<()> {
        self.record(format!("notes:{id}:{notes}"));
        next(&self.notes_replies, Operation::SetNotes)
    }
}

#[derive(Default)]
struct RecordingDialogs {
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    answer: Cell<bool>,
}

impl RecordingDialogs {
    fn answering(answer: bool) -> Self {
        let dialogs = Self::default();
        dialogs.answer.set(answer);
        dialogs
    }

    fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

fn task(id: &str, name: &str, kind: &str) -> TaskRecord {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "deadline": "2024-05-01",
        "type": kind,
        "priority": "HIGH",
        "repetition": "NONE",
        "color": "#f00",
        "completed": false
    }))
    .expect("valid task record")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 20).expect("valid date")
}

#[tokio::test]
async fn initial_reload_renders_host_list() {
    let host = ScriptedHost::with_tasks(vec![task("1", "Pay rent", "BILL")]);
    let controller = Controller::new(host, RecordingDialogs::default());

    assert_eq!(controller.snapshot().list, ListState::Loading);
    controller.reload().await;

    let state = controller.snapshot();
    let view = state.view().expect("list rendered");
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].name, "Pay rent");
    assert_eq!(controller.gateway().calls(), vec!["list"]);
}

#[tokio::test]
async fn failed_reload_is_reported_inline_and_by_alert() {
    let host = ScriptedHost::default();
    *host.list_failure.borrow_mut() = Some(GatewayError::transport(
        Operation::ListTasks,
        "malformed reply: EOF while parsing",
    ));
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;

    let message = "Error loading tasks: malformed reply: EOF while parsing";
    assert_eq!(
        controller.snapshot().list,
        ListState::Failed(message.to_string())
    );
    assert_eq!(controller.dialogs().alerts(), vec![message]);
}

#[tokio::test]
async fn reload_after_failure_recovers_the_list() {
    let host = ScriptedHost::with_tasks(vec![task("1", "Pay rent", "BILL")]);
    *host.list_failure.borrow_mut() = Some(GatewayError::transport(
        Operation::ListTasks,
        "bridge detached",
    ));
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;
    assert!(matches!(controller.snapshot().list, ListState::Failed(_)));

    *controller.gateway().list_failure.borrow_mut() = None;
    controller.reload().await;

    let state = controller.snapshot();
    assert_eq!(state.view().expect("list rendered").rows().len(), 1);
    assert_eq!(controller.gateway().calls(), vec!["list", "list"]);
}

#[tokio::test]
async fn gesture_during_pending_call_is_dropped() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    host.stall_list.set(true);
    host.delete_replies.borrow_mut().push_back(Ok(()));
    let controller = Controller::new(host, RecordingDialogs::answering(true));

    let id = TaskId::from("3");
    tokio::join!(controller.reload(), controller.request_delete(&id));

    assert_eq!(controller.gateway().calls(), vec!["list"]);
    assert!(controller.dialogs().confirms.borrow().is_empty());
    assert!(controller.dialogs().alerts().is_empty());
    assert!(controller.snapshot().view().is_some());

    tokio::join!(
        controller.reload(),
        controller.click_row(&id, RowTarget::Body)
    );
    assert_eq!(controller.gateway().count("fetch"), 0);

    controller.request_delete(&id).await;
    assert_eq!(controller.gateway().count("delete"), 1);
}

#[tokio::test]
async fn empty_host_list_renders_placeholder() {
    let controller = Controller::new(ScriptedHost::default(), RecordingDialogs::default());
    controller.reload().await;

    assert_eq!(
        controller.snapshot().list,
        ListState::Ready(TaskListView::Empty)
    );
}

#[tokio::test]
async fn opening_form_prefills_today() {
    let controller = Controller::new(ScriptedHost::default(), RecordingDialogs::default());
    controller.open_create_form(today());

    let form = controller.snapshot().create_form;
    assert!(form.visible);
    assert_eq!(form.draft.deadline, "2024-04-20");
}

#[tokio::test]
async fn successful_create_resets_form_and_reloads_once() {
    let host = ScriptedHost::default();
    host.create_replies
        .borrow_mut()
        .push_back(Ok(TaskId::from("new-1")));
    let controller = Controller::new(host, RecordingDialogs::default());

    controller.open_create_form(today());
    controller.edit_draft(|draft| draft.name = "Study".to_string());
    controller.submit_create().await;

    let state = controller.snapshot();
    assert!(!state.create_form.visible);
    assert_eq!(state.create_form.draft, TaskDraft::default());
    assert_eq!(controller.gateway().calls(), vec!["create:Study", "list"]);
    assert!(controller.dialogs().alerts().is_empty());
}

#[tokio::test]
async fn rejected_create_keeps_form_open_without_reload() {
    let host = ScriptedHost::default();
    host.create_replies
        .borrow_mut()
        .push_back(Err(GatewayError::Rejected {
            operation: Operation::CreateTask,
        }));
    let controller = Controller::new(host, RecordingDialogs::default());

    controller.open_create_form(today());
    controller.submit_create().await;

    let state = controller.snapshot();
    assert!(state.create_form.visible);
    assert_eq!(state.create_form.draft.deadline, "2024-04-20");
    assert_eq!(controller.gateway().count("list"), 0);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error: Could not add task!"]
    );
}

#[tokio::test]
async fn raised_create_keeps_entered_fields() {
    let host = ScriptedHost::default();
    host.create_replies
        .borrow_mut()
        .push_back(Err(GatewayError::transport(
            Operation::CreateTask,
            "bridge detached",
        )));
    let controller = Controller::new(host, RecordingDialogs::default());

    controller.open_create_form(today());
    controller.edit_draft(|draft| {
        draft.name = "Gym".to_string();
        draft.task_type = "TRAINING".to_string();
    });
    controller.submit_create().await;

    let form = controller.snapshot().create_form;
    assert!(form.visible);
    assert_eq!(form.draft.name, "Gym");
    assert_eq!(form.draft.task_type, "TRAINING");
    assert_eq!(controller.gateway().count("list"), 0);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error adding task: bridge detached"]
    );
}

#[tokio::test]
async fn cancel_discards_form_without_host_call() {
    let controller = Controller::new(ScriptedHost::default(), RecordingDialogs::default());
    controller.open_create_form(today());
    controller.edit_draft(|draft| draft.name = "Draft".to_string());
    controller.close_create_form();

    let form = controller.snapshot().create_form;
    assert!(!form.visible);
    assert!(form.draft.name.is_empty());
    assert!(controller.gateway().calls().is_empty());
}

#[tokio::test]
async fn declined_delete_makes_no_host_call() {
    let host = ScriptedHost::with_tasks(vec![task("7", "Laundry", "WORK")]);
    let controller = Controller::new(host, RecordingDialogs::answering(false));
    controller.reload().await;
    let before = controller.snapshot().list;

    controller.request_delete(&TaskId::from("7")).await;

    assert_eq!(controller.gateway().calls(), vec!["list"]);
    assert_eq!(controller.snapshot().list, before);
    assert_eq!(
        *controller.dialogs().confirms.borrow(),
        vec![DELETE_CONFIRM_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn confirmed_delete_reloads_once() {
    let host = ScriptedHost::with_tasks(vec![task("7", "Laundry", "WORK")]);
    host.delete_replies.borrow_mut().push_back(Ok(()));
    let controller = Controller::new(host, RecordingDialogs::answering(true));
    controller.reload().await;

    controller.request_delete(&TaskId::from("7")).await;

    assert_eq!(controller.gateway().calls(), vec!["list", "delete:7", "list"]);
}

#[tokio::test]
async fn failed_delete_leaves_list_stale() {
    let host = ScriptedHost::with_tasks(vec![task("7", "Laundry", "WORK")]);
    host.delete_replies
        .borrow_mut()
        .push_back(Err(GatewayError::Rejected {
            operation: Operation::DeleteTask,
        }));
    let controller = Controller::new(host, RecordingDialogs::answering(true));
    controller.reload().await;
    let before = controller.snapshot().list;

    controller.request_delete(&TaskId::from("7")).await;

    assert_eq!(controller.gateway().count("list"), 1);
    assert_eq!(controller.snapshot().list, before);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error: Could not delete task!"]
    );
}

#[tokio::test]
async fn raised_delete_leaves_list_stale() {
    let host = ScriptedHost::with_tasks(vec![task("7", "Laundry", "WORK")]);
    host.delete_replies
        .borrow_mut()
        .push_back(Err(GatewayError::transport(
            Operation::DeleteTask,
            "bridge detached",
        )));
    let controller = Controller::new(host, RecordingDialogs::answering(true));
    controller.reload().await;
    let before = controller.snapshot().list;

    controller.request_delete(&TaskId::from("7")).await;

    assert_eq!(controller.gateway().calls(), vec!["list", "delete:7"]);
    assert_eq!(controller.snapshot().list, before);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error deleting task: bridge detached"]
    );
}

#[tokio::test]
async fn delete_without_id_is_guarded() {
    let controller = Controller::new(ScriptedHost::default(), RecordingDialogs::answering(true));
    controller.request_delete(&TaskId::from("")).await;

    assert!(controller.gateway().calls().is_empty());
    assert!(controller.dialogs().confirms.borrow().is_empty());
    assert_eq!(controller.dialogs().alerts(), vec![MISSING_ID_MESSAGE]);
}

#[tokio::test]
async fn delete_affordance_on_test_row_never_opens_detail() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    host.delete_replies.borrow_mut().push_back(Ok(()));
    let controller = Controller::new(host, RecordingDialogs::answering(true));
    controller.reload().await;

    let id = TaskId::from("3");
    controller.click_row(&id, RowTarget::DeleteAffordance).await;
    controller.request_delete(&id).await;

    assert_eq!(controller.gateway().count("fetch"), 0);
    assert_eq!(controller.gateway().count("delete"), 1);
    assert!(!controller.snapshot().detail.visible);
}

#[tokio::test]
async fn plain_rows_do_not_open_detail() {
    let host = ScriptedHost::with_tasks(vec![task("4", "Standup", "MEETING")]);
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;

    controller.click_row(&TaskId::from("4"), RowTarget::Body).await;

    assert_eq!(controller.gateway().count("fetch"), 0);
    assert!(!controller.snapshot().detail.visible);
}

#[tokio::test]
async fn test_row_opens_detail_with_blank_notes() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;

    controller.click_row(&TaskId::from("3"), RowTarget::Body).await;

    let detail = controller.snapshot().detail;
    assert!(detail.visible);
    assert_eq!(detail.name, "Exam");
    assert_eq!(detail.deadline, "2024-05-01");
    assert_eq!(detail.priority, "HIGH");
    assert_eq!(detail.notes, "");
}

#[tokio::test]
async fn failed_notes_save_keeps_modal_and_text() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    host.notes_replies
        .borrow_mut()
        .push_back(Err(GatewayError::transport(
            Operation::SetNotes,
            "disk full",
        )));
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;
    controller.click_row(&TaskId::from("3"), RowTarget::Body).await;

    controller.edit_notes("read chapter 5".to_string());
    controller.save_notes().await;

    let detail = controller.snapshot().detail;
    assert!(detail.visible);
    assert_eq!(detail.notes, "read chapter 5");
    assert_eq!(controller.gateway().count("list"), 1);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error saving notes: disk full"]
    );
}

#[tokio::test]
async fn rejected_notes_save_keeps_modal_and_text() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    host.notes_replies
        .borrow_mut()
        .push_back(Err(GatewayError::Rejected {
            operation: Operation::SetNotes,
        }));
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;
    controller.click_row(&TaskId::from("3"), RowTarget::Body).await;

    controller.edit_notes("bring calculator".to_string());
    controller.save_notes().await;

    let detail = controller.snapshot().detail;
    assert!(detail.visible);
    assert_eq!(detail.notes, "bring calculator");
    assert_eq!(controller.gateway().count("list"), 1);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error: Could not save notes!"]
    );
}

#[tokio::test]
async fn failed_fetch_keeps_detail_closed_and_unbound() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;
    controller.gateway().tasks.borrow_mut().clear();

    controller.click_row(&TaskId::from("3"), RowTarget::Body).await;

    assert!(!controller.snapshot().detail.visible);
    assert_eq!(
        controller.dialogs().alerts(),
        vec!["Error loading task details: task not found"]
    );

    controller.save_notes().await;
    assert_eq!(controller.gateway().count("notes"), 0);
    assert_eq!(
        controller.dialogs().alerts().last().map(String::as_str),
        Some(NO_OPEN_DETAIL_MESSAGE)
    );
}

#[tokio::test]
async fn saved_notes_close_modal_and_reload_once() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    host.notes_replies.borrow_mut().push_back(Ok(()));
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;
    controller.click_row(&TaskId::from("3"), RowTarget::Body).await;

    controller.edit_notes("done".to_string());
    controller.save_notes().await;

    assert!(!controller.snapshot().detail.visible);
    assert_eq!(
        controller.gateway().calls(),
        vec!["list", "fetch:3", "notes:3:done", "list"]
    );
}

#[tokio::test]
async fn modals_are_independent() {
    let host = ScriptedHost::with_tasks(vec![task("3", "Exam", "TEST")]);
    let controller = Controller::new(host, RecordingDialogs::default());
    controller.reload().await;

    controller.open_create_form(today());
    controller.click_row(&TaskId::from("3"), RowTarget::Body).await;

    let state = controller.snapshot();
    assert!(state.create_form.visible);
    assert!(state.detail.visible);

    controller.close_detail();
    assert!(controller.snapshot().create_form.visible);
}
