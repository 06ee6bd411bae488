mod task_detail_modal;
mod task_form_modal;
mod task_list;
mod task_list_row;

pub use task_detail_modal::TaskDetailModal;
pub use task_form_modal::TaskFormModal;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
