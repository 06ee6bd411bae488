//! Task list front-end logic for the
//! ProWork desktop client: the host
//! command contract, the list renderer,
//! and the interaction state machine.

pub mod config;
pub mod controller;
pub mod gateway;
pub mod model;
pub mod probe;
pub mod render;

pub use config::{
  CommandNames,
  Config,
  ProbeConfig
};
pub use controller::{
  Controller,
  CreateForm,
  DetailModal,
  Dialogs,
  ListState,
  RowTarget,
  UiState
};
pub use gateway::{
  CallResult,
  CommandGateway,
  GatewayError,
  Operation
};
pub use model::{
  TaskDraft,
  TaskId,
  TaskRecord
};
pub use probe::{
  ProbeError,
  await_bridge
};
pub use render::{
  TaskListView,
  TaskRow,
  render_tasks
};
