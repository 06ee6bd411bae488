use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  error,
  info,
  warn
};

const DEFAULT_PROBE_INTERVAL_MS: u64 =
  100;
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 0;

fn default_probe_interval_ms() -> u64 {
  DEFAULT_PROBE_INTERVAL_MS
}

fn default_probe_timeout_ms() -> u64 {
  DEFAULT_PROBE_TIMEOUT_MS
}

fn default_list_command() -> String {
  "get_all_tasks".to_string()
}

fn default_create_command() -> String {
  "add_task".to_string()
}

fn default_delete_command() -> String {
  "delete_task".to_string()
}

fn default_fetch_command() -> String {
  "get_task".to_string()
}

fn default_set_notes_command() -> String
{
  "set_task_notes".to_string()
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct ProbeConfig {
  #[serde(
    default = "default_probe_interval_ms"
  )]
  pub interval_ms: u64,
  /// `0` waits forever.
  #[serde(
    default = "default_probe_timeout_ms"
  )]
  pub timeout_ms:  u64
}

impl Default for ProbeConfig {
  fn default() -> Self {
    Self {
      interval_ms:
        default_probe_interval_ms(),
      timeout_ms:
        default_probe_timeout_ms()
    }
  }
}

/// Host command names, one per gateway
/// operation.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct CommandNames {
  #[serde(default = "default_list_command")]
  pub list:      String,
  #[serde(
    default = "default_create_command"
  )]
  pub create:    String,
  #[serde(
    default = "default_delete_command"
  )]
  pub delete:    String,
  #[serde(default = "default_fetch_command")]
  pub fetch:     String,
  #[serde(
    default = "default_set_notes_command"
  )]
  pub set_notes: String
}

impl Default for CommandNames {
  fn default() -> Self {
    Self {
      list:      default_list_command(),
      create:    default_create_command(),
      delete:    default_delete_command(),
      fetch:     default_fetch_command(),
      set_notes:
        default_set_notes_command()
    }
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Config {
  #[serde(default)]
  pub probe:    ProbeConfig,
  #[serde(default)]
  pub commands: CommandNames
}

impl Config {
  pub fn parse(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<Config>(text)
        .context(
          "failed parsing prowork \
           config"
        )?;
    sanitize_config(&mut config);
    Ok(config)
  }

  /// Parses embedded config, falling back
  /// to defaults on error.
  pub fn load_or_default(
    text: &str
  ) -> Self {
    match Self::parse(text) {
      | Ok(config) => {
        info!(
          interval_ms = config.probe.interval_ms,
          timeout_ms = config.probe.timeout_ms,
          "loaded prowork config"
        );
        config
      }
      | Err(error) => {
        error!(error = %format!("{error:#}"), "using default prowork config");
        Config::default()
      }
    }
  }
}

fn sanitize_config(config: &mut Config) {
  if config.probe.interval_ms == 0 {
    warn!(
      "probe interval of 0 ms; using \
       default"
    );
    config.probe.interval_ms =
      default_probe_interval_ms();
  }

  let defaults = CommandNames::default();
  let commands = &mut config.commands;
  for (name, fallback) in [
    (&mut commands.list, defaults.list),
    (
      &mut commands.create,
      defaults.create
    ),
    (
      &mut commands.delete,
      defaults.delete
    ),
    (&mut commands.fetch, defaults.fetch),
    (
      &mut commands.set_notes,
      defaults.set_notes
    )
  ] {
    if name.trim().is_empty() {
      warn!(
        fallback = %fallback,
        "blank host command name; using \
         default"
      );
      *name = fallback;
    }
  }
}
