//! Serialized command surface for the presentation layer.
//!
//! Each variant maps to one shell operation; [`BrowserShell::execute`]
//! returns the operation's reply as loose JSON, `Null` when there is
//! nothing to say.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use nimbus_common::{Side, TabId};
use nimbus_engine::Engine;

use crate::layout::ViewConfig;
use crate::shell::BrowserShell;
use crate::tab::TabOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
#[serde(rename_all_fields = "camelCase")]
pub enum ShellCommand {
    CreateTab {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        incognito: bool,
    },
    CloseTab {
        tab_id: TabId,
    },
    SwitchTab {
        tab_id: TabId,
    },
    Navigate {
        tab_id: TabId,
        url: String,
    },
    GoBack {
        tab_id: TabId,
    },
    GoForward {
        tab_id: TabId,
    },
    Refresh {
        tab_id: TabId,
    },
    StopLoading {
        tab_id: TabId,
    },
    ToggleSplit {
        tab_id: TabId,
    },
    SetFocusSide {
        tab_id: TabId,
        side: Side,
    },
    UpdateViewBounds {
        config: ViewConfig,
    },
    FindInPage {
        tab_id: TabId,
        text: String,
    },
    StopFind {
        tab_id: TabId,
    },
    SetZoom {
        tab_id: TabId,
        delta: i32,
    },
}

impl<E: Engine> BrowserShell<E> {
    pub fn execute(&mut self, command: ShellCommand) -> Value {
        match command {
            ShellCommand::CreateTab { url, incognito } => {
                let url = url.unwrap_or_default();
                match self.create_tab(&url, TabOptions { incognito }) {
                    Ok(id) => serde_json::to_value(id).unwrap_or(Value::Null),
                    Err(error) => {
                        warn!(%error, "create-tab command failed");
                        Value::Null
                    }
                }
            }
            ShellCommand::CloseTab { tab_id } => match self.close_tab(tab_id) {
                Some(outcome) => serde_json::to_value(outcome).unwrap_or(Value::Null),
                None => Value::Null,
            },
            ShellCommand::SwitchTab { tab_id } => {
                self.switch_tab(tab_id);
                Value::Null
            }
            ShellCommand::Navigate { tab_id, url } => {
                self.navigate(tab_id, &url);
                Value::Null
            }
            ShellCommand::GoBack { tab_id } => {
                self.go_back(tab_id);
                Value::Null
            }
            ShellCommand::GoForward { tab_id } => {
                self.go_forward(tab_id);
                Value::Null
            }
            ShellCommand::Refresh { tab_id } => {
                self.refresh(tab_id);
                Value::Null
            }
            ShellCommand::StopLoading { tab_id } => {
                self.stop_loading(tab_id);
                Value::Null
            }
            ShellCommand::ToggleSplit { tab_id } => Value::Bool(self.toggle_split(tab_id)),
            ShellCommand::SetFocusSide { tab_id, side } => {
                self.set_focus_side(tab_id, side);
                Value::Null
            }
            ShellCommand::UpdateViewBounds { config } => {
                self.update_view_bounds(config);
                Value::Null
            }
            ShellCommand::FindInPage { tab_id, text } => {
                self.find_in_page(tab_id, &text);
                Value::Null
            }
            ShellCommand::StopFind { tab_id } => {
                self.stop_find(tab_id);
                Value::Null
            }
            ShellCommand::SetZoom { tab_id, delta } => {
                Value::Number(self.set_zoom(tab_id, delta).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_deserialize_from_wire_shape() {
        let cmd: ShellCommand =
            serde_json::from_str(r#"{"cmd":"create-tab","url":"https://example.com/"}"#).unwrap();
        assert!(matches!(
            cmd,
            ShellCommand::CreateTab {
                url: Some(_),
                incognito: false
            }
        ));

        let cmd: ShellCommand = serde_json::from_str(r#"{"cmd":"close-tab","tabId":4}"#).unwrap();
        assert!(matches!(cmd, ShellCommand::CloseTab { tab_id: TabId(4) }));

        let cmd: ShellCommand =
            serde_json::from_str(r#"{"cmd":"set-focus-side","tabId":1,"side":"right"}"#).unwrap();
        assert!(matches!(
            cmd,
            ShellCommand::SetFocusSide {
                side: Side::Right,
                ..
            }
        ));
    }

    #[test]
    fn view_bounds_command_carries_full_config() {
        let cmd: ShellCommand = serde_json::from_str(
            r#"{"cmd":"update-view-bounds","config":{"toolbarHeight":60,"hidden":true}}"#,
        )
        .unwrap();
        match cmd {
            ShellCommand::UpdateViewBounds { config } => {
                assert_eq!(config.toolbar_height, 60);
                assert!(config.hidden);
                assert_eq!(config.left_offset, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
