use bamcheck_core::{AppViewModel, FileRowView, Msg, PickedFile, StatusLine};
use dioxus::prelude::*;

use super::constants::*;
use super::render::{file_row_label, tone_color};

#[component]
pub fn Shell(view: AppViewModel, on_msg: EventHandler<Msg>) -> Element {
    rsx! {
        div { class: "bc-shell",
            label { class: "bc-button",
                "{SELECT_LABEL}"
                input {
                    r#type: "file",
                    class: "bc-file-input",
                    multiple: true,
                    onchange: move |evt: FormEvent| {
                        on_msg.call(Msg::SelectionChanged(picked_files(&evt)));
                    },
                }
            }
            div { class: "bc-files",
                for row in view.files.iter().cloned() {
                    FileRow { key: "{row.name}", row }
                }
            }
            button {
                class: "bc-button",
                disabled: !view.confirm_enabled,
                onclick: move |_| on_msg.call(Msg::ConfirmClicked),
                "{CONFIRM_LABEL}"
            }
            button {
                class: "bc-button",
                onclick: move |_| on_msg.call(Msg::ClearClicked),
                "{CLEAR_LABEL}"
            }
            StatusText { line: view.status.clone() }
            StatusText { line: view.region_status.clone() }
        }
    }
}

#[component]
fn FileRow(row: FileRowView) -> Element {
    let label = file_row_label(&row);
    rsx! {
        div { class: "bc-file-row",
            progress {
                class: "bc-progress",
                style: "background-color: {PROGRESS_TRACK};",
                max: "1",
                value: "{row.progress}",
            }
            span { "{label}" }
        }
    }
}

#[component]
fn StatusText(line: Option<StatusLine>) -> Element {
    let Some(line) = line else {
        return rsx! {};
    };
    let color = tone_color(line.tone);
    rsx! {
        p { class: "bc-status", style: "color: {color};", "{line.text}" }
    }
}

/// Files chosen in the native dialog; an empty pick counts as cancelled.
fn picked_files(evt: &FormEvent) -> Option<Vec<PickedFile>> {
    let picked: Vec<PickedFile> = evt
        .files()
        .into_iter()
        .map(|file| PickedFile::new(file.name(), file.path()))
        .collect();
    (!picked.is_empty()).then_some(picked)
}
