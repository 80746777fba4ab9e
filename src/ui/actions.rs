use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::template_io;
use crate::state::messages;
use crate::state::mode::{missing_required, OperationMode};
use crate::state::template::Template;
use crate::ui::app::{notify_error, notify_info, Notice};

pub async fn open_template(
    mut template: Signal<Template>,
    mut mode: Signal<OperationMode>,
    mut file_path: Signal<Option<PathBuf>>,
    mut notice: Signal<Option<Notice>>,
) {
    let task = rfd::AsyncFileDialog::new()
        .add_filter(messages::tr("dialog.template_filter"), &["json"])
        .pick_file()
        .await;

    if let Some(handle) = task {
        let path = handle.path().to_path_buf();
        match template_io::load_template(&path) {
            Ok(loaded) => {
                mode.set(loaded.default_mode());
                template.set(loaded);
                file_path.set(Some(path));
                notice.set(None);
            }
            Err(e) => notify_error(notice, e.to_string()),
        }
    }
}

/// Saves to the current path, asking for one first if there is none.
pub async fn save_template(
    template: Signal<Template>,
    mut file_path: Signal<Option<PathBuf>>,
    mut notice: Signal<Option<Notice>>,
) -> bool {
    let existing = file_path.read().clone();
    let path = match existing {
        Some(path) => path,
        None => {
            let suggested = template_io::default_file_name(&template.read());
            let picked = rfd::AsyncFileDialog::new()
                .add_filter(messages::tr("dialog.template_filter"), &["json"])
                .set_file_name(suggested.to_string_lossy())
                .save_file()
                .await;
            let Some(handle) = picked else {
                notify_error(notice, messages::tr("error.no_file_path"));
                return false;
            };
            handle.path().to_path_buf()
        }
    };

    let snapshot = template.read().clone();
    if let Err(err) = template_io::save_template(&path, &snapshot) {
        notify_error(notice, err.to_string());
        return false;
    }

    file_path.set(Some(path));
    notice.set(None);
    true
}

/// Checks that every required field is filled in.
pub fn submit(template: Signal<Template>, mode: OperationMode, notice: Signal<Option<Notice>>) -> bool {
    let missing = missing_required(&template.read().rows, mode);
    if missing.is_empty() {
        notify_info(notice, messages::tr("toolbar.submit_success"));
        true
    } else {
        notify_error(
            notice,
            messages::tr_with("error.required_missing", &[("count", &missing.len().to_string())]),
        );
        false
    }
}
