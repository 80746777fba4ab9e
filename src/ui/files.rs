use dioxus::prelude::*;

use crate::state::column::FileRef;
use crate::state::messages;
use crate::state::mode::Capability;
use crate::state::upload::{file_url, upload_batch, PendingFile, UploadProgress};
use crate::ui::app::{notify_error, use_notice, Services};

/// Uploader for `File`/`MultipleFiles` columns, or a plain file list when the
/// mode asks for a viewer.
#[component]
pub fn FileCell(
    files: Vec<FileRef>,
    multiple: bool,
    capability: Capability,
    on_uploaded: EventHandler<Vec<FileRef>>,
    on_remove: EventHandler<String>,
) -> Element {
    let services = use_context::<Services>();
    let notice = use_notice();
    let mut progress = use_signal::<Option<UploadProgress>>(|| None);
    // Bumped to remount the file input, which clears the selection.
    let mut input_generation = use_signal(|| 0u64);

    let endpoint = services.file_endpoint.clone();
    let uploading = progress.read().clone();
    let busy = uploading.is_some();
    let generation = *input_generation.read();
    let upload_label = messages::tr("files.upload");
    let none_label = messages::tr("files.none");
    let remove_label = messages::tr("files.remove");

    rsx! {
        div { class: "file-cell",
            if files.is_empty() {
                span { class: "file-none", "{none_label}" }
            }
            ul { class: "file-list",
                for file in files.iter().cloned() {
                    li { key: "{file.id}",
                        a {
                            href: file_url(&endpoint, &file),
                            target: "_blank",
                            "{file.name}"
                        }
                        if capability.uploader_enabled && !capability.file_viewer {
                            button {
                                class: "cell-btn cell-btn-danger",
                                title: "{remove_label}",
                                disabled: busy,
                                onclick: {
                                    let file_id = file.id.clone();
                                    move |_| on_remove.call(file_id.clone())
                                },
                                "\u{2715}"
                            }
                        }
                    }
                }
            }
            if !capability.file_viewer {
                label { class: "file-upload",
                    span { "{upload_label}" }
                    for generation in [generation] {
                        input {
                            key: "{generation}",
                            r#type: "file",
                            multiple,
                            disabled: !capability.uploader_enabled || busy,
                            required: capability.input_required && files.is_empty(),
                            onchange: {
                                let services = services.clone();
                                move |evt: FormEvent| {
                                    let Some(engine) = evt.files() else {
                                        return;
                                    };
                                    let pending: Vec<PendingFile> = engine
                                        .files()
                                        .into_iter()
                                        .map(PendingFile::from_path)
                                        .collect();
                                    if pending.is_empty() {
                                        return;
                                    }
                                    let services = services.clone();
                                    spawn(async move {
                                        let outcome = upload_batch(&services.files, pending, |p| {
                                            progress.set(Some(p))
                                        })
                                        .await;
                                        progress.set(None);
                                        input_generation.with_mut(|g| *g += 1);
                                        if !outcome.uploaded.is_empty() {
                                            on_uploaded.call(outcome.uploaded);
                                        }
                                        if let Some(failure) = outcome.failure {
                                            notify_error(
                                                notice,
                                                messages::tr_with("error.upload_failed", &[("name", &failure.name)]),
                                            );
                                        }
                                    });
                                }
                            },
                        }
                    }
                }
                if let Some(current) = uploading {
                    span { class: "upload-progress",
                        {messages::tr_with(
                            "files.uploading",
                            &[
                                ("name", &current.name),
                                ("index", &(current.index + 1).to_string()),
                                ("total", &current.total.to_string()),
                            ],
                        )}
                    }
                }
            }
        }
    }
}
