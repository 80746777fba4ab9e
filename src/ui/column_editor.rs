use dioxus::prelude::*;

use crate::state::column::{Column, ColumnType};
use crate::state::messages;
use crate::state::reference::ReferenceResolver;
use crate::state::type_editor::{ColumnTypeDraft, TagOptions};
use crate::ui::app::{notify_error, use_notice, Notice, Services};

/// Modal editing one column's schema. `on_close` gets the rewritten column
/// on confirm and `None` on cancel.
#[component]
pub fn ColumnTypeEditor(column: Column, depth: usize, on_close: EventHandler<Option<Column>>) -> Element {
    let services = use_context::<Services>();
    let notice = use_notice();
    let mut draft = use_signal(|| ColumnTypeDraft::open(&column, depth));
    let mut error = use_signal::<Option<&'static str>>(|| None);

    use_hook({
        let services = services.clone();
        move || load_tags_if_needed(draft, services, notice)
    });

    let current = draft.read().clone();
    let allowed = current.allowed_types();
    let loading = current.tag_options == TagOptions::Loading;
    let selected_tag = current.tag_id.map(|id| id.to_string()).unwrap_or_default();

    let title = messages::tr("editor.title");
    let type_label = messages::tr("editor.type");
    let content_label = messages::tr("editor.content");
    let placeholder_label = messages::tr("editor.placeholder");
    let tag_label = messages::tr("editor.tag");
    let choose_tag_label = messages::tr("editor.choose_tag");
    let confirm_label = messages::tr("editor.confirm");
    let cancel_label = messages::tr("editor.cancel");
    let loading_label = messages::tr("table.loading");

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", id: "column-editor",
                h3 { "{title}" }
                label { class: "modal-field",
                    span { "{type_label}" }
                    select {
                        class: "modal-select",
                        id: "editor-type",
                        value: "{current.column_type.code()}",
                        onchange: {
                            let services = services.clone();
                            move |evt: FormEvent| {
                                if let Some(column_type) = ColumnType::from_code(&evt.value()) {
                                    draft.with_mut(|d| d.set_type(column_type));
                                    error.set(None);
                                    load_tags_if_needed(draft, services.clone(), notice);
                                }
                            }
                        },
                        for column_type in allowed {
                            option { value: "{column_type.code()}", "{messages::tr(column_type.label_key())}" }
                        }
                    }
                }
                if current.shows_content() {
                    label { class: "modal-field",
                        span { "{content_label}" }
                        input {
                            class: "modal-input",
                            id: "editor-content",
                            value: "{current.content}",
                            required: crate::state::type_editor::content_required(current.column_type),
                            oninput: move |evt| draft.with_mut(|d| d.content = evt.value()),
                        }
                    }
                }
                if current.shows_placeholder() {
                    label { class: "modal-field",
                        span { "{placeholder_label}" }
                        input {
                            class: "modal-input",
                            id: "editor-placeholder",
                            value: "{current.placeholder}",
                            oninput: move |evt| draft.with_mut(|d| d.placeholder = evt.value()),
                        }
                    }
                }
                if current.column_type == ColumnType::Tag {
                    label { class: "modal-field",
                        span { "{tag_label}" }
                        if loading {
                            div { class: "loading-overlay", "{loading_label}" }
                        } else {
                            select {
                                class: "modal-select",
                                id: "editor-tag",
                                value: "{selected_tag}",
                                required: true,
                                onchange: move |evt| {
                                    let tag_id = evt.value().parse::<u64>().ok();
                                    draft.with_mut(|d| d.tag_id = tag_id);
                                },
                                option { value: "", "{choose_tag_label}" }
                                for tag in current.tag_options.tags().iter().cloned() {
                                    option { value: "{tag.id}", "{tag.name}" }
                                }
                            }
                        }
                    }
                }
                if let Some(key) = *error.read() {
                    p { class: "modal-error", "{messages::tr(key)}" }
                }
                div { class: "modal-actions",
                    button {
                        class: "toolbar-btn",
                        id: "editor-cancel",
                        onclick: move |_| on_close.call(None),
                        "{cancel_label}"
                    }
                    button {
                        class: "toolbar-btn toolbar-btn-primary",
                        id: "editor-confirm",
                        disabled: loading,
                        onclick: {
                            let column = column.clone();
                            move |_| {
                                let mut updated = column.clone();
                                match draft.read().clone().apply(&mut updated) {
                                    Ok(()) => on_close.call(Some(updated)),
                                    Err(err) => error.set(Some(err.message_key())),
                                }
                            }
                        },
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}

fn load_tags_if_needed(mut draft: Signal<ColumnTypeDraft>, services: Services, notice: Signal<Option<Notice>>) {
    if !draft.peek().needs_tag_options() {
        return;
    }
    draft.with_mut(|d| d.begin_tag_load());
    spawn(async move {
        let result = services.tags.tags_for_project(&services.project).await;
        if result.is_err() {
            notify_error(notice, messages::tr("error.tags_unavailable"));
        }
        draft.with_mut(|d| d.finish_tag_load(result));
    });
}
