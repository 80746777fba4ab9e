use dioxus::prelude::*;
use std::path::PathBuf;

use crate::state::messages;
use crate::state::mode::OperationMode;
use crate::state::template::{Template, TemplateKind};
use crate::ui::actions;
use crate::ui::app::use_notice;

#[component]
pub fn Toolbar(
    template: Signal<Template>,
    mode: Signal<OperationMode>,
    file_path: Signal<Option<PathBuf>>,
    save_success: Signal<bool>,
) -> Element {
    let mut notice = use_notice();
    let current_mode = *mode.read();
    let current_kind = template.read().kind;
    let current_name = template.read().name.clone();

    let new_label = messages::tr("toolbar.new");
    let open_label = messages::tr("toolbar.open");
    let save_label = messages::tr("toolbar.save");
    let submit_label = messages::tr("toolbar.submit");
    let name_placeholder = messages::tr("toolbar.name_placeholder");
    let save_success_label = messages::tr("toolbar.save_success");

    rsx! {
        div { class: "toolbar",
            // File group
            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-new",
                    onclick: move |_| {
                        let kind = template.read().kind;
                        template.set(Template::new("", kind));
                        file_path.set(None);
                        mode.set(OperationMode::Edit);
                        notice.set(None);
                    },
                    "\u{1F4C4} {new_label}"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-open",
                    onclick: move |_| {
                        spawn(async move {
                            actions::open_template(template, mode, file_path, notice).await;
                        });
                    },
                    "\u{1F4C2} {open_label}"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-save",
                    onclick: move |_| {
                        spawn(async move {
                            if actions::save_template(template, file_path, notice).await {
                                save_success.set(true);
                                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                                save_success.set(false);
                            }
                        });
                    },
                    "\u{1F4BE} {save_label}"
                }
                if *save_success.read() {
                    span { class: "save-success", "\u{2714} {save_success_label}" }
                }
            }
            div { class: "toolbar-separator" }

            // Document group
            div { class: "toolbar-group",
                input {
                    class: "toolbar-input",
                    id: "input-template-name",
                    placeholder: "{name_placeholder}",
                    value: "{current_name}",
                    disabled: current_mode == OperationMode::View,
                    oninput: move |evt| {
                        template.with_mut(|t| t.name = evt.value());
                    }
                }
                select {
                    class: "toolbar-select",
                    id: "select-kind",
                    value: "{current_kind.code()}",
                    disabled: current_mode != OperationMode::Edit,
                    onchange: move |evt| {
                        if let Some(kind) = TemplateKind::from_code(&evt.value()) {
                            template.with_mut(|t| t.kind = kind);
                        }
                    },
                    for kind in TemplateKind::all().iter().copied() {
                        option { value: "{kind.code()}", "{messages::tr(kind.label_key())}" }
                    }
                }
                select {
                    class: "toolbar-select",
                    id: "select-mode",
                    value: "{current_mode.code()}",
                    onchange: move |evt| {
                        if let Some(next) = OperationMode::from_code(&evt.value()) {
                            mode.set(next);
                        }
                    },
                    for option_mode in OperationMode::all().iter().copied() {
                        option { value: "{option_mode.code()}", "{messages::tr(option_mode.label_key())}" }
                    }
                }
            }
            if current_mode == OperationMode::FillIn {
                div { class: "toolbar-separator" }
                div { class: "toolbar-group",
                    button {
                        class: "toolbar-btn toolbar-btn-primary",
                        id: "btn-submit",
                        onclick: move |_| {
                            actions::submit(template, current_mode, notice);
                        },
                        "\u{2705} {submit_label}"
                    }
                }
            }
        }
    }
}
