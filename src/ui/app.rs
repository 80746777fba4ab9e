use dioxus::prelude::*;
use std::path::PathBuf;
use tracing::warn;

use crate::config::AppConfig;
use crate::io::local_services::{LocalFileStore, LocalTagCatalog};
use crate::io::template_io;
use crate::state::messages;
use crate::state::mode::TableConfig;
use crate::state::template::{Template, TemplateKind};
use crate::ui::table::CustomTable;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

/// Collaborators shared by every table in the tree.
#[derive(Clone)]
pub struct Services {
    pub tags: LocalTagCatalog,
    pub files: LocalFileStore,
    pub project: String,
    pub file_endpoint: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// The single notification channel of the window.
pub fn use_notice() -> Signal<Option<Notice>> {
    use_context::<Signal<Option<Notice>>>()
}

pub fn notify_error(mut notice: Signal<Option<Notice>>, text: impl Into<String>) {
    notice.set(Some(Notice {
        level: NoticeLevel::Error,
        text: text.into(),
    }));
}

pub fn notify_info(mut notice: Signal<Option<Notice>>, text: impl Into<String>) {
    notice.set(Some(Notice {
        level: NoticeLevel::Info,
        text: text.into(),
    }));
}

#[component]
pub fn App() -> Element {
    let config = use_hook(|| {
        try_consume_context::<AppConfig>().unwrap_or_else(|| {
            AppConfig::from_env().unwrap_or_else(|err| {
                warn!(error = %err, "invalid configuration, using defaults");
                AppConfig::default()
            })
        })
    });

    use_context_provider(|| Services {
        tags: LocalTagCatalog::new(config.tags.clone()),
        files: LocalFileStore::new(config.storage_dir.clone(), config.bucket.clone()),
        project: config.project.clone(),
        file_endpoint: config.file_endpoint.clone().unwrap_or_else(|| {
            LocalFileStore::new(config.storage_dir.clone(), config.bucket.clone()).endpoint()
        }),
    });
    let mut notice = use_context_provider(|| Signal::new(None::<Notice>));

    let mut template = use_signal(|| Template::new("", TemplateKind::Scenario));
    let mode = use_signal(|| config.mode);
    let mut file_path = use_signal::<Option<PathBuf>>(|| None);
    let save_success = use_signal(|| false);

    use_effect({
        let open = config.open.clone();
        move || {
            let Some(path) = open.clone() else {
                return;
            };
            match template_io::load_template(&path) {
                Ok(loaded) => {
                    template.set(loaded);
                    file_path.set(Some(path));
                    notice.set(None);
                }
                Err(e) => notify_error(notice, e.to_string()),
            }
        }
    });

    let table_config = TableConfig::with_max_columns(config.max_columns);
    let rows = template.read().rows.clone();
    let template_id = template.read().id;
    let current_mode = *mode.read();
    let mode_code = current_mode.code();
    let title = messages::tr("app.title");

    rsx! {
        document::Stylesheet { href: STYLES }
        document::Title { "{title}" }
        div { class: "app",
            Toolbar { template, mode, file_path, save_success }
            if let Some(current) = notice.read().as_ref() {
                div {
                    class: if current.level == NoticeLevel::Error { "notice notice-error" } else { "notice" },
                    id: "notice",
                    onclick: move |_| notice.set(None),
                    "{current.text}"
                }
            }
            div { class: "document",
                CustomTable {
                    key: "{template_id}-{mode_code}",
                    rows,
                    mode: current_mode,
                    config: table_config,
                    depth: 0,
                    on_change: move |rows| {
                        template.with_mut(|t| t.rows = rows);
                    },
                }
            }
        }
    }
}
