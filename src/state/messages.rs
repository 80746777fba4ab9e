use std::collections::BTreeMap;
use std::sync::OnceLock;

/// User-facing text for `key`, falling back to the key itself.
pub fn tr(key: &str) -> &str {
    catalog().get(key).map(String::as_str).unwrap_or(key)
}

/// Text for `key` with `{name}` placeholders filled from `args`.
pub fn tr_with(key: &str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(tr(key).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

fn catalog() -> &'static BTreeMap<String, String> {
    CATALOG.get_or_init(|| {
        serde_json::from_str(include_str!("../../assets/i18n/en.json"))
            .unwrap_or_else(|err| panic!("failed to parse message catalog: {err}"))
    })
}

static CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();
