//! Localized strings.
//!
//! Lang files live in `data/lang/*.ron` and hold a flat map of keys to
//! templates. Positional placeholders `{0}`, `{1}`, ... are replaced by the
//! arguments passed to [`Lang::get`]. Later files override earlier ones.
use crate::ron::load_ron_files;
use bevy::prelude::Resource;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LangFile {
    entries: HashMap<String, String>,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct Lang {
    pub entries: HashMap<String, String>,
}

impl Lang {
    /// Look up `key` and substitute positional arguments.
    ///
    /// Unknown keys render as the key itself so missing translations stay visible.
    #[must_use]
    pub fn get(&self, key: &str, args: &[&dyn std::fmt::Display]) -> String {
        let Some(template) = self.entries.get(key) else {
            return key.to_string();
        };
        let mut out = template.clone();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), &arg.to_string());
        }
        out
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

/// Load and merge every lang file in `path`.
#[must_use]
pub fn load_lang_from_dir(path: impl AsRef<Path>) -> Lang {
    let files: Vec<LangFile> = load_ron_files(path);
    let mut lang = Lang::default();
    for file in files {
        lang.entries.extend(file.entries);
    }
    lang
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_arguments() {
        let mut lang = Lang::default();
        lang.insert("bonfire-fuel", "Fuel: {0}/{1}");
        assert_eq!(lang.get("bonfire-fuel", &[&3, &32]), "Fuel: 3/32");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let lang = Lang::default();
        assert_eq!(lang.get("blockhelp-bonfire-fuel", &[]), "blockhelp-bonfire-fuel");
    }

    #[test]
    fn bundled_english_file_has_bonfire_keys() {
        let lang = load_lang_from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data/lang"));
        for key in ["bonfire-fuel", "blockhelp-firepit-ignite", "blockhelp-bonfire-fuel"] {
            assert!(lang.entries.contains_key(key), "missing {key}");
        }
    }
}
