//! Registry of process templates, keyed by process type.
//!
//! Templates arrive as one JSON document:
//! `{"templates": {"<key>": { "label": ..., "expected_flow": [...], ... }}}`.

use std::collections::BTreeMap;
use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::ProcessTemplate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateStore {
    templates: BTreeMap<String, ProcessTemplate>,
}

impl TemplateStore {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read templates from {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse templates in {}", path.display()))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let store: TemplateStore = serde_json::from_str(contents)?;
        Ok(store)
    }

    pub fn insert(&mut self, key: impl Into<String>, template: ProcessTemplate) {
        self.templates.insert(key.into(), template);
    }

    /// Template for `key`; a missing template is a hard error.
    pub fn get(&self, key: &str) -> Result<&ProcessTemplate> {
        self.templates
            .get(key)
            .ok_or_else(|| anyhow!("template {key:?} not found"))
    }

    /// Resolve an operator-facing display label to its template key.
    pub fn find_by_label(&self, label: &str) -> Option<&str> {
        self.templates
            .iter()
            .find(|(_, template)| template.label.as_deref() == Some(label))
            .map(|(key, _)| key.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
