//! Templates offered by the "/" command menu

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::runtime::TemplateCatalog;

/// A named body of text inserted in place of `/filter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub body: String,
}

impl TemplateItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            body: body.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Case-insensitive substring match against title, description, or category.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Templates whose title, description, or category contains `filter`.
/// An empty filter returns every template. Catalog order is kept.
pub fn filter_templates(templates: &[TemplateItem], filter: &str) -> Vec<TemplateItem> {
    let needle = filter.trim().to_lowercase();
    templates
        .iter()
        .filter(|t| needle.is_empty() || t.matches(&needle))
        .cloned()
        .collect()
}

/// Values substituted for `{{name}}` placeholders in template bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateVars(BTreeMap<String, String>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Replace known `{{name}}` placeholders; unknown ones are left as written
    pub fn expand(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len());
        let mut rest = body;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                Some(close) => {
                    let placeholder = &rest[open..open + 2 + close + 2];
                    match self.get(after[..close].trim()) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(placeholder),
                    }
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[derive(Debug, Default, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    templates: Vec<TemplateItem>,
}

/// Template catalog read from a YAML file (`templates:` list)
#[derive(Debug, Clone, Default)]
pub struct YamlTemplateCatalog {
    path: Option<PathBuf>,
    items: Vec<TemplateItem>,
}

impl YamlTemplateCatalog {
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        let file: TemplateFile =
            serde_yaml::from_str(source).context("Failed to parse template catalog")?;
        Ok(Self {
            path: None,
            items: file.templates,
        })
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read templates from {}", path.display()))?;
        let mut catalog = Self::from_yaml(&source)
            .with_context(|| format!("Invalid templates file {}", path.display()))?;
        catalog.path = Some(path.to_path_buf());
        tracing::info!(
            "Loaded {} templates from {}",
            catalog.items.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Catalog from the user's `templates.yaml`, or empty if missing or unreadable
    pub fn load_default() -> Self {
        let Some(path) = crate::config_paths::templates_file() else {
            tracing::debug!("No config directory available, no templates");
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!("Templates file not found at {}", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn items(&self) -> &[TemplateItem] {
        &self.items
    }
}

impl TemplateCatalog for YamlTemplateCatalog {
    fn templates(&self) -> Vec<TemplateItem> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<TemplateItem> {
        vec![
            TemplateItem::new("meeting", "Meeting notes", "## {{date}}\n- ")
                .with_category("Work"),
            TemplateItem::new("todo", "Todo", "- [ ] ").with_description("Checklist item"),
            TemplateItem::new("journal", "Journal", "Today I ").with_category("Personal"),
        ]
    }

    #[test]
    fn test_empty_filter_returns_all() {
        assert_eq!(filter_templates(&catalog(), "").len(), 3);
    }

    #[test]
    fn test_filter_matches_any_field_case_insensitively() {
        let ids = |filter| {
            filter_templates(&catalog(), filter)
                .into_iter()
                .map(|t| t.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids("MEET"), vec!["meeting"]);
        assert_eq!(ids("check"), vec!["todo"]);
        assert_eq!(ids("personal"), vec!["journal"]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn test_expand_placeholders() {
        let vars = TemplateVars::new().with("date", "2024-05-01");
        assert_eq!(vars.expand("## {{date}} / {{ date }}"), "## 2024-05-01 / 2024-05-01");
        assert_eq!(vars.expand("{{unknown}} and {{open"), "{{unknown}} and {{open");
    }

    #[test]
    fn test_yaml_catalog() {
        let source = "templates:\n  - id: todo\n    title: Todo\n    body: \"- [ ] \"\n";
        let catalog = YamlTemplateCatalog::from_yaml(source).unwrap();
        assert_eq!(catalog.templates().len(), 1);
        assert_eq!(catalog.items()[0].category, "");
        assert!(YamlTemplateCatalog::from_yaml("templates: 3").is_err());
    }
}
