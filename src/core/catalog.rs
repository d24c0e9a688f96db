//! Immutable registry of command templates.
//!
//! A catalog is an ordered list of categories (tool families such as `git`
//! or `docker`), each holding an ordered list of subcommands mapped to a
//! [`TemplateRecord`]. Insertion order is the display order. Catalogs are
//! plain data: the built-in one is embedded JSON, and any other can be
//! loaded from a file with the same shape.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::io;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// A parameterized command string plus its human-facing description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub template: String,
    pub description: String,
    #[serde(default)]
    pub example: String,
}

/// A named subcommand within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    #[serde(flatten)]
    pub record: TemplateRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub commands: Vec<CommandEntry>,
}

impl Category {
    pub fn command(&self, subcommand: &str) -> Option<&TemplateRecord> {
        self.commands
            .iter()
            .find(|entry| entry.name == subcommand)
            .map(|entry| &entry.record)
    }

    pub fn subcommand_names(&self) -> Vec<&str> {
        self.commands.iter().map(|entry| entry.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate keys and empty categories.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        validate(&categories, None)?;
        Ok(Self { categories })
    }

    /// Used by search, whose output is always a subset of a validated catalog.
    pub(crate) fn from_validated(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Parse a catalog from JSON. `source` names the origin in error details.
    pub fn from_json(raw: &str, source: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| Error::config_invalid_json(source.to_string(), e))?;

        validate(&file.categories, Some(source))?;
        Ok(Self {
            categories: file.categories,
        })
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG, "builtin")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let raw = io::read_file(path, &format!("read catalog {}", display))?;
        let catalog = Self::from_json(&raw, &display)?;
        crate::log_status!(
            "catalog",
            "Loaded {} categories from {}",
            catalog.len(),
            display
        );
        Ok(catalog)
    }

    /// Load the catalog at `path` (with `~` expansion), or the built-in one.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let expanded = shellexpand::tilde(path).to_string();
                Self::load(Path::new(&expanded))
            }
            None => Self::builtin(),
        }
    }

    /// Category keys in display order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Subcommand keys of `category` in display order.
    pub fn subcommands(&self, category: &str) -> Result<Vec<&str>> {
        Ok(self.category(category)?.subcommand_names())
    }

    pub fn record(&self, category: &str, subcommand: &str) -> Result<&TemplateRecord> {
        let found = self.category(category)?;
        found.command(subcommand).ok_or_else(|| {
            Error::subcommand_not_found(
                category,
                subcommand,
                found
                    .subcommand_names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            )
        })
    }

    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                Error::category_not_found(
                    name,
                    self.categories().into_iter().map(String::from).collect(),
                )
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of subcommands across all categories.
    pub fn command_count(&self) -> usize {
        self.categories.iter().map(|c| c.commands.len()).sum()
    }
}

fn validate(categories: &[Category], source: Option<&str>) -> Result<()> {
    let invalid = |problem: String| Error::catalog_invalid(problem, source.map(String::from));
    let mut seen_categories = HashSet::new();

    for category in categories {
        if category.name.is_empty() {
            return Err(invalid("category name cannot be empty".to_string()));
        }
        if !seen_categories.insert(category.name.as_str()) {
            return Err(invalid(format!("duplicate category '{}'", category.name)));
        }
        if category.commands.is_empty() {
            return Err(invalid(format!(
                "category '{}' has no commands",
                category.name
            )));
        }

        let mut seen_commands = HashSet::new();
        for entry in &category.commands {
            if entry.name.is_empty() {
                return Err(invalid(format!(
                    "empty subcommand name in '{}'",
                    category.name
                )));
            }
            if !seen_commands.insert(entry.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate subcommand '{}' in '{}'",
                    entry.name, category.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(name: &str, template: &str) -> CommandEntry {
        CommandEntry {
            name: name.to_string(),
            record: TemplateRecord {
                template: template.to_string(),
                description: format!("{} description", name),
                example: String::new(),
            },
        }
    }

    #[test]
    fn builtin_has_reference_categories_in_order() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.categories(),
            vec!["git", "docker", "npm", "kubernetes"]
        );
        assert_eq!(
            catalog.subcommands("git").unwrap(),
            vec!["clone", "branch", "commit", "stash", "rebase"]
        );
    }

    #[test]
    fn record_returns_template() {
        let catalog = Catalog::builtin().unwrap();
        let record = catalog.record("git", "clone").unwrap();
        assert_eq!(record.template, "git clone {repository} {directory}");
        assert_eq!(
            record.description,
            "Clone a repository into a new directory"
        );
    }

    #[test]
    fn unknown_category_is_not_found() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.subcommands("brew").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogCategoryNotFound);
        assert_eq!(err.details["available"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn unknown_subcommand_is_not_found() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.record("git", "nonexistent").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogSubcommandNotFound);
        assert_eq!(err.details["category"], "git");
        assert_eq!(err.details["available"][0], "clone");
    }

    #[test]
    fn duplicate_category_rejected() {
        let err = Catalog::new(vec![
            Category {
                name: "git".to_string(),
                commands: vec![entry("a", "a")],
            },
            Category {
                name: "git".to_string(),
                commands: vec![entry("b", "b")],
            },
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogInvalid);
    }

    #[test]
    fn duplicate_subcommand_rejected() {
        let err = Catalog::new(vec![Category {
            name: "git".to_string(),
            commands: vec![entry("a", "x"), entry("a", "y")],
        }])
        .unwrap_err();
        assert!(err.details["problem"]
            .as_str()
            .unwrap()
            .contains("duplicate subcommand"));
    }

    #[test]
    fn empty_category_rejected() {
        let err = Catalog::new(vec![Category {
            name: "git".to_string(),
            commands: vec![],
        }])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogInvalid);
    }

    #[test]
    fn from_json_reports_source_on_bad_json() {
        let err = Catalog::from_json("{ not json", "custom.json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
        assert_eq!(err.details["path"], "custom.json");
    }

    #[test]
    fn from_json_reports_source_on_invalid_shape() {
        let raw = r#"{"categories":[{"name":"","commands":[]}]}"#;
        let err = Catalog::from_json(raw, "custom.json").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogInvalid);
        assert_eq!(err.details["source"], "custom.json");
    }

    #[test]
    fn example_is_optional() {
        let raw = r#"{"categories":[{"name":"make","commands":[
            {"name":"build","template":"make {target}","description":"Build a target"}
        ]}]}"#;
        let catalog = Catalog::from_json(raw, "inline").unwrap();
        assert_eq!(catalog.record("make", "build").unwrap().example, "");
    }

    #[test]
    fn load_reads_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories":[{{"name":"cargo","commands":[
                {{"name":"test","template":"cargo test -p {{crate}}","description":"Run tests","example":"cargo test -p core"}}
            ]}}]}}"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.categories(), vec!["cargo"]);
        assert_eq!(catalog.command_count(), 1);
        assert_eq!(
            catalog.record("cargo", "test").unwrap().template,
            "cargo test -p {crate}"
        );
    }

    #[test]
    fn resolve_without_path_is_builtin() {
        let catalog = Catalog::resolve(None).unwrap();
        assert_eq!(catalog, Catalog::builtin().unwrap());
    }

    #[test]
    fn resolve_missing_file_is_io_error() {
        let err = Catalog::resolve(Some("/nonexistent/catalog.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalIoError);
    }
}
