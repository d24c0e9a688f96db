//! Per-user orchestration of the engine.
//!
//! A `Session` owns the mutable state (parameter store and history) and
//! shares a read-only catalog. Each session gets its own store and ring;
//! only the catalog may be shared between sessions.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, TemplateRecord};
use crate::error::{Error, Result};
use crate::history::HistoryRing;
use crate::params::{ParameterStore, Selection};
use crate::placeholder::{self, Field};
use crate::render::{self, RenderOutput, UnresolvedPolicy};
use crate::search;

/// A resolved selection with everything a UI needs to collect input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandView {
    pub category: String,
    pub subcommand: String,
    #[serde(flatten)]
    pub record: TemplateRecord,
    pub fields: Vec<Field>,
}

impl CommandView {
    pub fn resolve(catalog: &Catalog, category: &str, subcommand: &str) -> Result<Self> {
        let record = catalog.record(category, subcommand)?.clone();
        let fields = placeholder::fields(&record.template);

        Ok(Self {
            category: category.to_string(),
            subcommand: subcommand.to_string(),
            record,
            fields,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    params: ParameterStore,
    history: HistoryRing,
    policy: UnresolvedPolicy,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            params: ParameterStore::new(),
            history: HistoryRing::default(),
            policy: UnresolvedPolicy::default(),
        }
    }

    pub fn with_history(mut self, history: HistoryRing) -> Self {
        self.history = history;
        self
    }

    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Select a subcommand. Parameters are cleared only when the lookup
    /// succeeds, so a bad selection leaves the previous one intact.
    pub fn select(&mut self, category: &str, subcommand: &str) -> Result<CommandView> {
        let view = CommandView::resolve(&self.catalog, category, subcommand)?;
        self.params.reset(category, subcommand);
        Ok(view)
    }

    /// Select a category and default to its first subcommand.
    pub fn select_category(&mut self, category: &str) -> Result<CommandView> {
        let subcommand = self
            .catalog
            .subcommands(category)?
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                Error::catalog_invalid(format!("category '{}' has no commands", category), None)
            })?;

        self.select(category, &subcommand)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.params.selection()
    }

    /// View of the current selection, if any.
    pub fn current(&self) -> Result<CommandView> {
        let selection = self.params.selection().ok_or_else(Error::session_no_selection)?;
        CommandView::resolve(&self.catalog, &selection.category, &selection.subcommand)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.set(name, value);
    }

    pub fn get(&self, name: &str) -> &str {
        self.params.get(name)
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.params
    }

    /// Render the current selection and record the command in history.
    pub fn generate(&mut self) -> Result<RenderOutput> {
        let output = self.preview()?;
        self.history.push(output.command.clone());
        Ok(output)
    }

    /// Render the current selection without touching history.
    pub fn preview(&self) -> Result<RenderOutput> {
        let selection = self.params.selection().ok_or_else(Error::session_no_selection)?;
        render::render_selection(
            &self.catalog,
            selection,
            &self.params.snapshot(),
            self.policy,
        )
    }

    pub fn search(&self, term: &str) -> Catalog {
        search::filter(&self.catalog, term)
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// A previously generated command, newest = 0.
    pub fn recall(&self, index: usize) -> Option<&str> {
        self.history.get(index)
    }

    pub fn into_history(self) -> HistoryRing {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn session() -> Session {
        Session::new(Arc::new(Catalog::builtin().unwrap()))
    }

    #[test]
    fn select_returns_fields_and_details() {
        let mut session = session();
        let view = session.select("docker", "run").unwrap();

        let names: Vec<&str> = view.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["port", "container-port", "container-name", "image"]);
        assert_eq!(view.record.description, "Run a container in detached mode");
        assert_eq!(
            session.selection(),
            Some(&Selection::new("docker", "run"))
        );
    }

    #[test]
    fn select_category_defaults_to_first_subcommand() {
        let mut session = session();
        let view = session.select_category("kubernetes").unwrap();
        assert_eq!(view.subcommand, "apply");
    }

    #[test]
    fn failed_select_keeps_previous_state() {
        let mut session = session();
        session.select("git", "commit").unwrap();
        session.set("message", "wip");

        let err = session.select("git", "nonexistent").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogSubcommandNotFound);
        assert_eq!(session.get("message"), "wip");
        assert_eq!(session.selection(), Some(&Selection::new("git", "commit")));
    }

    #[test]
    fn reselecting_clears_shared_placeholder() {
        let mut session = session();
        session.select("git", "commit").unwrap();
        session.set("message", "old");
        session.select("git", "stash").unwrap();

        let out = session.generate().unwrap();
        assert_eq!(out.command, "git stash push -m \"\"");
        assert_eq!(out.unresolved, vec!["message"]);
    }

    #[test]
    fn generate_without_selection_fails() {
        let mut session = session();
        let err = session.generate().unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNoSelection);
        assert!(session.history().is_empty());
    }

    #[test]
    fn generate_pushes_history_and_preview_does_not() {
        let mut session = session();
        session.select("npm", "publish").unwrap();
        session.set("tag", "beta");

        session.preview().unwrap();
        assert!(session.history().is_empty());

        session.generate().unwrap();
        session.generate().unwrap();
        assert_eq!(session.history().entries(), vec!["npm publish --tag beta"]);
        assert_eq!(session.recall(0), Some("npm publish --tag beta"));
        assert_eq!(session.recall(1), None);
    }

    #[test]
    fn keep_policy_applies_to_generate() {
        let mut session = session().with_policy(UnresolvedPolicy::Keep);
        session.select("npm", "publish").unwrap();
        let out = session.generate().unwrap();
        assert_eq!(out.command, "npm publish --tag {tag}");
    }

    #[test]
    fn sessions_sharing_a_catalog_are_independent() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let mut a = Session::new(Arc::clone(&catalog));
        let mut b = Session::new(Arc::clone(&catalog));

        a.select("git", "branch").unwrap();
        a.set("branch-name", "feature/x");
        a.generate().unwrap();

        assert!(b.selection().is_none());
        assert!(b.history().is_empty());
        b.select("git", "branch").unwrap();
        assert_eq!(b.get("branch-name"), "");
    }

    #[test]
    fn clear_history_empties_ring() {
        let mut session = session().with_history(HistoryRing::from_entries(10, ["ls"]));
        assert_eq!(session.recall(0), Some("ls"));
        session.clear_history();
        assert!(session.into_history().is_empty());
    }

    #[test]
    fn current_reflects_selection() {
        let mut session = session();
        assert!(session.current().is_err());
        session.select("kubernetes", "port").unwrap();
        assert_eq!(session.current().unwrap().subcommand, "port");
    }

    #[test]
    fn search_uses_session_catalog() {
        let session = session();
        assert_eq!(session.search("image").categories(), vec!["docker"]);
    }
}
