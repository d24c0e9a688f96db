use std::sync::Arc;

use cmdforge::history::{load_file, save_file};
use cmdforge::{search, Catalog, ErrorCode, HistoryRing, Session};
use tempfile::TempDir;

fn session() -> Session {
    Session::new(Arc::new(Catalog::builtin().unwrap()))
}

#[test]
fn clone_with_both_values_renders_fully() {
    let mut session = session();
    session.select("git", "clone").unwrap();
    session.set("repository", "https://github.com/user/repo.git");
    session.set("directory", "./my-project");

    let out = session.generate().unwrap();

    assert_eq!(
        out.command,
        "git clone https://github.com/user/repo.git ./my-project"
    );
    assert!(out.unresolved.is_empty());
    assert_eq!(
        session.history().entries(),
        vec!["git clone https://github.com/user/repo.git ./my-project"]
    );
}

#[test]
fn docker_run_missing_name_leaves_gap() {
    let mut session = session();
    session.select("docker", "run").unwrap();
    session.set("port", "3000");
    session.set("container-port", "3000");
    session.set("image", "node:latest");

    let out = session.generate().unwrap();

    assert_eq!(out.command, "docker run -d -p 3000:3000 --name  node:latest");
    assert_eq!(out.unresolved, vec!["container-name"]);
}

#[test]
fn search_for_missing_term_is_empty() {
    let catalog = Catalog::builtin().unwrap();
    let result = search::filter(&catalog, "depre");
    assert!(result.is_empty());
    assert_eq!(result.command_count(), 0);
}

#[test]
fn search_matches_descriptions_across_categories() {
    let catalog = Catalog::builtin().unwrap();
    let result = search::filter(&catalog, "CONTAINER");

    assert_eq!(result.categories(), vec!["docker", "kubernetes"]);
    assert_eq!(result.subcommands("docker").unwrap(), vec!["run"]);
    assert_eq!(result.subcommands("kubernetes").unwrap(), vec!["logs"]);
}

#[test]
fn eleventh_distinct_command_evicts_oldest() {
    let mut session = session();
    session.select("git", "rebase").unwrap();

    for n in 1..=11 {
        session.set("number", n.to_string());
        session.generate().unwrap();
    }

    let entries = session.history().entries();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0], "git rebase -i HEAD~11");
    assert_eq!(entries[9], "git rebase -i HEAD~2");
    assert!(!session.history().contains("git rebase -i HEAD~1"));
}

#[test]
fn unknown_subcommand_fails_without_output() {
    let mut session = session();
    let err = session.select("git", "nonexistent").unwrap_err();

    assert_eq!(err.code, ErrorCode::CatalogSubcommandNotFound);
    assert!(session.selection().is_none());
    assert!(session.generate().is_err());
    assert!(session.history().is_empty());
}

#[test]
fn persisted_history_survives_a_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut first = session();
    first.select("npm", "publish").unwrap();
    first.set("tag", "beta");
    first.generate().unwrap();
    save_file(&path, first.history()).unwrap();

    let mut second = session().with_history(load_file(&path, 10).unwrap());
    assert_eq!(second.recall(0), Some("npm publish --tag beta"));

    second.select("npm", "audit").unwrap();
    second.generate().unwrap();
    assert_eq!(
        second.history().entries(),
        vec!["npm audit fix --force", "npm publish --tag beta"]
    );
}

#[test]
fn custom_catalog_file_drives_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{"categories":[{"name":"cargo","commands":[
            {"name":"test","template":"cargo test -p {crate} -- {filter}","description":"Run one crate's tests"}
        ]}]}"#,
    )
    .unwrap();

    let catalog = Catalog::resolve(path.to_str()).unwrap();
    let mut session = Session::new(Arc::new(catalog)).with_history(HistoryRing::new(1));
    let view = session.select_category("cargo").unwrap();
    assert_eq!(view.fields.len(), 2);

    session.set("crate", "core");
    session.set("filter", "render");
    assert_eq!(
        session.generate().unwrap().command,
        "cargo test -p core -- render"
    );
}
