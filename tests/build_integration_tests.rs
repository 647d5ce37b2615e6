use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use getctx::build::{BuildError, ContextBuilder, discover};
use getctx::core::action::{Action, Effect, update};
use getctx::core::exclusion::ExclusionPolicy;
use getctx::core::logging::LogPort;
use getctx::core::state::Browser;
use getctx::fs::{FileSystem, OsFileSystem};
use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Collects log record names so tests can check what was reported.
#[derive(Default)]
struct CollectingLogger {
    names: Mutex<Vec<(log::Level, String)>>,
}

impl LogPort for CollectingLogger {
    fn log(&self, level: log::Level, name: &str, _data: Value) {
        self.names.lock().unwrap().push((level, name.to_string()));
    }
}

/// Creates a project tree on disk:
///
/// ```text
/// proj/
/// ├── .git/HEAD
/// ├── a.txt          "hello"
/// ├── img.png        PNG magic
/// ├── node_modules/pkg/index.js
/// └── src/
///     ├── lib.rs
///     └── nested/mod.rs
/// ```
fn setup_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("proj");
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join("img.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "module.exports = 1;\n").unwrap();
    fs::write(root.join("src/lib.rs"), "pub mod nested;\n").unwrap();
    fs::write(root.join("src/nested/mod.rs"), "pub fn f() {}\n").unwrap();

    let root = OsFileSystem::new().resolve_absolute(&root).unwrap();
    (temp_dir, root)
}

fn builder(output: &Path) -> (ContextBuilder, Arc<CollectingLogger>) {
    let log = Arc::new(CollectingLogger::default());
    let builder = ContextBuilder::new(
        Arc::new(OsFileSystem::new()),
        Arc::new(ExclusionPolicy::default()),
        log.clone(),
        output,
    );
    (builder, log)
}

fn section(path: &Path, content: &str) -> String {
    format!(
        "--- START OF FILE: {p} ---\n{content}\n--- END OF FILE: {p} ---\n\n",
        p = path.display()
    )
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discovery_prunes_excluded_directories_on_disk() {
    let (_temp_dir, root) = setup_project();

    let discovered = discover(
        &OsFileSystem::new(),
        std::slice::from_ref(&root),
        &ExclusionPolicy::default(),
        &CollectingLogger::default(),
    );

    assert_eq!(
        discovered.files,
        vec![
            root.join("a.txt"),
            root.join("img.png"),
            root.join("src/lib.rs"),
            root.join("src/nested/mod.rs"),
        ]
    );
    assert!(discovered.warnings.is_empty());
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn test_build_writes_sorted_text_files() {
    let (temp_dir, root) = setup_project();
    let output = temp_dir.path().join("context.txt");
    let (builder, _) = builder(&output);

    let result = builder.build_from_selection(&[root.clone()]).unwrap();

    assert_eq!(result.files_processed, 3);
    assert_eq!(result.files_skipped, 1);
    assert!(result.paths_with_error.is_empty());

    let expected = [
        section(&root.join("a.txt"), "hello"),
        section(&root.join("src/lib.rs"), "pub mod nested;\n"),
        section(&root.join("src/nested/mod.rs"), "pub fn f() {}\n"),
    ]
    .concat();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn test_build_is_deterministic_and_truncates() {
    let (temp_dir, root) = setup_project();
    let output = temp_dir.path().join("context.txt");
    fs::write(&output, "stale content that is much longer than the real output ".repeat(100)).unwrap();
    let (builder, _) = builder(&output);

    builder.build_from_selection(&[root.clone()]).unwrap();
    let first = fs::read(&output).unwrap();
    builder.build_from_selection(&[root]).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert!(!String::from_utf8(first).unwrap().contains("stale"));
}

#[test]
fn test_nothing_to_write_leaves_no_file() {
    let (temp_dir, root) = setup_project();
    let output = temp_dir.path().join("context.txt");
    let (builder, _) = builder(&output);

    let result = builder
        .build_from_selection(&[root.join("img.png")])
        .unwrap();

    assert_eq!(result.files_processed, 0);
    assert_eq!(result.files_skipped, 1);
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_fatal() {
    let (temp_dir, root) = setup_project();
    let output = temp_dir.path().join("missing-dir").join("context.txt");
    let (builder, log) = builder(&output);

    let err = builder.build_from_selection(&[root]).unwrap_err();

    assert!(matches!(err, BuildError::CreateOutput { .. }));
    assert!(err.to_string().contains("missing-dir"));
    let names = log.names.lock().unwrap();
    assert!(names
        .iter()
        .any(|(level, name)| *level == log::Level::Error && name == "ContextBuilder.create_output"));
}

// ============================================================================
// Browser to build
// ============================================================================

#[test]
fn test_select_all_then_build() {
    let (temp_dir, root) = setup_project();
    let fs_port: Arc<dyn FileSystem> = Arc::new(OsFileSystem::new());
    let policy = Arc::new(ExclusionPolicy::default());
    let log: Arc<dyn LogPort> = Arc::new(CollectingLogger::default());
    let mut browser = Browser::new(&root, fs_port.clone(), policy.clone(), log.clone()).unwrap();

    update(&mut browser, Action::ToggleSelectAll);
    assert_eq!(update(&mut browser, Action::Confirm), Effect::Exit);
    assert!(!browser.state.aborted);

    // .git, img.png and node_modules are excluded in the listing
    assert_eq!(
        browser.selected_paths(),
        vec![root.join("a.txt"), root.join("src")]
    );

    let output = temp_dir.path().join("out.txt");
    let result = ContextBuilder::new(fs_port, policy, log, &output)
        .build_from_selection(&browser.selected_paths())
        .unwrap();
    assert_eq!(result.files_processed, 3);
    assert_eq!(result.files_skipped, 0);
}

#[test]
fn test_abort_builds_nothing() {
    let (_temp_dir, root) = setup_project();
    let mut browser = Browser::new(
        &root,
        Arc::new(OsFileSystem::new()),
        Arc::new(ExclusionPolicy::default()),
        Arc::new(CollectingLogger::default()),
    )
    .unwrap();

    update(&mut browser, Action::ToggleSelection);
    update(&mut browser, Action::CursorDown);
    update(&mut browser, Action::ToggleSelection);
    assert_eq!(update(&mut browser, Action::Abort), Effect::Exit);

    assert!(browser.state.aborted);
    assert!(browser.selected_paths().is_empty());
}
