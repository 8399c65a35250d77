// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed bootstrap kit plus scripted
// collaborators so each integration test can set up an isolated
// environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use bootstrap_cli::config::Config;
use bootstrap_cli::exec::{ExecResult, Executor};
use bootstrap_cli::net::Fetcher;
use bootstrap_cli::prompt::Confirm;

/// An isolated bootstrap kit plus a fake home directory, both backed by
/// temporary directories that are deleted on drop.
pub struct TestKit {
    pub root: tempfile::TempDir,
    pub home: tempfile::TempDir,
}

impl TestKit {
    /// Create a kit with empty `conf/` and `dotfiles/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create kit dir");
        let home = tempfile::tempdir().expect("create home dir");
        std::fs::create_dir_all(root.path().join("conf")).expect("create conf dir");
        std::fs::create_dir_all(root.path().join("dotfiles")).expect("create dotfiles dir");
        Self { root, home }
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Write `content` to `conf/<filename>`.
    pub fn write_conf(&self, filename: &str, content: &str) {
        std::fs::write(self.root.path().join("conf").join(filename), content)
            .expect("write config file");
    }

    /// Create a source file under `dotfiles/`.
    pub fn write_dotfile(&self, source: &str, content: &str) {
        let path = self.root.path().join("dotfiles").join(source);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dotfile parent");
        }
        std::fs::write(&path, content).expect("write dotfile");
    }

    /// Load the kit's configuration through the normal manifest loader.
    pub fn load_config(&self) -> Config {
        Config::load(self.root.path()).expect("load config")
    }

    /// Names of all backup files sitting directly in the fake home.
    pub fn home_backups(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.home.path())
            .expect("read home dir")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().contains(".bak."))
                    .unwrap_or(false)
            })
            .collect()
    }
}

/// Confirm implementation that answers from a queue and records prompts.
///
/// An empty queue means "no prompt expected": any prompt then errors, which
/// shows up as a failed step in the test's assertions.
#[derive(Debug, Default)]
pub struct RecordingConfirm {
    pub answers: RefCell<VecDeque<bool>>,
    pub prompts: RefCell<Vec<String>>,
}

impl RecordingConfirm {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, prompt: &str) -> anyhow::Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected confirmation prompt: {prompt}"))
    }
}

/// Fetcher that fails every request, for steps that must not hit the network.
#[derive(Debug, Default)]
pub struct OfflineFetcher;

impl Fetcher for OfflineFetcher {
    fn get_text(&self, url: &str) -> anyhow::Result<String> {
        anyhow::bail!("offline: {url}")
    }

    fn get_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("offline: {url}")
    }
}

/// Executor whose `which` answers from a fixed list and that records runs.
#[derive(Debug, Default)]
pub struct FixedExecutor {
    pub present: Vec<String>,
    pub runs: std::sync::Mutex<Vec<String>>,
}

impl FixedExecutor {
    pub fn with_present(tools: &[&str]) -> Self {
        Self {
            present: tools.iter().map(|t| (*t).to_string()).collect(),
            runs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Executor for FixedExecutor {
    fn run(&self, program: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
        self.runs.lock().unwrap().push(program.to_string());
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.run(program, args)
    }

    fn which(&self, program: &str) -> bool {
        self.present.iter().any(|p| p == program)
    }
}
