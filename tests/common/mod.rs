// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfile collection (profile, group
// directories and a fake home) and a fluent builder so each integration test
// can set up an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dotdeploy::cli::ApplyOpts;
use dotdeploy::config::{self, ProfileModel};
use dotdeploy::logging::Log;

/// An isolated dotfile collection backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `dots/profile.ini` — the profile
/// - `dots/<group>/...` — group source files
/// - `home/`            — stands in for the user's home directory
pub struct IntegrationTestContext {
    /// Temporary directory holding `dots/` and `home/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Directory containing the profile and group directories.
    pub fn dots(&self) -> PathBuf {
        self.root.path().join("dots")
    }

    /// Fake home directory that `~` expands to.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Path to the profile file.
    pub fn profile_path(&self) -> PathBuf {
        self.dots().join("profile.ini")
    }

    /// Path under the fake home.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    /// Overwrite the profile.
    pub fn write_profile(&self, content: &str) {
        std::fs::write(self.profile_path(), content).expect("write profile");
    }

    /// Write `content` to `rel` under the fake home, creating parents.
    pub fn write_home_file(&self, rel: &str, content: &str) {
        write_file(&self.home_path(rel), content);
    }

    /// Load the profile with `~` bound to the fake home.
    pub fn load(&self) -> ProfileModel {
        config::load_with_home(&self.profile_path(), &self.home()).expect("load profile")
    }

    /// Options for `apply` against this collection's profile.
    pub fn apply_opts(&self, dry_run: bool) -> ApplyOpts {
        ApplyOpts {
            profile: self.profile_path(),
            dry_run,
            no_report: false,
        }
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
    profile: String,
}

impl TestContextBuilder {
    /// Begin building an empty collection with an empty profile.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("dots")).expect("create dots dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self {
            ctx: IntegrationTestContext { root },
            profile: String::new(),
        }
    }

    /// Use `content` as the profile text.
    pub fn with_profile(mut self, content: &str) -> Self {
        content.clone_into(&mut self.profile);
        self
    }

    /// Create `dots/<group>/<file>` with `content`.
    pub fn with_source(self, group: &str, file: &str, content: &str) -> Self {
        write_file(&self.ctx.dots().join(group).join(file), content);
        self
    }

    /// Create an empty group directory.
    pub fn with_group_dir(self, group: &str) -> Self {
        std::fs::create_dir_all(self.ctx.dots().join(group)).expect("create group dir");
        self
    }

    /// Create a file under the fake home before anything is deployed.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        self.ctx.write_home_file(rel, content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx.write_profile(&self.profile);
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// [`Log`] that records every message with its level.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLog {
    /// Messages recorded at `level`, in order.
    pub fn messages(&self, level: &str) -> Vec<String> {
        self.entries
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: &'static str, msg: &str) {
        self.entries
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
}
