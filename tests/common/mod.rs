// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// A directory of corpus files that lives as long as the test
pub struct Corpus {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl Corpus {
    pub fn new(contents: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let files = contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let path = dir.path().join(format!("part{}.txt", i + 1));
                std::fs::write(&path, content).expect("Failed to write corpus file");
                path
            })
            .collect();
        Self { dir, files }
    }

    /// The files as command-line arguments
    pub fn args(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| p.to_str().expect("non-UTF-8 temp path").to_string())
            .collect()
    }

    /// Write an extra file into the corpus directory and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

/// The two-file cat/dog corpus: {cat: 3, dog: 2}
pub fn scenario_corpus() -> Corpus {
    Corpus::new(&["The cat sat. A dog barked. Catnip!", "Dogs and cats."])
}

fn base_command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wordtally"));
    // Keep the user's own config files and log settings out of the way
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_EMOJI", "1")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Run wordtally with `args` from inside `dir`
pub fn run_wordtally_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = base_command(dir)
        .args(args)
        .output()
        .expect("Failed to execute wordtally");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run wordtally over a corpus, ignoring any config file
pub fn run_wordtally(corpus: &Corpus, args: &[&str]) -> (String, String, i32) {
    let files = corpus.args();
    let mut full_args = vec!["--ignore-config"];
    full_args.extend_from_slice(args);
    full_args.extend(files.iter().map(String::as_str));
    run_wordtally_in(corpus.dir.path(), &full_args)
}

/// Extract the `Counts: {...}` line from default-format output
pub fn counts_line(stdout: &str) -> Option<&str> {
    stdout.lines().find(|line| line.starts_with("Counts: "))
}

/// Parse JSON-format output
pub fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("Output should be valid JSON")
}
