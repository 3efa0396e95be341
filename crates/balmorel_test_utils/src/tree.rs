//! On-disk scenario trees in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONTROL_FILE: &str = "balopt.opt";
pub const OUTPUT_DIR: &str = "output";

/// A root directory of scenario folders, removed on drop.
pub struct ScenarioTree {
    temp: TempDir,
}

impl ScenarioTree {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn scenario_dir(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Create a scenario folder with a control file and empty output files.
    pub fn scenario(&self, name: &str, files: &[&str]) -> PathBuf {
        let dir = self.scenario_dir(name);
        write(&dir.join(CONTROL_FILE), "");
        for file in files {
            write(&dir.join(OUTPUT_DIR).join(file), "");
        }
        dir
    }

    /// Create a folder that looks like a scenario but has no control file.
    pub fn folder(&self, name: &str, files: &[&str]) -> PathBuf {
        let dir = self.scenario_dir(name);
        fs::create_dir_all(&dir).expect("Failed to create folder");
        for file in files {
            write(&dir.join(OUTPUT_DIR).join(file), "");
        }
        dir
    }

    /// Make the root itself a scenario.
    pub fn single(&self, files: &[&str]) -> PathBuf {
        write(&self.root().join(CONTROL_FILE), "");
        for file in files {
            write(&self.root().join(OUTPUT_DIR).join(file), "");
        }
        self.root().to_path_buf()
    }

    /// Write `content` to `<scenario>/output/<filename>`, creating the scenario if needed.
    pub fn write_output(&self, scenario: &str, filename: &str, content: &str) -> PathBuf {
        let dir = self.scenario_dir(scenario);
        let control = dir.join(CONTROL_FILE);
        if !control.exists() {
            write(&control, "");
        }
        let path = dir.join(OUTPUT_DIR).join(filename);
        write(&path, content);
        path
    }

    /// Create a symlink at `relative` (under the root) pointing to `target`.
    #[cfg(unix)]
    pub fn symlink(&self, target: &Path, relative: &str) -> PathBuf {
        let link = self.root().join(relative);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::os::unix::fs::symlink(target, &link).expect("Failed to create symlink");
        link
    }

    /// Write an arbitrary file relative to the root.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        write(&path, content);
        path
    }
}

impl Default for ScenarioTree {
    fn default() -> Self {
        Self::new()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_layout() {
        let tree = ScenarioTree::new();
        let dir = tree.scenario("base", &["x-input.gdx"]);
        tree.folder("notes", &["readme.gdx"]);

        assert!(dir.join("balopt.opt").is_file());
        assert!(dir.join("output/x-input.gdx").is_file());
        assert!(!tree.scenario_dir("notes").join("balopt.opt").exists());
        assert!(tree.scenario_dir("notes").join("output/readme.gdx").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink() {
        let tree = ScenarioTree::new();
        let target = tree.write_file("real.txt", "x");
        let link = tree.symlink(&target, "nested/link.txt");
        assert_eq!(fs::read_to_string(link).unwrap(), "x");
    }

    #[test]
    fn test_write_output_creates_scenario() {
        let tree = ScenarioTree::new();
        let path = tree.write_output("alt", "x-output.json", "{}");
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
        assert!(tree.scenario_dir("alt").join("balopt.opt").is_file());
    }
}
