//! Size-rotated log file.
//!
//! `<name>.log` is the live file; on rotation it becomes `<name>.1.log`, the
//! previous `<name>.1.log` becomes `<name>.2.log`, and so on up to the policy's
//! file count. The oldest file is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Live file plus rotated files
    pub max_files: usize,
    pub max_bytes: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

pub struct RollingLog {
    dir: PathBuf,
    stem: String,
    policy: RotationPolicy,
    file: Option<File>,
    written: u64,
}

impl RollingLog {
    pub fn open(dir: &Path, name: &str, policy: RotationPolicy) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let mut log = Self {
            dir: dir.to_path_buf(),
            stem: file_stem(name),
            policy: RotationPolicy {
                max_files: policy.max_files.max(1),
                ..policy
            },
            file: None,
            written: 0,
        };
        log.reopen()?;
        if log.written >= log.policy.max_bytes {
            log.rotate()?;
        }
        Ok(log)
    }

    pub fn live_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.stem))
    }

    fn numbered_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.stem, n))
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.live_path())?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        let keep = self.policy.max_files - 1;
        if keep == 0 {
            fs::remove_file(self.live_path()).or_else(ignore_missing)?;
            return self.reopen();
        }

        fs::remove_file(self.numbered_path(keep)).or_else(ignore_missing)?;
        for n in (1..keep).rev() {
            fs::rename(self.numbered_path(n), self.numbered_path(n + 1)).or_else(ignore_missing)?;
        }
        fs::rename(self.live_path(), self.numbered_path(1)).or_else(ignore_missing)?;
        self.reopen()
    }
}

fn ignore_missing(err: io::Error) -> io::Result<()> {
    if err.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(err)
    }
}

impl Write for RollingLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.policy.max_bytes {
            self.rotate()?;
        }
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file not open"))?;
        let n = file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// `MakeWriter` handing out handles to one shared [`RollingLog`].
#[derive(Clone)]
pub struct SharedLog(Arc<Mutex<RollingLog>>);

impl SharedLog {
    pub fn new(log: RollingLog) -> Self {
        Self(Arc::new(Mutex::new(log)))
    }
}

pub struct SharedLogHandle(Arc<Mutex<RollingLog>>);

impl<'a> MakeWriter<'a> for SharedLog {
    type Writer = SharedLogHandle;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogHandle(Arc::clone(&self.0))
    }
}

impl Write for SharedLogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log lock poisoned"))?
            .flush()
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if stem.is_empty() {
        "balmorel".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(max_files: usize) -> RotationPolicy {
        RotationPolicy {
            max_files,
            max_bytes: 16,
        }
    }

    #[test]
    fn test_rotates_and_caps_file_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = RollingLog::open(dir.path(), "app", small(3)).unwrap();

        for line in ["first line 0001\n", "second line 002\n", "third line 0003\n", "fourth line 004\n"] {
            log.write_all(line.as_bytes()).unwrap();
        }
        log.flush().unwrap();

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("app.log"), "fourth line 004\n");
        assert_eq!(read("app.1.log"), "third line 0003\n");
        assert_eq!(read("app.2.log"), "second line 002\n");
        assert!(!dir.path().join("app.3.log").exists());
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.log"), "old\n").unwrap();

        let mut log = RollingLog::open(dir.path(), "app", RotationPolicy::default()).unwrap();
        log.write_all(b"new\n").unwrap();
        log.flush().unwrap();

        assert_eq!(fs::read_to_string(log.live_path()).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_single_file_policy_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = RollingLog::open(dir.path(), "app", small(1)).unwrap();
        log.write_all(b"0123456789abcdef").unwrap();
        log.write_all(b"next\n").unwrap();
        log.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "next\n");
        assert!(!dir.path().join("app.1.log").exists());
    }

    #[test]
    fn test_file_stem_sanitized() {
        assert_eq!(file_stem("balmorel cli/v1"), "balmorel_cli_v1");
        assert_eq!(file_stem(""), "balmorel");
    }
}
