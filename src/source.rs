use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

use crate::split_command_line;
use crate::status::StatusSnapshot;

/// Where snapshots come from.
///
/// Network polling and native protocol parsing live in an external status
/// client; a source only hands over that client's structured snapshot.
/// Poll errors propagate to the caller, which decides whether to keep the
/// previous snapshot or give up.
pub trait StatusSource {
    fn poll(&mut self) -> Result<StatusSnapshot, Box<dyn std::error::Error>>;
}

impl StatusSource for Box<dyn StatusSource> {
    fn poll(&mut self) -> Result<StatusSnapshot, Box<dyn std::error::Error>> {
        (**self).poll()
    }
}

/// Reads a snapshot JSON file, fresh on every poll.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl StatusSource for FileSource {
    fn poll(&mut self) -> Result<StatusSnapshot, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Cannot read {}: {}", self.path.display(), e))?;
        StatusSnapshot::from_json(&data)
    }
}

/// Runs an external status client and parses its stdout on every poll.
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    /// Build from a single command line; quoting follows shell rules.
    pub fn new(command_line: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut words = split_command_line(command_line);
        if words.is_empty() {
            return Err("Empty status client command".into());
        }
        let program = words.remove(0);
        Ok(CommandSource {
            program,
            args: words,
        })
    }
}

impl StatusSource for CommandSource {
    fn poll(&mut self) -> Result<StatusSnapshot, Box<dyn std::error::Error>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| format!("Cannot run {}: {}", self.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "Status client {} failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )
            .into());
        }

        StatusSnapshot::from_json(&String::from_utf8(output.stdout)?)
    }
}

/// Reads one snapshot from stdin and replays it on later polls.
pub struct StdinSource {
    snapshot: Option<StatusSnapshot>,
}

impl StdinSource {
    pub fn new() -> Self {
        StdinSource { snapshot: None }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSource for StdinSource {
    fn poll(&mut self) -> Result<StatusSnapshot, Box<dyn std::error::Error>> {
        if let Some(snapshot) = &self.snapshot {
            return Ok(snapshot.clone());
        }
        let mut data = String::new();
        std::io::stdin().read_to_string(&mut data)?;
        let snapshot = StatusSnapshot::from_json(&data)?;
        self.snapshot = Some(snapshot.clone());
        Ok(snapshot)
    }
}

/// Create a source from a spec string
///
/// # Arguments
/// * `spec` - `"-"` for stdin, `"cmd:<command line>"` to run a status
///   client, anything else is a snapshot file path
///
/// # Returns
/// * Boxed source implementation
pub fn from_spec(spec: &str) -> Result<Box<dyn StatusSource>, Box<dyn std::error::Error>> {
    if spec == "-" {
        Ok(Box::new(StdinSource::new()))
    } else if let Some(command_line) = spec.strip_prefix("cmd:") {
        Ok(Box::new(CommandSource::new(command_line)?))
    } else {
        Ok(Box::new(FileSource::new(spec)))
    }
}
