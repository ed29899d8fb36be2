//! Helper-process scene source
//!
//! The adapter is an external executable that answers file requests over
//! stdin/stdout, one JSON object per line:
//!
//! ```text
//! -> {"cmd":"get_file","repoPath":"/repo","commit":"HEAD","path":"Assets/Main.unity"}
//! <- {"ok":true,"data":"%YAML 1.1\n...","error":null}
//! ```
//!
//! [`AdapterSession`] speaks the protocol over any reader/writer pair;
//! [`AdapterClient`] owns the child process.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use scenediff_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{self, Result};
use crate::SceneSource;

/// How long a freshly spawned adapter must stay alive to count as started
pub const STARTUP_GRACE: Duration = Duration::from_millis(100);

/// One request line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterRequest {
    pub cmd: String,
    pub repo_path: String,
    pub commit: String,
    pub path: String,
}

impl AdapterRequest {
    pub fn get_file(repo_path: &str, commit: &str, path: &str) -> Self {
        Self {
            cmd: "get_file".to_string(),
            repo_path: repo_path.to_string(),
            commit: commit.to_string(),
            path: path.to_string(),
        }
    }
}

/// One response line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterResponse {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response exchange over a line-oriented byte stream
pub struct AdapterSession<W, R> {
    writer: W,
    reader: R,
}

impl<W: Write, R: BufRead> AdapterSession<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    /// Send one request and wait for its response line.
    ///
    /// # Errors
    ///
    /// `Io` when writing or reading fails, `ExternalService` when the
    /// adapter closed its output, `ProtocolViolation` when the line is not
    /// a response object.
    pub fn request(&mut self, request: &AdapterRequest) -> Result<AdapterResponse> {
        let mut line = serde_json::to_string(request)
            .map_err(|e| errors::from_serde_json("adapter_write", e))?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| errors::io_error("adapter_write", e))?;

        let mut reply = String::new();
        let read = self
            .reader
            .read_line(&mut reply)
            .map_err(|e| errors::io_error("adapter_read", e))?;
        if read == 0 {
            return Err(errors::adapter_gone("adapter closed its output"));
        }

        serde_json::from_str(reply.trim_end()).map_err(|e| {
            errors::protocol_violation(format!("unreadable adapter response: {}", e))
        })
    }

    /// Fetch one file's contents.
    ///
    /// # Errors
    ///
    /// Everything [`request`](Self::request) returns, plus `ExternalService`
    /// carrying the adapter's error text for an `ok: false` response.
    pub fn get_file(&mut self, repo_path: &str, commit: &str, path: &str) -> Result<String> {
        let response = self.request(&AdapterRequest::get_file(repo_path, commit, path))?;
        if !response.ok {
            return Err(errors::adapter_failed(response.error));
        }
        response
            .data
            .ok_or_else(|| errors::protocol_violation("successful response without data"))
    }

    pub fn into_parts(self) -> (W, R) {
        (self.writer, self.reader)
    }
}

/// A running adapter process
///
/// The child is killed when the client is shut down or dropped.
pub struct AdapterClient {
    child: Child,
    session: AdapterSession<ChildStdin, BufReader<ChildStdout>>,
}

impl AdapterClient {
    /// Start the adapter at `program`.
    ///
    /// # Errors
    ///
    /// `NotFound` when `program` does not exist, `ExternalService` when the
    /// process exits during [`STARTUP_GRACE`], `Io` when it cannot be
    /// spawned.
    pub fn spawn(program: &Path) -> Result<Self> {
        Self::spawn_with_grace(program, STARTUP_GRACE)
    }

    /// [`spawn`](Self::spawn) with an explicit start-up grace period.
    ///
    /// # Errors
    ///
    /// See [`spawn`](Self::spawn).
    pub fn spawn_with_grace(program: &Path, grace: Duration) -> Result<Self> {
        if !program.is_file() {
            return Err(errors::adapter_missing(program));
        }

        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| errors::io_error("adapter_spawn", e))?;

        std::thread::sleep(grace);
        if let Some(status) = child
            .try_wait()
            .map_err(|e| errors::io_error("adapter_spawn", e))?
        {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                pipe.read_to_string(&mut stderr).ok();
            }
            return Err(errors::adapter_exited(status, &stderr));
        }

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            child.kill().ok();
            child.wait().ok();
            return Err(errors::adapter_gone("adapter pipes unavailable"));
        };

        tracing::debug!(program = %program.display(), pid = child.id(), "adapter started");
        Ok(Self {
            child,
            session: AdapterSession::new(stdin, BufReader::new(stdout)),
        })
    }

    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kill the child if it is still running.
    pub fn shutdown(&mut self) {
        if self.is_running() {
            self.child.kill().ok();
        }
        self.child.wait().ok();
    }
}

impl Drop for AdapterClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl SceneSource for AdapterClient {
    fn fetch(&mut self, repo_root: &Path, revision: &str, path: &str) -> Result<String> {
        log_op_start!("fetch", source = "adapter", revision, path);
        let start = std::time::Instant::now();

        let result = if self.is_running() {
            self.session
                .get_file(&repo_root.to_string_lossy(), revision, path)
        } else {
            Err(errors::adapter_gone("adapter process is not running"))
        };

        match result {
            Ok(text) => {
                log_op_end!(
                    "fetch",
                    duration_ms = start.elapsed().as_millis() as u64,
                    bytes = text.len()
                );
                Ok(text)
            }
            Err(e) => {
                log_op_error!(
                    "fetch",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }
}
