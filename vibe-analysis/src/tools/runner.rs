//! Process execution behind a trait so analyzers can be driven by fakes.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use vibe_core::errors::ToolError;

use super::types::{ToolInvocation, ToolOutput};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Grace period for reader threads after the child exits.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs external programs.
pub trait ToolRunner: Send + Sync {
    /// Whether `program` can be found on PATH.
    fn is_available(&self, program: &str) -> bool;

    /// Run to completion or until the invocation's timeout.
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError>;
}

/// Runs real processes, resolving programs with `which`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let program = invocation.program.clone();
        let started = Instant::now();

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &invocation.env {
            command.env(key, value);
        }
        own_process_group(&mut command);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::NotFound { program });
            }
            Err(e) => {
                return Err(ToolError::Spawn {
                    program,
                    cwd: invocation.cwd.clone(),
                    source: e,
                });
            }
        };
        tracing::debug!(command = %invocation.display(), "spawned tool");

        let (tx, rx) = bounded::<(Stream, String)>(2);
        if let Some(out) = child.stdout.take() {
            spawn_reader(Stream::Stdout, out, tx.clone());
        }
        if let Some(err) = child.stderr.take() {
            spawn_reader(Stream::Stderr, err, tx.clone());
        }
        drop(tx);

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() > invocation.timeout {
                        terminate(&mut child);
                        tracing::warn!(tool = %program, "killed after timeout");
                        return Err(ToolError::Timeout {
                            program,
                            timeout_secs: invocation.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(ToolError::Failed {
                        program,
                        message: format!("wait failed: {e}"),
                    });
                }
            }
        };

        let mut output = ToolOutput {
            exit_code: status.code(),
            ..Default::default()
        };
        while let Ok((stream, text)) = rx.recv_timeout(DRAIN_TIMEOUT) {
            match stream {
                Stream::Stdout => output.stdout = text,
                Stream::Stderr => output.stderr = text,
            }
        }
        output.duration_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(
            tool = %program,
            exit_code = ?output.exit_code,
            tool_duration = output.duration_ms,
            "tool finished"
        );
        Ok(output)
    }
}

/// Start the tool in its own process group so a timeout can take down
/// everything it spawned, not just the direct child.
#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Kill the child's whole process group, then the child itself. Grandchildren
/// holding the output pipes would otherwise keep the reader threads blocked.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        let _ = Command::new("sh")
            .args(["-c", &format!("kill -KILL -{}", child.id())])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn spawn_reader<R: Read + Send + 'static>(stream: Stream, mut reader: R, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_exit_code() {
        let dir = std::env::temp_dir();
        let inv = ToolInvocation::new("sh", &dir).args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = SystemToolRunner.run(&inv).unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert!(!output.success());
    }

    #[test]
    fn missing_program_is_not_found() {
        let dir = std::env::temp_dir();
        let inv = ToolInvocation::new("definitely-not-a-real-tool-xyz", &dir);
        let err = SystemToolRunner.run(&inv).unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
        assert!(!SystemToolRunner.is_available("definitely-not-a-real-tool-xyz"));
    }

    #[test]
    fn slow_program_times_out() {
        let dir = std::env::temp_dir();
        let inv = ToolInvocation::new("sleep", &dir)
            .arg("5")
            .timeout(Duration::from_millis(200));
        let err = SystemToolRunner.run(&inv).unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
    }

    #[cfg(target_os = "linux")]
    fn is_running(pid: &str) -> bool {
        match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
            Ok(stat) => stat
                .rsplit_once(')')
                .and_then(|(_, rest)| rest.split_whitespace().next())
                .is_some_and(|state| state != "Z" && state != "X"),
            Err(_) => false,
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn timeout_kills_background_children() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("child.pid");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());
        let inv = ToolInvocation::new("sh", dir.path())
            .args(["-c", script.as_str()])
            .timeout(Duration::from_millis(500));

        let started = Instant::now();
        let err = SystemToolRunner.run(&inv).unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let pid = pid.trim();
        let mut running = true;
        for _ in 0..40 {
            running = is_running(pid);
            if !running {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        assert!(!running, "background sleep {pid} survived the timeout");
    }
}
