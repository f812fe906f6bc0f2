//! Bridge to the external grid-to-datastream converter.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::debug;

use crate::error::SourceError;
use crate::resolve::ByteSource;

/// Name of the external converter executable.
pub const CONVERTER: &str = "rgis2ds";

/// Spawns `rgis2ds --template <network> <gdbc>` and returns its stdout
/// pipe as a byte source.
///
/// The child's lifecycle is owned by the returned source: dropping it
/// closes the pipe and reaps the process, so a consumer that stops before
/// draining every record does not orphan the converter. A not-fully-drained
/// child is not an error.
///
/// # Errors
///
/// Returns [`SourceError::DecoderLaunch`] if the converter cannot be
/// started (missing executable, immediate spawn failure).
pub fn spawn_converter(gdbc: &Path, network: &Path) -> Result<ByteSource, SourceError> {
    let mut command = Command::new(CONVERTER);
    command
        .arg("--template")
        .arg(network)
        .arg(gdbc)
        .stdout(Stdio::piped());
    debug!(gdbc = %gdbc.display(), network = %network.display(), "spawning converter");
    Ok(ByteSource::Child(ChildSource::spawn(command, CONVERTER)?))
}

/// A spawned converter process together with its stdout pipe.
#[derive(Debug)]
pub struct ChildSource {
    child: Child,
    stdout: Option<ChildStdout>,
}

impl ChildSource {
    /// Spawns `command` (which must have piped stdout) and takes ownership
    /// of the child and its stdout handle.
    pub(crate) fn spawn(mut command: Command, program: &str) -> Result<Self, SourceError> {
        let mut child = command.spawn().map_err(|e| SourceError::DecoderLaunch {
            program: program.to_string(),
            reason: e.to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| SourceError::DecoderLaunch {
            program: program.to_string(),
            reason: "child has no stdout pipe".to_string(),
        })?;
        Ok(Self {
            child,
            stdout: Some(stdout),
        })
    }
}

impl Read for ChildSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.stdout {
            Some(out) => out.read(buf),
            None => Ok(0),
        }
    }
}

impl Drop for ChildSource {
    /// Closes the pipe and reaps the child on every exit path, including
    /// early abandonment of an iteration.
    fn drop(&mut self) {
        drop(self.stdout.take());
        // The child may still be producing; stop it rather than leaving it
        // blocked on a closed pipe, then reap to avoid a zombie.
        if self.child.try_wait().map(|s| s.is_none()).unwrap_or(false) {
            debug!("converter not drained, terminating child");
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script).stdout(Stdio::piped());
        cmd
    }

    #[test]
    fn launch_failure_is_typed() {
        let mut cmd = Command::new("definitely-not-rgis2ds");
        cmd.stdout(Stdio::piped());
        let err = ChildSource::spawn(cmd, "definitely-not-rgis2ds").unwrap_err();
        assert!(matches!(err, SourceError::DecoderLaunch { .. }));
    }

    #[test]
    fn reads_child_stdout() {
        let mut src = ChildSource::spawn(sh("printf 'abc'"), "sh").unwrap();
        let mut buf = String::new();
        src.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "abc");
    }

    #[test]
    fn early_drop_does_not_hang() {
        // A producer that would block forever once the pipe fills; dropping
        // the source must terminate it promptly.
        let mut src = ChildSource::spawn(sh("while :; do printf x; done"), "sh").unwrap();
        let mut buf = [0u8; 16];
        let n = src.read(&mut buf).unwrap();
        assert!(n > 0);
        drop(src);
    }

    #[test]
    fn exited_child_reads_to_eof() {
        let mut src = ChildSource::spawn(sh("exit 0"), "sh").unwrap();
        let mut buf = Vec::new();
        src.read_to_end(&mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
