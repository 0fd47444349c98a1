//! Primary process supervision and one-shot corrective re-launch.
//!
//! The launcher is spawned with stdout and stderr merged into a single pipe
//! so the scanner sees interleaved lines in production order. When the
//! trigger fires, the replacement is spawned detached and never waited on:
//! it has to outlive the wrapper, and the wrapper must not be left holding a
//! zombie while it keeps draining the primary's output.

use std::io::BufReader;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::logger::Logger;
use crate::scanner::{self, TriggerPattern};
use crate::urlfix;

/// Supervise one launcher session.
///
/// Runs the launcher to completion, scanning its combined output. On the
/// first trigger match the corrected URI is handed to a detached replacement
/// process; a failed corrective launch is logged at ERROR and the session
/// continues. The primary's own exit status is logged at INFO but not
/// propagated.
pub fn run(config: &Config, logger: &Logger) -> Result<()> {
    logger.info(&format!("[{}]: started", std::process::id()));

    let (pipe_reader, pipe_writer) =
        std::io::pipe().context("failed to create the output pipe")?;
    let stderr_writer = pipe_writer
        .try_clone()
        .context("failed to clone the output pipe")?;

    let mut child = Command::new(&config.launcher)
        .stdout(Stdio::from(pipe_writer))
        .stderr(Stdio::from(stderr_writer))
        .spawn()
        .with_context(|| format!("failed to launch {}", config.launcher.display()))?;
    // the Command temporary is gone here, so the parent's copies of the pipe
    // writer are closed and EOF tracks the child's exit

    let trigger = TriggerPattern::for_scheme(&config.scheme);
    let mut corrections = 0u32;

    let lines = scanner::scan(
        BufReader::new(pipe_reader),
        &trigger,
        logger,
        |url| {
            logger.info(&format!("slack url detected: {url}"));
            let fixed = urlfix::correct(url);
            logger.info(&format!("new url: {fixed}"));

            let mut args = config.replacement_args.clone();
            args.push(fixed);
            logger.info(&format!(
                "execute: {} {}",
                config.replacement.display(),
                args.join(" ")
            ));
            match spawn_detached(&config.replacement, &args) {
                Ok(()) => corrections += 1,
                Err(err) => logger.error(&format!(
                    "failed to launch {}: {err}",
                    config.replacement.display()
                )),
            }
        },
    )?;

    let status = child
        .wait()
        .context("failed to wait for the supervised process")?;
    logger.info(&format!(
        "finished: {lines} line(s), {corrections} correction(s), {status}"
    ));
    Ok(())
}

// exit code used by the intermediate child to signal a failed spawn
#[cfg(unix)]
const SPAWN_FAILED: i32 = 127;

/// Spawn `program` fully detached from the supervisor.
///
/// Double fork with a `setsid` in between: the intermediate child is reaped
/// immediately and the replacement is reparented to init, so it survives
/// wrapper exit and never shows up as a zombie here. The replacement
/// inherits the real stdout/stderr; its output is not scanned.
#[cfg(unix)]
fn spawn_detached(program: &Path, args: &[String]) -> std::io::Result<()> {
    match unsafe { libc::fork() } {
        -1 => Err(std::io::Error::last_os_error()),
        0 => {
            // intermediate child: start the replacement in its own session,
            // then exit so the supervisor reaps us at once
            unsafe { libc::setsid() };
            let code = match Command::new(program).args(args).spawn() {
                Ok(_) => 0,
                Err(_) => SPAWN_FAILED,
            };
            unsafe { libc::_exit(code) }
        }
        pid => {
            let mut status: libc::c_int = 0;
            if unsafe { libc::waitpid(pid, &mut status, 0) } == -1 {
                return Err(std::io::Error::last_os_error());
            }
            if libc::WIFEXITED(status) && libc::WEXITSTATUS(status) == SPAWN_FAILED {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "replacement process did not start",
                ));
            }
            Ok(())
        }
    }
}

/// Detached spawn without fork: dropping the handle is enough where child
/// processes are not reaped by the parent.
#[cfg(not(unix))]
fn spawn_detached(program: &Path, args: &[String]) -> std::io::Result<()> {
    Command::new(program).args(args).spawn().map(drop)
}
