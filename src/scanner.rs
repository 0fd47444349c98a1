//! Line scanning of the primary process's combined output.
//!
//! The wrapper owns the child's output pipe, so re-emitting every line
//! through the logger at INFO is the only place that output becomes
//! visible. The trigger is a substring search, not JSON parsing: the
//! surrounding output is unstructured log text that merely happens to embed
//! a JSON-style `"url"` field.

use std::io::BufRead;

use anyhow::{Context, Result};
use regex::Regex;

use crate::logger::Logger;

/// Compiled trigger for lines carrying a URI of the watched scheme.
pub struct TriggerPattern {
    regex: Regex,
}

impl TriggerPattern {
    /// Build the trigger for a scheme name, e.g. `"slack"` matches lines
    /// containing `"url": "slack://..."` and captures everything inside the
    /// quotes.
    pub fn for_scheme(scheme: &str) -> Self {
        let pattern = format!(r#""url": "({}://[^"]*)""#, regex::escape(scheme));
        Self {
            regex: Regex::new(&pattern).unwrap(),
        }
    }

    /// Search `line` for the trigger. Returns the captured URL.
    pub fn capture<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Strip exactly one trailing line terminator, if present. `\r\n` counts as
/// one terminator; any other trailing whitespace is content and stays.
fn strip_line_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    } else if line.ends_with('\r') {
        line.pop();
    }
}

/// Drain `reader` line-by-line until the producer closes it.
///
/// Each read blocks until a line or end-of-stream is available. Every line
/// is logged at INFO. The first line matching `trigger` is handed to
/// `on_match`; later matching lines are still logged and scanned, but the
/// correction is one-shot per session. The scanner never ends the stream
/// itself; the primary process must be allowed to run to completion.
///
/// Returns the number of lines consumed.
pub fn scan<R: BufRead>(
    mut reader: R,
    trigger: &TriggerPattern,
    logger: &Logger,
    mut on_match: impl FnMut(&str),
) -> Result<u64> {
    let mut buf = Vec::new();
    let mut lines = 0u64;
    let mut correction_issued = false;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .context("failed to read from the supervised process")?;
        if n == 0 {
            break;
        }
        lines += 1;

        let mut line = String::from_utf8_lossy(&buf).into_owned();
        strip_line_terminator(&mut line);
        logger.info(&line);

        if let Some(url) = trigger.capture(&line) {
            if correction_issued {
                logger.debug("url line ignored, correction already issued");
                continue;
            }
            correction_issued = true;
            on_match(url);
        }
    }

    Ok(lines)
}
