//! External tool invocation.
//!
//! One code path runs every subprocess: spawn with a hard wall-clock
//! deadline, capture stderr for diagnostics, and guarantee the child is
//! terminated on every exit path. `kill_on_drop` covers the timeout
//! branch (and caller cancellation): dropping the wait future reaps the
//! process.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::ConversionError;

/// Cap on the stderr excerpt carried in error messages.
const STDERR_EXCERPT_CHARS: usize = 200;

/// Run `program args...` to completion within `timeout`.
///
/// Non-zero exit becomes [`ConversionError::ToolFailed`] with a bounded
/// stderr excerpt; deadline expiry becomes [`ConversionError::Timeout`]
/// and the child is killed.
pub(crate) async fn run_tool(
    tool_name: &str,
    program: &Path,
    args: &[String],
    timeout: Duration,
) -> Result<(), ConversionError> {
    tracing::debug!(tool = tool_name, ?args, "Invoking external tool");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ConversionError::ToolFailed {
            tool: tool_name.to_string(),
            detail: truncate_excerpt(&format!("failed to spawn: {}", e)),
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| ConversionError::ToolFailed {
            tool: tool_name.to_string(),
            detail: truncate_excerpt(&format!("wait failed: {}", e)),
        })?,
        Err(_) => {
            // The wait future (owning the child) is dropped here;
            // kill_on_drop reaps the process.
            tracing::warn!(
                tool = tool_name,
                timeout_secs = timeout.as_secs(),
                "External tool exceeded deadline, killing"
            );
            return Err(ConversionError::Timeout {
                tool: tool_name.to_string(),
                seconds: timeout.as_secs(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!(tool = tool_name, status = ?output.status, "External tool failed");
        return Err(ConversionError::ToolFailed {
            tool: tool_name.to_string(),
            detail: truncate_excerpt(stderr.trim()),
        });
    }

    Ok(())
}

/// Bound a diagnostic string to a safe excerpt, respecting char
/// boundaries.
pub(crate) fn truncate_excerpt(s: &str) -> String {
    if s.chars().count() <= STDERR_EXCERPT_CHARS {
        s.to_string()
    } else {
        s.chars().take(STDERR_EXCERPT_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_run_tool_success() {
        let result = run_tool(
            "true",
            &PathBuf::from("true"),
            &[],
            Duration::from_secs(5),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_tool_nonzero_exit() {
        let result = run_tool(
            "false",
            &PathBuf::from("false"),
            &[],
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(ConversionError::ToolFailed { .. })));
    }

    #[tokio::test]
    async fn test_run_tool_timeout_kills_child() {
        let result = run_tool(
            "sleep",
            &PathBuf::from("sleep"),
            &["30".to_string()],
            Duration::from_millis(100),
        )
        .await;
        match result {
            Err(ConversionError::Timeout { tool, .. }) => assert_eq!(tool, "sleep"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_tool_missing_program() {
        let result = run_tool(
            "nonexistent_tool_12345",
            &PathBuf::from("nonexistent_tool_12345"),
            &[],
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(result, Err(ConversionError::ToolFailed { .. })));
    }

    #[test]
    fn test_truncate_excerpt() {
        let short = "short error";
        assert_eq!(truncate_excerpt(short), short);

        let long = "x".repeat(500);
        assert_eq!(truncate_excerpt(&long).len(), 200);
    }
}
