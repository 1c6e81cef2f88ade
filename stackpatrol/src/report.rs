//! Plain-text summary rendering and the run's exit code.

use crate::status::{OsUpdateStatus, RunReport, StackStatus};

/// Render the whole run as one text summary: a host header, one line per
/// stack, a blank separator, and one OS-update line.
pub fn render(report: &RunReport, hostname: &str) -> String {
    let mut lines = Vec::with_capacity(report.stacks.len() + 4);
    lines.push(format!("Update summary for host: {}", hostname));
    lines.push(String::new());

    for status in &report.stacks {
        lines.push(render_stack(status));
    }

    lines.push(String::new());
    match &report.os {
        Some(os) => lines.push(render_os(os)),
        None => lines.push("OS update - skipped".to_string()),
    }

    lines.join("\n")
}

fn render_stack(status: &StackStatus) -> String {
    let health = match status.health {
        Some(verdict) => verdict.to_string(),
        None => "skipped".to_string(),
    };
    format!(
        "{} - pull: {} | down: {} | up: {} | health: {} | not latest: {} | error: {}",
        status.folder.display(),
        status.pulled,
        status.downed,
        status.upped,
        health,
        format_images(&status.pinned_images),
        status.error.replace('\n', " / "),
    )
}

fn render_os(os: &OsUpdateStatus) -> String {
    format!(
        "OS update - refresh: {} | upgrade: {} | error: {}",
        os.refreshed,
        os.upgraded,
        os.error.replace('\n', " / "),
    )
}

/// Image list as reported per stack; an empty list means every declared
/// image rides the floating tag.
pub fn format_images(images: &[String]) -> String {
    if images.is_empty() {
        "All latest".to_string()
    } else {
        images.join(", ")
    }
}

/// Process exit code for automated callers: 0 when every stack is healthy
/// and the OS patch succeeded (or was skipped), 1 when any stack errored or
/// failed its health check, 2 when only the OS patch failed.
pub fn exit_code(report: &RunReport) -> i32 {
    let stacks_ok = report.stacks.iter().all(StackStatus::succeeded);
    let os_ok = report.os.as_ref().map_or(true, OsUpdateStatus::succeeded);

    if !stacks_ok {
        1
    } else if !os_ok {
        2
    } else {
        0
    }
}
