//! Turns a textual or numeric command value into a concrete window handle.
//!
//! The two entry points differ only in how they read the value: commands that
//! operate "on a process" take a pid or an exact process name, commands that
//! operate "on a window handle" take a raw handle or a title substring. Which
//! one applies is fixed per command, never inferred from the value.

use std::ops::ControlFlow;

use thiserror::Error;

use crate::backend::WindowBackend;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no window found for '{0}'")]
    NotFound(String),
    /// Integer value that cannot address anything (pid/handle must be > 0).
    #[error("'{0}' is not a valid window reference")]
    BadReference(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A resolved window. `title` is only known when the window was found by
/// title search; it feeds the verbose output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWindow {
    pub handle: u32,
    pub title: Option<String>,
}

impl FoundWindow {
    fn bare(handle: u32) -> Self {
        FoundWindow { handle, title: None }
    }
}

/// Resolve a process-oriented value: pid if it parses as an integer > 0,
/// otherwise an exact process name.
pub fn resolve_process(
    value: &str,
    windows: &(impl WindowBackend + ?Sized),
) -> Result<FoundWindow, ResolveError> {
    if let Ok(num) = value.parse::<i64>() {
        if num <= 0 {
            return Err(ResolveError::BadReference(value.to_string()));
        }
        return match windows.main_window_of_pid(num as u32)? {
            Some(handle) => Ok(FoundWindow::bare(handle)),
            None => Err(ResolveError::NotFound(value.to_string())),
        };
    }

    match windows.main_window_of_process(value.trim())? {
        Some(handle) => Ok(FoundWindow::bare(handle)),
        None => Err(ResolveError::NotFound(value.to_string())),
    }
}

/// Resolve a window-oriented value: raw handle if it parses as an integer
/// > 0, otherwise a case-insensitive title substring search over the visible
/// windows, first match wins.
pub fn resolve_window(
    value: &str,
    windows: &(impl WindowBackend + ?Sized),
) -> Result<FoundWindow, ResolveError> {
    if let Ok(num) = value.parse::<i64>() {
        if num <= 0 {
            return Err(ResolveError::BadReference(value.to_string()));
        }
        // A raw handle is trusted as-is; the backend call that follows will
        // reject it if it names nothing.
        return Ok(FoundWindow::bare(num as u32));
    }

    // Strip the ^ marker so a script whose own title carries ^^ does not
    // match itself when searching for a generic substring.
    let needle = value.trim().replace('^', "").to_lowercase();

    let mut found: Option<FoundWindow> = None;
    windows.visit_visible_windows(&mut |handle, title| {
        if title.to_lowercase().contains(&needle) {
            found = Some(FoundWindow {
                handle,
                title: Some(title.to_string()),
            });
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    found.ok_or_else(|| ResolveError::NotFound(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;

    fn backend() -> FakeBackend {
        let b = FakeBackend::with_desktops(3);
        b.add_window(100, "Mail - Inbox", 41, "thunderbird", 0);
        b.add_window(200, "notepad - readme.txt", 42, "notepad", 1);
        b.add_window(300, "Terminal ^^ runner", 43, "bash", 2);
        b
    }

    #[test]
    fn pid_resolves_to_main_window() {
        let found = resolve_process("42", &backend()).unwrap();
        assert_eq!(found.handle, 200);
    }

    #[test]
    fn process_name_is_exact_and_case_insensitive() {
        let found = resolve_process("Notepad", &backend()).unwrap();
        assert_eq!(found.handle, 200);
        assert!(matches!(
            resolve_process("note", &backend()),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn nonpositive_pid_is_rejected_before_any_lookup() {
        assert!(matches!(
            resolve_process("0", &backend()),
            Err(ResolveError::BadReference(_))
        ));
        assert!(matches!(
            resolve_process("-5", &backend()),
            Err(ResolveError::BadReference(_))
        ));
    }

    #[test]
    fn raw_handle_is_used_as_is() {
        let found = resolve_window("12345", &backend()).unwrap();
        assert_eq!(found.handle, 12345);
    }

    #[test]
    fn title_search_takes_first_substring_match() {
        let found = resolve_window("READ", &backend()).unwrap();
        assert_eq!(found.handle, 200);
        assert_eq!(found.title.as_deref(), Some("notepad - readme.txt"));
    }

    #[test]
    fn caret_marker_is_stripped_before_matching() {
        // "run^^ner" becomes "runner", which only the terminal title contains.
        let found = resolve_window("run^^ner", &backend()).unwrap();
        assert_eq!(found.handle, 300);
    }

    #[test]
    fn missing_title_fails_instead_of_yielding_a_null_handle() {
        assert!(matches!(
            resolve_window("no such window", &backend()),
            Err(ResolveError::NotFound(_))
        ));
    }
}
