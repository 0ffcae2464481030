//! Window relocation and pinning commands.
//!
//! Two addressing families share every operation: "window" commands take a
//! process id or an exact process name, "window handle" commands take a raw
//! handle or a title substring. The family is fixed per command name; the
//! resolver never guesses from the value.

use crate::backend::Backend;
use crate::resolver::{self, FoundWindow};
use crate::session::{CmdResult, ErrorKind, Flow, Session};

use super::desktop::register_desktop;

#[derive(Clone, Copy)]
enum TargetKind {
    Process,
    WindowHandle,
}

#[derive(Clone, Copy)]
enum Noun {
    Window,
    Application,
}

impl Noun {
    fn as_str(self) -> &'static str {
        match self {
            Noun::Window => "Window",
            Noun::Application => "Application",
        }
    }
}

/// A resolved target plus the phrase used in verbose output ("of process
/// 'foo'", "to handle 1234", "'Untitled - editor'").
struct Target {
    handle: u32,
    desc: String,
}

fn resolve_target(
    kind: TargetKind,
    value: &str,
    verbose: bool,
    backend: &dyn Backend,
) -> Result<Target, ErrorKind> {
    let numeric = value.parse::<i64>().is_ok();
    let resolved = match kind {
        TargetKind::Process => resolver::resolve_process(value, backend),
        TargetKind::WindowHandle => resolver::resolve_window(value, backend),
    };
    match resolved {
        Ok(FoundWindow { handle, title }) => {
            let desc = match (kind, numeric, title) {
                (_, _, Some(title)) => format!("'{title}'"),
                (TargetKind::Process, true, None) => format!("to process id {value}"),
                (TargetKind::Process, false, None) => format!("of process '{value}'"),
                (TargetKind::WindowHandle, _, None) => format!("to handle {value}"),
            };
            Ok(Target { handle, desc })
        }
        Err(err) => {
            if verbose {
                match (kind, numeric) {
                    (TargetKind::Process, true) => {
                        println!("Window to process id {value} not found")
                    }
                    (TargetKind::Process, false) => println!("Process '{value}' not found"),
                    (TargetKind::WindowHandle, _) => {
                        println!("Window with text '{value}' in title not found")
                    }
                }
            }
            log::debug!("target '{value}' did not resolve: {err}");
            Err(ErrorKind::Action)
        }
    }
}

fn desk_name(backend: &dyn Backend, index: u32) -> String {
    backend.name(index).unwrap_or_default()
}

pub fn get_desktop_from_window(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    locate(TargetKind::Process, session, value, backend)
}

pub fn get_desktop_from_window_handle(
    session: &mut Session,
    value: Option<&str>,
    backend: &dyn Backend,
) -> CmdResult {
    locate(TargetKind::WindowHandle, session, value, backend)
}

fn locate(kind: TargetKind, session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let target = resolve_target(kind, value, verbose, backend)?;
    let index = backend
        .desktop_of_window(target.handle)
        .map_err(|_| ErrorKind::Action)?;
    if verbose {
        println!(
            "Window {} is on desktop number {index} (desktop '{}')",
            target.desc,
            desk_name(backend, index)
        );
    }
    Ok(Flow::Continue(index as i32))
}

pub fn is_window_on_desktop(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    on_desktop(TargetKind::Process, session, value, backend)
}

pub fn is_window_handle_on_desktop(
    session: &mut Session,
    value: Option<&str>,
    backend: &dyn Backend,
) -> CmdResult {
    on_desktop(TargetKind::WindowHandle, session, value, backend)
}

fn on_desktop(kind: TargetKind, session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let index = register_desktop(session, backend)?;
    let target = resolve_target(kind, value, verbose, backend)?;
    let present = backend
        .window_on_desktop(index, target.handle)
        .map_err(|_| ErrorKind::Action)?;
    if verbose {
        println!(
            "Window {} is {}on desktop number {index} (desktop '{}')",
            target.desc,
            if present { "" } else { "not " },
            desk_name(backend, index)
        );
    }
    Ok(Flow::Continue(if present { 0 } else { 1 }))
}

pub fn move_window(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    move_to(TargetKind::Process, session, value, backend)
}

pub fn move_window_handle(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    move_to(TargetKind::WindowHandle, session, value, backend)
}

fn move_to(kind: TargetKind, session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let index = register_desktop(session, backend)?;
    let target = resolve_target(kind, value, verbose, backend)?;
    backend
        .move_window(target.handle, index)
        .map_err(|_| ErrorKind::Action)?;
    if verbose {
        println!(
            "Window {} moved to desktop number {index} (desktop '{}')",
            target.desc,
            desk_name(backend, index)
        );
    }
    Ok(Flow::Continue(session.register))
}

pub fn move_active_window(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let index = register_desktop(session, backend)?;
    match backend.move_active_window(index) {
        Ok(()) => {
            if verbose {
                println!(
                    "Active window moved to desktop number {index} (desktop '{}')",
                    desk_name(backend, index)
                );
            }
            Ok(Flow::Continue(session.register))
        }
        Err(_) => {
            if verbose {
                println!("No active window or move failed");
            }
            Err(ErrorKind::Action)
        }
    }
}

pub fn pin_window(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    set_pin(TargetKind::Process, Noun::Window, true, session, value, backend)
}

pub fn pin_window_handle(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    set_pin(TargetKind::WindowHandle, Noun::Window, true, session, value, backend)
}

pub fn unpin_window(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    set_pin(TargetKind::Process, Noun::Window, false, session, value, backend)
}

pub fn unpin_window_handle(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    set_pin(TargetKind::WindowHandle, Noun::Window, false, session, value, backend)
}

pub fn pin_application(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    set_pin(TargetKind::Process, Noun::Application, true, session, value, backend)
}

pub fn unpin_application(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    set_pin(TargetKind::Process, Noun::Application, false, session, value, backend)
}

fn set_pin(
    kind: TargetKind,
    noun: Noun,
    pin: bool,
    session: &mut Session,
    value: Option<&str>,
    backend: &dyn Backend,
) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let target = resolve_target(kind, value, verbose, backend)?;
    let result = match (noun, pin) {
        (Noun::Window, true) => backend.pin_window(target.handle),
        (Noun::Window, false) => backend.unpin_window(target.handle),
        (Noun::Application, true) => backend.pin_application(target.handle),
        (Noun::Application, false) => backend.unpin_application(target.handle),
    };
    result.map_err(|_| ErrorKind::Action)?;
    if verbose {
        println!(
            "{} {} {} all desktops",
            noun.as_str(),
            target.desc,
            if pin { "pinned to" } else { "unpinned from" }
        );
    }
    Ok(Flow::Continue(session.register))
}

pub fn is_window_pinned(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    pin_status(TargetKind::Process, Noun::Window, session, value, backend)
}

pub fn is_window_handle_pinned(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    pin_status(TargetKind::WindowHandle, Noun::Window, session, value, backend)
}

pub fn is_application_pinned(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    pin_status(TargetKind::Process, Noun::Application, session, value, backend)
}

fn pin_status(
    kind: TargetKind,
    noun: Noun,
    session: &mut Session,
    value: Option<&str>,
    backend: &dyn Backend,
) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let target = resolve_target(kind, value, verbose, backend)?;
    let pinned = match noun {
        Noun::Window => backend.is_window_pinned(target.handle),
        Noun::Application => backend.is_application_pinned(target.handle),
    }
    .map_err(|_| ErrorKind::Action)?;
    if verbose {
        println!(
            "{} {} is {}pinned to all desktops",
            noun.as_str(),
            target.desc,
            if pinned { "" } else { "not " }
        );
    }
    Ok(Flow::Continue(if pinned { 0 } else { 1 }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;

    fn backend() -> FakeBackend {
        let b = FakeBackend::with_desktops(3);
        b.add_window(200, "notepad - readme.txt", 42, "notepad", 0);
        b
    }

    fn session_on(register: i32) -> Session {
        let mut session = Session::default();
        session.policy.verbose = false;
        session.register = register;
        session
    }

    #[test]
    fn move_window_targets_register_desktop_and_keeps_register() {
        let b = backend();
        let mut s = session_on(2);
        assert_eq!(move_window(&mut s, Some("notepad"), &b), Ok(Flow::Continue(2)));
        assert_eq!(b.desktop_of(200), Some(2));
    }

    #[test]
    fn move_window_with_unknown_process_is_an_action_error() {
        let b = backend();
        let mut s = session_on(1);
        assert_eq!(move_window(&mut s, Some("gedit"), &b), Err(ErrorKind::Action));
        assert_eq!(b.desktop_of(200), Some(0));
    }

    #[test]
    fn pin_round_trip_reports_zero_then_one() {
        let b = backend();
        let mut s = session_on(0);
        assert_eq!(pin_window(&mut s, Some("42"), &b), Ok(Flow::Continue(0)));
        assert_eq!(is_window_pinned(&mut s, Some("42"), &b), Ok(Flow::Continue(0)));
        assert_eq!(unpin_window(&mut s, Some("42"), &b), Ok(Flow::Continue(0)));
        assert_eq!(is_window_pinned(&mut s, Some("42"), &b), Ok(Flow::Continue(1)));
    }

    #[test]
    fn handle_on_desktop_answers_zero_for_yes_one_for_no() {
        let b = backend();
        let mut s = session_on(0);
        assert_eq!(
            is_window_handle_on_desktop(&mut s, Some("readme"), &b),
            Ok(Flow::Continue(0))
        );
        s.register = 1;
        assert_eq!(
            is_window_handle_on_desktop(&mut s, Some("readme"), &b),
            Ok(Flow::Continue(1))
        );
    }

    #[test]
    fn nonpositive_id_is_an_action_error() {
        let b = backend();
        let mut s = session_on(0);
        assert_eq!(move_window(&mut s, Some("0"), &b), Err(ErrorKind::Action));
        assert_eq!(move_window_handle(&mut s, Some("-3"), &b), Err(ErrorKind::Action));
    }
}
