//! Desktop-addressing commands: enumeration, navigation, lifecycle and
//! reordering. Every handler re-queries the backend; nothing is cached
//! between pipeline steps.

use crate::backend::Backend;
use crate::reorder;
use crate::session::{CmdResult, ErrorKind, Flow, Session};

/// Range-check a register/parameter against the current desktop count.
pub(super) fn in_range(index: i32, count: u32) -> Option<u32> {
    (index >= 0 && (index as u32) < count).then_some(index as u32)
}

/// Resolve a desktop-addressing value: an integer position (out of range is
/// an action error) or a name fragment (no match is a parameter error).
fn addressed_desktop(value: &str, verbose: bool, backend: &dyn Backend) -> Result<u32, ErrorKind> {
    if let Ok(num) = value.parse::<i32>() {
        let count = backend.count().map_err(|_| ErrorKind::Action)?;
        return in_range(num, count).ok_or(ErrorKind::Action);
    }
    match backend.find_by_name(value) {
        Ok(Some(index)) => Ok(index),
        Ok(None) => {
            if verbose {
                println!("Could not find virtual desktop with name containing '{value}'");
            }
            Err(ErrorKind::Parse)
        }
        Err(_) => Err(ErrorKind::Action),
    }
}

/// Interpret the pipeline register as a desktop position.
pub(super) fn register_desktop(session: &Session, backend: &dyn Backend) -> Result<u32, ErrorKind> {
    let count = backend.count().map_err(|_| ErrorKind::Action)?;
    in_range(session.register, count).ok_or(ErrorKind::Action)
}

fn desk_name(backend: &dyn Backend, index: u32) -> String {
    backend.name(index).unwrap_or_default()
}

pub fn count(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let count = backend.count().map_err(|_| ErrorKind::Action)?;
    if session.policy.verbose {
        println!("Count of desktops: {count}");
    }
    Ok(Flow::Continue(count as i32))
}

/// One output line per desktop, the visible one suffixed.
pub(crate) fn desktop_lines(backend: &dyn Backend) -> anyhow::Result<Vec<String>> {
    let count = backend.count()?;
    let current = backend.current()?;
    let mut lines = Vec::with_capacity(count as usize);
    for i in 0..count {
        let name = backend.name(i)?;
        if i == current {
            lines.push(format!("{name} (visible)"));
        } else {
            lines.push(name);
        }
    }
    Ok(lines)
}

pub fn list(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let lines = desktop_lines(backend).map_err(|_| ErrorKind::Action)?;
    if session.policy.verbose {
        println!("Virtual desktops:");
        println!("-----------------");
    }
    for line in &lines {
        println!("{line}");
    }
    if session.policy.verbose {
        println!("\nCount of desktops: {}", lines.len());
    }
    Ok(Flow::Continue(session.register))
}

pub fn get_current_desktop(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let current = backend.current().map_err(|_| ErrorKind::Action)?;
    if session.policy.verbose {
        println!(
            "Current desktop: '{}' (desktop number {current})",
            desk_name(backend, current)
        );
    }
    Ok(Flow::Continue(current as i32))
}

pub fn get_desktop(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let index = addressed_desktop(value, verbose, backend)?;
    if verbose {
        println!(
            "Virtual desktop number {index} (desktop '{}') selected",
            desk_name(backend, index)
        );
    }
    Ok(Flow::Continue(index as i32))
}

pub fn is_visible(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let index = match value {
        Some(value) => addressed_desktop(value, verbose, backend)?,
        None => register_desktop(session, backend)?,
    };
    let visible = backend.is_visible(index).map_err(|_| ErrorKind::Action)?;
    if verbose {
        println!(
            "Virtual desktop number {index} (desktop '{}') is {}",
            desk_name(backend, index),
            if visible { "visible" } else { "not visible" }
        );
    }
    Ok(Flow::Continue(if visible { 0 } else { 1 }))
}

pub fn switch(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let index = match value {
        Some(value) => addressed_desktop(value, verbose, backend)?,
        None => register_desktop(session, backend)?,
    };
    if verbose {
        println!(
            "Switching to virtual desktop number {index} (desktop '{}')",
            desk_name(backend, index)
        );
    }
    backend.make_visible(index).map_err(|_| ErrorKind::Action)?;
    Ok(Flow::Continue(index as i32))
}

pub fn left(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    navigate(session, backend, true)
}

pub fn right(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    navigate(session, backend, false)
}

/// One step left or right from the current desktop. At the boundary the wrap
/// flag decides between jumping to the opposite edge and failing.
fn navigate(session: &mut Session, backend: &dyn Backend, leftward: bool) -> CmdResult {
    let verbose = session.policy.verbose;
    let wrap = session.policy.wrap_desktops;

    let target = (|| -> anyhow::Result<Option<u32>> {
        let count = backend.count()?;
        if count == 0 {
            // Nowhere to go; without this the wrap arithmetic underflows.
            return Ok(None);
        }
        let current = backend.current()?;
        let target = if leftward {
            match current {
                0 if wrap => count - 1,
                0 => return Ok(None),
                n => n - 1,
            }
        } else if current + 1 >= count {
            if wrap {
                0
            } else {
                return Ok(None);
            }
        } else {
            current + 1
        };
        backend.make_visible(target)?;
        Ok(Some(backend.current()?))
    })()
    .map_err(|_| ErrorKind::Action)?;

    let Some(now) = target else { return Err(ErrorKind::Action) };
    if verbose {
        println!(
            "Switched to {} virtual desktop, desktop number {now} ('{}') is active now",
            if leftward { "left" } else { "right" },
            desk_name(backend, now)
        );
    }
    Ok(Flow::Continue(now as i32))
}

pub fn new(session: &mut Session, _value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let index = backend.create().map_err(|_| ErrorKind::Action)?;
    if session.policy.verbose {
        println!("Created virtual desktop number {index}");
    }
    Ok(Flow::Continue(index as i32))
}

pub fn remove(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let (index, result) = match value {
        // Valueless form removes the desktop in the register, which keeps its
        // value on success.
        None => (register_desktop(session, backend)?, session.register),
        Some(value) => {
            let index = addressed_desktop(value, verbose, backend)?;
            (index, index as i32)
        }
    };
    if verbose {
        println!(
            "Removing virtual desktop number {index} (desktop '{}')",
            desk_name(backend, index)
        );
    }
    backend.remove(index).map_err(|_| ErrorKind::Action)?;
    Ok(Flow::Continue(result))
}

pub fn swap_desktop(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let (target, by_name) = resolve_reorder_target(value, verbose, backend)?;
    let source = register_desktop(session, backend)?;
    if source == target {
        if by_name && verbose {
            println!("Cannot swap virtual desktop with itself");
        }
        return Err(if by_name { ErrorKind::Parse } else { ErrorKind::Action });
    }
    if verbose {
        println!(
            "Swapping virtual desktops number {source} (desktop '{}') and number {target} (desktop '{}')",
            desk_name(backend, source),
            desk_name(backend, target)
        );
    }
    reorder::swap(backend, source, target).map_err(|_| ErrorKind::Action)?;
    Ok(Flow::Continue(target as i32))
}

pub fn insert_desktop(session: &mut Session, value: Option<&str>, backend: &dyn Backend) -> CmdResult {
    let verbose = session.policy.verbose;
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let (target, by_name) = resolve_reorder_target(value, verbose, backend)?;
    let source = register_desktop(session, backend)?;
    if source == target {
        if by_name && verbose {
            println!("Cannot insert virtual desktop before itself");
        }
        return Err(if by_name { ErrorKind::Parse } else { ErrorKind::Action });
    }
    if verbose {
        println!(
            "Inserting virtual desktop number {target} (desktop '{}') before desktop number {source} (desktop '{}') or vice versa",
            desk_name(backend, target),
            desk_name(backend, source)
        );
    }
    reorder::insert(backend, source, target).map_err(|_| ErrorKind::Action)?;
    Ok(Flow::Continue(target as i32))
}

/// Target resolution for SWAPDESKTOP/INSERTDESKTOP; reports whether the value
/// was a name, since the self-reorder error differs between the two forms.
fn resolve_reorder_target(
    value: &str,
    verbose: bool,
    backend: &dyn Backend,
) -> Result<(u32, bool), ErrorKind> {
    let by_name = value.parse::<i32>().is_err();
    Ok((addressed_desktop(value, verbose, backend)?, by_name))
}
