//! Flag, arithmetic and timing commands. The flag commands mutate the
//! control policy only; they never fail and never touch the register.

use std::io::BufRead;

use crate::backend::Backend;
use crate::help;
use crate::session::{CmdResult, ErrorKind, Flow, Session};

pub fn help(_session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    help::print_help();
    // HELP ends the run on the spot; remaining tokens are ignored.
    Ok(Flow::Halt(0))
}

pub fn quiet(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    session.policy.verbose = false;
    Ok(Flow::Continue(session.register))
}

pub fn verbose(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    println!("Verbose mode enabled");
    session.policy.verbose = true;
    Ok(Flow::Continue(session.register))
}

pub fn break_on_error(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    if session.policy.verbose {
        println!("Break on error enabled");
    }
    session.policy.break_on_error = true;
    Ok(Flow::Continue(session.register))
}

pub fn continue_on_error(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    if session.policy.verbose {
        println!("Break on error disabled");
    }
    session.policy.break_on_error = false;
    Ok(Flow::Continue(session.register))
}

pub fn wrap(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    if session.policy.verbose {
        println!("Wrapping desktops enabled");
    }
    session.policy.wrap_desktops = true;
    Ok(Flow::Continue(session.register))
}

pub fn nowrap(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    if session.policy.verbose {
        println!("Wrapping desktops disabled");
    }
    session.policy.wrap_desktops = false;
    Ok(Flow::Continue(session.register))
}

pub fn calculate(session: &mut Session, value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let addend: i32 = value.parse().map_err(|_| ErrorKind::Parse)?;
    if session.policy.verbose {
        println!("Adding {addend} to last result");
    }
    Ok(Flow::Continue(session.register.wrapping_add(addend)))
}

pub fn sleep(session: &mut Session, value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    let Some(value) = value else { return Err(ErrorKind::Parse) };
    let millis: i32 = value.parse().map_err(|_| ErrorKind::Parse)?;
    if millis <= 0 {
        return Err(ErrorKind::Action);
    }
    if session.policy.verbose {
        println!("Waiting {millis}ms");
    }
    std::thread::sleep(std::time::Duration::from_millis(millis as u64));
    Ok(Flow::Continue(session.register))
}

pub fn wait_key(session: &mut Session, _value: Option<&str>, _backend: &dyn Backend) -> CmdResult {
    if session.policy.verbose {
        println!("Press enter to continue");
    }
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
    Ok(Flow::Continue(session.register))
}
