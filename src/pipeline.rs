//! The pipeline dispatcher: one token at a time, fully processed before the
//! next is looked at. Errors become register sentinels; whether a sentinel
//! stops the run is the break/continue policy's call, not the handler's.

use crate::backend::Backend;
use crate::cli;
use crate::commands::{self, Arity};
use crate::session::{CmdResult, ErrorKind, Flow, Session};

/// Run every token against the backend. Returns the final register value,
/// which doubles as the process exit code.
pub fn run<I, S>(args: I, session: &mut Session, backend: &dyn Backend) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for raw in args {
        let raw = raw.as_ref();
        match step(raw, session, backend) {
            Ok(Flow::Continue(register)) => session.register = register,
            Ok(Flow::Halt(code)) => return code,
            Err(kind) => {
                session.register = kind.sentinel();
                eprintln!("{}", failure_line(kind, raw));
                if session.policy.break_on_error {
                    break;
                }
                // In continue mode the sentinel stays in the register for the
                // next command to consume.
            }
        }
    }
    session.register
}

/// The one stderr line a failing token produces, wording keyed to whether the
/// token itself was bad or its action failed.
fn failure_line(kind: ErrorKind, raw: &str) -> String {
    match kind {
        ErrorKind::Action => format!("Error while processing '{raw}'"),
        ErrorKind::Parse => format!("Error in parameter '{raw}'"),
    }
}

fn step(raw: &str, session: &mut Session, backend: &dyn Backend) -> CmdResult {
    let parsed = cli::parse_arg(raw).ok_or(ErrorKind::Parse)?;
    let command = commands::lookup(&parsed.name).ok_or(ErrorKind::Parse)?;
    match (command.arity, parsed.value.as_deref()) {
        (Arity::NoValue, Some(_)) => Err(ErrorKind::Parse),
        (Arity::RequiresValue, None) => Err(ErrorKind::Parse),
        (_, value) => (command.run)(session, value, backend),
    }
}
