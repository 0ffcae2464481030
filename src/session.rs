/// Session flags consulted by the dispatcher and the navigation commands.
///
/// Mutated only by the dedicated flag commands (QUIET/VERBOSE, BREAK/CONTINUE,
/// WRAP/NOWRAP), which always succeed and never touch the register.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    /// Progress/result lines on stdout.
    pub verbose: bool,
    /// Stop the pipeline at the first error sentinel.
    pub break_on_error: bool,
    /// LEFT/RIGHT jump to the opposite edge instead of failing.
    pub wrap_desktops: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            verbose: true,
            break_on_error: true,
            wrap_desktops: false,
        }
    }
}

/// The pipeline state threaded through every command of one invocation.
///
/// `register` is the single integer each command consumes and produces: a
/// desktop index, a count, a 0/1 predicate answer, or an error sentinel.
/// Negative values are reserved sentinels and never valid desktop indices.
#[derive(Debug, Default)]
pub struct Session {
    pub register: i32,
    pub policy: Policy,
}

/// How a command handler failed. Surfaced to the caller only as a register
/// sentinel plus one stderr line naming the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token, unknown command, wrong arity, or a required value
    /// that neither parses nor matches a desktop name. Register -2.
    Parse,
    /// The backend rejected the request: index out of range, window or
    /// process not found, move/pin/switch refused. Register -1.
    Action,
}

impl ErrorKind {
    pub fn sentinel(self) -> i32 {
        match self {
            ErrorKind::Parse => -2,
            ErrorKind::Action => -1,
        }
    }
}

/// Handler result on the success path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going with this register value.
    Continue(i32),
    /// Stop the whole run immediately with this exit code (HELP).
    Halt(i32),
}

pub type CmdResult = Result<Flow, ErrorKind>;
