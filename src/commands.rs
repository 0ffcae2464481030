pub mod control;
pub mod desktop;
pub mod window;

use crate::backend::Backend;
use crate::session::{CmdResult, Session};

/// Whether a command wants a `:value` on its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    NoValue,
    OptionalValue,
    RequiresValue,
}

pub type Handler = fn(&mut Session, Option<&str>, &dyn Backend) -> CmdResult;

pub struct Command {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub run: Handler,
}

/// Every command the pipeline understands, canonical name first.
/// Names and aliases are matched case-insensitively.
pub const COMMANDS: &[Command] = &[
    Command { name: "Help", aliases: &["H", "?"], arity: Arity::NoValue, run: control::help },
    Command { name: "Quiet", aliases: &["Q"], arity: Arity::NoValue, run: control::quiet },
    Command { name: "Verbose", aliases: &["V"], arity: Arity::NoValue, run: control::verbose },
    Command { name: "Break", aliases: &["B"], arity: Arity::NoValue, run: control::break_on_error },
    Command { name: "Continue", aliases: &["CO"], arity: Arity::NoValue, run: control::continue_on_error },
    Command { name: "Wrap", aliases: &["W"], arity: Arity::NoValue, run: control::wrap },
    Command { name: "NoWrap", aliases: &["NW"], arity: Arity::NoValue, run: control::nowrap },
    Command { name: "Count", aliases: &["C"], arity: Arity::NoValue, run: desktop::count },
    Command { name: "List", aliases: &["LI"], arity: Arity::NoValue, run: desktop::list },
    Command {
        name: "GetCurrentDesktop",
        aliases: &["GCD"],
        arity: Arity::NoValue,
        run: desktop::get_current_desktop,
    },
    Command { name: "GetDesktop", aliases: &["GD"], arity: Arity::RequiresValue, run: desktop::get_desktop },
    Command { name: "IsVisible", aliases: &["IV"], arity: Arity::OptionalValue, run: desktop::is_visible },
    Command { name: "Switch", aliases: &["S"], arity: Arity::OptionalValue, run: desktop::switch },
    Command { name: "Left", aliases: &["L"], arity: Arity::NoValue, run: desktop::left },
    Command { name: "Right", aliases: &["RI"], arity: Arity::NoValue, run: desktop::right },
    Command { name: "New", aliases: &["N"], arity: Arity::NoValue, run: desktop::new },
    Command { name: "Remove", aliases: &["R"], arity: Arity::OptionalValue, run: desktop::remove },
    Command { name: "SwapDesktop", aliases: &["SD"], arity: Arity::RequiresValue, run: desktop::swap_desktop },
    Command {
        name: "InsertDesktop",
        aliases: &["ID"],
        arity: Arity::RequiresValue,
        run: desktop::insert_desktop,
    },
    Command {
        name: "GetDesktopFromWindow",
        aliases: &["GDFW"],
        arity: Arity::RequiresValue,
        run: window::get_desktop_from_window,
    },
    Command {
        name: "GetDesktopFromWindowHandle",
        aliases: &["GDFWH"],
        arity: Arity::RequiresValue,
        run: window::get_desktop_from_window_handle,
    },
    Command {
        name: "IsWindowOnDesktop",
        aliases: &["IWOD"],
        arity: Arity::RequiresValue,
        run: window::is_window_on_desktop,
    },
    Command {
        name: "IsWindowHandleOnDesktop",
        aliases: &["IWHOD"],
        arity: Arity::RequiresValue,
        run: window::is_window_handle_on_desktop,
    },
    Command { name: "MoveWindow", aliases: &["MW"], arity: Arity::RequiresValue, run: window::move_window },
    Command {
        name: "MoveWindowHandle",
        aliases: &["MWH"],
        arity: Arity::RequiresValue,
        run: window::move_window_handle,
    },
    Command {
        name: "MoveActiveWindow",
        aliases: &["MAW"],
        arity: Arity::NoValue,
        run: window::move_active_window,
    },
    Command { name: "PinWindow", aliases: &["PW"], arity: Arity::RequiresValue, run: window::pin_window },
    Command {
        name: "PinWindowHandle",
        aliases: &["PWH"],
        arity: Arity::RequiresValue,
        run: window::pin_window_handle,
    },
    Command { name: "UnPinWindow", aliases: &["UPW"], arity: Arity::RequiresValue, run: window::unpin_window },
    Command {
        name: "UnPinWindowHandle",
        aliases: &["UPWH"],
        arity: Arity::RequiresValue,
        run: window::unpin_window_handle,
    },
    Command {
        name: "IsWindowPinned",
        aliases: &["IWP"],
        arity: Arity::RequiresValue,
        run: window::is_window_pinned,
    },
    Command {
        name: "IsWindowHandlePinned",
        aliases: &["IWHP"],
        arity: Arity::RequiresValue,
        run: window::is_window_handle_pinned,
    },
    Command {
        name: "PinApplication",
        aliases: &["PA"],
        arity: Arity::RequiresValue,
        run: window::pin_application,
    },
    Command {
        name: "UnPinApplication",
        aliases: &["UPA"],
        arity: Arity::RequiresValue,
        run: window::unpin_application,
    },
    Command {
        name: "IsApplicationPinned",
        aliases: &["IAP"],
        arity: Arity::RequiresValue,
        run: window::is_application_pinned,
    },
    Command { name: "Calculate", aliases: &["Calc", "CA"], arity: Arity::RequiresValue, run: control::calculate },
    Command { name: "Sleep", aliases: &["SL"], arity: Arity::RequiresValue, run: control::sleep },
    Command { name: "WaitKey", aliases: &["WK"], arity: Arity::NoValue, run: control::wait_key },
];

/// Case-insensitive lookup over canonical names and aliases.
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| {
        cmd.name.eq_ignore_ascii_case(name)
            || cmd.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("SWITCH").map(|c| c.name), Some("Switch"));
        assert_eq!(lookup("switch").map(|c| c.name), Some("Switch"));
    }

    #[test]
    fn aliases_resolve_to_canonical_command() {
        assert_eq!(lookup("gcd").map(|c| c.name), Some("GetCurrentDesktop"));
        assert_eq!(lookup("?").map(|c| c.name), Some("Help"));
        assert_eq!(lookup("ca").map(|c| c.name), Some("Calculate"));
    }

    #[test]
    fn unknown_name_finds_nothing() {
        assert!(lookup("BogusCommand").is_none());
    }

    #[test]
    fn no_duplicate_names_or_aliases() {
        let mut seen = std::collections::HashSet::new();
        for cmd in COMMANDS {
            assert!(seen.insert(cmd.name.to_lowercase()), "duplicate {}", cmd.name);
            for alias in cmd.aliases {
                assert!(seen.insert(alias.to_lowercase()), "duplicate {alias}");
            }
        }
    }
}
