//! EWMH implementation of the backend traits over an X11 connection.
//!
//! Desktops are whatever the running window manager reports through the
//! standard root properties; all mutations go through client messages so the
//! WM stays the single owner of desktop state. Pinning maps to the
//! "on all desktops" value of `_NET_WM_DESKTOP`.

use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ClientMessageEvent, ConnectionExt, EventMask, MapState, Window,
};
use x11rb::rust_connection::RustConnection;

use crate::backend::{DesktopBackend, WindowBackend};

/// `_NET_WM_DESKTOP` value meaning "show on every desktop".
const ALL_DESKTOPS: u32 = 0xFFFF_FFFF;

/// Move requests carry a source indication of 2 ("pager or similar").
const SOURCE_PAGER: u32 = 2;

x11rb::atom_manager! {
    pub Atoms:
    AtomsCookie {
        _NET_NUMBER_OF_DESKTOPS,
        _NET_CURRENT_DESKTOP,
        _NET_DESKTOP_NAMES,
        _NET_CLIENT_LIST,
        _NET_ACTIVE_WINDOW,
        _NET_WM_DESKTOP,
        _NET_WM_NAME,
        _NET_WM_PID,
        UTF8_STRING,
    }
}

pub struct X11Backend {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
}

impl X11Backend {
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) =
            RustConnection::connect(None).context("cannot connect to X server")?;
        let root = conn.setup().roots[screen_num].root;
        let atoms = Atoms::new(&conn)?.reply()?;
        Ok(Self { conn, root, atoms })
    }

    /// Read a single 32-bit property value (CARDINAL or WINDOW).
    fn card32(&self, window: Window, property: Atom) -> Result<Option<u32>> {
        let reply = self
            .conn
            .get_property(false, window, property, AtomEnum::ANY, 0, 1)?
            .reply()?;
        if reply.format != 32 || reply.length == 0 {
            return Ok(None);
        }
        Ok(reply.value32().and_then(|mut values| values.next()))
    }

    /// Send a client message to the root window, the EWMH way of asking the
    /// WM to change desktop state.
    fn send_root_message(&self, window: Window, message_type: Atom, data: [u32; 5]) -> Result<()> {
        let event = ClientMessageEvent::new(32, window, message_type, data);
        self.conn.send_event(
            false,
            self.root,
            EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
            event,
        )?;
        self.conn.flush()?;
        Ok(())
    }

    fn send_move(&self, window: Window, index: u32) -> Result<()> {
        self.send_root_message(window, self.atoms._NET_WM_DESKTOP, [index, SOURCE_PAGER, 0, 0, 0])
    }

    fn client_list(&self) -> Result<Vec<Window>> {
        let reply = self
            .conn
            .get_property(false, self.root, self.atoms._NET_CLIENT_LIST, AtomEnum::WINDOW, 0, u32::MAX)?
            .reply()?;
        Ok(reply.value32().map(|values| values.collect()).unwrap_or_default())
    }

    fn desktop_names(&self) -> Result<Vec<String>> {
        let reply = self
            .conn
            .get_property(
                false,
                self.root,
                self.atoms._NET_DESKTOP_NAMES,
                self.atoms.UTF8_STRING,
                0,
                u32::MAX,
            )?
            .reply()?;
        if reply.length == 0 {
            return Ok(Vec::new());
        }
        Ok(reply
            .value
            .split(|&b| b == 0)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| String::from_utf8_lossy(chunk).to_string())
            .collect())
    }

    /// Raw `_NET_WM_DESKTOP` of a window; `ALL_DESKTOPS` means pinned.
    fn raw_desktop(&self, window: Window) -> Result<Option<u32>> {
        self.card32(window, self.atoms._NET_WM_DESKTOP)
    }

    fn pid_of(&self, window: Window) -> Result<Option<u32>> {
        self.card32(window, self.atoms._NET_WM_PID)
    }

    /// Window title: `_NET_WM_NAME` (UTF-8) first, `WM_NAME` as fallback.
    fn window_title(&self, window: Window) -> Result<Option<String>> {
        let reply = self
            .conn
            .get_property(false, window, self.atoms._NET_WM_NAME, self.atoms.UTF8_STRING, 0, 256)?
            .reply()?;
        if reply.length > 0 {
            return Ok(Some(String::from_utf8_lossy(&reply.value).to_string()));
        }

        let reply = self
            .conn
            .get_property(false, window, AtomEnum::WM_NAME, AtomEnum::STRING, 0, 256)?
            .reply()?;
        if reply.length > 0 {
            return Ok(Some(String::from_utf8_lossy(&reply.value).to_string()));
        }

        Ok(None)
    }

    fn is_mapped(&self, window: Window) -> bool {
        self.conn
            .get_window_attributes(window)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .map(|attrs| attrs.map_state == MapState::VIEWABLE)
            .unwrap_or(false)
    }

    fn check_index(&self, index: u32) -> Result<()> {
        let count = self.count()?;
        ensure!(index < count, "desktop {index} out of range (count {count})");
        Ok(())
    }

    /// All client-list windows belonging to the same process as `window`.
    fn application_windows(&self, window: Window) -> Result<Vec<Window>> {
        let pid = self
            .pid_of(window)?
            .ok_or_else(|| anyhow!("window {window:#x} has no _NET_WM_PID"))?;
        let mut windows = Vec::new();
        for candidate in self.client_list()? {
            if self.pid_of(candidate)? == Some(pid) {
                windows.push(candidate);
            }
        }
        ensure!(!windows.is_empty(), "no windows for pid {pid}");
        Ok(windows)
    }
}

/// Process name for a pid, from /proc.
fn process_name(pid: u32) -> Option<String> {
    std::fs::read_to_string(format!("/proc/{pid}/comm"))
        .ok()
        .map(|name| name.trim().to_string())
}

impl DesktopBackend for X11Backend {
    fn count(&self) -> Result<u32> {
        self.card32(self.root, self.atoms._NET_NUMBER_OF_DESKTOPS)?
            .ok_or_else(|| anyhow!("WM does not report _NET_NUMBER_OF_DESKTOPS"))
    }

    fn current(&self) -> Result<u32> {
        self.card32(self.root, self.atoms._NET_CURRENT_DESKTOP)?
            .ok_or_else(|| anyhow!("WM does not report _NET_CURRENT_DESKTOP"))
    }

    fn name(&self, index: u32) -> Result<String> {
        self.check_index(index)?;
        // Names are optional in EWMH; fall back to a positional label.
        Ok(self
            .desktop_names()?
            .get(index as usize)
            .cloned()
            .unwrap_or_else(|| format!("Desktop {}", index + 1)))
    }

    fn find_by_name(&self, fragment: &str) -> Result<Option<u32>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .desktop_names()?
            .iter()
            .position(|name| name.to_lowercase().contains(&needle))
            .map(|i| i as u32))
    }

    fn create(&self) -> Result<u32> {
        let count = self.count()?;
        self.send_root_message(
            self.root,
            self.atoms._NET_NUMBER_OF_DESKTOPS,
            [count + 1, 0, 0, 0, 0],
        )?;
        // The WM applies the change asynchronously; wait for it so that a
        // following Switch already sees the new desktop.
        for _ in 0..50 {
            if self.count()? > count {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(count)
    }

    fn remove(&self, index: u32) -> Result<()> {
        let count = self.count()?;
        ensure!(index < count, "desktop {index} out of range (count {count})");
        ensure!(count > 1, "cannot remove the last desktop");

        let fallback = index.saturating_sub(1);
        if self.current()? == index {
            self.make_visible(fallback)?;
        }
        // EWMH can only shrink the desktop list at the end, so re-home the
        // windows first: the removed desktop's windows join the neighbor,
        // everything above shifts down one slot.
        for window in self.client_list()? {
            match self.raw_desktop(window)? {
                Some(d) if d == index => self.send_move(window, fallback)?,
                Some(d) if d != ALL_DESKTOPS && d > index && d < count => {
                    self.send_move(window, d - 1)?
                }
                _ => {}
            }
        }
        self.send_root_message(
            self.root,
            self.atoms._NET_NUMBER_OF_DESKTOPS,
            [count - 1, 0, 0, 0, 0],
        )
    }

    fn make_visible(&self, index: u32) -> Result<()> {
        self.check_index(index)?;
        self.send_root_message(
            self.root,
            self.atoms._NET_CURRENT_DESKTOP,
            [index, x11rb::CURRENT_TIME, 0, 0, 0],
        )
    }

    fn is_visible(&self, index: u32) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.current()? == index)
    }

    fn desktop_of_window(&self, window: u32) -> Result<u32> {
        match self.raw_desktop(window)? {
            Some(ALL_DESKTOPS) => self.current(),
            Some(index) => Ok(index),
            None => Err(anyhow!("window {window:#x} has no desktop")),
        }
    }

    fn window_on_desktop(&self, index: u32, window: u32) -> Result<bool> {
        self.check_index(index)?;
        match self.raw_desktop(window)? {
            Some(d) => Ok(d == index || d == ALL_DESKTOPS),
            None => Err(anyhow!("window {window:#x} has no desktop")),
        }
    }

    fn move_window(&self, window: u32, index: u32) -> Result<()> {
        self.check_index(index)?;
        ensure!(self.raw_desktop(window)?.is_some(), "window {window:#x} is not managed");
        self.send_move(window, index)
    }

    fn move_active_window(&self, index: u32) -> Result<()> {
        self.check_index(index)?;
        let active = self
            .card32(self.root, self.atoms._NET_ACTIVE_WINDOW)?
            .filter(|&w| w != 0)
            .ok_or_else(|| anyhow!("no active window"))?;
        self.send_move(active, index)
    }

    fn pin_window(&self, window: u32) -> Result<()> {
        ensure!(self.raw_desktop(window)?.is_some(), "window {window:#x} is not managed");
        self.send_move(window, ALL_DESKTOPS)
    }

    fn unpin_window(&self, window: u32) -> Result<()> {
        match self.raw_desktop(window)? {
            Some(ALL_DESKTOPS) => self.send_move(window, self.current()?),
            Some(_) => Ok(()),
            None => Err(anyhow!("window {window:#x} is not managed")),
        }
    }

    fn is_window_pinned(&self, window: u32) -> Result<bool> {
        match self.raw_desktop(window)? {
            Some(d) => Ok(d == ALL_DESKTOPS),
            None => Err(anyhow!("window {window:#x} is not managed")),
        }
    }

    fn pin_application(&self, window: u32) -> Result<()> {
        for win in self.application_windows(window)? {
            self.send_move(win, ALL_DESKTOPS)?;
        }
        Ok(())
    }

    fn unpin_application(&self, window: u32) -> Result<()> {
        let current = self.current()?;
        for win in self.application_windows(window)? {
            if self.raw_desktop(win)? == Some(ALL_DESKTOPS) {
                self.send_move(win, current)?;
            }
        }
        Ok(())
    }

    fn is_application_pinned(&self, window: u32) -> Result<bool> {
        let windows = self.application_windows(window)?;
        for win in &windows {
            if self.raw_desktop(*win)? != Some(ALL_DESKTOPS) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl WindowBackend for X11Backend {
    fn main_window_of_pid(&self, pid: u32) -> Result<Option<u32>> {
        for window in self.client_list()? {
            if self.pid_of(window)? == Some(pid) {
                return Ok(Some(window));
            }
        }
        Ok(None)
    }

    fn main_window_of_process(&self, name: &str) -> Result<Option<u32>> {
        for window in self.client_list()? {
            let Some(pid) = self.pid_of(window)? else { continue };
            if let Some(process) = process_name(pid) {
                if process.eq_ignore_ascii_case(name) {
                    return Ok(Some(window));
                }
            }
        }
        Ok(None)
    }

    fn visit_visible_windows(
        &self,
        visitor: &mut dyn FnMut(u32, &str) -> ControlFlow<()>,
    ) -> Result<()> {
        for window in self.client_list()? {
            if !self.is_mapped(window) {
                continue;
            }
            let Some(title) = self.window_title(window)? else { continue };
            if title.is_empty() {
                continue;
            }
            if visitor(window, &title).is_break() {
                break;
            }
        }
        Ok(())
    }
}
