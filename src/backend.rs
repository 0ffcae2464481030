//! Capability traits for the OS desktop/window manager.
//!
//! The pipeline core never talks to X11 directly; it sees desktops as an
//! ordered collection of slots and windows as opaque handles. `x11.rs`
//! provides the real implementation, the fake below backs the tests.

use std::ops::ControlFlow;

use anyhow::Result;

/// Ordered virtual desktop collection plus window placement on it.
///
/// Desktop positions are 0-based and re-queried per call; the collection may
/// change between two calls (other processes create and remove desktops too).
pub trait DesktopBackend {
    fn count(&self) -> Result<u32>;
    fn current(&self) -> Result<u32>;
    fn name(&self, index: u32) -> Result<String>;
    /// First desktop whose name contains `fragment` (case-insensitive).
    fn find_by_name(&self, fragment: &str) -> Result<Option<u32>>;
    /// Create a desktop at the end of the collection, returning its position.
    fn create(&self) -> Result<u32>;
    fn remove(&self, index: u32) -> Result<()>;
    fn make_visible(&self, index: u32) -> Result<()>;
    fn is_visible(&self, index: u32) -> Result<bool>;
    /// Position of the desktop the window currently occupies.
    fn desktop_of_window(&self, window: u32) -> Result<u32>;
    fn window_on_desktop(&self, index: u32, window: u32) -> Result<bool>;
    fn move_window(&self, window: u32, index: u32) -> Result<()>;
    fn move_active_window(&self, index: u32) -> Result<()>;
    fn pin_window(&self, window: u32) -> Result<()>;
    fn unpin_window(&self, window: u32) -> Result<()>;
    fn is_window_pinned(&self, window: u32) -> Result<bool>;
    fn pin_application(&self, window: u32) -> Result<()>;
    fn unpin_application(&self, window: u32) -> Result<()>;
    fn is_application_pinned(&self, window: u32) -> Result<bool>;
}

/// Process and window enumeration.
pub trait WindowBackend {
    /// Main window of the process with this id, if it has one.
    fn main_window_of_pid(&self, pid: u32) -> Result<Option<u32>>;
    /// Main window of the first running process with this exact name
    /// (case-insensitive).
    fn main_window_of_process(&self, name: &str) -> Result<Option<u32>>;
    /// Visit every currently visible top-level window with its title, in
    /// backend order. The visitor can stop the enumeration early.
    fn visit_visible_windows(
        &self,
        visitor: &mut dyn FnMut(u32, &str) -> ControlFlow<()>,
    ) -> Result<()>;
}

/// Both capabilities behind one object, the shape command handlers take.
pub trait Backend: DesktopBackend + WindowBackend {}

impl<T: DesktopBackend + WindowBackend> Backend for T {}

#[cfg(test)]
pub mod fake {
    //! In-memory backend for pipeline and engine tests.

    use super::*;
    use std::cell::RefCell;

    /// Window placement marker for "on all desktops".
    const PINNED: u32 = u32::MAX;

    #[derive(Debug, Clone)]
    pub struct FakeWindow {
        pub handle: u32,
        pub title: String,
        pub pid: u32,
        pub process: String,
        pub desktop: u32,
        pub visible: bool,
    }

    #[derive(Debug, Default)]
    struct State {
        desktops: Vec<String>,
        current: u32,
        windows: Vec<FakeWindow>,
        pinned_apps: Vec<u32>,
        active: Option<u32>,
    }

    /// Scriptable in-memory desktop/window manager.
    #[derive(Default)]
    pub struct FakeBackend {
        state: RefCell<State>,
    }

    impl FakeBackend {
        pub fn with_desktops(count: u32) -> Self {
            let state = State {
                desktops: (0..count).map(|i| format!("Desktop {}", i + 1)).collect(),
                ..State::default()
            };
            FakeBackend { state: RefCell::new(state) }
        }

        pub fn add_window(&self, handle: u32, title: &str, pid: u32, process: &str, desktop: u32) {
            self.state.borrow_mut().windows.push(FakeWindow {
                handle,
                title: title.to_string(),
                pid,
                process: process.to_string(),
                desktop,
                visible: true,
            });
        }

        pub fn set_active(&self, handle: u32) {
            self.state.borrow_mut().active = Some(handle);
        }

        pub fn desktop_of(&self, handle: u32) -> Option<u32> {
            self.state
                .borrow()
                .windows
                .iter()
                .find(|w| w.handle == handle)
                .map(|w| w.desktop)
        }

        fn with_window<R>(&self, handle: u32, f: impl FnOnce(&mut FakeWindow) -> R) -> Result<R> {
            let mut state = self.state.borrow_mut();
            let win = state
                .windows
                .iter_mut()
                .find(|w| w.handle == handle)
                .ok_or_else(|| anyhow::anyhow!("no window {handle}"))?;
            Ok(f(win))
        }

        fn check_index(&self, index: u32) -> Result<()> {
            let count = self.state.borrow().desktops.len() as u32;
            anyhow::ensure!(index < count, "desktop {index} out of range");
            Ok(())
        }
    }

    impl DesktopBackend for FakeBackend {
        fn count(&self) -> Result<u32> {
            Ok(self.state.borrow().desktops.len() as u32)
        }

        fn current(&self) -> Result<u32> {
            Ok(self.state.borrow().current)
        }

        fn name(&self, index: u32) -> Result<String> {
            self.check_index(index)?;
            Ok(self.state.borrow().desktops[index as usize].clone())
        }

        fn find_by_name(&self, fragment: &str) -> Result<Option<u32>> {
            let needle = fragment.to_lowercase();
            Ok(self
                .state
                .borrow()
                .desktops
                .iter()
                .position(|n| n.to_lowercase().contains(&needle))
                .map(|i| i as u32))
        }

        fn create(&self) -> Result<u32> {
            let mut state = self.state.borrow_mut();
            let index = state.desktops.len() as u32;
            state.desktops.push(format!("Desktop {}", index + 1));
            Ok(index)
        }

        fn remove(&self, index: u32) -> Result<()> {
            self.check_index(index)?;
            let mut state = self.state.borrow_mut();
            anyhow::ensure!(state.desktops.len() > 1, "cannot remove the last desktop");
            state.desktops.remove(index as usize);
            for win in &mut state.windows {
                if win.desktop != PINNED && win.desktop > index {
                    win.desktop -= 1;
                } else if win.desktop == index {
                    win.desktop = index.saturating_sub(1);
                }
            }
            if state.current >= index && state.current > 0 {
                state.current -= 1;
            }
            Ok(())
        }

        fn make_visible(&self, index: u32) -> Result<()> {
            self.check_index(index)?;
            self.state.borrow_mut().current = index;
            Ok(())
        }

        fn is_visible(&self, index: u32) -> Result<bool> {
            self.check_index(index)?;
            Ok(self.state.borrow().current == index)
        }

        fn desktop_of_window(&self, window: u32) -> Result<u32> {
            let current = self.state.borrow().current;
            self.with_window(window, |w| if w.desktop == PINNED { current } else { w.desktop })
        }

        fn window_on_desktop(&self, index: u32, window: u32) -> Result<bool> {
            self.check_index(index)?;
            self.with_window(window, |w| w.desktop == index || w.desktop == PINNED)
        }

        fn move_window(&self, window: u32, index: u32) -> Result<()> {
            self.check_index(index)?;
            self.with_window(window, |w| w.desktop = index)
        }

        fn move_active_window(&self, index: u32) -> Result<()> {
            self.check_index(index)?;
            let active = self
                .state
                .borrow()
                .active
                .ok_or_else(|| anyhow::anyhow!("no active window"))?;
            self.move_window(active, index)
        }

        fn pin_window(&self, window: u32) -> Result<()> {
            self.with_window(window, |w| w.desktop = PINNED)
        }

        fn unpin_window(&self, window: u32) -> Result<()> {
            let current = self.state.borrow().current;
            self.with_window(window, |w| {
                if w.desktop == PINNED {
                    w.desktop = current;
                }
            })
        }

        fn is_window_pinned(&self, window: u32) -> Result<bool> {
            self.with_window(window, |w| w.desktop == PINNED)
        }

        fn pin_application(&self, window: u32) -> Result<()> {
            let pid = self.with_window(window, |w| w.pid)?;
            self.state.borrow_mut().pinned_apps.push(pid);
            Ok(())
        }

        fn unpin_application(&self, window: u32) -> Result<()> {
            let pid = self.with_window(window, |w| w.pid)?;
            self.state.borrow_mut().pinned_apps.retain(|&p| p != pid);
            Ok(())
        }

        fn is_application_pinned(&self, window: u32) -> Result<bool> {
            let pid = self.with_window(window, |w| w.pid)?;
            Ok(self.state.borrow().pinned_apps.contains(&pid))
        }
    }

    impl WindowBackend for FakeBackend {
        fn main_window_of_pid(&self, pid: u32) -> Result<Option<u32>> {
            Ok(self
                .state
                .borrow()
                .windows
                .iter()
                .find(|w| w.pid == pid)
                .map(|w| w.handle))
        }

        fn main_window_of_process(&self, name: &str) -> Result<Option<u32>> {
            Ok(self
                .state
                .borrow()
                .windows
                .iter()
                .find(|w| w.process.eq_ignore_ascii_case(name))
                .map(|w| w.handle))
        }

        fn visit_visible_windows(
            &self,
            visitor: &mut dyn FnMut(u32, &str) -> ControlFlow<()>,
        ) -> Result<()> {
            let windows: Vec<(u32, String)> = self
                .state
                .borrow()
                .windows
                .iter()
                .filter(|w| w.visible && !w.title.is_empty())
                .map(|w| (w.handle, w.title.clone()))
                .collect();
            for (handle, title) in windows {
                if visitor(handle, &title).is_break() {
                    break;
                }
            }
            Ok(())
        }
    }
}
