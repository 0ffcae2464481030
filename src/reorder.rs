//! Desktop reordering by window relocation.
//!
//! The backend has no primitive for reordering desktop slots, only for moving
//! a window into a slot. Swapping or inserting desktops therefore means one
//! pass over every visible window, re-homing each window whose slot is
//! affected. The pass is not atomic against windows appearing or vanishing
//! mid-enumeration; a window that cannot be relocated is skipped, never
//! aborting the rest of the pass.

use std::ops::ControlFlow;

use anyhow::Result;

use crate::backend::Backend;

/// Exchange the window contents of desktops `a` and `b`.
///
/// Involutive: a second call with the same bounds restores the original
/// assignment. Caller guarantees `a != b` and both indices in range.
pub fn swap(backend: &dyn Backend, a: u32, b: u32) -> Result<()> {
    relocate_each(backend, |index| {
        if index == a {
            Some(b)
        } else if index == b {
            Some(a)
        } else {
            None
        }
    })
}

/// Left-rotate window contents across the inclusive desktop range spanned by
/// `x` and `y`: windows on `lo..hi` shift one slot up, windows on `hi` land
/// on `lo`. This emulates moving the desktop at `hi` to just before the one
/// at `lo` without touching the backend's slot order.
pub fn insert(backend: &dyn Backend, x: u32, y: u32) -> Result<()> {
    let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
    relocate_each(backend, |index| {
        if index >= lo && index < hi {
            Some(index + 1)
        } else if index == hi {
            Some(lo)
        } else {
            None
        }
    })
}

/// One pass over the visible windows, moving each to `plan(current slot)`.
fn relocate_each(backend: &dyn Backend, plan: impl Fn(u32) -> Option<u32>) -> Result<()> {
    backend.visit_visible_windows(&mut |handle, _title| {
        // A pinned window occupies every slot at once; re-homing it would
        // collapse it onto one. It already looks "reordered" from any slot.
        match backend.is_window_pinned(handle) {
            Ok(true) => return ControlFlow::Continue(()),
            Ok(false) => {}
            Err(err) => {
                log::debug!("window {handle:#x} has no pin state: {err}");
                return ControlFlow::Continue(());
            }
        }
        // Windows that appear or die during the pass resolve or move with an
        // error; skip them and keep going.
        match backend.desktop_of_window(handle) {
            Ok(index) => {
                if let Some(target) = plan(index) {
                    if let Err(err) = backend.move_window(handle, target) {
                        log::debug!("window {handle:#x} not relocated: {err}");
                    }
                }
            }
            Err(err) => log::debug!("window {handle:#x} has no desktop: {err}"),
        }
        ControlFlow::Continue(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;
    use crate::backend::DesktopBackend;

    fn backend() -> FakeBackend {
        let b = FakeBackend::with_desktops(4);
        b.add_window(1, "one", 11, "a", 0);
        b.add_window(2, "two", 12, "b", 1);
        b.add_window(3, "three", 13, "c", 2);
        b.add_window(4, "four", 14, "d", 3);
        b.add_window(5, "five", 15, "e", 1);
        b
    }

    fn assignment(b: &FakeBackend) -> Vec<u32> {
        (1..=5).map(|h| b.desktop_of(h).unwrap()).collect()
    }

    #[test]
    fn swap_exchanges_two_slots_only() {
        let b = backend();
        swap(&b, 1, 3).unwrap();
        assert_eq!(assignment(&b), vec![0, 3, 2, 1, 3]);
    }

    #[test]
    fn swap_is_involutive() {
        let b = backend();
        let before = assignment(&b);
        swap(&b, 0, 2).unwrap();
        swap(&b, 0, 2).unwrap();
        assert_eq!(assignment(&b), before);
    }

    #[test]
    fn insert_rotates_range_left() {
        let b = backend();
        // Desktop 3 moves before desktop 1; desktops 1 and 2 shift up.
        insert(&b, 1, 3).unwrap();
        assert_eq!(assignment(&b), vec![0, 2, 3, 1, 2]);
    }

    #[test]
    fn insert_normalizes_reversed_bounds() {
        let b1 = backend();
        let b2 = backend();
        insert(&b1, 1, 3).unwrap();
        insert(&b2, 3, 1).unwrap();
        assert_eq!(assignment(&b1), assignment(&b2));
    }

    #[test]
    fn insert_then_inverse_rotation_restores_assignment() {
        let b = backend();
        let before = assignment(&b);
        insert(&b, 0, 3).unwrap();
        // Undo a single left rotation of [0,3] with three more of them.
        insert(&b, 0, 3).unwrap();
        insert(&b, 0, 3).unwrap();
        insert(&b, 0, 3).unwrap();
        assert_eq!(assignment(&b), before);
    }

    #[test]
    fn swap_leaves_pinned_windows_pinned() {
        let b = FakeBackend::with_desktops(3);
        b.add_window(1, "one", 11, "a", 0);
        b.add_window(2, "two", 12, "b", 2);
        b.add_window(3, "everywhere", 13, "c", 0);
        b.pin_window(3).unwrap();
        swap(&b, 0, 2).unwrap();
        assert!(b.is_window_pinned(3).unwrap());
        assert_eq!(b.desktop_of(1), Some(2));
        assert_eq!(b.desktop_of(2), Some(0));
    }

    #[test]
    fn insert_leaves_pinned_windows_pinned() {
        let b = backend();
        b.pin_window(2).unwrap();
        insert(&b, 0, 3).unwrap();
        assert!(b.is_window_pinned(2).unwrap());
        // The rest of the rotation still happens.
        assert_eq!(b.desktop_of(1), Some(1));
        assert_eq!(b.desktop_of(4), Some(0));
    }

    #[test]
    fn untouched_slots_survive_insert() {
        let b = backend();
        insert(&b, 1, 2).unwrap();
        assert_eq!(b.desktop_of(1), Some(0));
        assert_eq!(b.desktop_of(4), Some(3));
    }
}
