#![forbid(unsafe_code)]

//! Focus delegation.
//!
//! Assigning focus to an element with a [`FocusTarget`] capability forwards
//! it to the element that capability names, repeatedly, until an element
//! without a target (or naming itself) is reached. Delegation chains can be
//! cyclic when built by hand; the walk keeps a visited set and stops at the
//! first element seen twice.
//!
//! [`FocusTarget`]: trellis_widgets::FocusTarget

use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;
use trellis_widgets::{ElementRef, same_element};

fn addr(element: &ElementRef) -> *const () {
    Rc::as_ptr(element).cast::<()>()
}

/// Follow focus delegation from `element` to its final recipient.
pub fn resolve_focus(element: &ElementRef) -> ElementRef {
    let mut current = Rc::clone(element);
    let mut visited = HashSet::new();
    loop {
        if !visited.insert(addr(&current)) {
            debug!(hops = visited.len(), "focus delegation cycle broken");
            return current;
        }
        let next = current
            .as_focus_target()
            .and_then(|target| target.focus_target());
        match next {
            Some(next) if !same_element(&next, &current) => current = next,
            _ => return current,
        }
    }
}
