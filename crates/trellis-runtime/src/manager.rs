#![forbid(unsafe_code)]

//! The event loop.
//!
//! [`Manager`] owns a [`Screen`] and a root element. Each iteration it
//! redraws unconditionally, blocks for exactly one event, and dispatches it:
//!
//! - **Keys** go to the focused element if it handles keys. Unconsumed keys
//!   then close an open overlay (Escape only) or reach the global bindings.
//! - **Paste** goes to the focused key handler.
//! - **Mouse** events are hit-tested against the overlay first, then the
//!   root. Hover enter/leave fire once per transition and move fires on
//!   every event in between. A primary-button press moves focus to the hit
//!   element, notifies it, and records where it happened; a wheel event
//!   notifies the deepest scrollable element; any other event counts as a
//!   click only if it hits the pressed element at the recorded cell.
//! - **Resize** changes the layout size for the next frame.
//!
//! After every event, queued [`Command`]s are applied and focus is checked
//! against the current tree: a focused element that is no longer laid out is
//! replaced by re-resolving the last focus request (this is how focus
//! follows a tab switch).

use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info_span, trace};
use trellis_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use trellis_core::geometry::{Rect, Size};
use trellis_layout::Placement;
use trellis_render::{Frame, Screen, Waker};
use trellis_style::Style;
use trellis_widgets::{
    Element, ElementExt, ElementRef, IntoElement, LayoutNode, same_element, undecorated,
};

use crate::bindings::{Bindings, Command, Control, KeyCombo};
use crate::config::ManagerConfig;
use crate::focus::resolve_focus;
use crate::hit::{Hit, hit_path};
use crate::overlay::Overlay;

/// Thread-safe handle that stops a running [`Manager`].
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    done: Arc<AtomicBool>,
    waker: Option<Waker>,
}

impl ShutdownHandle {
    /// Ask the loop to exit and wake it if it is blocked on input.
    pub fn shutdown(&self) {
        self.done.store(true, Ordering::Release);
        if let Some(waker) = &self.waker {
            waker.wake();
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// Where a primary-button press landed.
struct Press {
    element: ElementRef,
    x: u16,
    y: u16,
}

/// Retained-mode event loop over a root element.
pub struct Manager<S: Screen> {
    screen: S,
    config: ManagerConfig,
    root: ElementRef,
    size: Size,

    tree: Option<LayoutNode>,
    overlay: Option<Overlay>,
    overlay_tree: Option<LayoutNode>,

    /// Element focus was last assigned to, before delegation.
    focus_request: Option<ElementRef>,
    focus: Option<ElementRef>,
    hovered: Option<ElementRef>,
    press: Option<Press>,

    bindings: Bindings,
    control: Control,
    done: Arc<AtomicBool>,
}

impl<S: Screen> std::fmt::Debug for Manager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("size", &self.size)
            .field("overlay", &self.overlay)
            .field("has_focus", &self.focus.is_some())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl<S: Screen> Manager<S> {
    /// Manager with the default configuration.
    pub fn new(screen: S, root: impl IntoElement) -> io::Result<Self> {
        Self::with_config(screen, root, ManagerConfig::default())
    }

    pub fn with_config(
        screen: S,
        root: impl IntoElement,
        config: ManagerConfig,
    ) -> io::Result<Self> {
        let size = screen.size()?;
        Ok(Self {
            screen,
            config,
            root: root.into_element(),
            size,
            tree: None,
            overlay: None,
            overlay_tree: None,
            focus_request: None,
            focus: None,
            hovered: None,
            press: None,
            bindings: Bindings::new(),
            control: Control::new(),
            done: Arc::new(AtomicBool::new(false)),
        })
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn root(&self) -> &ElementRef {
        &self.root
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Currently focused element, after delegation.
    pub fn focused(&self) -> Option<&ElementRef> {
        self.focus.as_ref()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Handle for queueing commands from element callbacks.
    pub fn control(&self) -> Control {
        self.control.clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            done: Arc::clone(&self.done),
            waker: self.screen.waker(),
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    // ── Embedder API ───────────────────────────────────────────────

    /// Register a global key binding. See [`Bindings::bind`].
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        combo: KeyCombo,
        action: impl FnMut(&Control) + 'static,
    ) {
        self.bindings.bind(name, combo, action);
    }

    pub fn unbind(&mut self, name: &str) -> bool {
        self.bindings.unbind(name)
    }

    /// Assign focus. Delegation is followed to the final recipient.
    pub fn set_focus(&mut self, element: impl IntoElement) {
        let element = element.into_element();
        let resolved = resolve_focus(&element);
        self.focus_request = Some(element);
        self.transfer_focus(Some(resolved));
    }

    /// Drop focus entirely.
    pub fn clear_focus(&mut self) {
        self.focus_request = None;
        self.transfer_focus(None);
    }

    /// Show `element` above the root and focus it. An overlay that is
    /// already open is replaced; the focus restored on dismissal stays the
    /// one from before the first overlay.
    pub fn show_overlay(&mut self, element: impl IntoElement, placement: Placement) {
        let element = element.into_element();
        let prior = match self.overlay.take() {
            Some(open) => open.into_prior_focus(),
            None => self.focus_request.clone(),
        };
        debug!(?placement, "overlay shown");
        self.overlay = Some(Overlay::new(Rc::clone(&element), placement, prior));
        self.relayout();
        self.set_focus(element);
    }

    /// Close the overlay and restore the focus it displaced.
    pub fn dismiss_overlay(&mut self) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        debug!("overlay dismissed");
        self.overlay_tree = None;
        self.relayout();
        match overlay.into_prior_focus() {
            Some(prior) if self.in_root(&prior) => self.set_focus(prior),
            _ => self.clear_focus(),
        }
    }

    // ── Loop ───────────────────────────────────────────────────────

    /// Run until a quit command, a shutdown request, or the end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let _span = info_span!(
            "trellis.manager.run",
            w = self.size.width,
            h = self.size.height
        )
        .entered();
        self.screen.set_mouse_capture(self.config.mouse)?;
        debug!(mouse = self.config.mouse, "event loop started");

        while !self.done.load(Ordering::Acquire) {
            self.draw()?;
            let Some(event) = self.screen.next_event()? else {
                debug!("event source exhausted");
                break;
            };
            self.handle_event(event);
        }

        debug!("event loop stopped");
        Ok(())
    }

    /// Lay out, render, and present one frame.
    pub fn draw(&mut self) -> io::Result<()> {
        self.relayout();
        let theme = self.config.theme;
        let mut frame = Frame::new(self.size.width, self.size.height, theme);

        if let Some(tree) = &self.tree {
            tree.render(&mut frame);
        }
        let mut cursor = frame.cursor();

        if let Some(node) = &self.overlay_tree {
            frame.set_cursor(None);
            frame.push_style(theme.overlay);
            frame.fill(node.area, Style::new());
            node.render(&mut frame);
            frame.pop_style();
            cursor = frame
                .cursor()
                .or(cursor.filter(|p| !node.area.contains(p.x, p.y)));
        }

        let has_keyboard = self
            .focus
            .as_ref()
            .is_some_and(|f| f.as_key_handler().is_some());
        let cursor = cursor.filter(|_| has_keyboard);

        self.screen.present(&frame.buffer, cursor)?;
        trace!(w = self.size.width, h = self.size.height, "frame presented");
        Ok(())
    }

    /// Dispatch one event, then apply queued commands and revalidate focus.
    pub fn handle_event(&mut self, event: Event) {
        trace!(?event, "dispatch");
        match event {
            Event::Key(key) => self.dispatch_key(&key),
            Event::Paste(text) => {
                if let Some(focus) = self.focus.clone()
                    && let Some(handler) = focus.as_key_handler()
                {
                    handler.handle_paste(&text);
                }
            }
            Event::Mouse(mouse) => self.dispatch_mouse(&mouse),
            Event::Resize { width, height } => {
                debug!(width, height, "resized");
                self.size = Size::new(width, height);
            }
            Event::Focus(_) | Event::Wake => {}
        }
        self.apply_commands();
        self.revalidate_focus();
    }

    fn dispatch_key(&mut self, key: &KeyEvent) {
        if let Some(focus) = self.focus.clone()
            && let Some(handler) = focus.as_key_handler()
            && handler.handle_key(key)
        {
            return;
        }
        if !key.is_press() {
            return;
        }
        if key.code == KeyCode::Escape
            && self.config.escape_dismisses_overlay
            && self.overlay.is_some()
        {
            self.dismiss_overlay();
            return;
        }
        self.bindings.dispatch(key, &self.control);
    }

    fn dispatch_mouse(&mut self, mouse: &MouseEvent) {
        let (x, y) = mouse.position();
        let path = self.hit_path(x, y);

        self.update_hover(&path, mouse);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = deepest(&path, |e| {
                    e.as_focusable().is_some() || e.as_focus_target().is_some()
                })
                .or_else(|| path.last());
                if let Some(hit) = target {
                    self.set_focus(Rc::clone(&hit.element));
                }
                self.press = None;
                if let Some(hit) = deepest(&path, |e| e.as_clickable().is_some())
                    && let Some(clickable) = hit.element.as_clickable()
                {
                    clickable.on_press(hit.local, mouse);
                    self.press = Some(Press {
                        element: Rc::clone(&hit.element),
                        x,
                        y,
                    });
                }
            }
            kind if kind.is_scroll() => {
                if let Some(hit) = deepest(&path, |e| e.as_scrollable().is_some())
                    && let Some(scrollable) = hit.element.as_scrollable()
                {
                    scrollable.on_scroll(mouse.scroll_delta(), hit.local);
                }
            }
            _ => {
                let Some(press) = self.press.take() else {
                    return;
                };
                if (x, y) != (press.x, press.y) {
                    return;
                }
                if let Some(hit) = deepest(&path, |e| e.as_clickable().is_some())
                    && same_element(&hit.element, &press.element)
                    && let Some(clickable) = hit.element.as_clickable()
                {
                    trace!(x, y, "click");
                    clickable.on_click(hit.local, mouse);
                }
            }
        }
    }

    /// Hover identity is the undecorated element, so moving from a border
    /// into the element it wraps is not a transition.
    fn update_hover(&mut self, path: &[Hit], mouse: &MouseEvent) {
        let target = deepest(path, |e| e.as_hoverable().is_some());
        let identity = target.map(|hit| undecorated(&hit.element));
        let unchanged = match (&self.hovered, &identity) {
            (Some(old), Some(new)) => same_element(old, new),
            (None, None) => true,
            _ => false,
        };

        if unchanged {
            if let Some(hit) = target
                && let Some(h) = hit.element.as_hoverable()
            {
                h.on_move(hit.local, mouse);
            }
            return;
        }

        if let Some(old) = self.hovered.take()
            && let Some(h) = old.as_hoverable()
        {
            h.on_leave();
        }
        if let Some(hit) = target
            && let Some(h) = hit.element.as_hoverable()
        {
            h.on_enter(hit.local, mouse);
            self.hovered = identity;
        }
    }

    // ── Focus ──────────────────────────────────────────────────────

    fn transfer_focus(&mut self, next: Option<ElementRef>) {
        let unchanged = match (&self.focus, &next) {
            (Some(a), Some(b)) => same_element(a, b),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        if let Some(old) = self.focus.take()
            && let Some(f) = old.as_focusable()
        {
            f.on_blur();
        }
        debug!(focused = next.is_some(), "focus transferred");
        self.focus = next.clone();
        if let Some(new) = next {
            if let Some(f) = new.as_focusable() {
                f.on_focus();
            }
            let bounds = self.bounds();
            if self
                .overlay
                .as_ref()
                .is_some_and(|o| !o.contains(&new, bounds))
            {
                debug!("overlay closed: focus moved outside it");
                self.overlay = None;
                self.overlay_tree = None;
            }
        }
    }

    /// Re-resolve focus if the focused element left the tree.
    fn revalidate_focus(&mut self) {
        let Some(focus) = self.focus.clone() else {
            return;
        };
        self.relayout();
        if self.in_tree(&focus) {
            return;
        }
        match self.focus_request.clone() {
            Some(request) if self.in_tree(&request) => {
                debug!("focused element left the tree, re-resolving");
                self.transfer_focus(Some(resolve_focus(&request)));
            }
            _ => {
                debug!("focused element left the tree");
                self.clear_focus();
            }
        }
    }

    fn apply_commands(&mut self) {
        loop {
            let commands = self.control.take();
            if commands.is_empty() {
                break;
            }
            for command in commands {
                debug!(?command, "command");
                match command {
                    Command::Quit => self.done.store(true, Ordering::Release),
                    Command::Focus(element) => self.set_focus(element),
                    Command::ShowOverlay(element, placement) => {
                        self.show_overlay(element, placement)
                    }
                    Command::DismissOverlay => self.dismiss_overlay(),
                }
            }
        }
    }

    // ── Layout ─────────────────────────────────────────────────────

    fn bounds(&self) -> Rect {
        Rect::from_size(self.size.width, self.size.height)
    }

    fn relayout(&mut self) {
        let bounds = self.bounds();
        self.tree = Some(self.root.layout(bounds));
        self.overlay_tree = self.overlay.as_ref().map(|o| o.layout(bounds));
    }

    /// Hit chain at a point, in the overlay if it covers the point.
    fn hit_path(&mut self, x: u16, y: u16) -> Vec<Hit> {
        if self.tree.is_none() {
            self.relayout();
        }
        if let Some(node) = &self.overlay_tree {
            let path = hit_path(node, x, y);
            if !path.is_empty() {
                return path;
            }
        }
        self.tree
            .as_ref()
            .map(|t| hit_path(t, x, y))
            .unwrap_or_default()
    }

    fn in_root(&self, element: &ElementRef) -> bool {
        self.tree.as_ref().is_some_and(|t| t.contains(element))
    }

    fn in_tree(&self, element: &ElementRef) -> bool {
        self.in_root(element)
            || self
                .overlay_tree
                .as_ref()
                .is_some_and(|t| t.contains(element))
    }
}

/// Innermost hit whose element satisfies `pred`.
fn deepest(path: &[Hit], pred: impl Fn(&dyn Element) -> bool) -> Option<&Hit> {
    path.iter().rev().find(|hit| pred(hit.element.as_ref()))
}

