use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::coords::{Rect, Vec2};
use crate::input::InputEvent;
use crate::present::DisplayPayload;
use crate::text::FontSystem;
use crate::time::{ClockSource, SubscriptionHandle};

use super::{FpsLabel, OverlayConfig};

struct Installed {
    // Held for its `Drop`, which unregisters the callback.
    _subscription: SubscriptionHandle,
    label: Rc<RefCell<FpsLabel>>,
}

/// Owner of the one frame-rate overlay in the process.
///
/// The label exists only while installed: `install` creates it and subscribes
/// it to a clock source, `uninstall` drops both. Both calls are idempotent.
///
/// The font system is built on the first install and handed back by
/// `uninstall`, so toggling the overlay does not rescan installed fonts.
pub struct OverlayShell {
    config: OverlayConfig,
    fonts: Option<FontSystem>,
    installed: Option<Installed>,
}

impl OverlayShell {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            fonts: None,
            installed: None,
        }
    }

    /// Configuration, including the background and text style hints the host
    /// draws the label with.
    #[inline]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    fn take_fonts(&mut self) -> FontSystem {
        match self.fonts.take() {
            Some(fonts) => fonts,
            None if self.config.load_system_fonts => FontSystem::with_system_fonts(),
            None => FontSystem::new(),
        }
    }

    #[inline]
    pub fn is_installed(&self) -> bool {
        self.installed.is_some()
    }

    /// Creates the label and subscribes it to `clock`.
    ///
    /// Returns `true` if this call installed the overlay; `false` when it was
    /// already installed or the overlay is disabled.
    pub fn install<C>(&mut self, clock: &C, screen: Vec2) -> bool
    where
        C: ClockSource + ?Sized,
    {
        if self.installed.is_some() {
            return false;
        }
        if !self.config.enabled {
            log::debug!("fps overlay disabled; install skipped");
            return false;
        }

        let fonts = self.take_fonts();
        let label = Rc::new(RefCell::new(FpsLabel::with_fonts(self.config.clone(), screen, fonts)));
        let weak = Rc::downgrade(&label);

        let subscription = clock.subscribe(Box::new(move |timestamp| {
            let Some(label) = weak.upgrade() else {
                return;
            };
            let Ok(mut label) = label.try_borrow_mut() else {
                log::warn!("fps overlay busy; frame tick at {timestamp} dropped");
                return;
            };
            label.tick(timestamp);
        }));

        log::info!("fps overlay installed ({}x{} screen)", screen.x, screen.y);
        self.installed = Some(Installed {
            _subscription: subscription,
            label,
        });
        true
    }

    /// Unsubscribes from the clock and drops the label, keeping its fonts.
    ///
    /// Returns `true` if the overlay was installed.
    pub fn uninstall(&mut self) -> bool {
        let Some(Installed { _subscription: subscription, label }) = self.installed.take() else {
            return false;
        };
        drop(subscription);

        // The clock only held a weak reference, so this is the last strong one.
        match Rc::try_unwrap(label) {
            Ok(label) => self.fonts = Some(label.into_inner().into_fonts()),
            Err(_) => log::warn!("fps overlay still referenced on uninstall; fonts dropped"),
        }
        log::info!("fps overlay uninstalled");
        true
    }

    /// Forwards pointer input to the label. Returns `true` when consumed.
    pub fn handle_input(&self, ev: &InputEvent) -> bool {
        self.installed
            .as_ref()
            .is_some_and(|i| i.label.borrow_mut().handle_input(ev))
    }

    /// Updates the screen bounds the label snaps within.
    pub fn set_screen_size(&self, screen: Vec2) {
        if let Some(i) = &self.installed {
            i.label.borrow_mut().set_screen_size(screen);
        }
    }

    /// Borrows the installed label.
    pub fn label(&self) -> Option<Ref<'_, FpsLabel>> {
        self.installed.as_ref().map(|i| i.label.borrow())
    }

    /// Current label frame, if installed.
    pub fn frame(&self) -> Option<Rect> {
        self.label().map(|l| l.frame())
    }

    /// Copy of the latest payload, if installed and a reading exists.
    pub fn payload(&self) -> Option<DisplayPayload> {
        self.label().and_then(|l| l.payload().cloned())
    }
}

impl Drop for OverlayShell {
    fn drop(&mut self) {
        self.uninstall();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState};
    use crate::time::DisplayLink;

    const SCREEN: Vec2 = Vec2::new(400.0, 800.0);

    fn shell() -> OverlayShell {
        OverlayShell::new(OverlayConfig {
            enabled: true,
            load_system_fonts: false,
            ..OverlayConfig::default()
        })
    }

    fn drive(link: &DisplayLink, hz: f64, from: f64, count: usize) {
        for i in 0..count {
            link.fire(from + i as f64 / hz);
        }
    }

    #[test]
    fn install_is_idempotent() {
        let link = DisplayLink::new();
        let mut s = shell();

        assert!(s.install(&link, SCREEN));
        assert!(!s.install(&link, SCREEN));
        assert_eq!(link.subscriber_count(), 1);
        assert!(s.is_installed());
    }

    #[test]
    fn uninstall_is_idempotent_and_unsubscribes() {
        let link = DisplayLink::new();
        let mut s = shell();

        assert!(!s.uninstall());
        s.install(&link, SCREEN);
        assert!(s.uninstall());
        assert!(!s.uninstall());
        assert_eq!(link.subscriber_count(), 0);
        assert!(s.payload().is_none());
        assert!(s.frame().is_none());
    }

    #[test]
    fn disabled_overlay_never_installs() {
        let link = DisplayLink::new();
        let mut s = OverlayShell::new(OverlayConfig {
            enabled: false,
            load_system_fonts: false,
            ..OverlayConfig::default()
        });
        assert!(!s.install(&link, SCREEN));
        assert_eq!(link.subscriber_count(), 0);
    }

    #[test]
    fn clock_ticks_reach_the_label() {
        let link = DisplayLink::new();
        let mut s = shell();
        s.install(&link, SCREEN);

        drive(&link, 60.0, 0.0, 30);
        assert!(s.payload().is_none());

        drive(&link, 60.0, 30.0 / 60.0, 31);
        let p = s.payload().unwrap();
        assert_eq!(p.text, "60 FPS");
    }

    #[test]
    fn reinstall_starts_fresh() {
        let link = DisplayLink::new();
        let mut s = shell();
        s.install(&link, SCREEN);
        drive(&link, 60.0, 0.0, 61);
        assert!(s.payload().is_some());

        s.uninstall();
        drive(&link, 60.0, 2.0, 10);
        s.install(&link, SCREEN);
        assert!(s.payload().is_none());
        assert_eq!(s.frame(), Some(Rect::new(20.0, 88.0, 60.0, 20.0)));
    }

    #[test]
    fn input_is_ignored_when_not_installed() {
        let s = shell();
        let press = InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, 30.0, 95.0);
        assert!(!s.handle_input(&press));
    }

    #[test]
    fn input_drags_installed_label() {
        let link = DisplayLink::new();
        let mut s = shell();
        s.install(&link, SCREEN);

        assert!(s.handle_input(&InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, 30.0, 95.0)));
        assert!(s.handle_input(&InputEvent::pointer_moved(40.0, 195.0)));
        assert_eq!(s.frame().map(|f| f.origin), Some(Vec2::new(30.0, 188.0)));
        assert!(s.label().is_some_and(|l| l.is_dragging()));
    }

    #[test]
    fn fonts_survive_reinstall() {
        let link = DisplayLink::new();
        let mut s = shell();
        assert!(s.fonts.is_none());

        s.install(&link, SCREEN);
        assert!(s.fonts.is_none());
        s.uninstall();
        let fonts = s.fonts.as_ref().unwrap();
        assert!(fonts.has_looked_up("Menlo"));
        assert!(fonts.has_looked_up("Courier"));

        // The second label takes the cached system instead of building one.
        s.install(&link, SCREEN);
        assert!(s.fonts.is_none());
        s.uninstall();
        assert!(s.fonts.as_ref().is_some_and(|f| f.has_looked_up("Menlo")));
    }

    #[test]
    fn style_hints_are_exposed() {
        let s = shell();
        assert_eq!(s.config().corner_radius, 5.0);
        assert_eq!(s.config().background.a, 0.7);
    }

    #[test]
    fn dropping_shell_unsubscribes() {
        let link = DisplayLink::new();
        {
            let mut s = shell();
            s.install(&link, SCREEN);
            assert_eq!(link.subscriber_count(), 1);
        }
        assert_eq!(link.subscriber_count(), 0);
    }
}
