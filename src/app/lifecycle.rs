//! Window lifecycle for a desktop host
//!
//! The application owns at most one top-level window. It is created when the
//! host is ready, recreated on activation if missing, and the process quits
//! when the last window closes unless the platform keeps apps running
//! without windows (macOS).

/// Whether the top-level window exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    NoWindow,
    WindowOpen,
}

/// Events delivered by the host shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Host finished starting up
    Ready,
    /// App brought to the foreground (dock click etc.)
    Activate,
    /// The window was closed
    WindowClosed,
}

/// What the host must do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    CreateWindow,
    Quit,
    Nothing,
}

#[derive(Debug, Clone)]
pub struct AppLifecycle {
    state: WindowState,
    stay_alive_without_windows: bool,
}

impl AppLifecycle {
    pub fn new(stay_alive_without_windows: bool) -> Self {
        Self {
            state: WindowState::NoWindow,
            stay_alive_without_windows,
        }
    }

    /// Lifecycle following the conventions of the build target
    pub fn for_current_platform() -> Self {
        Self::new(cfg!(target_os = "macos"))
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Apply `event` and return the action the host must take
    pub fn handle(&mut self, event: LifecycleEvent) -> LifecycleAction {
        match (event, self.state) {
            (LifecycleEvent::Ready | LifecycleEvent::Activate, WindowState::NoWindow) => {
                self.state = WindowState::WindowOpen;
                LifecycleAction::CreateWindow
            }
            (LifecycleEvent::Ready | LifecycleEvent::Activate, WindowState::WindowOpen) => {
                LifecycleAction::Nothing
            }
            (LifecycleEvent::WindowClosed, _) => {
                self.state = WindowState::NoWindow;
                if self.stay_alive_without_windows {
                    LifecycleAction::Nothing
                } else {
                    LifecycleAction::Quit
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_creates_single_window() {
        let mut lifecycle = AppLifecycle::new(false);
        assert_eq!(lifecycle.state(), WindowState::NoWindow);
        assert_eq!(lifecycle.handle(LifecycleEvent::Ready), LifecycleAction::CreateWindow);
        assert_eq!(lifecycle.state(), WindowState::WindowOpen);
        assert_eq!(lifecycle.handle(LifecycleEvent::Activate), LifecycleAction::Nothing);
    }

    #[test]
    fn test_close_quits_by_default() {
        let mut lifecycle = AppLifecycle::new(false);
        lifecycle.handle(LifecycleEvent::Ready);
        assert_eq!(lifecycle.handle(LifecycleEvent::WindowClosed), LifecycleAction::Quit);
        assert_eq!(lifecycle.state(), WindowState::NoWindow);
    }

    #[test]
    fn test_background_platform_recreates_on_activate() {
        let mut lifecycle = AppLifecycle::new(true);
        lifecycle.handle(LifecycleEvent::Ready);
        assert_eq!(lifecycle.handle(LifecycleEvent::WindowClosed), LifecycleAction::Nothing);
        assert_eq!(lifecycle.state(), WindowState::NoWindow);
        assert_eq!(lifecycle.handle(LifecycleEvent::Activate), LifecycleAction::CreateWindow);
        assert_eq!(lifecycle.state(), WindowState::WindowOpen);
    }

    #[test]
    fn test_for_current_platform() {
        let mut lifecycle = AppLifecycle::for_current_platform();
        lifecycle.handle(LifecycleEvent::Ready);
        let expected = if cfg!(target_os = "macos") {
            LifecycleAction::Nothing
        } else {
            LifecycleAction::Quit
        };
        assert_eq!(lifecycle.handle(LifecycleEvent::WindowClosed), expected);
    }
}
