use serde::Serialize;

/// Areas offered below every tour viewer.
pub const TOUR_AREAS: [&str; 4] = ["Main Hall", "Prayer Wheels", "Courtyard", "Buddha Statue"];

/// Toggle state of the simulated 360° viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TourViewer {
    pub playing: bool,
    pub muted: bool,
    pub show_info: bool,
    pub fullscreen: bool,
}

impl TourViewer {
    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// The host left fullscreen on its own (e.g. Escape).
    pub fn fullscreen_changed(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }
}
