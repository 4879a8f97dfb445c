use std::borrow::Cow;

use gompa_model::HeritageSite;
use serde::Serialize;

/// Length of the simulated guide, 21 minutes.
pub const DEFAULT_DURATION_SECS: u32 = 1260;
pub const DEFAULT_VOLUME: u8 = 75;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const SKIP_SECS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioChapter {
    pub id: u8,
    pub title: &'static str,
    pub duration: &'static str,
}

pub const CHAPTERS: [AudioChapter; 5] = [
    AudioChapter {
        id: 1,
        title: "Introduction & History",
        duration: "3:45",
    },
    AudioChapter {
        id: 2,
        title: "Architecture & Design",
        duration: "4:20",
    },
    AudioChapter {
        id: 3,
        title: "Religious Significance",
        duration: "5:15",
    },
    AudioChapter {
        id: 4,
        title: "Daily Life & Rituals",
        duration: "3:30",
    },
    AudioChapter {
        id: 5,
        title: "Cultural Heritage",
        duration: "4:10",
    },
];

/// Display name for a language code; unknown codes are shown upper-cased.
pub fn language_name(code: &str) -> Cow<'static, str> {
    match code {
        "en" => Cow::Borrowed("English"),
        "hi" => Cow::Borrowed("Hindi"),
        "ne" => Cow::Borrowed("Nepali"),
        "bo" => Cow::Borrowed("Tibetan"),
        "si" => Cow::Borrowed("Sikkimese"),
        other => Cow::Owned(other.to_uppercase()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioLanguage {
    pub code: String,
    pub name: String,
}

impl AudioLanguage {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: language_name(code).into_owned(),
        }
    }

    /// Languages a site offers, in code order.
    pub fn available_for(site: &HeritageSite) -> Vec<Self> {
        site.audio_guide_urls.languages().map(Self::new).collect()
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// State of the simulated audio guide player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioGuidePlayer {
    playing: bool,
    muted: bool,
    current_time: u32,
    duration: u32,
    volume: u8,
    language: String,
    chapter: u8,
}

impl Default for AudioGuidePlayer {
    fn default() -> Self {
        Self {
            playing: false,
            muted: false,
            current_time: 0,
            duration: DEFAULT_DURATION_SECS,
            volume: DEFAULT_VOLUME,
            language: DEFAULT_LANGUAGE.to_string(),
            chapter: 1,
        }
    }
}

impl AudioGuidePlayer {
    pub fn with_duration(duration: u32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current_time(&self) -> u32 {
        self.current_time
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn chapter(&self) -> u8 {
        self.chapter
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn skip_forward(&mut self) {
        self.current_time = self.current_time.saturating_add(SKIP_SECS).min(self.duration);
    }

    pub fn skip_backward(&mut self) {
        self.current_time = self.current_time.saturating_sub(SKIP_SECS);
    }

    pub fn seek(&mut self, seconds: u32) {
        self.current_time = seconds.min(self.duration);
    }

    /// Values above 100 are clamped. Volume 0 mutes; anything else unmutes.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        self.muted = self.volume == 0;
    }

    pub fn select_language(&mut self, code: impl Into<String>) {
        self.language = code.into();
    }

    /// Chapters are numbered 1 through 5; other values are ignored.
    pub fn select_chapter(&mut self, chapter: u8) {
        if CHAPTERS.iter().any(|c| c.id == chapter) {
            self.chapter = chapter;
        }
    }

    /// One simulated second of playback.
    ///
    /// Returns whether playback continues. Reaching the duration stops
    /// playback on the same tick.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.current_time < self.duration {
            self.current_time += 1;
        }
        if self.current_time >= self.duration {
            self.current_time = self.duration;
            self.playing = false;
        }
        self.playing
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration)
    }
}
