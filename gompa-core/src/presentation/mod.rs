//! Local interaction state behind the interactive pages.
//!
//! None of this is persisted; it models what the front end keeps per view so
//! its navigation and timer rules are tested in one place.

pub mod audio;
pub mod carousel;
pub mod clock;
pub mod map;
pub mod tour;

pub use audio::{
    AudioChapter, AudioGuidePlayer, AudioLanguage, CHAPTERS, DEFAULT_DURATION_SECS, format_time,
    language_name,
};
pub use carousel::ImageCarousel;
pub use clock::{PlaybackClock, PlaybackHandle, SharedPlayer, TICK_PERIOD};
pub use map::MapSelection;
pub use tour::{TOUR_AREAS, TourViewer};
