//! Timed playback of a lattice path.
//!
//! [`Playback`] is a small state machine that moves a marker along the
//! segments of a path, interpolating linearly between cell positions.
//! It is driven from outside, either one fixed [`tick`](Playback::tick)
//! per frame or by real elapsed time through
//! [`advance`](Playback::advance), so motion stays smooth at any frame
//! rate.
//!
//! [`Reveal`] schedules the progressive, cell-by-cell display of a
//! freshly generated path before playback begins.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod player;
pub mod reveal;

pub use config::{PlaybackConfig, Speed};
pub use error::PlaybackError;
pub use player::{Frame, Playback, PlaybackEvent, PlaybackPhase, PlaybackState};
pub use reveal::Reveal;
