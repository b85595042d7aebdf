//! The reveal/scatter session state machine.
//!
//! One session object owns everything the poster shows: the slot store, the
//! scatter offsets, the album metadata and the animation counters. The UI
//! layer never mutates fields directly - it feeds `SessionEvent`s through
//! `reduce`, which returns a whole new snapshot. Async work (photo loads,
//! the settle timer, the title request) is stamped with the epoch that was
//! current when it started; results from an older epoch are discarded
//! instead of overwriting newer state.

use std::time::Duration;

use crate::metadata::AlbumInfo;
use crate::state::scatter::{self, ScatterOffset};
use crate::state::slots::{PhotoSlot, SlotStore, SLOT_COUNT};

/// Period of the sequential reveal ticker
pub const REVEAL_TICK: Duration = Duration::from_millis(450);

/// Pause between the last reveal tick and the scatter burst
pub const SCATTER_SETTLE: Duration = Duration::from_millis(800);

/// Top-level mode of the session
///
/// Flow: `Landing -> Idle -> Generating -> Revealed`. The landing splash is
/// one-way. `Revealed` holds until a new reveal re-enters `Generating`, or
/// an upload drops back to `Idle` (the composed poster is stale anyway).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Landing,
    Idle,
    Generating,
    Revealed,
}

/// Everything the session owns
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: AppMode,
    /// How many slots the reveal ticker has made visible (0..=12)
    pub revealed_count: usize,
    /// True only after a reveal run has fully settled into the 3D scatter
    pub is_scattered: bool,
    /// Poster credit line; uppercased on every edit
    pub user_name: String,
    pub album: AlbumInfo,
    pub slots: SlotStore,
    /// Generated once here, stable for the whole session
    pub scatter: Vec<ScatterOffset>,
    /// Bumped on every new reveal cycle; stale async results are dropped
    pub epoch: u64,
}

/// Events the reducer understands
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Any click on the landing splash
    ExitLanding,
    /// The credit-line input changed
    NameEdited(String),
    /// Manual title shuffle picked a curated entry
    TitleChosen(AlbumInfo),
    /// A photo finished loading for `index`
    PhotoLoaded {
        epoch: u64,
        index: usize,
        slot: PhotoSlot,
    },
    /// The reveal action fired
    RevealStarted,
    /// One reveal ticker period elapsed
    RevealTicked,
    /// The post-reveal settle timer elapsed
    ScatterSettled { epoch: u64 },
    /// The async title request resolved (fallback already folded in)
    TitleResolved { epoch: u64, album: AlbumInfo },
}

impl SessionState {
    /// Create a fresh session on the landing splash.
    ///
    /// Scatter offsets are drawn here, exactly once, and stored for the
    /// lifetime of the session.
    pub fn new() -> Self {
        Self {
            mode: AppMode::Landing,
            revealed_count: 0,
            is_scattered: false,
            user_name: String::from("LUNAMORE"),
            album: AlbumInfo::default(),
            slots: SlotStore::new(),
            scatter: scatter::generate(SLOT_COUNT),
            epoch: 0,
        }
    }

    /// Apply one event and return the next snapshot.
    ///
    /// Events that arrive out of order or out of mode are no-ops; the
    /// reducer never panics and never partially updates.
    pub fn reduce(&self, event: SessionEvent) -> SessionState {
        let mut next = self.clone();

        match event {
            SessionEvent::ExitLanding => {
                // One-way: the splash is never re-entered
                if next.mode == AppMode::Landing {
                    next.mode = AppMode::Idle;
                }
            }

            SessionEvent::NameEdited(name) => {
                next.user_name = name.to_uppercase();
            }

            SessionEvent::TitleChosen(album) => {
                next.album = album;
            }

            SessionEvent::PhotoLoaded { epoch, index, slot } => {
                // A reveal started after this load began: the result is stale
                if epoch != next.epoch {
                    return next;
                }
                next.slots.set(index, slot);
                // Any composed view is stale the moment a photo changes
                next.revealed_count = 0;
                next.is_scattered = false;
                if next.mode == AppMode::Revealed {
                    next.mode = AppMode::Idle;
                }
            }

            SessionEvent::RevealStarted => {
                if matches!(next.mode, AppMode::Idle | AppMode::Revealed) {
                    next.epoch += 1;
                    next.revealed_count = 0;
                    next.is_scattered = false;
                    next.mode = AppMode::Generating;
                }
            }

            SessionEvent::RevealTicked => {
                if next.mode == AppMode::Generating && next.revealed_count < SLOT_COUNT {
                    next.revealed_count += 1;
                }
            }

            SessionEvent::ScatterSettled { epoch } => {
                // Only a settle for the current cycle, after a full reveal,
                // may flip into the scattered arrangement
                if epoch == next.epoch
                    && next.mode == AppMode::Generating
                    && next.revealed_count >= SLOT_COUNT
                {
                    next.is_scattered = true;
                    next.mode = AppMode::Revealed;
                }
            }

            SessionEvent::TitleResolved { epoch, album } => {
                if epoch == next.epoch {
                    next.album = album;
                }
            }
        }

        next
    }

    /// Whether slot `index` is currently visible on the poster
    pub fn is_slot_visible(&self, index: usize) -> bool {
        self.mode == AppMode::Idle || index < self.revealed_count
    }

    /// Whether a reveal that just started should request an album title.
    /// An empty grid reveals placeholders only and never calls out.
    pub fn wants_album_title(&self) -> bool {
        self.mode == AppMode::Generating && self.slots.filled_count() > 0
    }

    /// Player-bar time readout, one "minute" per revealed slot
    pub fn play_time(&self) -> String {
        if self.mode == AppMode::Idle {
            return String::from("00:00 / 12:00");
        }
        format!("{:02}:00 / 12:00", self.revealed_count)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image;

    fn slot(index: usize) -> PhotoSlot {
        PhotoSlot::new(
            index,
            image::Handle::from_bytes(vec![0u8; 4]),
            String::from("AAAA"),
            "image/jpeg",
        )
    }

    fn idle_session() -> SessionState {
        SessionState::new().reduce(SessionEvent::ExitLanding)
    }

    /// Run a session through a full reveal cycle: start, 12 ticks, settle.
    fn revealed_session() -> SessionState {
        let mut session = idle_session().reduce(SessionEvent::RevealStarted);
        for _ in 0..SLOT_COUNT {
            session = session.reduce(SessionEvent::RevealTicked);
        }
        session.reduce(SessionEvent::ScatterSettled {
            epoch: session.epoch,
        })
    }

    #[test]
    fn test_timing_constants() {
        assert_eq!(REVEAL_TICK.as_millis(), 450);
        assert_eq!(SCATTER_SETTLE.as_millis(), 800);
    }

    #[test]
    fn test_landing_exits_once_and_never_returns() {
        let session = SessionState::new();
        assert_eq!(session.mode, AppMode::Landing);

        let session = session.reduce(SessionEvent::ExitLanding);
        assert_eq!(session.mode, AppMode::Idle);

        // A second click must not bounce the mode around
        let session = session.reduce(SessionEvent::ExitLanding);
        assert_eq!(session.mode, AppMode::Idle);
    }

    #[test]
    fn test_modes_advance_in_order() {
        let session = idle_session();

        let session = session.reduce(SessionEvent::RevealStarted);
        assert_eq!(session.mode, AppMode::Generating);
        assert_eq!(session.revealed_count, 0);
        assert!(!session.is_scattered);

        let session = revealed_session();
        assert_eq!(session.mode, AppMode::Revealed);
        assert!(session.is_scattered);
        assert_eq!(session.revealed_count, SLOT_COUNT);
    }

    #[test]
    fn test_reveal_cannot_start_from_landing_or_mid_generation() {
        let landing = SessionState::new().reduce(SessionEvent::RevealStarted);
        assert_eq!(landing.mode, AppMode::Landing);

        let generating = idle_session().reduce(SessionEvent::RevealStarted);
        let epoch = generating.epoch;
        let again = generating.reduce(SessionEvent::RevealStarted);
        assert_eq!(again.epoch, epoch, "no new cycle mid-generation");
    }

    #[test]
    fn test_revealed_restarts_the_cycle() {
        let session = revealed_session();
        let old_epoch = session.epoch;

        let session = session.reduce(SessionEvent::RevealStarted);
        assert_eq!(session.mode, AppMode::Generating);
        assert_eq!(session.epoch, old_epoch + 1);
        assert_eq!(session.revealed_count, 0);
        assert!(!session.is_scattered);
    }

    #[test]
    fn test_revealed_count_is_monotone_and_capped() {
        let mut session = idle_session().reduce(SessionEvent::RevealStarted);
        let mut last = 0;
        for _ in 0..20 {
            session = session.reduce(SessionEvent::RevealTicked);
            assert!(session.revealed_count >= last);
            last = session.revealed_count;
        }
        assert_eq!(session.revealed_count, SLOT_COUNT);
    }

    #[test]
    fn test_settle_requires_a_full_reveal() {
        let session = idle_session().reduce(SessionEvent::RevealStarted);
        let early = session.reduce(SessionEvent::ScatterSettled {
            epoch: session.epoch,
        });
        assert_eq!(early.mode, AppMode::Generating);
        assert!(!early.is_scattered);
    }

    #[test]
    fn test_stale_settle_is_discarded() {
        let session = revealed_session();
        let stale_epoch = session.epoch;

        // A second cycle runs its full reveal, then the old settle fires
        let mut session = session.reduce(SessionEvent::RevealStarted);
        for _ in 0..SLOT_COUNT {
            session = session.reduce(SessionEvent::RevealTicked);
        }
        let session = session.reduce(SessionEvent::ScatterSettled { epoch: stale_epoch });

        assert_eq!(session.mode, AppMode::Generating);
        assert!(!session.is_scattered);
    }

    #[test]
    fn test_upload_resets_the_composed_view() {
        let session = revealed_session();
        let session = session.reduce(SessionEvent::PhotoLoaded {
            epoch: session.epoch,
            index: 3,
            slot: slot(3),
        });

        assert_eq!(session.revealed_count, 0);
        assert!(!session.is_scattered);
        assert_eq!(session.mode, AppMode::Idle, "poster is stale, back to editing");
        assert_eq!(session.slots.filled_count(), 1);
    }

    #[test]
    fn test_stale_photo_load_is_discarded() {
        let session = idle_session();
        let old_epoch = session.epoch;

        let session = session.reduce(SessionEvent::RevealStarted);
        let session = session.reduce(SessionEvent::PhotoLoaded {
            epoch: old_epoch,
            index: 0,
            slot: slot(0),
        });

        assert_eq!(session.slots.filled_count(), 0);
        assert_eq!(session.mode, AppMode::Generating);
    }

    #[test]
    fn test_stale_title_is_discarded_and_current_title_wins() {
        let session = idle_session().reduce(SessionEvent::RevealStarted);
        let epoch = session.epoch;

        // A manual shuffle mid-flight is overwritten by the async result
        let shuffled = AlbumInfo {
            title: String::from("NEON ECHOES"),
            subtitle: String::from("RESONATING THROUGH THE URBAN NIGHT"),
        };
        let session = session.reduce(SessionEvent::TitleChosen(shuffled));

        let generated = AlbumInfo {
            title: String::from("RUST BELT LULLABY"),
            subtitle: String::from("TWELVE SIDES OF ONE YEAR"),
        };
        let session = session.reduce(SessionEvent::TitleResolved {
            epoch,
            album: generated.clone(),
        });
        assert_eq!(session.album, generated);

        // But a result from a previous cycle never lands
        let session = session
            .reduce(SessionEvent::RevealStarted)
            .reduce(SessionEvent::TitleResolved {
                epoch,
                album: AlbumInfo::default(),
            });
        assert_eq!(session.album, generated);
    }

    #[test]
    fn test_empty_grid_never_requests_a_title() {
        let session = idle_session().reduce(SessionEvent::RevealStarted);
        assert!(!session.wants_album_title());

        let mut filled = idle_session();
        filled = filled.reduce(SessionEvent::PhotoLoaded {
            epoch: filled.epoch,
            index: 0,
            slot: slot(0),
        });
        let filled = filled.reduce(SessionEvent::RevealStarted);
        assert!(filled.wants_album_title());
    }

    #[test]
    fn test_scatter_offsets_are_stable_across_reductions() {
        let session = SessionState::new();
        assert_eq!(session.scatter.len(), SLOT_COUNT);

        let original = session.scatter.clone();
        let reduced = session
            .reduce(SessionEvent::ExitLanding)
            .reduce(SessionEvent::RevealStarted)
            .reduce(SessionEvent::RevealTicked);
        assert_eq!(reduced.scatter, original);
    }

    #[test]
    fn test_name_edits_are_uppercased() {
        let session = idle_session().reduce(SessionEvent::NameEdited(String::from("lunamore")));
        assert_eq!(session.user_name, "LUNAMORE");
    }

    #[test]
    fn test_slot_visibility_follows_mode_and_count() {
        let idle = idle_session();
        assert!(idle.is_slot_visible(0));
        assert!(idle.is_slot_visible(11));

        let mut generating = idle.reduce(SessionEvent::RevealStarted);
        assert!(!generating.is_slot_visible(0));
        generating = generating
            .reduce(SessionEvent::RevealTicked)
            .reduce(SessionEvent::RevealTicked)
            .reduce(SessionEvent::RevealTicked);
        assert!(generating.is_slot_visible(2));
        assert!(!generating.is_slot_visible(3));
    }

    #[test]
    fn test_play_time_readout() {
        let idle = idle_session();
        assert_eq!(idle.play_time(), "00:00 / 12:00");

        let generating = idle
            .reduce(SessionEvent::RevealStarted)
            .reduce(SessionEvent::RevealTicked)
            .reduce(SessionEvent::RevealTicked)
            .reduce(SessionEvent::RevealTicked);
        assert_eq!(generating.play_time(), "03:00 / 12:00");

        assert_eq!(revealed_session().play_time(), "12:00 / 12:00");
    }
}
