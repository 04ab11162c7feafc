//! Playlist controller
//!
//! Maintains the selection index and is the only component that opens or
//! closes storage handles. The resource count is never cached: every
//! navigation re-scans the namespace, so resources added or removed by an
//! upload front-end are picked up on the next switch.

use pixmatrix_format::AnimationHeader;

use crate::codec::{CodecError, FrameCodec, InvalidReason};
use crate::config::MatrixGeometry;
use crate::traits::{PixelSink, ResourceName, ResourceStore, StorageError};

/// Navigation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavError {
    /// The namespace holds no resources; nothing changed
    EmptyPlaylist,
    /// The selected resource could not be opened
    Unavailable(StorageError),
    /// The selected resource was opened but cannot be played
    Rejected(InvalidReason),
}

/// Result of a successful selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    /// Selected index
    pub index: usize,
    /// Header of the now active resource
    pub header: AnimationHeader,
}

/// What is behind the current selection index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Availability {
    /// Nothing selected yet
    Idle,
    /// Resource open and decodable
    Playing,
    /// Resource open but rejected by the codec
    Rejected(InvalidReason),
    /// Resource could not be opened; no handle is held
    Unavailable(StorageError),
}

/// Snapshot for the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaylistStatus {
    pub index: usize,
    pub count: usize,
    pub availability: Availability,
}

/// Playlist controller
pub struct PlaylistController<S: ResourceStore> {
    store: S,
    codec: FrameCodec,
    /// Open handle of the selected resource
    reader: Option<S::Reader>,
    index: usize,
    availability: Availability,
    current_name: Option<ResourceName>,
}

impl<S: ResourceStore> PlaylistController<S> {
    /// Create a controller over `store` for the given matrix
    ///
    /// No resource is opened until the first navigation or [`reload`](Self::reload).
    pub fn new(store: S, geometry: MatrixGeometry) -> Self {
        Self {
            store,
            codec: FrameCodec::new(geometry),
            reader: None,
            index: 0,
            availability: Availability::Idle,
            current_name: None,
        }
    }

    /// Number of resources in the namespace (full scan)
    pub fn resource_count(&self) -> usize {
        self.store.entries().count()
    }

    /// Name of the nth resource, or `None` when out of range
    pub fn resource_name_at(&self, n: usize) -> Option<ResourceName> {
        self.store
            .entries()
            .nth(n)
            .and_then(|name| ResourceName::try_from(name).ok())
    }

    /// Current selection index
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Name of the resource the handle was opened on
    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Availability of the current selection
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Snapshot of index, count and availability
    pub fn status(&self) -> PlaylistStatus {
        PlaylistStatus {
            index: self.index,
            count: self.resource_count(),
            availability: self.availability,
        }
    }

    /// The codec decoding the active resource
    pub fn codec(&self) -> &FrameCodec {
        &self.codec
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store (adding or removing resources)
    ///
    /// The open handle is kept; the new contents are seen on the next
    /// navigation.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Select the next resource, wrapping to 0 after the last
    pub fn select_next(&mut self) -> Result<Selection, NavError> {
        let count = self.resource_count();
        if count == 0 {
            return Err(NavError::EmptyPlaylist);
        }

        self.index = if self.index + 1 >= count {
            0
        } else {
            self.index + 1
        };
        self.open_current()
    }

    /// Select the previous resource, wrapping to the last below 0
    pub fn select_previous(&mut self) -> Result<Selection, NavError> {
        let count = self.resource_count();
        if count == 0 {
            return Err(NavError::EmptyPlaylist);
        }

        // An index left past the end by deletions maps to the last entry
        self.index = if self.index == 0 || self.index > count {
            count - 1
        } else {
            self.index - 1
        };
        self.open_current()
    }

    /// Reopen the resource at the current index
    ///
    /// Used at startup and after the namespace changed under the current
    /// selection. An index past the end restarts at 0.
    pub fn reload(&mut self) -> Result<Selection, NavError> {
        let count = self.resource_count();
        if count == 0 {
            return Err(NavError::EmptyPlaylist);
        }

        if self.index >= count {
            self.index = 0;
        }
        self.open_current()
    }

    /// Close the open handle (if any) and reset the codec
    pub fn close(&mut self) {
        self.reader = None;
        self.current_name = None;
        self.codec.reset();
    }

    /// Decode the next frame of the active resource into `display`
    pub fn render_frame<D: PixelSink + ?Sized>(&mut self, display: &mut D) -> Result<u8, CodecError> {
        match self.reader.as_mut() {
            Some(reader) => self.codec.decode_frame(reader, display),
            None => Err(CodecError::NotReady),
        }
    }

    fn open_current(&mut self) -> Result<Selection, NavError> {
        self.close();

        let name = match self.store.entries().nth(self.index) {
            Some(name) => ResourceName::try_from(name).map_err(|_| StorageError::NameTooLong),
            None => Err(StorageError::NotFound),
        };
        let name = match name {
            Ok(name) => name,
            Err(e) => return Err(self.unavailable(e)),
        };

        let mut reader = match self.store.open(&name) {
            Ok(reader) => reader,
            Err(e) => return Err(self.unavailable(e)),
        };

        let result = self.codec.initialize(&mut reader);
        self.reader = Some(reader);
        self.current_name = Some(name);

        match result {
            Ok(header) => {
                self.availability = Availability::Playing;
                Ok(Selection {
                    index: self.index,
                    header,
                })
            }
            Err(reason) => {
                self.availability = Availability::Rejected(reason);
                Err(NavError::Rejected(reason))
            }
        }
    }

    fn unavailable(&mut self, error: StorageError) -> NavError {
        self.availability = Availability::Unavailable(error);
        NavError::Unavailable(error)
    }
}

impl<S: ResourceStore> core::fmt::Debug for PlaylistController<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlaylistController")
            .field("index", &self.index)
            .field("availability", &self.availability)
            .field("current_name", &self.current_name)
            .field("ready", &self.codec.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reference_animation, solid_animation, RecordingSink, TestStore, GREEN};
    use proptest::prelude::*;

    fn geometry() -> MatrixGeometry {
        MatrixGeometry::new(2, 2).unwrap()
    }

    fn playlist(names: &[&str]) -> PlaylistController<TestStore> {
        PlaylistController::new(TestStore::with(names, &reference_animation()), geometry())
    }

    #[test]
    fn test_three_resources_wrap() {
        let mut playlist = playlist(&["a.maf", "b.maf", "c.maf"]);
        playlist.reload().unwrap();
        assert_eq!(playlist.current_index(), 0);

        playlist.select_next().unwrap();
        playlist.select_next().unwrap();
        playlist.select_next().unwrap();
        assert_eq!(playlist.current_index(), 0);

        let selection = playlist.select_previous().unwrap();
        assert_eq!(selection.index, 2);
        assert_eq!(playlist.current_name(), Some("c.maf"));
    }

    #[test]
    fn test_full_cycle_reopens_original() {
        let mut playlist = playlist(&["a.maf", "b.maf", "c.maf", "d.maf"]);
        playlist.reload().unwrap();
        playlist.select_next().unwrap();
        let start = playlist.current_index();

        for _ in 0..playlist.resource_count() {
            playlist.select_next().unwrap();
        }

        assert_eq!(playlist.current_index(), start);
        assert_eq!(playlist.current_name(), Some("b.maf"));
        assert_eq!(playlist.store().opened.last().map(String::as_str), Some("b.maf"));
    }

    #[test]
    fn test_navigation_reinitializes_codec() {
        let mut playlist = playlist(&["a.maf", "b.maf"]);
        let mut sink = RecordingSink::default();
        playlist.reload().unwrap();
        playlist.render_frame(&mut sink).unwrap();
        assert_eq!(playlist.codec().current_frame(), Some(1));

        playlist.select_next().unwrap();
        assert_eq!(playlist.codec().current_frame(), Some(0));
        assert_eq!(playlist.render_frame(&mut sink), Ok(0));
    }

    #[test]
    fn test_empty_playlist_is_noop() {
        let mut playlist = PlaylistController::new(TestStore::default(), geometry());

        assert_eq!(playlist.select_next(), Err(NavError::EmptyPlaylist));
        assert_eq!(playlist.select_previous(), Err(NavError::EmptyPlaylist));
        assert_eq!(playlist.reload(), Err(NavError::EmptyPlaylist));
        assert_eq!(playlist.current_index(), 0);
        assert_eq!(playlist.availability(), Availability::Idle);
    }

    #[test]
    fn test_empty_playlist_keeps_playing_handle() {
        let mut playlist = playlist(&["a.maf"]);
        let mut sink = RecordingSink::default();
        playlist.reload().unwrap();

        playlist.store_mut().remove("a.maf");
        assert_eq!(playlist.select_next(), Err(NavError::EmptyPlaylist));

        // Navigation was a no-op: the open handle still plays
        assert_eq!(playlist.render_frame(&mut sink), Ok(0));
    }

    #[test]
    fn test_unavailable_resource_keeps_index_advanced() {
        let mut store = TestStore::with(&["a.maf"], &reference_animation());
        store.add_broken("b.maf");
        store.add("c.maf", reference_animation());
        let mut playlist = PlaylistController::new(store, geometry());
        let mut sink = RecordingSink::default();
        playlist.reload().unwrap();

        assert_eq!(
            playlist.select_next(),
            Err(NavError::Unavailable(StorageError::Io))
        );
        assert_eq!(playlist.current_index(), 1);
        assert_eq!(
            playlist.availability(),
            Availability::Unavailable(StorageError::Io)
        );
        assert_eq!(playlist.current_name(), None);
        assert_eq!(playlist.render_frame(&mut sink), Err(CodecError::NotReady));
        assert_eq!(sink.pixel_count(), 0);

        // The next navigation moves past the broken resource
        let selection = playlist.select_next().unwrap();
        assert_eq!(selection.index, 2);
        assert_eq!(playlist.availability(), Availability::Playing);
    }

    #[test]
    fn test_mismatched_resource_is_rejected() {
        let mut store = TestStore::with(&["a.maf"], &reference_animation());
        store.add("big.maf", solid_animation(12, 12, 1, GREEN));
        let mut playlist = PlaylistController::new(store, geometry());
        let mut sink = RecordingSink::default();
        playlist.reload().unwrap();

        let reason = InvalidReason::GeometryMismatch {
            width: 12,
            height: 12,
        };
        assert_eq!(playlist.select_next(), Err(NavError::Rejected(reason)));
        assert_eq!(playlist.availability(), Availability::Rejected(reason));
        assert_eq!(playlist.current_name(), Some("big.maf"));
        assert_eq!(playlist.render_frame(&mut sink), Err(CodecError::NotReady));
        assert_eq!(sink.pixel_count(), 0);
    }

    #[test]
    fn test_removed_resources_rescanned() {
        let mut playlist = playlist(&["a.maf", "b.maf", "c.maf", "d.maf"]);
        playlist.reload().unwrap();
        for _ in 0..3 {
            playlist.select_next().unwrap();
        }
        assert_eq!(playlist.current_index(), 3);

        playlist.store_mut().remove("a.maf");
        playlist.store_mut().remove("b.maf");
        assert_eq!(playlist.resource_count(), 2);

        // Index 3 is past the end of two entries
        assert_eq!(playlist.select_previous().unwrap().index, 1);

        playlist.store_mut().remove("c.maf");
        assert_eq!(playlist.select_next().unwrap().index, 0);
        assert_eq!(playlist.current_name(), Some("d.maf"));
    }

    #[test]
    fn test_added_resource_visible() {
        let mut playlist = playlist(&["a.maf"]);
        playlist.reload().unwrap();
        assert_eq!(playlist.select_next().unwrap().index, 0);

        playlist.store_mut().add("b.maf", reference_animation());
        assert_eq!(playlist.select_next().unwrap().index, 1);
        assert_eq!(playlist.status().count, 2);
    }

    #[test]
    fn test_reload_past_end_restarts() {
        let mut playlist = playlist(&["a.maf", "b.maf"]);
        playlist.reload().unwrap();
        playlist.select_next().unwrap();
        playlist.store_mut().remove("a.maf");

        assert_eq!(playlist.reload().unwrap().index, 0);
        assert_eq!(playlist.current_name(), Some("b.maf"));
    }

    #[test]
    fn test_name_at() {
        let playlist = playlist(&["a.maf", "b.maf"]);

        assert_eq!(playlist.resource_name_at(1).as_deref(), Some("b.maf"));
        assert_eq!(playlist.resource_name_at(2), None);
    }

    #[test]
    fn test_name_too_long() {
        let long = "/animations/a-very-long-animation-name.maf";
        let mut playlist = playlist(&[long]);

        assert_eq!(playlist.resource_name_at(0), None);
        assert_eq!(
            playlist.reload(),
            Err(NavError::Unavailable(StorageError::NameTooLong))
        );
    }

    #[test]
    fn test_status() {
        let mut playlist = playlist(&["a.maf", "b.maf"]);
        assert_eq!(playlist.status().availability, Availability::Idle);

        playlist.select_next().unwrap();
        assert_eq!(
            playlist.status(),
            PlaylistStatus {
                index: 1,
                count: 2,
                availability: Availability::Playing
            }
        );
    }

    proptest! {
        #[test]
        fn prop_next_count_times_returns(count in 1usize..12, start in 0usize..12) {
            let names: Vec<String> = (0..count).map(|i| format!("{i}.maf")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut playlist = playlist(&names);
            playlist.reload().unwrap();
            for _ in 0..start {
                playlist.select_next().unwrap();
            }
            let origin = playlist.current_index();

            for _ in 0..count {
                playlist.select_next().unwrap();
            }
            prop_assert_eq!(playlist.current_index(), origin);
            let expected = format!("{origin}.maf");
            prop_assert_eq!(playlist.current_name(), Some(expected.as_str()));
        }

        #[test]
        fn prop_prev_undoes_next(count in 1usize..12, start in 0usize..12) {
            let names: Vec<String> = (0..count).map(|i| format!("{i}.maf")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut playlist = playlist(&names);
            playlist.reload().unwrap();
            for _ in 0..start {
                playlist.select_next().unwrap();
            }
            let origin = playlist.current_index();

            playlist.select_next().unwrap();
            playlist.select_previous().unwrap();
            prop_assert_eq!(playlist.current_index(), origin);

            playlist.select_previous().unwrap();
            playlist.select_next().unwrap();
            prop_assert_eq!(playlist.current_index(), origin);
        }
    }
}
