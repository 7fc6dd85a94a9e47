use log::{debug, error, info, warn};

use crate::data::{BatchSummary, Track, TrackOutcome, VerificationOutcome};
use crate::helpers::lrclib::{self, LrclibClient, SearchParams};
use crate::helpers::matcher;
use crate::helpers::songstore::{SongStore, SongStoreError};
use crate::helpers::syncedlyrics;

/// Drives lyrics verification across the catalog
///
/// Owns its LRCLIB client and content store; both are injected at
/// construction so tests can run against fakes.
pub struct Reconciler {
    client: LrclibClient,
    store: SongStore,
    artist_name: String,
}

impl Reconciler {
    pub fn new(client: LrclibClient, store: SongStore, artist_name: &str) -> Self {
        Self {
            client,
            store,
            artist_name: artist_name.to_string(),
        }
    }

    /// Score a single track against LRCLIB without touching the content store
    ///
    /// A stored LRCLIB id takes precedence: when it still resolves, the
    /// remote record is scored directly and no search is issued. Otherwise
    /// the catalog metadata is searched with the configured artist name and
    /// the track duration as a matching hint.
    pub fn verify_lyrics(&self, track: &Track) -> VerificationOutcome {
        let local = track.lyrics.as_deref().unwrap_or("");

        if let Some(id) = track.lrclib_id {
            match self.client.get_lyrics_by_id(id) {
                Ok(Some(candidate)) => return matcher::compare_lyrics(local, &candidate),
                Ok(None) => debug!(
                    "Stored LRCLIB id {} for '{}' no longer resolves, falling back to search",
                    id, track.title
                ),
                Err(e) => warn!(
                    "Direct LRCLIB lookup failed for '{}', falling back to search: {}",
                    track.title, e
                ),
            }
        }

        let params = SearchParams {
            track_name: Some(track.title.clone()),
            artist_name: Some(self.artist_name.clone()),
            album_name: None,
            duration: track
                .duration
                .as_deref()
                .and_then(lrclib::convert_duration_to_seconds),
        };

        match self.client.get_lyrics(&params) {
            Some(candidate) => {
                info!(
                    "Found LRCLIB candidate {} for '{}'",
                    candidate.id, track.title
                );
                matcher::compare_lyrics(local, &candidate)
            }
            None => {
                info!("No lyrics found for track: {}", track.title);
                VerificationOutcome::no_match()
            }
        }
    }

    /// Verify one track and persist a positive result
    ///
    /// On a match, `lrcLibId`, `isVerified` and (when available) the
    /// canonicalized `syncedLyrics` are written into the content record.
    /// Errors are contained here and reported as a `Failed` outcome; the
    /// batch loop never sees them.
    pub fn verify_track_lyrics(&self, track: &Track) -> TrackOutcome {
        let outcome = self.verify_lyrics(track);
        if !outcome.is_match {
            return TrackOutcome::NoMatch;
        }

        let id = match outcome.lrclib_id {
            Some(id) => id,
            // A match always carries the candidate id; treat anything else
            // as a per-track failure rather than writing an unverifiable flag
            None => return TrackOutcome::Failed("match without LRCLIB id".to_string()),
        };

        let synced = outcome
            .synced_lyrics
            .as_deref()
            .map(syncedlyrics::format_synced_lyrics);

        match self
            .store
            .update_verification(&track.slug, id, true, synced.as_deref())
        {
            Ok(()) => {
                info!(
                    "Verified '{}' against LRCLIB {} (confidence {:.2})",
                    track.title, id, outcome.confidence
                );
                TrackOutcome::Verified
            }
            Err(e) => {
                error!("Failed to persist verification for '{}': {}", track.title, e);
                TrackOutcome::Failed(e.to_string())
            }
        }
    }

    /// Verify a track identified by its slug
    pub fn verify_slug(&self, slug: &str) -> Result<TrackOutcome, SongStoreError> {
        let track = self.store.load_by_slug(slug)?;
        Ok(self.verify_track_lyrics(&track))
    }

    /// Score a set of tracks sequentially, keyed by slug
    ///
    /// Read-only companion to `verify_all`: nothing is persisted. Request
    /// pacing comes from the lrclib rate-limit registration.
    pub fn batch_verify(&self, tracks: &[Track]) -> Vec<(String, VerificationOutcome)> {
        tracks
            .iter()
            .map(|track| (track.slug.clone(), self.verify_lyrics(track)))
            .collect()
    }

    /// Verify the whole catalog sequentially and accumulate a summary
    pub fn verify_all(&self) -> Result<BatchSummary, SongStoreError> {
        let songs = self.store.load_all()?;
        let mut summary = BatchSummary {
            total: songs.len(),
            ..Default::default()
        };

        for song in &songs {
            match self.verify_track_lyrics(song) {
                TrackOutcome::Verified => summary.verified += 1,
                TrackOutcome::NoMatch => summary.failed.push(song.title.clone()),
                TrackOutcome::Failed(reason) => {
                    warn!("Verification failed for '{}': {}", song.title, reason);
                    summary.failed.push(song.title.clone());
                }
            }
        }

        info!(
            "Batch complete: {}/{} verified",
            summary.verified, summary.total
        );
        Ok(summary)
    }

    /// Run a full catalog pass and render the report
    pub fn generate_report(&self) -> Result<String, SongStoreError> {
        Ok(self.verify_all()?.report())
    }
}
