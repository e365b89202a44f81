//! Player session
//!
//! The single control path. Owns the engine, favorites, the live library
//! snapshot and the result channel that background tasks post into. All
//! state mutation happens here; background work only produces values, and a
//! value is applied only if its request token still matches the live
//! target.

use crate::analyzer::{AnalyzerJob, AnalyzerQueue};
use crate::tasks::{spawn_scan, spawn_waveform, TaskResult};
use aria_core::types::TrackId;
use aria_core::Track;
use aria_metadata::LibrarySnapshot;
use aria_playback::types::PlayState;
use aria_playback::{AudioSink, FavoritesStore, QueueEngine};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Playhead poll interval while a clip is playing
const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Periodic playhead ticker
///
/// Emits on a fixed interval while running. Stopping aborts the task
/// outright rather than letting it tick into the void, so a paused player
/// costs no wakeups.
#[derive(Debug, Default)]
pub struct PositionTicker {
    handle: Option<JoinHandle<()>>,
}

impl PositionTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking, replacing any previous ticker task
    pub fn start(&mut self, period: Duration, tx: mpsc::Sender<()>) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Abort the ticker task
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PositionTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One player session: engine, favorites, library, background plumbing
pub struct PlayerSession {
    engine: QueueEngine,
    favorites: FavoritesStore,
    library: LibrarySnapshot,

    /// Bumped per scan request; stale snapshots are discarded
    scan_generation: u64,

    /// The track whose waveform the scrubber is waiting for
    waveform_target: Option<TrackId>,
    waveform: Option<Vec<f32>>,

    ticker: PositionTicker,
    tick_tx: mpsc::Sender<()>,
    tick_rx: Option<mpsc::Receiver<()>>,

    results_tx: mpsc::Sender<TaskResult>,
    results_rx: mpsc::Receiver<TaskResult>,
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerSession {
    /// Session without an audio sink (tests, headless)
    pub fn new() -> Self {
        Self::build(QueueEngine::new())
    }

    /// Session owning the given sink
    pub fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        Self::build(QueueEngine::with_sink(sink))
    }

    fn build(engine: QueueEngine) -> Self {
        let (results_tx, results_rx) = mpsc::channel(64);
        let (tick_tx, tick_rx) = mpsc::channel(16);
        Self {
            engine,
            favorites: FavoritesStore::new(),
            library: LibrarySnapshot::default(),
            scan_generation: 0,
            waveform_target: None,
            waveform: None,
            ticker: PositionTicker::new(),
            tick_tx,
            tick_rx: Some(tick_rx),
            results_tx,
            results_rx,
        }
    }

    pub fn engine(&self) -> &QueueEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut QueueEngine {
        &mut self.engine
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    pub fn library(&self) -> &LibrarySnapshot {
        &self.library
    }

    /// The current track's envelope, once its computation lands
    pub fn waveform(&self) -> Option<&[f32]> {
        self.waveform.as_deref()
    }

    /// Sender for background tasks spawned outside the session
    pub fn results_sender(&self) -> mpsc::Sender<TaskResult> {
        self.results_tx.clone()
    }

    /// Playhead tick receiver; yields `Some` once
    pub fn take_tick_receiver(&mut self) -> Option<mpsc::Receiver<()>> {
        self.tick_rx.take()
    }

    /// Load an album into the engine and start the playhead ticker
    pub fn load_album(&mut self, tracks: &[Track], start: Option<&TrackId>) {
        self.engine.load_album(tracks, start);
        if let Some(track) = self.engine.current_track().cloned() {
            self.request_waveform(&track);
        }
        self.sync_ticker();
    }

    pub fn play(&mut self) {
        self.engine.play();
        self.sync_ticker();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
        self.sync_ticker();
    }

    pub fn toggle_play(&mut self) {
        self.engine.toggle_play();
        self.sync_ticker();
    }

    pub fn next(&mut self) {
        self.engine.next();
        self.after_track_change();
    }

    pub fn previous(&mut self) {
        self.engine.previous();
        self.after_track_change();
    }

    /// Request the waveform for a track; the previous request goes stale
    pub fn request_waveform(&mut self, track: &Track) -> JoinHandle<()> {
        self.waveform_target = Some(track.id.clone());
        self.waveform = None;
        spawn_waveform(
            track.id.clone(),
            track.file_path.clone(),
            self.results_tx.clone(),
        )
    }

    /// Kick off a library scan; earlier in-flight scans go stale
    pub fn begin_scan(&mut self, paths: Vec<PathBuf>) -> JoinHandle<()> {
        self.scan_generation += 1;
        spawn_scan(self.scan_generation, paths, self.results_tx.clone())
    }

    /// Queue cover analysis for every album that has artwork but no decision
    pub fn analyze_covers(&mut self, queue: &AnalyzerQueue) -> JoinHandle<()> {
        let mut jobs = Vec::new();
        for album in &mut self.library.albums {
            if album.animation.is_some() || album.analyzing {
                continue;
            }
            if let Some(artwork) = album.artwork.clone() {
                album.analyzing = true;
                jobs.push(AnalyzerJob {
                    album_id: album.id.clone(),
                    artwork,
                });
            }
        }
        queue.run(jobs, self.results_tx.clone())
    }

    /// Drain and apply every pending background result
    pub fn pump(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply(result);
        }
    }

    /// Apply one background result, discarding it if its token went stale
    pub fn apply(&mut self, result: TaskResult) {
        match result {
            TaskResult::WaveformReady { track_id, envelope } => {
                if self.waveform_target.as_ref() == Some(&track_id) {
                    self.waveform = Some(envelope);
                } else {
                    tracing::debug!(%track_id, "discarding stale waveform");
                }
            }
            TaskResult::LibraryScanned {
                generation,
                snapshot,
            } => {
                if generation == self.scan_generation {
                    // Wholesale swap; the old snapshot simply drops
                    self.library = snapshot;
                } else {
                    tracing::debug!(generation, "discarding stale library snapshot");
                }
            }
            TaskResult::AnimationAnalyzed { album_id, decision } => {
                match self.library.albums.iter_mut().find(|a| a.id == album_id) {
                    Some(album) => {
                        album.animation = decision;
                        album.analyzing = false;
                    }
                    None => tracing::debug!(%album_id, "discarding analysis for reloaded album"),
                }
            }
        }
    }

    fn after_track_change(&mut self) {
        if let Some(track) = self.engine.current_track().cloned() {
            self.request_waveform(&track);
        }
        self.sync_ticker();
    }

    fn sync_ticker(&mut self) {
        match self.engine.state() {
            PlayState::Playing => {
                if !self.ticker.is_running() {
                    self.ticker.start(TICK_PERIOD, self.tick_tx.clone());
                }
            }
            _ => self.ticker.stop(),
        }
    }
}
