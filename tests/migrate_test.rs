use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use songshift::audio::tags;
use songshift::management::{LibraryManager, PlaylistManager, UnresolvedManager};
use songshift::migrate::{
    AudioTagger, MigrateError, Migrator, RowOutcome, RowState, TrackSource,
};
use songshift::types::{PlaylistRow, SearchResult, TrackTags};
use songshift::utils::Quality;
use tempfile::TempDir;

// Fake source: search results keyed by "<title>|<artist>", URLs keyed by id,
// download bodies keyed by URL. A missing body fails the download. The first
// line of a downloaded file is its duration in seconds.
#[derive(Default)]
struct FakeSource {
    results: HashMap<String, SearchResult>,
    urls: HashMap<u64, String>,
    bodies: HashMap<String, String>,
    searches: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with_track(
        mut self,
        title: &str,
        artist: &str,
        found: SearchResult,
        url: &str,
        body: &str,
    ) -> Self {
        self.urls.insert(found.track_id, url.to_string());
        self.bodies.insert(url.to_string(), body.to_string());
        self.results.insert(format!("{title}|{artist}"), found);
        self
    }

    fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }
}

impl TrackSource for &FakeSource {
    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<SearchResult>, MigrateError> {
        let key = format!("{title}|{artist}");
        self.searches.lock().unwrap().push(key.clone());
        Ok(self.results.get(&key).cloned())
    }

    async fn resolve_url(&self, track_id: u64, _quality: Quality) -> Result<String, MigrateError> {
        self.urls
            .get(&track_id)
            .cloned()
            .ok_or_else(|| MigrateError::ResolveFailure("no url".to_string()))
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), MigrateError> {
        self.downloads.lock().unwrap().push(url.to_string());
        let body = self
            .bodies
            .get(url)
            .ok_or_else(|| MigrateError::DownloadFailure("HTTP 404".to_string()))?;
        fs::write(dest, format!("{body}\n{FILLER}"))
            .map_err(|e| MigrateError::DownloadFailure(e.to_string()))
    }
}

const FILLER: &str = "0000000000000000000000000000000000000000000000000000000000000000";

// Fake tagger: reads the duration line; tags are real ID3.
struct FakeTagger {
    fail_tags: bool,
}

impl AudioTagger for FakeTagger {
    fn duration(&self, path: &Path) -> Result<Duration, MigrateError> {
        let text =
            fs::read_to_string(path).map_err(|e| MigrateError::InvalidAudio(e.to_string()))?;
        text.lines()
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| MigrateError::InvalidAudio(e.to_string()))
    }

    fn write_tags(&self, path: &Path, track: &TrackTags) -> Result<(), MigrateError> {
        if self.fail_tags {
            return Err(MigrateError::TagFailure("read-only".to_string()));
        }
        tags::write_tags(path, track).map_err(|e| MigrateError::TagFailure(e.to_string()))
    }
}

fn row(track: &str, artist: &str) -> PlaylistRow {
    PlaylistRow {
        track_name: track.to_string(),
        artist_name: artist.to_string(),
        album: "Some Album".to_string(),
        playlist_name: "Favourites".to_string(),
        kind: "Song".to_string(),
        isrc: "USRC17607839".to_string(),
        external_id: Some("1440857781".to_string()),
    }
}

fn found(id: u64, name: &str, artist: &str) -> SearchResult {
    SearchResult {
        track_id: id,
        name: name.to_string(),
        artist: artist.to_string(),
        album: Some("blue".to_string()),
    }
}

fn blue_source() -> FakeSource {
    FakeSource::default().with_track(
        "Blue",
        "Yung Kai",
        found(123, "blue", "yung kai"),
        "http://cdn/x.mp3",
        "180",
    )
}

fn migrator<'a>(
    source: &'a FakeSource,
    dir: &Path,
    fail_tags: bool,
) -> Migrator<&'a FakeSource, FakeTagger> {
    Migrator::new(
        source,
        FakeTagger { fail_tags },
        LibraryManager::new(dir.join("Downloads")),
        Quality::Hires,
    )
}

async fn setup(dir: &TempDir) -> PathBuf {
    let downloads = dir.path().join("Downloads");
    LibraryManager::new(&downloads).ensure_dir().await.unwrap();
    downloads
}

#[tokio::test]
async fn test_found_track_is_downloaded_and_tagged() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let source = blue_source();

    let report = migrator(&source, dir.path(), false)
        .run(&[row("Blue", "Yung Kai")])
        .await;

    let path = downloads.join("yung kai - blue.mp3");
    assert_eq!(report.migrated, vec![path.clone()]);
    assert!(report.unresolved.is_empty());
    assert!(path.is_file());

    let written = tags::read_tags(&path).unwrap();
    assert_eq!(written.title, "blue");
    assert_eq!(written.artist, "yung kai");
    assert_eq!(written.album.as_deref(), Some("blue"));
}

#[tokio::test]
async fn test_search_miss_lands_in_unresolved_csv() {
    let dir = TempDir::new().unwrap();
    setup(&dir).await;
    let source = FakeSource::default();
    let unknown = row("Unknown Song", "Nobody");

    let report = migrator(&source, dir.path(), false)
        .run(std::slice::from_ref(&unknown))
        .await;

    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].1, MigrateError::SearchMiss);
    assert_eq!(report.unresolved[0].1.stage(), RowState::Searching);
    assert_eq!(source.download_count(), 0);

    let csv_path = dir.path().join("not_found_songs.csv");
    let mut unresolved = UnresolvedManager::new(&csv_path);
    for (row, _) in &report.unresolved {
        unresolved.add(row.clone());
    }
    assert!(unresolved.persist().await.unwrap());

    let (rows, rejected) = PlaylistManager::parse(&fs::read(&csv_path).unwrap()).unwrap();
    assert!(rejected.is_empty());
    assert_eq!(rows, vec![unknown]);
}

#[tokio::test]
async fn test_short_download_is_deleted_and_unresolved() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let source = FakeSource::default().with_track(
        "Intro",
        "Band",
        found(7, "intro", "band"),
        "http://cdn/intro.mp3",
        "30",
    );

    let report = migrator(&source, dir.path(), false)
        .run(&[row("Intro", "Band")])
        .await;

    assert!(report.migrated.is_empty());
    assert_eq!(
        report.unresolved[0].1,
        MigrateError::TooShort(Duration::from_secs(30))
    );
    assert!(!downloads.join("band - intro.mp3").exists());
}

#[tokio::test]
async fn test_duration_at_floor_is_kept() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let source = FakeSource::default().with_track(
        "Minute",
        "Band",
        found(8, "minute", "band"),
        "http://cdn/minute.mp3",
        "60",
    );

    let report = migrator(&source, dir.path(), false)
        .run(&[row("Minute", "Band")])
        .await;

    assert_eq!(report.migrated.len(), 1);
    assert!(downloads.join("band - minute.mp3").is_file());
}

#[tokio::test]
async fn test_custom_min_duration() {
    let dir = TempDir::new().unwrap();
    setup(&dir).await;
    let source = blue_source();

    let report = migrator(&source, dir.path(), false)
        .with_min_duration(Duration::from_secs(200))
        .run(&[row("Blue", "Yung Kai")])
        .await;

    assert!(matches!(report.unresolved[0].1, MigrateError::TooShort(_)));
}

#[tokio::test]
async fn test_unreadable_audio_is_deleted() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let source = FakeSource::default().with_track(
        "Broken",
        "Band",
        found(9, "broken", "band"),
        "http://cdn/broken.mp3",
        "<html>error</html>",
    );

    let report = migrator(&source, dir.path(), false)
        .run(&[row("Broken", "Band")])
        .await;

    assert!(matches!(
        report.unresolved[0].1,
        MigrateError::InvalidAudio(_)
    ));
    assert!(!downloads.join("band - broken.mp3").exists());
}

#[tokio::test]
async fn test_second_run_does_not_download_again() {
    let dir = TempDir::new().unwrap();
    setup(&dir).await;
    let source = blue_source();
    let rows = [row("Blue", "Yung Kai")];

    let first = migrator(&source, dir.path(), false).run(&rows).await;
    assert_eq!(first.migrated.len(), 1);

    let second = migrator(&source, dir.path(), false).run(&rows).await;
    assert!(second.migrated.is_empty());
    assert_eq!(second.skipped.len(), 1);
    assert!(second.unresolved.is_empty());
    assert_eq!(source.download_count(), 1);
}

#[tokio::test]
async fn test_existing_file_skips_before_search() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    fs::write(downloads.join("Yung Kai - Blue.mp3"), format!("180\n{FILLER}")).unwrap();
    let source = blue_source();

    let outcome = migrator(&source, dir.path(), false)
        .migrate_row(&row("Blue", "Yung Kai"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RowOutcome::Skipped(downloads.join("Yung Kai - Blue.mp3"))
    );
    assert_eq!(source.search_count(), 0);
}

#[tokio::test]
async fn test_invalid_url_is_a_resolve_failure() {
    let dir = TempDir::new().unwrap();
    setup(&dir).await;
    let source = FakeSource::default().with_track(
        "Blue",
        "Yung Kai",
        found(123, "blue", "yung kai"),
        "unavailable",
        "180",
    );

    let report = migrator(&source, dir.path(), false)
        .run(&[row("Blue", "Yung Kai")])
        .await;

    assert!(matches!(
        report.unresolved[0].1,
        MigrateError::ResolveFailure(_)
    ));
    assert_eq!(report.unresolved[0].1.stage(), RowState::Resolving);
    assert_eq!(source.download_count(), 0);
}

#[tokio::test]
async fn test_failures_do_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let mut source = blue_source().with_track(
        "Gone",
        "Band",
        found(5, "gone", "band"),
        "http://cdn/gone.mp3",
        "200",
    );
    source.bodies.remove("http://cdn/gone.mp3");

    let rows = [
        row("Gone", "Band"),
        row("Unknown Song", "Nobody"),
        row("Blue", "Yung Kai"),
    ];
    let report = migrator(&source, dir.path(), false).run(&rows).await;

    assert_eq!(report.total(), 3);
    assert_eq!(report.unresolved.len(), 2);
    assert!(matches!(
        report.unresolved[0].1,
        MigrateError::DownloadFailure(_)
    ));
    assert_eq!(report.unresolved[0].0, rows[0]);
    assert_eq!(report.unresolved[1].0, rows[1]);
    assert_eq!(report.migrated, vec![downloads.join("yung kai - blue.mp3")]);
}

#[tokio::test]
async fn test_tag_failure_keeps_file() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let source = blue_source();

    let report = migrator(&source, dir.path(), true)
        .run(&[row("Blue", "Yung Kai")])
        .await;

    let path = downloads.join("yung kai - blue.mp3");
    assert!(report.unresolved.is_empty());
    assert_eq!(report.untagged, vec![path.clone()]);
    assert!(path.is_file());
}

#[tokio::test]
async fn test_slashes_keep_the_path_flat() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let source = FakeSource::default().with_track(
        "Back In Black",
        "AC/DC",
        found(11, "Back In Black", "AC/DC"),
        "http://cdn/bib.mp3",
        "255",
    );

    let report = migrator(&source, dir.path(), false)
        .run(&[row("Back In Black", "AC/DC")])
        .await;

    assert_eq!(
        report.migrated,
        vec![downloads.join("AC_DC - Back In Black.mp3")]
    );
}

#[tokio::test]
async fn test_album_falls_back_to_playlist_column() {
    let dir = TempDir::new().unwrap();
    let downloads = setup(&dir).await;
    let mut match_without_album = found(123, "blue", "yung kai");
    match_without_album.album = None;
    let source = FakeSource::default().with_track(
        "Blue",
        "Yung Kai",
        match_without_album,
        "http://cdn/x.mp3",
        "180",
    );

    migrator(&source, dir.path(), false)
        .run(&[row("Blue", "Yung Kai")])
        .await;

    let written = tags::read_tags(&downloads.join("yung kai - blue.mp3")).unwrap();
    assert_eq!(written.album.as_deref(), Some("Some Album"));
}
