use std::fs;

use songshift::management::*;
use songshift::types::PlaylistRow;
use tempfile::tempdir;

fn row(track: &str, artist: &str) -> PlaylistRow {
    PlaylistRow {
        track_name: track.to_string(),
        artist_name: artist.to_string(),
        album: String::new(),
        playlist_name: String::new(),
        kind: String::new(),
        isrc: String::new(),
        external_id: None,
    }
}

fn defaults() -> Vec<(String, String)> {
    [("os", "pc"), ("appver", ""), ("osver", ""), ("deviceId", "pyncm!")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_cookie_parse() {
    let cookies = CookieManager::parse(" MUSIC_U=abc123; __csrf=tok ;broken; =nokey;os=ios\n");

    assert_eq!(cookies.get("MUSIC_U"), Some("abc123"));
    assert_eq!(cookies.get("__csrf"), Some("tok"));
    assert_eq!(cookies.get("os"), Some("ios"));
    assert_eq!(cookies.get("broken"), None);
    assert_eq!(cookies.get(""), None);
}

#[test]
fn test_cookie_value_keeps_equals_sign() {
    let cookies = CookieManager::parse("token=a=b=c");
    assert_eq!(cookies.get("token"), Some("a=b=c"));
}

#[test]
fn test_cookie_later_key_wins() {
    let cookies = CookieManager::parse("a=1; b=2; a=3");
    assert_eq!(cookies.get("a"), Some("3"));
    assert_eq!(cookies.header_with(&[]), "a=3; b=2");
}

#[test]
fn test_cookie_header_overrides_defaults() {
    let cookies = CookieManager::parse("MUSIC_U=abc; os=ios");
    assert_eq!(
        cookies.header_with(&defaults()),
        "os=ios; appver=; osver=; deviceId=pyncm!; MUSIC_U=abc"
    );
}

#[test]
fn test_cookie_header_empty_file() {
    let cookies = CookieManager::parse("");
    assert!(cookies.is_empty());
    assert_eq!(
        cookies.header_with(&defaults()),
        "os=pc; appver=; osver=; deviceId=pyncm!"
    );
}

#[tokio::test]
async fn test_cookie_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cookie.txt");
    fs::write(&path, "MUSIC_U=from-file").unwrap();

    let cookies = CookieManager::load(&path).await.unwrap();
    assert_eq!(cookies.get("MUSIC_U"), Some("from-file"));

    let missing = CookieManager::load(&dir.path().join("none.txt")).await;
    assert!(matches!(missing, Err(CookieError::IoError(_))));
}

#[test]
fn test_playlist_parse_full_export() {
    let data = "\u{feff}Playlist name,Type,Track name,Artist name,Album,ISRC,Apple - id\n\
                Favourites,song,blue,yung kai,blue,USUM72401234,1734512345\n\
                Favourites,song,Thunderstruck,AC/DC,The Razors Edge,,\n";

    let (rows, rejected) = PlaylistManager::parse(data.as_bytes()).unwrap();

    assert!(rejected.is_empty());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].track_name, "blue");
    assert_eq!(rows[0].artist_name, "yung kai");
    assert_eq!(rows[0].playlist_name, "Favourites");
    assert_eq!(rows[0].isrc, "USUM72401234");
    assert_eq!(rows[0].external_id.as_deref(), Some("1734512345"));
    assert_eq!(rows[1].artist_name, "AC/DC");
    assert_eq!(rows[1].external_id, None);
}

#[test]
fn test_playlist_parse_minimal_columns() {
    let data = "Track name,Artist name\nblue,yung kai\n";

    let (rows, rejected) = PlaylistManager::parse(data.as_bytes()).unwrap();

    assert!(rejected.is_empty());
    assert_eq!(rows, vec![row("blue", "yung kai")]);
}

#[test]
fn test_playlist_parse_trims_headers() {
    let data = " Track name , Artist name \nblue,yung kai\n";

    let (rows, _) = PlaylistManager::parse(data.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_playlist_missing_column() {
    let data = "Track name,Album\nblue,blue\n";

    let err = PlaylistManager::parse(data.as_bytes()).unwrap_err();
    match err {
        PlaylistError::MissingColumn(column) => assert_eq!(column, "Artist name"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_playlist_accepts_short_rows() {
    let data = "Playlist name,Type,Track name,Artist name,Album,ISRC,Apple - id\n\
                Favourites,song,blue,yung kai,blue,USUM72401234,1734512345\n\
                Favourites,song,saturn,SZA,SOS,USRC12300001\n\
                Favourites,song,Thunderstruck,AC/DC\n";

    let (rows, rejected) = PlaylistManager::parse(data.as_bytes()).unwrap();

    assert!(rejected.is_empty());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].isrc, "USRC12300001");
    assert_eq!(rows[1].external_id, None);
    assert_eq!(rows[2].artist_name, "AC/DC");
    assert_eq!(rows[2].album, "");
}

#[test]
fn test_playlist_rejects_row_without_artist() {
    let data = "Track name,Artist name\nblue,yung kai\nonly-one-field\nsaturn,SZA\n";

    let (rows, rejected) = PlaylistManager::parse(data.as_bytes()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].line, 3);
    assert!(rejected[0].reason.contains("Artist name"));
    assert_eq!(rejected[0].row.track_name, "only-one-field");
    assert_eq!(rejected[0].row.artist_name, "");
}

#[test]
fn test_playlist_rejected_row_keeps_known_columns() {
    let mut data = b"Track name,Artist name,Album,Apple - id\n".to_vec();
    data.extend_from_slice(b"caf\xe9,Nobody,Live,42\n");

    let (rows, rejected) = PlaylistManager::parse(&data).unwrap();

    assert!(rows.is_empty());
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].row.track_name, "caf\u{fffd}");
    assert_eq!(rejected[0].row.artist_name, "Nobody");
    assert_eq!(rejected[0].row.album, "Live");
    assert_eq!(rejected[0].row.external_id.as_deref(), Some("42"));

    // The recovered row can be written to the unresolved output
    let mut unresolved = UnresolvedManager::new("unresolved.csv");
    unresolved.add(rejected[0].row.clone());
    let csv = String::from_utf8(unresolved.to_csv().unwrap()).unwrap();
    assert!(csv.contains("Nobody,Live,,,,42"));
}

#[tokio::test]
async fn test_playlist_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlist.csv");
    fs::write(&path, "Track name,Artist name\nblue,yung kai\n").unwrap();

    let playlist = PlaylistManager::load(&path).await.unwrap();
    assert_eq!(playlist.path(), path.as_path());
    assert_eq!(playlist.rows().len(), 1);
    assert!(playlist.rejected().is_empty());

    let missing = PlaylistManager::load(&dir.path().join("missing.csv")).await;
    assert!(matches!(missing, Err(PlaylistError::IoError(_))));
}

#[test]
fn test_unresolved_to_csv() {
    let mut unresolved = UnresolvedManager::new("unresolved.csv");
    let mut with_id = row("Unknown Song", "Nobody");
    with_id.external_id = Some("42".to_string());
    unresolved.add(with_id);

    let csv = String::from_utf8(unresolved.to_csv().unwrap()).unwrap();
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("Track name,Artist name,Album,Playlist name,Type,ISRC,Apple - id")
    );
    assert_eq!(lines.next(), Some("Unknown Song,Nobody,,,,,42"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_unresolved_persist_empty_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unresolved.csv");

    let unresolved = UnresolvedManager::new(&path);
    assert!(unresolved.is_empty());
    assert!(!unresolved.persist().await.unwrap());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_unresolved_persist_creates_parent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports").join("unresolved.csv");

    let mut unresolved = UnresolvedManager::new(&path);
    unresolved.add(row("blue", "yung kai"));
    assert!(unresolved.persist().await.unwrap());

    let (rows, _) = PlaylistManager::parse(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(rows, unresolved.rows());
}

#[tokio::test]
async fn test_library_paths() {
    let dir = tempdir().unwrap();
    let library = LibraryManager::new(dir.path().join("music"));

    assert_eq!(
        library.song_path("Thunderstruck", "AC/DC"),
        dir.path().join("music").join("AC_DC - Thunderstruck.mp3")
    );
    assert!(!library.has_song("blue", "yung kai"));

    library.ensure_dir().await.unwrap();
    assert!(library.root().is_dir());

    fs::write(library.song_path("blue", "yung kai"), b"audio").unwrap();
    assert!(library.has_song("blue", "yung kai"));
}

#[tokio::test]
async fn test_library_remove() {
    let dir = tempdir().unwrap();
    let library = LibraryManager::new(dir.path());
    let path = library.song_path("blue", "yung kai");
    fs::write(&path, b"audio").unwrap();

    library.remove(&path).await.unwrap();
    assert!(!path.exists());

    // Removing again is not an error
    library.remove(&path).await.unwrap();
}
