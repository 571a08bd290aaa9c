use std::{path::PathBuf, time::Duration};

use tabled::Table;

use crate::{
    error, info,
    management::{LibraryManager, PlaylistManager, UnresolvedManager},
    migrate::{Id3Tagger, MigrationReport, Migrator, NeteaseSource},
    success,
    types::UnresolvedTableRow,
    utils::Quality,
    warning,
};

use super::netease_client;

#[derive(Debug, Clone)]
pub struct MigrateSettings {
    pub playlist: PathBuf,
    pub quality: Quality,
    pub download_dir: PathBuf,
    pub unresolved_csv: PathBuf,
    pub min_duration: Duration,
}

pub async fn migrate(settings: MigrateSettings) {
    let playlist = match PlaylistManager::load(&settings.playlist).await {
        Ok(playlist) => playlist,
        Err(e) => error!(
            "Cannot open playlist {}: {}",
            settings.playlist.display(),
            e
        ),
    };

    let mut unresolved = UnresolvedManager::new(&settings.unresolved_csv);
    for rejected in playlist.rejected() {
        warning!("Malformed row {}: {}", rejected.line, rejected.reason);
        unresolved.add(rejected.row.clone());
    }

    if playlist.rows().is_empty() {
        warning!("No tracks in {}", playlist.path().display());
        persist_unresolved(&unresolved).await;
        return;
    }

    let library = LibraryManager::new(&settings.download_dir);
    if let Err(e) = library.ensure_dir().await {
        error!(
            "Cannot create download directory {}: {}",
            settings.download_dir.display(),
            e
        );
    }

    info!(
        "Migrating {} tracks at {} quality into {}",
        playlist.rows().len(),
        settings.quality.label(),
        library.root().display()
    );

    let migrator = Migrator::new(
        NeteaseSource::new(netease_client().await),
        Id3Tagger,
        library,
        settings.quality,
    )
    .with_min_duration(settings.min_duration);

    let report = migrator.run(playlist.rows()).await;

    for (row, _) in &report.unresolved {
        unresolved.add(row.clone());
    }

    persist_unresolved(&unresolved).await;
    print_summary(&report, playlist.rejected().len());
}

async fn persist_unresolved(unresolved: &UnresolvedManager) {
    match unresolved.persist().await {
        Ok(true) => success!(
            "Unresolved tracks saved to {}",
            unresolved.path().display()
        ),
        Ok(false) => {}
        Err(e) => warning!(
            "Cannot write unresolved tracks to {}: {}",
            unresolved.path().display(),
            e
        ),
    }
}

fn print_summary(report: &MigrationReport, malformed: usize) {
    if !report.unresolved.is_empty() {
        let rows: Vec<UnresolvedTableRow> = report
            .unresolved
            .iter()
            .map(|(row, e)| UnresolvedTableRow {
                track: row.track_name.clone(),
                artist: row.artist_name.clone(),
                reason: e.to_string(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if malformed > 0 {
        warning!("{} malformed rows were written to the unresolved list", malformed);
    }

    if !report.untagged.is_empty() {
        warning!("{} files were kept without tags", report.untagged.len());
    }

    success!(
        "{} of {} tracks downloaded, {} already present, {} unresolved",
        report.migrated.len() + report.untagged.len(),
        report.total(),
        report.skipped.len(),
        report.unresolved.len()
    );
}
