use tabled::Table;

use crate::{error, types::SearchTableRow, warning};

use super::netease_client;

pub async fn search(title: String, artist: String) {
    let client = netease_client().await;

    match client.search(&title, &artist).await {
        Ok(Some(found)) => {
            let table = Table::new(vec![SearchTableRow {
                id: found.track_id,
                name: found.name,
                artist: found.artist,
                album: found.album.unwrap_or_default(),
            }]);
            println!("{}", table);
        }
        Ok(None) => warning!("Not found: {} - {}", title, artist),
        Err(e) => error!("Search failed: {}", e),
    }
}
