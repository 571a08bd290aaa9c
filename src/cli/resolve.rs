use crate::{
    error,
    netease::resolver,
    utils::{OutputMode, Quality},
};

use super::netease_client;

pub async fn resolve(input: String, quality: Quality, mode: OutputMode) {
    let client = netease_client().await;

    let track = match client.resolve(&input, quality).await {
        Ok(track) => track,
        Err(e) => error!("Cannot resolve {}: {}", input, e),
    };

    match resolver::render(&track, mode) {
        Ok(output) => println!("{}", output),
        Err(e) => error!("Cannot render {} output: {}", mode, e),
    }
}
