use anyhow::{anyhow, ensure, Result};
use crc::{Crc, CRC_32_BZIP2};
use std::path::Path;

use super::{database::DatabaseV1, Database};

fn crc() -> Crc<u32> {
    Crc::<u32>::new(&CRC_32_BZIP2)
}

/// Returns Ok(None) if the db file doesn't exist yet
pub async fn load(path: &Path) -> Result<Option<DatabaseV1>> {
    log::info!("Loading database...");
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }

    let content_compressed = tokio::fs::read(path).await?;
    let content_decompressed = zstd::stream::decode_all(content_compressed.as_slice())?;
    let crc = crc();
    let (parsed, remaining): (Database, &[u8]) =
        postcard::take_from_bytes_crc32(&content_decompressed, crc.digest())?;
    let Database::V1(database) = parsed;
    ensure!(0 == remaining.len(), "File had extra bytes");

    log::info!(
        "Loading database...done ({} transactions)",
        database.len()
    );

    Ok(Some(database))
}

pub async fn save(db: DatabaseV1, path: &Path) -> Result<()> {
    log::info!("Saving database...");

    let crc = crc();
    let content_plaintext = postcard::to_stdvec_crc32(&Database::V1(db), crc.digest())?;
    let content_compressed = zstd::bulk::compress(&content_plaintext, zstd::DEFAULT_COMPRESSION_LEVEL)?;

    // First write to temporary file so we don't lose data if writing fails halfway
    let filename = path
        .file_name()
        .ok_or_else(|| anyhow!("Path has no filename"))?
        .to_str()
        .ok_or_else(|| anyhow!("Filename isn't valid utf-8"))?;
    let tmppath = path.with_file_name(format!("{}.temp", filename));
    tokio::fs::write(&tmppath, content_compressed).await?;

    // Ok, writing succeeded, let's now replace the real file with the tmpfile
    tokio::fs::rename(&tmppath, path).await?;

    log::info!("Saving database...done");

    Ok(())
}
