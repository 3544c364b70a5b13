use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::{config::ExtractorConfig, error::Result, types::ExtractionResult};

fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Get the cache directory for a given key (a video id)
pub fn get_cache_dir(key: &str) -> PathBuf {
    get_root_cache_dir().join(hash_key(key).to_string())
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("captionist")
}

/// Get the path for a cached extraction result.
///
/// Runs against another host or with another page cap get their own file.
pub fn get_result_path(cache_dir: &Path, config: &ExtractorConfig) -> PathBuf {
    cache_dir.join(format!(
        "extraction_{}p_{:016x}.json",
        config.max_comment_pages,
        hash_key(&config.base_url)
    ))
}

/// Load an extraction result from a cached file
pub async fn load_result(path: &Path) -> Result<ExtractionResult> {
    let json_content = fs::read_to_string(path).await?;
    let result: ExtractionResult = serde_json::from_str(&json_content)?;
    Ok(result)
}

/// Save an extraction result, creating parent directories as needed
pub async fn save_result(result: &ExtractionResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(result)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}
