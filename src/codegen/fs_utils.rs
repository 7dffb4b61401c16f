//! Filesystem utilities for writing generated sources

use std::io;
use std::path::Path;
use tokio::fs;

/// Write the generated module, creating parent directories if needed
pub async fn write_output<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    fs::write(path, contents).await
}
