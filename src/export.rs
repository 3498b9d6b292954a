use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write repository URLs to `path`, one per line with a trailing newline.
/// Overwrites an existing file.
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<()> {
    let mut body = urls.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    fs::write(path, body)?;
    Ok(())
}
