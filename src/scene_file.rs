//! Scene document.
//!
//! A JSON rendition of [`Scene`](crate::data::Scene).

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::data::Scene;

/// Loads a scene document.
///
/// A missing `base_dir` defaults to the directory of the document, and a
/// relative one is resolved against it.
pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Scene> {
    load_impl(path.as_ref())
}

/// Loads a scene document.
fn load_impl(path: &Path) -> anyhow::Result<Scene> {
    let file = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
    );
    let mut scene: Scene = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse scene document {}", path.display()))?;

    let doc_dir = path.parent().unwrap_or_else(|| Path::new(""));
    scene.base_dir = Some(match scene.base_dir.take() {
        Some(base) if base.is_relative() => doc_dir.join(base),
        Some(base) => base,
        None => doc_dir.to_owned(),
    });
    Ok(scene)
}

/// Parses a scene document.
///
/// `base_dir` is left as written.
pub fn parse(s: &str) -> anyhow::Result<Scene> {
    serde_json::from_str(s).context("Failed to parse scene document")
}
