//! Minimal compose file model and image-pin inspection.
//!
//! Only the `services.<name>.image` fields are modeled; everything else in
//! the file is ignored. The inspection is purely informational: a stack whose
//! file cannot be parsed still gets updated, it just carries a sentinel entry
//! in its report line.

use crate::errors::{PatrolError, PatrolResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Entry reported in place of an image list when the file is unreadable.
pub const PARSE_SENTINEL: &str = "Could not parse";

#[derive(Debug, Deserialize)]
struct ComposeFile {
    #[serde(default)]
    services: BTreeMap<String, Service>,
}

#[derive(Debug, Deserialize)]
struct Service {
    #[serde(default)]
    image: Option<String>,
}

/// Image references declared in `compose_file` that are not pinned to the
/// floating `latest` tag. Untagged references count as non-latest: an
/// unqualified reference resolves to whatever default the registry applies,
/// which is exactly the kind of drift worth surfacing.
///
/// A file that cannot be read or parsed yields `["Could not parse"]` instead
/// of an error; the caller's update sequence must not depend on this result.
pub fn pinned_images(compose_file: &Path) -> Vec<String> {
    match declared_images(compose_file) {
        Ok(images) => images
            .into_iter()
            .filter(|image| !image.ends_with(":latest"))
            .collect(),
        Err(err) => {
            debug!(file = %compose_file.display(), error = %err, "compose file not parseable");
            vec![PARSE_SENTINEL.to_string()]
        }
    }
}

fn declared_images(compose_file: &Path) -> PatrolResult<Vec<String>> {
    let content = std::fs::read_to_string(compose_file)?;
    let compose: ComposeFile =
        serde_yaml::from_str(&content).map_err(|e| PatrolError::Compose(e.to_string()))?;

    Ok(compose
        .services
        .into_values()
        .filter_map(|service| service.image)
        .filter(|image| !image.is_empty())
        .collect())
}
