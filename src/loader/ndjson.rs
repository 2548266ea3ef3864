use super::error::LoadError;
use super::fields::{parse_object, JsonObject};
use std::path::Path;

/// A parsed line together with its 1-based line number in the file.
pub struct JsonLine {
    pub line: usize,
    pub object: JsonObject,
}

/// Read a whole newline-delimited JSON file into memory and parse every
/// non-blank line as an object. Fails on the first malformed line.
pub fn read_json_lines(path: &Path) -> Result<Vec<JsonLine>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;

    text.lines()
        .enumerate()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(index, raw)| {
            parse_object(raw)
                .map(|object| JsonLine {
                    line: index + 1,
                    object,
                })
                .map_err(|reason| LoadError::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason,
                })
        })
        .collect()
}
