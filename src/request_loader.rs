use crate::error::VlsmError;
use crate::ip::SubnetRequest;
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// One entry of a YAML request document
#[derive(Debug, Deserialize)]
struct RequestEntry {
    name: String,
    hosts: i64,
}

/// Load subnet requests from a file.
///
/// Files ending in `.yaml`/`.yml` are read as a YAML list of
/// `{ name, hosts }` entries; anything else is the plain text format with
/// one `<name> <count>` pair per line.
pub fn load_requests(path: &Path) -> Result<Vec<SubnetRequest>, VlsmError> {
    info!("Loading subnet requests from: {:?}", path);

    let content = std::fs::read_to_string(path).map_err(|source| VlsmError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    let requests = if is_yaml_path(path) {
        debug!("Detected YAML request document");
        parse_request_document(path, &content)?
    } else {
        parse_request_lines(&content)?
    };

    info!("Loaded {} subnet requests", requests.len());
    Ok(requests)
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Parse the plain text request format.
///
/// Every line, blank ones included, must start with a name followed by an
/// integer count. Names are opaque, so `#lab 4` is a request like any other.
/// Anything after the count is ignored.
pub fn parse_request_lines(content: &str) -> Result<Vec<SubnetRequest>, VlsmError> {
    let mut requests = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let malformed = || VlsmError::MalformedRequestLine {
            line_number: index + 1,
            line: line.to_string(),
        };

        let mut fields = line.split_whitespace();
        let (name, count) = match (fields.next(), fields.next()) {
            (Some(name), Some(count)) => (name, count),
            _ => return Err(malformed()),
        };
        let count: i64 = count.parse().map_err(|_| malformed())?;

        requests.push(SubnetRequest::new(name, count)?);
    }

    Ok(requests)
}

/// Parse a YAML request document
pub fn parse_request_document(path: &Path, content: &str) -> Result<Vec<SubnetRequest>, VlsmError> {
    // An empty document is an empty list, not a type error
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<RequestEntry> =
        serde_yaml::from_str(content).map_err(|e| VlsmError::MalformedRequestDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    entries
        .into_iter()
        .map(|entry| SubnetRequest::new(entry.name, entry.hosts))
        .collect()
}
