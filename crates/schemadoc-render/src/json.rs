use schemadoc_core::{Error, MetadataDocument, Result};

/// Serialize the document as pretty-printed JSON.
///
/// The output round-trips: [`parse_document`] reproduces an equal document.
pub fn to_json(document: &MetadataDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|err| Error::Render(err.to_string()))
}

/// Parse a document back from its JSON rendering.
pub fn parse_document(json: &str) -> Result<MetadataDocument> {
    serde_json::from_str(json).map_err(|err| Error::Render(err.to_string()))
}
