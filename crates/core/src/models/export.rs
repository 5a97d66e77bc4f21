/// An in-memory downloadable file. Triggering the actual download is up to
/// the host (browser, desktop shell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// e.g. `"ABC_prices.csv"`
    pub filename: String,

    pub mime_type: String,

    pub content: Vec<u8>,
}

impl ExportFile {
    /// The content as text. Export content is always built from UTF-8 strings.
    pub fn content_str(&self) -> &str {
        std::str::from_utf8(&self.content).unwrap_or_default()
    }
}
