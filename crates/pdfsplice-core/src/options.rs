//! Options for opening source documents and writing output documents.

/// Limits applied when a source document is opened.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenOptions {
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// Maximum number of pages a source document may have (default: None = no limit).
    pub max_pages: Option<usize>,
}

/// Settings for serializing an output document.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Compress uncompressed streams before saving (default: true).
    pub compress: bool,
    /// Minimum PDF version written in the header (default: "1.5").
    ///
    /// The writer upgrades to the highest version among its source
    /// documents when that is newer.
    pub version: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            version: "1.5".to_string(),
        }
    }
}

impl WriteOptions {
    /// Options that leave streams exactly as they were copied.
    pub fn uncompressed() -> Self {
        Self {
            compress: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_options_default_has_no_limits() {
        let opts = OpenOptions::default();
        assert_eq!(opts.max_input_bytes, None);
        assert_eq!(opts.max_pages, None);
    }

    #[test]
    fn write_options_default() {
        let opts = WriteOptions::default();
        assert!(opts.compress);
        assert_eq!(opts.version, "1.5");
    }

    #[test]
    fn write_options_uncompressed_keeps_version() {
        let opts = WriteOptions::uncompressed();
        assert!(!opts.compress);
        assert_eq!(opts.version, "1.5");
    }
}
