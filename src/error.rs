use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading a map.
///
/// All variants are produced synchronously by the loader. Rendering and tile
/// queries never fail; they degrade to "draw nothing" / "return 0" instead.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file could not be read, or was empty.
    #[error("Can not open file: \"{}\"\n{source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The map text is not valid JSON, or a node has the wrong shape.
    #[error("{}\nJSON Parse Error: {source}", path.display())]
    Json {
        /// File the text came from.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: serde_json::Error,
    },
    /// A tile layer uses base64 and/or compressed data.
    #[error("Layer \"{layer}\" encoding \"{encoding} {compression}\" not supported\nSave map as \"CSV\" and try again")]
    UnsupportedEncoding {
        /// Layer name.
        layer: String,
        /// Value of the layer's `encoding` field.
        encoding: String,
        /// Value of the layer's `compression` field, empty if absent.
        compression: String,
    },
    /// A layer's `data` array does not hold exactly `width * height` cells.
    #[error("Layer \"{layer}\": map size is {width}x{height} = {expected} but layer data size is {actual}")]
    SizeMismatch {
        /// Layer name.
        layer: String,
        /// Declared layer width in tiles.
        width: u32,
        /// Declared layer height in tiles.
        height: u32,
        /// `width * height`.
        expected: usize,
        /// Length of the `data` array.
        actual: usize,
    },
    /// A tileset references an external `.tsx`/`.json` file.
    #[error("{reference} External tilesets not supported\nFix: open map with \"Tiled\" and set tileset as internal")]
    UnsupportedExternalTileset {
        /// The tileset's `source` field.
        reference: String,
    },
    /// One or more tile sheets could not be bound to graphic handles.
    #[error("{}", SheetFailures(failures))]
    GraphicsLoad {
        /// One entry per tile sheet that failed.
        failures: Vec<SheetFailure>,
    },
}

/// Structured kind of a [`MapError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapErrorKind {
    /// See [`MapError::Io`].
    Io,
    /// See [`MapError::Json`].
    Parse,
    /// See [`MapError::UnsupportedEncoding`].
    UnsupportedEncoding,
    /// See [`MapError::SizeMismatch`].
    SizeMismatch,
    /// See [`MapError::UnsupportedExternalTileset`].
    UnsupportedExternalTileset,
    /// See [`MapError::GraphicsLoad`].
    GraphicsLoad,
}

impl MapError {
    /// Structured kind of this error.
    pub fn kind(&self) -> MapErrorKind {
        match self {
            MapError::Io { .. } => MapErrorKind::Io,
            MapError::Json { .. } => MapErrorKind::Parse,
            MapError::UnsupportedEncoding { .. } => MapErrorKind::UnsupportedEncoding,
            MapError::SizeMismatch { .. } => MapErrorKind::SizeMismatch,
            MapError::UnsupportedExternalTileset { .. } => {
                MapErrorKind::UnsupportedExternalTileset
            }
            MapError::GraphicsLoad { .. } => MapErrorKind::GraphicsLoad,
        }
    }
}

/// A tile sheet the graphics backend refused to load.
#[derive(Debug)]
pub struct SheetFailure {
    /// Resolved image path of the sheet.
    pub image: PathBuf,
    /// Backend diagnostic, with its context chain.
    pub reason: String,
}

impl fmt::Display for SheetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can not load \"{}\": {}", self.image.display(), self.reason)
    }
}

struct SheetFailures<'a>(&'a [SheetFailure]);

impl fmt::Display for SheetFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_errors_list_every_failed_sheet() {
        let err = MapError::GraphicsLoad {
            failures: vec![
                SheetFailure {
                    image: PathBuf::from("maps/a.png"),
                    reason: "missing".into(),
                },
                SheetFailure {
                    image: PathBuf::from("maps/b.png"),
                    reason: "bad header".into(),
                },
            ],
        };

        let text = err.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("maps/a.png"));
        assert!(text.contains("bad header"));
        assert_eq!(err.kind(), MapErrorKind::GraphicsLoad);
    }

    #[test]
    fn encoding_error_suggests_csv() {
        let err = MapError::UnsupportedEncoding {
            layer: "ground".into(),
            encoding: "base64".into(),
            compression: "zlib".into(),
        };
        let text = err.to_string();
        assert!(text.contains("base64 zlib"));
        assert!(text.contains("CSV"));
    }
}
