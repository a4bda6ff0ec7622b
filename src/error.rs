// Error types for icon generation

use std::io;
use std::path::PathBuf;

/// Failures that abort generation of an icon.
///
/// Font problems never show up here; they degrade to the fallback glyph and
/// are reported through [`crate::icon::FontSource`] instead.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("icon size {size} out of range [{min},{max}]")]
    InvalidSize { size: u32, min: u32, max: u32 },
    #[error("font scale {0} out of range (0,1]")]
    InvalidFontScale(f32),
    #[error("no icon sizes configured")]
    NoSizes,
    #[error("failed to allocate a {0}x{0} raster buffer")]
    Allocation(u32),
    #[error("glyph '{0}' rendered without any visible pixels")]
    EmptyGlyph(char),
    #[error("failed to encode PNG for '{}'", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create output directory '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IconError {
    /// Process exit status for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            IconError::InvalidSize { .. } | IconError::InvalidFontScale(_) | IconError::NoSizes => 2,
            IconError::Allocation(_) | IconError::EmptyGlyph(_) | IconError::Encode { .. } => 3,
            IconError::CreateDir { .. } | IconError::Write { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_by_failure_class() {
        let size = IconError::InvalidSize {
            size: 4,
            min: 16,
            max: 2048,
        };
        let write = IconError::Write {
            path: PathBuf::from("icon-192.png"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(size.exit_code(), 2);
        assert_eq!(IconError::InvalidFontScale(1.5).exit_code(), 2);
        assert_eq!(IconError::NoSizes.exit_code(), 2);
        assert_eq!(IconError::Allocation(512).exit_code(), 3);
        assert_eq!(write.exit_code(), 4);
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = IconError::InvalidSize {
            size: 4,
            min: 16,
            max: 2048,
        };
        assert_eq!(err.to_string(), "icon size 4 out of range [16,2048]");

        let err = IconError::CreateDir {
            path: PathBuf::from("/nope/icons"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to create output directory '/nope/icons'");
    }
}
