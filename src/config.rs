use crate::color::HexColor;
use crate::icon::IconStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Generator configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub brand: BrandConfig,
    pub font: FontConfig,
}

/// Where icons are written and which sizes are generated
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the PNG files are written into
    pub directory: PathBuf,
    /// Square pixel sizes, generated in order
    pub sizes: Vec<u32>,
}

/// Badge colors
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BrandConfig {
    /// Fill of the rounded square, `#RRGGBB`
    pub background: HexColor,
}

/// Glyph font configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Preferred bold TrueType font; the built-in glyph is used if it can't be loaded
    pub path: PathBuf,
    /// Font pixel size as a fraction of the icon size
    pub scale: f32,
}

pub const DEFAULT_BACKGROUND: HexColor = HexColor::new(0x7B, 0x2C, 0xBF);
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub const DEFAULT_FONT_SCALE: f32 = 0.625;
pub const DEFAULT_SIZES: [u32; 2] = [192, 512];

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: PathBuf::from("."),
            sizes: DEFAULT_SIZES.to_vec(),
        }
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        BrandConfig {
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            path: PathBuf::from(DEFAULT_FONT_PATH),
            scale: DEFAULT_FONT_SCALE,
        }
    }
}

impl OutputConfig {
    /// File name for an icon of the given size, e.g. `icon-192.png`
    pub fn file_name(size: u32) -> String {
        format!("icon-{}.png", size)
    }

    pub fn icon_path(&self, size: u32) -> PathBuf {
        self.directory.join(Self::file_name(size))
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "badge-icons")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, or return defaults if
    /// there is no usable file
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from `path`. A missing file is not an error; a
    /// broken one is logged and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config file");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to parse config file: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read config file: {}", e);
            }
        }
        tracing::warn!("using default configuration");
        Config::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Rendering parameters shared by every icon size
    pub fn icon_style(&self) -> IconStyle {
        IconStyle {
            background: self.brand.background,
            font_path: self.font.path.clone(),
            font_scale: self.font.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.output.sizes, vec![192, 512]);
        assert_eq!(config.brand.background.to_string(), "#7B2CBF");
        assert_eq!(config.font.path, PathBuf::from(DEFAULT_FONT_PATH));
        assert_eq!(config.font.scale, 0.625);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        assert!(toml_str.contains("background = \"#7B2CBF\""));
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml_str(
            r##"
            [output]
            directory = "public"

            [brand]
            background = "#112233"
            "##,
        )
        .unwrap();
        assert_eq!(config.output.directory, PathBuf::from("public"));
        assert_eq!(config.output.sizes, vec![192, 512]);
        assert_eq!(config.brand.background, HexColor::new(0x11, 0x22, 0x33));
        assert_eq!(config.font, FontConfig::default());
    }

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let err = Config::from_toml_str("[brand]\nbackground = \"purple\"\n").unwrap_err();
        assert!(err.to_string().contains("must start with '#'"));
    }

    #[test]
    fn test_load_from_missing_or_broken_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("config.toml");
        assert_eq!(Config::load_from(&missing), Config::default());

        fs::write(&missing, "[output\nsizes = 3").unwrap();
        assert_eq!(Config::load_from(&missing), Config::default());

        fs::write(&missing, "[output]\nsizes = [48]\n").unwrap();
        assert_eq!(Config::load_from(&missing).output.sizes, vec![48]);
    }

    #[test]
    fn test_icon_file_names() {
        let output = OutputConfig {
            directory: PathBuf::from("out"),
            sizes: vec![192],
        };
        assert_eq!(OutputConfig::file_name(512), "icon-512.png");
        assert_eq!(output.icon_path(192), PathBuf::from("out").join("icon-192.png"));
    }
}
