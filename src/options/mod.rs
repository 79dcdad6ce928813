//! Viewer options with TOML preset support.
//!
//! Visualization choices (style, color mode, bond threshold, atom size,
//! labels) plus the layout, camera and lighting parameters are consolidated
//! here. Options serialize to/from TOML so hosts can keep named presets in a
//! directory.

mod camera;
mod layout;
mod lighting;
mod visualization;

use std::path::Path;

pub use camera::{CameraOptions, OrbitRates};
pub use layout::LayoutOptions;
pub use lighting::LightingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use visualization::{Style, VisualizationOptions};

use crate::error::ProtviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[visualization]`) work.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Style, coloring and bonding choices.
    pub visualization: VisualizationOptions,
    /// 2D fitting and shading.
    pub layout: LayoutOptions,
    /// Camera projection and orbit control.
    pub camera: CameraOptions,
    /// 3D light rig.
    pub lighting: LightingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, does not parse, or carries
    /// out-of-range visualization values.
    pub fn load(path: &Path) -> Result<Self, ProtviewError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::debug!("loaded options preset {}", path.display());
        Ok(options)
    }

    /// Parse options from TOML text and validate them.
    ///
    /// # Errors
    ///
    /// [`ProtviewError::OptionsParse`] on malformed TOML,
    /// [`ProtviewError::InvalidOption`] on out-of-range values.
    pub fn from_toml(content: &str) -> Result<Self, ProtviewError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| ProtviewError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check the visualization and layout sections.
    ///
    /// # Errors
    ///
    /// [`ProtviewError::InvalidOption`] for the first out-of-range value.
    pub fn validate(&self) -> Result<(), ProtviewError> {
        self.visualization.validate()?;
        self.layout.validate()
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Fails on serialization or filesystem errors.
    pub fn save(&self, path: &Path) -> Result<(), ProtviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorMapping;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[visualization]
style = "space_fill"
color_mapping = "b_factor"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.visualization.style, Style::SpaceFill);
        assert_eq!(opts.visualization.color_mapping, ColorMapping::BFactor);
        assert_eq!(opts.visualization.bond_threshold, 3.0);
        assert_eq!(opts.layout.padding, 40.0);
        assert_eq!(opts.camera.fovy, 45.0);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let err = Options::from_toml("[visualization]\nbond_threshold = -1.0\n")
            .unwrap_err();
        assert!(matches!(err, ProtviewError::InvalidOption(_)));
        let err = Options::from_toml("[layout]\nfit_factor = 1.5\n").unwrap_err();
        assert!(matches!(err, ProtviewError::InvalidOption(_)));
        let err = Options::from_toml("[visualization\n").unwrap_err();
        assert!(matches!(err, ProtviewError::OptionsParse(_)));
    }

    #[test]
    fn validate_checks_multiplier() {
        let mut vis = VisualizationOptions::default();
        assert!(vis.validate().is_ok());
        vis.atom_size_multiplier = 0.0;
        assert!(vis.validate().is_err());
        vis.atom_size_multiplier = f32::NAN;
        assert!(vis.validate().is_err());
    }

    #[test]
    fn style_accepts_host_spellings() {
        assert_eq!("Ball and Stick".parse::<Style>().unwrap(), Style::BallAndStick);
        assert_eq!("ball-and-stick".parse::<Style>().unwrap(), Style::BallAndStick);
        assert_eq!("Protein Ribbon".parse::<Style>().unwrap(), Style::ProteinRibbon);
        assert_eq!("spacefill".parse::<Style>().unwrap(), Style::SpaceFill);
        assert!("wireframe".parse::<Style>().is_err());
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("protview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.visualization.show_labels = true;
        opts.visualization.style = Style::ProteinRibbon;
        opts.save(&dir.join("ribbon.toml")).unwrap();
        Options::default().save(&dir.join("atoms.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["atoms", "ribbon"]);
        assert_eq!(Options::load(&dir.join("ribbon.toml")).unwrap(), opts);
        assert!(Options::load(&dir.join("missing.toml")).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        for section in ["visualization", "layout", "camera", "lighting"] {
            assert!(props.contains_key(section), "missing {section}");
        }
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
        let layout = &props["layout"]["properties"];
        assert!(layout.get("background").is_none());
    }
}
