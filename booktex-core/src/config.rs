// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_FIGURE_WIDTH: &str = "10cm";
pub const DEFAULT_SOURCE_IMAGE_DIR: &str = "img/";
pub const DEFAULT_GENERATED_IMAGE_DIR: &str = "img/generated/";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Width used by figures that do not carry an explicit `width` argument.
    pub default_figure_width: String,
    /// Prefix of vector image paths as they appear in the manuscript.
    pub source_image_dir: String,
    /// Prefix under which the build places rasterized copies of vector images.
    pub generated_image_dir: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_figure_width: DEFAULT_FIGURE_WIDTH.to_string(),
            source_image_dir: DEFAULT_SOURCE_IMAGE_DIR.to_string(),
            generated_image_dir: DEFAULT_GENERATED_IMAGE_DIR.to_string(),
        }
    }
}

pub fn load_options_from_yaml_file(path: &Path) -> crate::Result<Options> {
    let content = std::fs::read_to_string(path)?;
    let options = serde_yaml::from_str::<Options>(&content)?;
    Ok(options)
}
