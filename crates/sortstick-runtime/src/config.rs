// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loads the sort configuration from an optional TOML file plus CLI overrides.

use sortstick_core::{InvalidConfig, SortConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{path}'")]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid `SortConfig` document.
    #[error("failed to parse config file '{path}'")]
    Parse {
        /// The file that was requested.
        path: PathBuf,
        /// The TOML error, with line and column.
        #[source]
        source: toml::de::Error,
    },
    /// The merged values are out of range.
    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

/// Values that replace whatever the file (or the defaults) specified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub element_count: Option<usize>,
    pub operation_delay_ms: Option<u64>,
    pub color_delay_ms: Option<u64>,
    pub shuffle_seed: Option<u64>,
}

impl Overrides {
    fn apply(&self, config: &mut SortConfig) {
        if let Some(count) = self.element_count {
            config.element_count = count;
        }
        if let Some(delay) = self.operation_delay_ms {
            config.operation_delay_ms = delay;
        }
        if let Some(delay) = self.color_delay_ms {
            config.color_delay_ms = delay;
        }
        if self.shuffle_seed.is_some() {
            config.shuffle_seed = self.shuffle_seed;
        }
    }
}

/// Reads `path` (or starts from the defaults), applies `overrides`, and validates.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<SortConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            log::info!("Loading configuration from '{}'.", path.display());
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => {
            log::debug!("No config file given; using defaults.");
            SortConfig::default()
        }
    };

    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_a_file() {
        let config = load(None, &Overrides::default()).unwrap();
        assert_eq!(config, SortConfig::default());
    }

    #[test]
    fn file_values_fill_in_over_defaults() {
        let file = write_config(
            "element_count = 64\noperation_delay_ms = 5\n\n[layout]\nwindow_width = 800.0\n",
        );

        let config = load(Some(file.path()), &Overrides::default()).unwrap();

        assert_eq!(config.element_count, 64);
        assert_eq!(config.operation_delay_ms, 5);
        assert_eq!(config.color_delay_ms, SortConfig::default().color_delay_ms);
        assert_eq!(config.layout.window_width, 800.0);
        assert_eq!(config.layout.max_element_height, 820.0);
    }

    #[test]
    fn overrides_win_over_the_file() {
        let file = write_config("element_count = 64\nshuffle_seed = 1\n");
        let overrides = Overrides {
            element_count: Some(10),
            shuffle_seed: Some(99),
            ..Default::default()
        };

        let config = load(Some(file.path()), &overrides).unwrap();

        assert_eq!(config.element_count, 10);
        assert_eq!(config.shuffle_seed, Some(99));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(
            Some(Path::new("definitely/not/here.toml")),
            &Overrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("element_count = \"many\"\n");
        let err = load(Some(file.path()), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        let overrides = Overrides {
            element_count: Some(50_000),
            ..Default::default()
        };
        let err = load(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("element_count"));
    }
}
