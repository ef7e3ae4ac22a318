//! Encoder configuration.

use std::collections::BTreeMap;

use crate::error::QrResult;
use crate::models::{EcLevel, MaskPattern, Module, ModuleTag, Version};
use crate::modes::Mode;

/// Version choice: automatic (smallest that fits) or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionSpec {
    /// Pick the smallest version that holds the payload.
    #[default]
    Auto,
    /// Force a specific version.
    Fixed(Version),
}

/// Mask choice: automatic (lowest penalty) or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskSpec {
    /// Evaluate all eight patterns and keep the lowest penalty.
    #[default]
    Auto,
    /// Force a specific pattern, skipping evaluation.
    Fixed(MaskPattern),
}

/// Segment mode choice for single-payload encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSpec {
    /// Pick the tightest mode whose alphabet covers the payload.
    #[default]
    Auto,
    /// Force a specific mode; payloads outside its alphabet are rejected.
    Fixed(Mode),
}

/// Encoder options.
///
/// Settings steer encoder choices; matrix geometry is always derived from
/// the chosen version. Setters validate their ranges, so a constructed
/// options value is always internally consistent.
#[derive(Debug, Clone)]
pub struct QrOptions {
    version: VersionSpec,
    min_version: Version,
    ec_level: EcLevel,
    mask_pattern: MaskSpec,
    mode: ModeSpec,
    connect_paths: bool,
    exclude_from_connect: Vec<ModuleTag>,
    invert_matrix: bool,
    add_quiet_zone: bool,
    quiet_zone_size: usize,
    module_values: BTreeMap<Module, String>,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            version: VersionSpec::Auto,
            min_version: Version::MIN,
            ec_level: EcLevel::L,
            mask_pattern: MaskSpec::Auto,
            mode: ModeSpec::Auto,
            connect_paths: false,
            exclude_from_connect: Vec::new(),
            invert_matrix: false,
            add_quiet_zone: true,
            quiet_zone_size: 4,
            module_values: BTreeMap::new(),
        }
    }
}

impl QrOptions {
    /// Options with spec defaults: auto version, EC level L, auto mask,
    /// four-module quiet zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a specific version (1-40).
    pub fn with_version(mut self, version: u8) -> QrResult<Self> {
        self.version = VersionSpec::Fixed(Version::new(version)?);
        Ok(self)
    }

    /// Smallest version considered by automatic selection.
    pub fn with_min_version(mut self, version: u8) -> QrResult<Self> {
        self.min_version = Version::new(version)?;
        Ok(self)
    }

    /// Error-correction level.
    pub fn with_ec_level(mut self, ec_level: EcLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Force a mask pattern (0-7), skipping penalty evaluation.
    pub fn with_mask_pattern(mut self, index: u8) -> QrResult<Self> {
        self.mask_pattern = MaskSpec::Fixed(MaskPattern::from_index(index)?);
        Ok(self)
    }

    /// Force a segment mode for single-payload encodes.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = ModeSpec::Fixed(mode);
        self
    }

    /// Collapse function layers into the data layer in `collect_modules`.
    pub fn with_connect_paths(mut self, connect: bool) -> Self {
        self.connect_paths = connect;
        self
    }

    /// Tags kept on their own layer when `connect_paths` is set.
    pub fn with_exclude_from_connect(mut self, tags: Vec<ModuleTag>) -> Self {
        self.exclude_from_connect = tags;
        self
    }

    /// Flip every module after construction.
    pub fn with_invert_matrix(mut self, invert: bool) -> Self {
        self.invert_matrix = invert;
        self
    }

    /// Whether to surround the symbol with a quiet zone.
    pub fn with_quiet_zone(mut self, add: bool) -> Self {
        self.add_quiet_zone = add;
        self
    }

    /// Quiet zone width in modules (0-75).
    pub fn with_quiet_zone_size(mut self, size: usize) -> QrResult<Self> {
        if size > 75 {
            return Err(crate::error::QrError::InvalidQuietZoneSize(size));
        }
        self.quiet_zone_size = size;
        Ok(self)
    }

    /// Backend-specific output value for a module layer.
    pub fn with_module_value(mut self, module: Module, value: impl Into<String>) -> Self {
        self.module_values.insert(module, value.into());
        self
    }

    /// The configured version choice.
    pub fn version(&self) -> VersionSpec {
        self.version
    }

    /// Lower bound for automatic version selection.
    pub fn min_version(&self) -> Version {
        self.min_version
    }

    /// The configured error-correction level.
    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    /// The configured mask choice.
    pub fn mask_pattern(&self) -> MaskSpec {
        self.mask_pattern
    }

    /// The configured mode choice.
    pub fn mode(&self) -> ModeSpec {
        self.mode
    }

    /// Whether function layers collapse into data in `collect_modules`.
    pub fn connect_paths(&self) -> bool {
        self.connect_paths
    }

    /// Tags excluded from layer collapsing.
    pub fn exclude_from_connect(&self) -> &[ModuleTag] {
        &self.exclude_from_connect
    }

    /// Whether the finished matrix is inverted.
    pub fn invert_matrix(&self) -> bool {
        self.invert_matrix
    }

    /// Whether a quiet zone is added.
    pub fn add_quiet_zone(&self) -> bool {
        self.add_quiet_zone
    }

    /// Configured quiet zone width.
    pub fn quiet_zone_size(&self) -> usize {
        self.quiet_zone_size
    }

    /// Backend output values per module layer.
    pub fn module_values(&self) -> &BTreeMap<Module, String> {
        &self.module_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = QrOptions::new();
        assert_eq!(opts.version(), VersionSpec::Auto);
        assert_eq!(opts.ec_level(), EcLevel::L);
        assert_eq!(opts.mask_pattern(), MaskSpec::Auto);
        assert!(opts.add_quiet_zone());
        assert_eq!(opts.quiet_zone_size(), 4);
    }

    #[test]
    fn test_setters_validate_ranges() {
        assert!(QrOptions::new().with_version(0).is_err());
        assert!(QrOptions::new().with_version(41).is_err());
        assert!(QrOptions::new().with_mask_pattern(8).is_err());
        assert!(QrOptions::new().with_quiet_zone_size(76).is_err());
        let opts = QrOptions::new()
            .with_version(7)
            .unwrap()
            .with_mask_pattern(3)
            .unwrap()
            .with_ec_level(EcLevel::Q);
        assert_eq!(
            opts.version(),
            VersionSpec::Fixed(Version::new(7).unwrap())
        );
        assert_eq!(opts.ec_level(), EcLevel::Q);
    }
}
