//! Module matrix with per-module function tags.

use std::collections::BTreeMap;

use crate::error::{QrError, QrResult};
use crate::models::{MaskPattern, Version};

/// Function type of a module.
///
/// Every module carries one tag plus a dark/light bit; data placement is
/// only allowed on [`ModuleTag::Data`] cells, so the encoder can never
/// overwrite a function pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleTag {
    /// Payload and error-correction codeword bits.
    Data,
    /// One of the three 7x7 finder patterns.
    Finder,
    /// Light border around a finder pattern.
    Separator,
    /// 5x5 alignment pattern.
    Alignment,
    /// Alternating timing row/column.
    Timing,
    /// Format information (EC level + mask).
    Format,
    /// Version information (versions 7+).
    Version,
    /// The fixed dark module at (8, 4v + 9).
    DarkModule,
    /// Quiet-zone border added around the symbol.
    QuietZone,
    /// Area reserved for a logo overlay.
    Logo,
}

/// One module: a function tag plus a dark/light bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Module {
    tag: ModuleTag,
    dark: bool,
}

impl Module {
    /// A module with the given tag and color.
    pub fn new(tag: ModuleTag, dark: bool) -> Self {
        Self { tag, dark }
    }

    /// Light data module, the initial state of every cell.
    pub fn light() -> Self {
        Self::new(ModuleTag::Data, false)
    }

    /// The function tag.
    pub fn tag(&self) -> ModuleTag {
        self.tag
    }

    /// True for dark modules.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// True when the module may carry codeword bits.
    pub fn is_data(&self) -> bool {
        self.tag == ModuleTag::Data
    }

    /// Same module with the dark bit flipped.
    pub fn toggled(self) -> Self {
        Self {
            dark: !self.dark,
            ..self
        }
    }
}

/// Square grid of tagged modules.
///
/// The content region is `17 + 4 * version` modules per side; an optional
/// quiet zone expands the grid outward without moving the version geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    version: Version,
    size: usize,
    quiet_zone: usize,
    modules: Vec<Module>,
}

impl QrMatrix {
    /// Create a matrix of light data modules for a version.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            size,
            quiet_zone: 0,
            modules: vec![Module::light(); size * size],
        }
    }

    /// Build a tagged matrix from a plain dark/light grid.
    ///
    /// Function-pattern tags are re-derived from the version geometry; the
    /// grid supplies the dark bits of the format, version and data areas.
    /// This is the entry point for decoder front-ends that sampled a symbol
    /// from an image.
    pub fn from_bools(version: Version, grid: &[Vec<bool>]) -> QrResult<Self> {
        let size = version.size();
        if grid.len() != size || grid.iter().any(|row| row.len() != size) {
            return Err(QrError::InvalidVersion(version.number()));
        }
        let mut matrix = Self::new(version);
        matrix.place_function_patterns();
        for (y, row) in grid.iter().enumerate() {
            for (x, &dark) in row.iter().enumerate() {
                let module = matrix.get(x, y);
                match module.tag() {
                    ModuleTag::Data | ModuleTag::Format | ModuleTag::Version => {
                        matrix.set(x, y, Module::new(module.tag(), dark));
                    }
                    // Fixed patterns keep their nominal colors.
                    _ => {}
                }
            }
        }
        Ok(matrix)
    }

    /// Parse a matrix from its text form (`#` dark, `.` light, one row per
    /// line), deriving the version from the side length.
    pub fn from_text(text: &str) -> QrResult<Self> {
        let grid: Vec<Vec<bool>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().chars().map(|c| c == '#').collect())
            .collect();
        let version = Version::from_size(grid.len())?;
        Self::from_bools(version, &grid)
    }

    /// Side length of the grid, quiet zone included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The symbol version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Width of the quiet zone on each side.
    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    /// Module at (x, y). Out-of-bounds reads count as light quiet zone.
    pub fn get(&self, x: usize, y: usize) -> Module {
        if x >= self.size || y >= self.size {
            return Module::new(ModuleTag::QuietZone, false);
        }
        self.modules[y * self.size + x]
    }

    /// Overwrite the module at (x, y).
    pub fn set(&mut self, x: usize, y: usize, module: Module) {
        debug_assert!(x < self.size && y < self.size, "module ({x}, {y}) out of bounds");
        self.modules[y * self.size + x] = module;
    }

    /// Tag a function module with its color.
    pub fn set_function(&mut self, x: usize, y: usize, tag: ModuleTag, dark: bool) {
        self.set(x, y, Module::new(tag, dark));
    }

    /// Write a codeword bit into a data module.
    ///
    /// Fails with [`QrError::MatrixInvariantViolation`] if the target is a
    /// function module; that indicates an encoder bug, never bad input.
    pub fn set_data(&mut self, x: usize, y: usize, dark: bool) -> QrResult<()> {
        if !self.get(x, y).is_data() {
            return Err(QrError::MatrixInvariantViolation { x, y });
        }
        self.set(x, y, Module::new(ModuleTag::Data, dark));
        Ok(())
    }

    /// XOR the mask predicate over every data module.
    ///
    /// Applying the same pattern twice restores the original matrix.
    pub fn mask(&mut self, pattern: MaskPattern) {
        for y in 0..self.size {
            for x in 0..self.size {
                let module = self.get(x, y);
                if module.is_data() && pattern.is_masked(y, x) {
                    self.set(x, y, module.toggled());
                }
            }
        }
    }

    /// Data-module coordinates in placement order: two-column zig-zag from
    /// the bottom-right corner, skipping the x=6 timing column and every
    /// function module.
    pub fn data_positions(&self) -> Vec<(usize, usize)> {
        debug_assert_eq!(self.quiet_zone, 0, "zig-zag runs on the content region");
        let mut positions = Vec::new();
        let mut col = self.size as isize - 1;
        let mut upward = true;
        while col > 0 {
            if col == 6 {
                col -= 1;
                continue;
            }
            let rows: Vec<usize> = if upward {
                (0..self.size).rev().collect()
            } else {
                (0..self.size).collect()
            };
            for y in rows {
                for dx in 0..2 {
                    let x = (col - dx) as usize;
                    if self.get(x, y).is_data() {
                        positions.push((x, y));
                    }
                }
            }
            upward = !upward;
            col -= 2;
        }
        positions
    }

    /// Number of dark modules in the grid.
    pub fn count_dark(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// Expand the grid by `width` modules of light quiet zone on each side.
    pub fn add_quiet_zone(&mut self, width: usize) -> QrResult<()> {
        if width > 75 {
            return Err(QrError::InvalidQuietZoneSize(width));
        }
        if width == 0 {
            return Ok(());
        }
        let new_size = self.size + 2 * width;
        let mut modules = vec![Module::new(ModuleTag::QuietZone, false); new_size * new_size];
        for y in 0..self.size {
            for x in 0..self.size {
                modules[(y + width) * new_size + (x + width)] = self.get(x, y);
            }
        }
        self.modules = modules;
        self.size = new_size;
        self.quiet_zone += width;
        Ok(())
    }

    /// Copy of the content region with any quiet zone stripped.
    pub fn without_quiet_zone(&self) -> QrMatrix {
        if self.quiet_zone == 0 {
            return self.clone();
        }
        let qz = self.quiet_zone;
        let size = self.version.size();
        let mut out = QrMatrix::new(self.version);
        for y in 0..size {
            for x in 0..size {
                out.set(x, y, self.get(x + qz, y + qz));
            }
        }
        out
    }

    /// Flip every module's dark bit, preserving its tag.
    pub fn invert(&mut self) {
        for module in &mut self.modules {
            *module = module.toggled();
        }
    }

    /// Iterate modules row-major and group transformed values per layer.
    ///
    /// Each cell is passed to `transform` as `(x, y, module, layer)`, where
    /// `layer` collapses to a plain data module of the same color when
    /// `connect_paths` is set and the cell's tag is not excluded. Cells for
    /// which the transform returns `None` are dropped. The result maps each
    /// layer to its values, ordered by tag.
    pub fn collect_modules<T>(
        &self,
        connect_paths: bool,
        exclude_from_connect: &[ModuleTag],
        transform: impl Fn(usize, usize, Module, Module) -> Option<T>,
    ) -> BTreeMap<Module, Vec<T>> {
        let mut layers: BTreeMap<Module, Vec<T>> = BTreeMap::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let module = self.get(x, y);
                let layer = if connect_paths
                    && !module.is_data()
                    && !exclude_from_connect.contains(&module.tag())
                {
                    Module::new(ModuleTag::Data, module.is_dark())
                } else {
                    module
                };
                if let Some(value) = transform(x, y, module, layer) {
                    layers.entry(layer).or_default().push(value);
                }
            }
        }
        layers
    }

    /// Text form of the grid: `#` dark, `.` light, one row per line.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for y in 0..self.size {
            for x in 0..self.size {
                out.push(if self.get(x, y).is_dark() { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}
