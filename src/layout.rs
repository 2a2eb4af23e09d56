//! Honeycomb placement: per-tile boxes and the container bounding box.
//!
//! Everything here is plain arithmetic over a [`LayoutConfig`] and a tile
//! count. Nothing in this module touches the ECS, so it can be called from
//! any thread and tested without an `App`.
//!
//! Malformed config values never fail a layout. They are replaced using a
//! fixed substitution table (see [`LayoutConfig::normalized`]) and each
//! replacement is reported as a [`Substitution`].

use std::fmt;

use bevy::prelude::Reflect;

/// Center-to-corner radius used when the configured size is unusable.
pub const DEFAULT_SIZE: f64 = 40.0;
/// Extra gap between adjacent hex centers used when spacing is unusable.
pub const DEFAULT_SPACING: f64 = 4.0;
/// Extra container height used when the margin is unusable.
pub const DEFAULT_HEIGHT_MARGIN: f64 = 1.0;
/// Declared row count used when rows is unusable.
pub const DEFAULT_ROWS: i64 = 1;
/// Column count used when cols is unusable.
pub const DEFAULT_COLS: i64 = 1;

/// Largest accepted size, spacing or height margin, in pixels. Larger values
/// are clamped so every coordinate stays finite and bounds fit a `u64`.
pub const MAX_EXTENT: f64 = 1.0e6;

/// Which way the hexagons point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum Orientation {
    /// Flat edge on top and bottom; odd columns drop by half a row.
    #[default]
    FlatTop,
    /// Vertex on top and bottom; odd rows shift right by half a column.
    PointyTop,
}

impl Orientation {
    /// Markup tag for this orientation.
    pub fn label(self) -> &'static str {
        match self {
            Self::FlatTop => "flat-top",
            Self::PointyTop => "pointy-top",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Orientation> for hexx::HexOrientation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::FlatTop => hexx::HexOrientation::Flat,
            Orientation::PointyTop => hexx::HexOrientation::Pointy,
        }
    }
}

/// Input record for a single layout pass.
///
/// Fields hold raw values as supplied by the caller; out-of-range values are
/// allowed here and get substituted by [`LayoutConfig::normalized`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct LayoutConfig {
    /// Hexagon orientation.
    pub orientation: Orientation,
    /// Declared row count. Informational only: tiles keep wrapping at `cols`
    /// no matter how many rows that produces.
    pub rows: i64,
    /// Tiles per row before wrapping.
    pub cols: i64,
    /// Center-to-corner radius in pixels.
    pub size: f64,
    /// Gap added to the natural center-to-center distance on both axes.
    pub spacing: f64,
    /// Extra padding added to the container height.
    pub height_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::FlatTop,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            size: DEFAULT_SIZE,
            spacing: DEFAULT_SPACING,
            height_margin: DEFAULT_HEIGHT_MARGIN,
        }
    }
}

impl LayoutConfig {
    /// Returns a copy with every out-of-range field replaced, along with one
    /// [`Substitution`] per replaced field.
    ///
    /// | field           | replaced when          | with         |
    /// |-----------------|------------------------|--------------|
    /// | `rows`          | `< 1`                  | 1            |
    /// | `cols`          | `< 1`                  | 1            |
    /// | `size`          | `<= 0` or not finite   | 40           |
    /// | `spacing`       | `< 0` or not finite    | 4            |
    /// | `height_margin` | `< 0` or not finite    | 1            |
    /// | any of the three above | `> MAX_EXTENT`  | [`MAX_EXTENT`] |
    pub fn normalized(&self) -> (LayoutConfig, Vec<Substitution>) {
        let mut out = *self;
        let mut subs = Vec::new();

        if out.rows < 1 {
            subs.push(Substitution::new(ConfigField::Rows, out.rows as f64, DEFAULT_ROWS as f64));
            out.rows = DEFAULT_ROWS;
        }
        if out.cols < 1 {
            subs.push(Substitution::new(ConfigField::Cols, out.cols as f64, DEFAULT_COLS as f64));
            out.cols = DEFAULT_COLS;
        }
        if !(out.size.is_finite() && out.size > 0.0) {
            subs.push(Substitution::new(ConfigField::Size, out.size, DEFAULT_SIZE));
            out.size = DEFAULT_SIZE;
        }
        if !(out.spacing.is_finite() && out.spacing >= 0.0) {
            subs.push(Substitution::new(ConfigField::Spacing, out.spacing, DEFAULT_SPACING));
            out.spacing = DEFAULT_SPACING;
        }
        if !(out.height_margin.is_finite() && out.height_margin >= 0.0) {
            subs.push(Substitution::new(
                ConfigField::HeightMargin,
                out.height_margin,
                DEFAULT_HEIGHT_MARGIN,
            ));
            out.height_margin = DEFAULT_HEIGHT_MARGIN;
        }

        for (field, value) in [
            (ConfigField::Size, &mut out.size),
            (ConfigField::Spacing, &mut out.spacing),
            (ConfigField::HeightMargin, &mut out.height_margin),
        ] {
            if *value > MAX_EXTENT {
                subs.push(Substitution::new(field, *value, MAX_EXTENT));
                *value = MAX_EXTENT;
            }
        }

        (out, subs)
    }

    /// Strict check: the substitutions a layout with this config would make.
    /// Empty means every field is in range.
    pub fn validate(&self) -> Vec<Substitution> {
        self.normalized().1
    }

    /// Column count as an index divisor. Only meaningful on a normalized config.
    fn col_count(&self) -> usize {
        usize::try_from(self.cols).unwrap_or(usize::MAX).max(1)
    }
}

/// A config field that can be substituted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// [`LayoutConfig::rows`]
    Rows,
    /// [`LayoutConfig::cols`]
    Cols,
    /// [`LayoutConfig::size`]
    Size,
    /// [`LayoutConfig::spacing`]
    Spacing,
    /// [`LayoutConfig::height_margin`]
    HeightMargin,
}

impl ConfigField {
    /// Field name as it appears in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Cols => "cols",
            Self::Size => "size",
            Self::Spacing => "spacing",
            Self::HeightMargin => "height_margin",
        }
    }
}

/// One default substitution made while normalizing a [`LayoutConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Substitution {
    /// The field that was replaced.
    pub field: ConfigField,
    /// The value that was rejected.
    pub given: f64,
    /// The default used instead.
    pub used: f64,
}

impl Substitution {
    fn new(field: ConfigField, given: f64, used: f64) -> Self {
        Self { field, given, used }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is out of range, using {}",
            self.field.name(),
            self.given,
            self.used
        )
    }
}

/// Center-to-center distances along each screen axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pitch {
    /// Distance between neighbouring columns.
    pub horizontal: f64,
    /// Distance between neighbouring rows.
    pub vertical: f64,
}

/// Pitches for hexagons of radius `size` tessellated with `spacing` extra gap.
///
/// The long pitch is `sqrt(3)·size + spacing` and the short one is
/// `1.5·size + spacing`. Flat-top puts the short pitch across columns,
/// pointy-top puts it down rows.
pub fn pitches(orientation: Orientation, size: f64, spacing: f64) -> Pitch {
    let long = 3f64.sqrt() * size + spacing;
    let short = 1.5 * size + spacing;
    match orientation {
        Orientation::FlatTop => Pitch {
            horizontal: short,
            vertical: long,
        },
        Orientation::PointyTop => Pitch {
            horizontal: long,
            vertical: short,
        },
    }
}

/// Placement of one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexCell {
    /// Position of the tile in the input sequence.
    pub index: usize,
    /// `index / cols`
    pub row: usize,
    /// `index % cols`
    pub col: usize,
    /// Left edge of the tile box.
    pub x: f64,
    /// Top edge of the tile box.
    pub y: f64,
    /// Box width, `2·size`.
    pub width: f64,
    /// Box height, `2·size`.
    pub height: f64,
}

impl HexCell {
    /// Center of the tile box, which is also the hexagon center.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge of the tile box.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge of the tile box.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Container size in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub struct BoundingBox {
    /// `ceil` of the furthest right edge.
    pub width: u64,
    /// `ceil` of the furthest bottom edge plus the height margin.
    pub height: u64,
}

/// Output of [`layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct HoneycombLayout {
    /// The config after substitution, i.e. the one the cells were computed with.
    pub config: LayoutConfig,
    /// One cell per tile, in index order.
    pub cells: Vec<HexCell>,
    /// Size the container must have to fit every cell.
    pub bounds: BoundingBox,
    /// Defaults applied while normalizing the input config.
    pub substitutions: Vec<Substitution>,
}

impl HoneycombLayout {
    /// Number of rows the tiles actually occupy.
    pub fn row_count(&self) -> usize {
        self.cells.last().map_or(0, |cell| cell.row + 1)
    }

    /// True when wrapping at `cols` produced more rows than were declared.
    pub fn exceeds_declared_rows(&self) -> bool {
        self.row_count() as u64 > self.config.rows as u64
    }
}

/// Lays out `item_count` tiles row-major, wrapping every `cols` tiles.
///
/// Never fails: invalid config values are substituted first and listed in
/// [`HoneycombLayout::substitutions`]. With no tiles the bounds are `0 × 0`
/// and the height margin is not applied.
pub fn layout(config: &LayoutConfig, item_count: usize) -> HoneycombLayout {
    let (config, substitutions) = config.normalized();
    let cells: Vec<HexCell> = (0..item_count).map(|i| place(&config, i)).collect();
    let bounds = bounds_of(&cells, config.height_margin);

    HoneycombLayout {
        config,
        cells,
        bounds,
        substitutions,
    }
}

/// Placement of a single tile, without building the whole layout.
pub fn cell_position(config: &LayoutConfig, index: usize) -> HexCell {
    let (config, _) = config.normalized();
    place(&config, index)
}

/// `config` must already be normalized.
fn place(config: &LayoutConfig, index: usize) -> HexCell {
    let cols = config.col_count();
    let row = index / cols;
    let col = index % cols;
    let pitch = pitches(config.orientation, config.size, config.spacing);

    let (x, y) = match config.orientation {
        Orientation::FlatTop => (
            col as f64 * pitch.horizontal,
            row as f64 * pitch.vertical + (col % 2) as f64 * (pitch.vertical / 2.0),
        ),
        Orientation::PointyTop => (
            col as f64 * pitch.horizontal + (row % 2) as f64 * (pitch.horizontal / 2.0),
            row as f64 * pitch.vertical,
        ),
    };

    HexCell {
        index,
        row,
        col,
        x,
        y,
        width: 2.0 * config.size,
        height: 2.0 * config.size,
    }
}

fn bounds_of(cells: &[HexCell], height_margin: f64) -> BoundingBox {
    if cells.is_empty() {
        return BoundingBox::default();
    }
    let max_right = cells.iter().map(HexCell::right).fold(0.0, f64::max);
    let max_bottom = cells.iter().map(HexCell::bottom).fold(0.0, f64::max);
    BoundingBox {
        width: max_right.ceil() as u64,
        height: (max_bottom + height_margin).ceil() as u64,
    }
}
