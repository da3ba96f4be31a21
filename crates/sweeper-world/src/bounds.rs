//! Arena extents and the grid that world objects snap to.
//!
//! The arena is a `width x height` rectangle in arena units, divided into
//! square cells of `cell_size`. Both extents must be exact multiples of the
//! cell size; [`ArenaBounds::new`] refuses anything else so the precondition
//! is settled before the first step runs.

use rand::Rng;
use sweeper_types::GridPosition;

use crate::error::WorldError;

/// Validated arena dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaBounds {
    /// Arena width in arena units.
    width: u32,
    /// Arena height in arena units.
    height: u32,
    /// Side of one grid cell in arena units.
    cell_size: u32,
}

impl ArenaBounds {
    /// Validate and build arena bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZeroCellSize`] if `cell_size` is 0,
    /// [`WorldError::ExtentOutOfRange`] if an extent is 0 or exceeds
    /// `i32::MAX`, or [`WorldError::NotGridAligned`] if an extent is not a
    /// multiple of `cell_size`.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, WorldError> {
        if cell_size == 0 {
            return Err(WorldError::ZeroCellSize);
        }
        check_extent("width", width, cell_size)?;
        check_extent("height", height, cell_size)?;
        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    /// Arena width in arena units.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Arena height in arena units.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Side of one grid cell in arena units.
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of grid columns.
    pub fn columns(&self) -> u32 {
        self.width.checked_div(self.cell_size).unwrap_or(0)
    }

    /// Number of grid rows.
    pub fn rows(&self) -> u32 {
        self.height.checked_div(self.cell_size).unwrap_or(0)
    }

    /// Whether `pos` lies inside the half-open rectangle `[0, width) x [0, height)`.
    pub fn contains(&self, pos: GridPosition) -> bool {
        let inside_x = u32::try_from(pos.x).is_ok_and(|x| x < self.width);
        let inside_y = u32::try_from(pos.y).is_ok_and(|y| y < self.height);
        inside_x && inside_y
    }

    /// Position of the top-left corner of cell `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the scaled coordinate
    /// does not fit an `i32`.
    pub fn cell_origin(&self, column: u32, row: u32) -> Result<GridPosition, WorldError> {
        let x = scale(column, self.cell_size)?;
        let y = scale(row, self.cell_size)?;
        Ok(GridPosition::new(x, y))
    }

    /// Draw a uniformly random cell and return its origin.
    ///
    /// Column and row indices are drawn from `0..columns` and `0..rows`, so
    /// the result is always strictly inside the arena.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if scaling fails.
    pub fn random_cell(&self, rng: &mut impl Rng) -> Result<GridPosition, WorldError> {
        let column = rng.random_range(0..self.columns());
        let row = rng.random_range(0..self.rows());
        self.cell_origin(column, row)
    }

    /// Wrap a position around the arena edges (toroidal topology).
    pub fn wrap(&self, pos: GridPosition) -> GridPosition {
        GridPosition::new(
            wrap_axis(pos.x, self.width),
            wrap_axis(pos.y, self.height),
        )
    }
}

/// Check one extent against the cell size.
fn check_extent(axis: &'static str, extent: u32, cell: u32) -> Result<(), WorldError> {
    if extent == 0 || i32::try_from(extent).is_err() {
        return Err(WorldError::ExtentOutOfRange { axis, extent });
    }
    if extent.checked_rem(cell) != Some(0) {
        return Err(WorldError::NotGridAligned { axis, extent, cell });
    }
    Ok(())
}

/// Multiply a cell index by the cell size into a signed coordinate.
fn scale(index: u32, cell: u32) -> Result<i32, WorldError> {
    let raw = index
        .checked_mul(cell)
        .ok_or(WorldError::ArithmeticOverflow)?;
    i32::try_from(raw).map_err(|_err| WorldError::ArithmeticOverflow)
}

/// Euclidean remainder of `value` into `[0, extent)`.
fn wrap_axis(value: i32, extent: u32) -> i32 {
    // Extents are validated to fit i32 at construction.
    let extent = i32::try_from(extent).unwrap_or(i32::MAX);
    value.checked_rem_euclid(extent).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn aligned_bounds_are_accepted() {
        let bounds = ArenaBounds::new(400, 400, 10).unwrap();
        assert_eq!(bounds.columns(), 40);
        assert_eq!(bounds.rows(), 40);
    }

    #[test]
    fn misaligned_width_is_rejected() {
        let result = ArenaBounds::new(405, 400, 10);
        assert!(matches!(
            result,
            Err(WorldError::NotGridAligned { axis: "width", extent: 405, cell: 10 })
        ));
    }

    #[test]
    fn misaligned_height_is_rejected() {
        let result = ArenaBounds::new(400, 333, 10);
        assert!(matches!(
            result,
            Err(WorldError::NotGridAligned { axis: "height", .. })
        ));
    }

    #[test]
    fn zero_cell_is_rejected() {
        assert!(matches!(
            ArenaBounds::new(400, 400, 0),
            Err(WorldError::ZeroCellSize)
        ));
    }

    #[test]
    fn zero_extent_is_rejected() {
        assert!(matches!(
            ArenaBounds::new(0, 400, 10),
            Err(WorldError::ExtentOutOfRange { axis: "width", .. })
        ));
    }

    #[test]
    fn random_cells_stay_inside_and_aligned() {
        let bounds = ArenaBounds::new(60, 30, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let pos = bounds.random_cell(&mut rng).unwrap();
            assert!(bounds.contains(pos), "{pos} escaped the arena");
            assert_eq!(pos.x % 10, 0);
            assert_eq!(pos.y % 10, 0);
        }
    }

    #[test]
    fn single_cell_arena_always_yields_origin() {
        let bounds = ArenaBounds::new(10, 10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(bounds.random_cell(&mut rng).unwrap(), GridPosition::new(0, 0));
    }

    #[test]
    fn wrap_handles_both_edges() {
        let bounds = ArenaBounds::new(100, 50, 10).unwrap();
        assert_eq!(bounds.wrap(GridPosition::new(100, 50)), GridPosition::new(0, 0));
        assert_eq!(bounds.wrap(GridPosition::new(-10, -10)), GridPosition::new(90, 40));
        assert_eq!(bounds.wrap(GridPosition::new(30, 20)), GridPosition::new(30, 20));
    }
}
