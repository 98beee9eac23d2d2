pub mod camera;
pub mod grid;
pub mod neighborhood;
pub mod rules;
pub mod sim;

/// Signed cell coordinate.
///
/// Neighbor lookups step one past any edge, so coordinates are signed even
/// though in-bounds cells live in `[0, width) x [0, height)`.
pub type Coord = i32;
