//! Reference constants shared across the calculation and simulation modules.

/// Raw entries strictly above this value are console (IHM×100) readings.
pub const IHM_SCALE_THRESHOLD: f64 = 200.0;

/// Divisor applied to console readings to obtain Hz.
pub const IHM_SCALE_FACTOR: f64 = 100.0;

/// Maintenance reference table: conveying length per belt, in metres.
pub const CONVEYING_LENGTH_M: [f64; 3] = [11.485, 11.685, 6.980];

/// Maintenance reference table: per-metre coefficient `C_i` in s·Hz/m.
///
/// The belt constant used by the time model is `K_i = Lconv_i × C_i`.
pub const REFERENCE_COEFFICIENT: [f64; 3] = [13_305.853_9, 9_167.842_9, 84_597.43];

/// Built-in anchor constants `K'_i` (min·Hz) for the thickness indicator.
pub const DEFAULT_ANCHOR: [f64; 3] = [1_000.0, 3_420.0, 9_440.0];

/// Default tick cadence for wall-clock driven simulations, in seconds.
pub const DEFAULT_TICK_SECONDS: f64 = 0.5;

/// Remaining time under which the "product about to exit" notice fires.
pub const EXIT_NOTICE_SECONDS: f64 = 5.0 * 60.0;

/// Number of equal visual subdivisions of a progress bar.
pub const CELL_MARKER_DIVISIONS: usize = 9;

/// Deltas within ±this percentage are reported as a steady layer.
pub const THICKNESS_STEADY_BAND_PCT: f64 = 0.5;
