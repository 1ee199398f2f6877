//! Tensor-library boundary for gaussian attributes.
//!
//! Optimizers work on four parallel row-major arrays: positions `[N, 3]`,
//! scales `[N, 3]`, rotations `[N, 4]` and colours `[N, 4]`, where row `i`
//! belongs to gaussian `i`. [`TensorBridge`] moves data between those arrays
//! and a [`GaussianScene`].
//!
//! ```
//! use buildify::{GaussianScene, TensorBridge};
//!
//! let bridge = TensorBridge::new();
//! let mut scene = GaussianScene::new();
//! bridge
//!     .add_gaussians_from_arrays(
//!         &mut scene,
//!         &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//!         &[0.1; 6],
//!         &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
//!         &[1.0; 8],
//!     )
//!     .unwrap();
//!
//! let positions = bridge.positions(&scene);
//! assert_eq!(positions.shape, [2, 3]);
//! ```

use crate::error::{BuildifyError, Result};
use crate::gaussian::{Gaussian, GaussianScene};
use crate::logging::{SharedLogger, default_logger};

/// A dense row-major 2D array of floats.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatArray {
    pub data: Vec<f32>,
    /// `[rows, columns]`.
    pub shape: [usize; 2],
}

impl FlatArray {
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Row `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let width = self.shape[1];
        let start = index.checked_mul(width)?;
        let end = start.checked_add(width)?;
        self.data.get(start..end)
    }
}

/// Converts between attribute arrays and [`GaussianScene`]s.
pub struct TensorBridge {
    logger: SharedLogger,
}

impl TensorBridge {
    pub fn new() -> Self {
        Self::with_logger(default_logger())
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Appends one gaussian per row of the four arrays.
    ///
    /// Every array must be a whole number of rows of its width, and all four
    /// must agree on the row count. On mismatch nothing is added and
    /// [`BuildifyError::ShapeMismatch`] names the offending attribute.
    /// Returns the number of gaussians added.
    pub fn add_gaussians_from_arrays(
        &self,
        scene: &mut GaussianScene,
        positions: &[f32],
        scales: &[f32],
        rotations: &[f32],
        colors: &[f32],
    ) -> Result<usize> {
        let count = rows_of("positions", positions, 3)?;
        check_rows("scales", scales, 3, count)?;
        check_rows("rotations", rotations, 4, count)?;
        check_rows("colors", colors, 4, count)?;

        scene.extend((0..count).map(|i| Gaussian {
            position: row(positions, i),
            scale: row(scales, i),
            rotation: row(rotations, i),
            color: row(colors, i),
        }));

        self.logger
            .debug(&format!("Added {} gaussians from attribute arrays", count));
        Ok(count)
    }

    pub fn positions(&self, scene: &GaussianScene) -> FlatArray {
        collect(scene, |g| &g.position)
    }

    pub fn scales(&self, scene: &GaussianScene) -> FlatArray {
        collect(scene, |g| &g.scale)
    }

    pub fn rotations(&self, scene: &GaussianScene) -> FlatArray {
        collect(scene, |g| &g.rotation)
    }

    pub fn colors(&self, scene: &GaussianScene) -> FlatArray {
        collect(scene, |g| &g.color)
    }
}

impl Default for TensorBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn rows_of(attribute: &'static str, data: &[f32], width: usize) -> Result<usize> {
    if data.len() % width != 0 {
        return Err(BuildifyError::ShapeMismatch {
            attribute,
            expected: data.len().div_ceil(width) * width,
            actual: data.len(),
        });
    }
    Ok(data.len() / width)
}

fn check_rows(attribute: &'static str, data: &[f32], width: usize, count: usize) -> Result<()> {
    if data.len() != count * width {
        return Err(BuildifyError::ShapeMismatch {
            attribute,
            expected: count * width,
            actual: data.len(),
        });
    }
    Ok(())
}

fn row<const N: usize>(data: &[f32], index: usize) -> [f32; N] {
    let mut out = [0.0; N];
    out.copy_from_slice(&data[index * N..(index + 1) * N]);
    out
}

fn collect<const N: usize>(
    scene: &GaussianScene,
    field: impl Fn(&Gaussian) -> &[f32; N],
) -> FlatArray {
    let data: Vec<f32> = scene.gaussians().iter().flat_map(|g| *field(g)).collect();
    FlatArray {
        data,
        shape: [scene.count(), N],
    }
}
