//! Parallel LUT baking.
//!
//! A 3D bake splits the cube into one job per blue slice. Slices are
//! disjoint `&mut` chunks of the same buffer, so workers never need a lock;
//! the parallel iterator returns once every slice is written. Packing into
//! 10-10-10-2 happens after that join.
//!
//! ```text
//! cells: [ slice b=0 | slice b=1 | ... | slice b=dim-1 ]
//!          dim*dim     dim*dim           dim*dim
//!          (r fastest, then g)
//! ```

use std::sync::Arc;
use std::time::Instant;

use grade_color::{ColorGradingPipeline, GradingParameters, LUT_1D_SIZE, LutFormat};
use half::f16;
use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{LutError, LutResult};
use crate::grid::{LutData, LutGrid, LutKind, slice_range};
use crate::quantize::pack_1010102;

/// Bakes the LUT for one set of grading parameters.
#[derive(Debug, Clone)]
pub struct LutBaker {
    pipeline: ColorGradingPipeline,
    pool: Option<Arc<ThreadPool>>,
}

impl LutBaker {
    /// Resolves the pipeline for `params`. Work runs on the global rayon pool.
    pub fn new(params: &GradingParameters) -> Self {
        Self {
            pipeline: ColorGradingPipeline::new(params),
            pool: None,
        }
    }

    /// Runs bakes on a dedicated pool instead of the global one.
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// The evaluation pipeline.
    pub fn pipeline(&self) -> &ColorGradingPipeline {
        &self.pipeline
    }

    /// Curve or cube.
    pub fn kind(&self) -> LutKind {
        if self.pipeline.is_one_dimensional() {
            LutKind::OneDimensional
        } else {
            LutKind::ThreeDimensional
        }
    }

    /// Entries of a 1D LUT, or the edge length of a 3D LUT.
    pub fn dimension(&self) -> usize {
        self.pipeline.lut_dimension()
    }

    /// Bakes the whole LUT.
    pub fn bake(&self) -> LutGrid {
        let start = Instant::now();
        let dim = self.dimension();
        let kind = self.kind();

        let data = match kind {
            LutKind::OneDimensional => LutData::Half1d(self.bake_1d()),
            LutKind::ThreeDimensional => {
                let mut cells = vec![[f16::ZERO; 4]; dim * dim * dim];
                self.fill_cube(&mut cells, dim);
                match self.pipeline.parameters().format {
                    LutFormat::Float => LutData::Half4(cells),
                    LutFormat::Integer => LutData::Packed(self.install(|| pack_cells(&cells))),
                }
            }
        };

        debug!(
            ?kind,
            dimension = dim,
            texels = data.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Baked LUT"
        );
        LutGrid::new(dim, kind, data)
    }

    /// Fills a caller-provided 3D buffer of `dim³` half4 cells.
    ///
    /// Every cell is written exactly once; alpha is set to zero.
    pub fn bake_slices(&self, cells: &mut [[f16; 4]]) -> LutResult<()> {
        if self.pipeline.is_one_dimensional() {
            return Err(LutError::InvalidSize(
                "parameters need a 1D LUT, not a cube".into(),
            ));
        }
        let dim = self.dimension();
        if cells.len() != dim * dim * dim {
            return Err(LutError::InvalidSize(format!(
                "{} cells for a {dim}^3 cube",
                cells.len()
            )));
        }
        self.fill_cube(cells, dim);
        Ok(())
    }

    /// Bakes the 1D curve.
    pub fn bake_1d(&self) -> Vec<f16> {
        let last = (LUT_1D_SIZE - 1) as f32;
        self.install(|| {
            (0..LUT_1D_SIZE)
                .into_par_iter()
                .map(|i| f16::from_f32(self.pipeline.evaluate_1d(i as f32 / last)))
                .collect()
        })
    }

    fn fill_cube(&self, cells: &mut [[f16; 4]], dim: usize) {
        let pipeline = &self.pipeline;
        self.install(|| {
            cells
                .par_chunks_mut(dim * dim)
                .enumerate()
                .for_each(|(b, slice)| {
                    trace!(slice = b, range = ?slice_range(b, dim), "Baking slice");
                    bake_slice(pipeline, slice, b, dim);
                });
        });
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Writes blue slice `b` of a cube of edge `dim`.
fn bake_slice(pipeline: &ColorGradingPipeline, slice: &mut [[f16; 4]], b: usize, dim: usize) {
    for g in 0..dim {
        for r in 0..dim {
            let c = pipeline.evaluate_cell(r, g, b, dim);
            slice[r + g * dim] = [f16::from_f32(c.x), f16::from_f32(c.y), f16::from_f32(c.z), f16::ZERO];
        }
    }
}

fn pack_cells(cells: &[[f16; 4]]) -> Vec<u32> {
    cells
        .par_iter()
        .map(|c| pack_1010102([c[0].to_f32(), c[1].to_f32(), c[2].to_f32()]))
        .collect()
}
