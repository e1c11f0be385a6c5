//! # walker_alias
//!
//! Weighted random selection in O(1) per draw.
//!
//! This crate is a compact implementation of
//! [Walker’s Alias Method](https://en.wikipedia.org/wiki/Alias_method)
//! for sampling outcome indices from a fixed discrete distribution.
//!
//! There are two layers:
//!
//! 1. **The kernel**: [`AliasTable::new`] builds the table, and
//!    [`sampler::sample`] maps a batch of uniforms in `[0, 1)` to outcomes.
//!    Bring your own random numbers.
//! 2. **[`WalkerAlias`]**: a table pinned to a [`Device`] that generates the
//!    uniforms and runs the kernel there, returning an `ndarray` of any shape.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use walker_alias::WalkerAlias;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sampler = WalkerAlias::new(&[60.0, 30.0, 9.0, 1.0])?;
//!
//! let mut rng = rand::rng();
//! let batch = sampler.sample(&mut rng, &[16, 8])?; // ArrayD<i32>, shape [16, 8]
//! println!("{batch}");
//! # Ok(()) }
//! ```
//!
//! ## Performance
//! * **Build**: O(n log n) for the sort, O(n) for the sweep.
//! * **Sample**: O(1) per draw (1 random number, 1 branch, 1 gather).
//! * **Space**: `n` thresholds (f32) and `2n` outcomes (i32).
//!
//! ## Gotchas
//! * Weights must be **non-negative** and not all zero; `NaN`/∞ are rejected.
//! * This is for *fixed* distributions. If weights change, build a new table.
//! * With the `parallel` feature (default) [`ParallelDevice`] spreads a batch
//!   over the rayon pool. Draws are still pulled from your generator in order,
//!   so results match [`CpuDevice`] for the same seed.

mod device;
mod error;
pub mod sampler;
mod walker;

use std::sync::Arc;

use ndarray::{ArrayD, IxDyn, ShapeError};
use rand::Rng;

/// A minimal interface for “index samplers”: one outcome per call, drawing
/// from a caller-provided generator.
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

#[cfg(feature = "parallel")]
pub use device::ParallelDevice;
pub use device::{CpuDevice, Device};
pub use error::InvalidDistribution;
pub use walker::AliasTable;

/// An alias table resident on an execution [`Device`].
///
/// The table is immutable and shared: cloning a `WalkerAlias` or moving it to
/// another host device never copies the buffers.
#[derive(Debug, Clone)]
pub struct WalkerAlias<D: Device = CpuDevice> {
    table: Arc<AliasTable>,
    device: D,
}

impl WalkerAlias<CpuDevice> {
    /// Build a CPU-resident sampler from weights.
    ///
    /// # Errors
    /// See [`AliasTable::new`].
    pub fn new(weights: &[f32]) -> Result<Self, InvalidDistribution> {
        Self::with_device(weights, CpuDevice)
    }
}

impl<D: Device> WalkerAlias<D> {
    /// Build from weights and place the table on `device`.
    ///
    /// # Errors
    /// See [`AliasTable::new`].
    pub fn with_device(weights: &[f32], device: D) -> Result<Self, InvalidDistribution> {
        let table = Arc::new(AliasTable::new(weights)?);
        Ok(Self::from_table(table, device))
    }

    /// Place an already built table on `device`.
    pub fn from_table(table: Arc<AliasTable>, device: D) -> Self {
        let table = device.send(table);
        Self { table, device }
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Relocate to another device.
    pub fn to_device<E: Device>(self, device: E) -> WalkerAlias<E> {
        log::trace!(
            "moving alias table (n={}) from {} to {}",
            self.table.len(),
            self.device.name(),
            device.name()
        );
        WalkerAlias::from_table(self.table, device)
    }

    /// Draw a batch of outcomes shaped like `shape`.
    ///
    /// Uniforms come from `rng` through the device, then every element runs
    /// the alias kernel independently. An empty `shape` yields a 0-d array
    /// holding one draw.
    ///
    /// # Errors
    /// [`ShapeError`] if the element count of `shape` overflows `usize`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        shape: &[usize],
    ) -> Result<ArrayD<i32>, ShapeError> {
        let len = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ShapeError::from_kind(ndarray::ErrorKind::Overflow))?;
        let draws = self.device.uniform(rng, len);
        let out = self.sample_draws(&draws);
        ArrayD::from_shape_vec(IxDyn(shape), out)
    }

    /// Outcomes for caller-supplied uniforms, in the same order.
    pub fn sample_draws(&self, draws: &[f32]) -> Vec<i32> {
        sampler::sample_on(&self.device, &self.table, draws)
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty. Never true for a built table.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<D: Device> IndexSampler for WalkerAlias<D> {
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.table.sample_index(rng)
    }
}
