//! Execution targets for batch sampling.
//!
//! A [`Device`] supplies the pieces a batch draw needs from wherever its arrays
//! live: uniform generation, elementwise kernel launch (the kernel does the
//! scale, compare and gather), and relocation of a table onto the target. The
//! sampling kernel itself is written once in [`crate::sampler`].

use std::sync::Arc;

use rand::Rng;

use crate::walker::AliasTable;

/// An execution target that can host an alias table and run per-draw kernels.
pub trait Device: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Human-readable name.
    fn name(&self) -> String;

    /// `len` independent uniforms in `[0, 1)`.
    ///
    /// The default pulls them from `rng` in order, so every host device fed
    /// the same generator sees the same draws.
    fn uniform<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Vec<f32> {
        (0..len).map(|_| rng.random::<f32>()).collect()
    }

    /// `out[i] = kernel(draws[i])` for every `i`. `draws` and `out` have the
    /// same length.
    fn launch<F>(&self, draws: &[f32], out: &mut [i32], kernel: F)
    where
        F: Fn(f32) -> i32 + Send + Sync;

    /// Make `table` resident on this device.
    ///
    /// Host devices share the buffers as they are.
    fn send(&self, table: Arc<AliasTable>) -> Arc<AliasTable> {
        table
    }
}

/// The host CPU, one draw after another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuDevice;

impl Device for CpuDevice {
    fn name(&self) -> String {
        "cpu".to_string()
    }

    #[inline]
    fn launch<F>(&self, draws: &[f32], out: &mut [i32], kernel: F)
    where
        F: Fn(f32) -> i32 + Send + Sync,
    {
        for (o, &u) in out.iter_mut().zip(draws) {
            *o = kernel(u);
        }
    }
}

/// The host CPU, draws spread over the rayon global pool.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelDevice {
    min_len: usize,
}

#[cfg(feature = "parallel")]
impl ParallelDevice {
    pub const DEFAULT_MIN_LEN: usize = 4096;

    pub const fn new() -> Self {
        Self {
            min_len: Self::DEFAULT_MIN_LEN,
        }
    }

    /// Smallest number of draws handed to a single rayon task. Clamped to 1.
    pub const fn with_min_len(min_len: usize) -> Self {
        Self {
            min_len: if min_len == 0 { 1 } else { min_len },
        }
    }

    pub const fn min_len(&self) -> usize {
        self.min_len
    }
}

#[cfg(feature = "parallel")]
impl Default for ParallelDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "parallel")]
impl Device for ParallelDevice {
    fn name(&self) -> String {
        format!("cpu-parallel(threads={})", rayon::current_num_threads())
    }

    fn launch<F>(&self, draws: &[f32], out: &mut [i32], kernel: F)
    where
        F: Fn(f32) -> i32 + Send + Sync,
    {
        use rayon::prelude::*;

        out.par_iter_mut()
            .zip(draws.par_iter())
            .with_min_len(self.min_len)
            .for_each(|(o, &u)| *o = kernel(u));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn cpu_launch_is_elementwise() {
        let draws = [0.0, 0.5, 0.25];
        let mut out = [0; 3];
        CpuDevice.launch(&draws, &mut out, |u| (u * 100.0) as i32);
        assert_eq!(out, [0, 50, 25]);
    }

    #[test]
    fn uniform_is_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = CpuDevice.uniform(&mut rng, 10_000);
        assert_eq!(draws.len(), 10_000);
        assert!(draws.iter().all(|u| (0.0..1.0).contains(u)));
    }

    #[test]
    fn send_keeps_host_buffers() {
        let table = Arc::new(AliasTable::new(&[1.0, 2.0]).unwrap());
        let moved = CpuDevice.send(Arc::clone(&table));
        assert!(Arc::ptr_eq(&table, &moved));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_launch_matches_cpu() {
        let mut rng = StdRng::seed_from_u64(11);
        let draws = CpuDevice.uniform(&mut rng, 50_000);
        let kernel = |u: f32| (u * 1000.0) as i32;

        let mut seq = vec![0; draws.len()];
        CpuDevice.launch(&draws, &mut seq, kernel);
        let mut par = vec![0; draws.len()];
        ParallelDevice::with_min_len(64).launch(&draws, &mut par, kernel);

        assert_eq!(seq, par);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn zero_min_len_is_clamped() {
        assert_eq!(ParallelDevice::with_min_len(0).min_len(), 1);
        assert_eq!(ParallelDevice::default().min_len(), 4096);
    }
}
