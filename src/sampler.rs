use rand::Rng;

use crate::{IndexSampler, device::Device, walker::AliasTable};

/// Map one uniform draw to an outcome.
///
/// `u` is expected in `[0, 1)`. A draw that scales to slot `n` or beyond
/// (a generator returning exactly 1.0, or `u * n` rounding up) lands in slot
/// 0, as do negative and `NaN` draws, so the result is always in `0..n`.
#[inline]
pub fn sample_one(table: &AliasTable, u: f32) -> i32 {
    let n = table.len();
    let pb = u * n as f32;
    // saturating cast: negative and NaN become 0
    let mut index = pb as usize;
    if index >= n {
        index = 0;
    }
    let high = table.threshold()[index] < pb - index as f32;
    table.values()[2 * index + usize::from(high)]
}

/// Outcomes for a batch of uniform draws, one per draw.
pub fn sample(table: &AliasTable, draws: &[f32]) -> Vec<i32> {
    let mut out = vec![0; draws.len()];
    sample_into(table, draws, &mut out);
    out
}

/// Like [`sample`], writing into `out`.
///
/// # Panics
/// If `draws` and `out` differ in length.
pub fn sample_into(table: &AliasTable, draws: &[f32], out: &mut [i32]) {
    assert_eq!(draws.len(), out.len(), "draws and output differ in length");
    for (o, &u) in out.iter_mut().zip(draws) {
        *o = sample_one(table, u);
    }
}

/// [`sample`] run as a kernel on `device`.
pub fn sample_on<D: Device>(device: &D, table: &AliasTable, draws: &[f32]) -> Vec<i32> {
    let mut out = vec![0; draws.len()];
    log::trace!("launching {} draws on {}", draws.len(), device.name());
    device.launch(draws, &mut out, |u| sample_one(table, u));
    out
}

/// `AliasTable` is the weighted sampler; wire it into the trait.
impl IndexSampler for AliasTable {
    #[inline]
    fn len(&self) -> usize {
        // call the inherent method explicitly to avoid trait-recursion
        AliasTable::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        sample_one(self, rng.random::<f32>()) as usize
    }
}
