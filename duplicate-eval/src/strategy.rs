//! Strategy Oracle (spec.md §4.4) and the `Buckets`/`CFRValues` external
//! collaborators (spec.md §6) it is built from.
//!
//! spec.md places the real card-abstraction bucket files and persisted CFR
//! regret files out of scope. `TableBuckets`/`NoAbstractionBuckets` and
//! `TableCfrValues` are the concrete, from-a-small-file stand-ins, grounded
//! on the regret-matching computation in `Node::to_strategy` /
//! `regret_matching` (`cfr/src/lib.rs`, `cfr/src/solvers/cfr/node.rs`), and
//! on `explot/src/main.rs`'s use of `serde_json` for the on-disk format.

use std::{
    collections::HashMap,
    path::Path,
};

use crate::error::{
    Error,
    Result,
};
use crate::game::Street;

pub trait Buckets {
    /// Whether street `st` uses no abstraction (the caller then indexes by
    /// raw or sorted HCP instead of a bucket id).
    fn none(&self, st: Street) -> bool;

    /// Maps a `(street, board * num_hole_card_pairs + raw_hcp)` composite
    /// index to a bucket id.
    fn bucket(&self, st: Street, composite_index: usize) -> usize;
}

#[derive(Debug, Default)]
pub struct NoAbstractionBuckets;

impl Buckets for NoAbstractionBuckets {
    fn none(&self, _st: Street) -> bool {
        true
    }

    fn bucket(&self, _st: Street, composite_index: usize) -> usize {
        composite_index
    }
}

#[derive(Debug, Default)]
pub struct TableBuckets {
    table: HashMap<(Street, usize), usize>,
}

impl TableBuckets {
    pub fn new(table: HashMap<(Street, usize), usize>) -> Self {
        TableBuckets {
            table,
        }
    }
}

impl Buckets for TableBuckets {
    fn none(&self, _st: Street) -> bool {
        false
    }

    fn bucket(&self, st: Street, composite_index: usize) -> usize {
        self.table[&(st, composite_index)]
    }
}

/// The offset computation of spec.md §4.4, performed by the Tree Walker and
/// passed into the oracle.
pub fn offset(
    buckets: &dyn Buckets,
    st: Street,
    bd: usize,
    num_hole_card_pairs: usize,
    raw_hcp: usize,
    sorted_hcp: Option<usize>,
    k: usize,
) -> usize {
    if buckets.none(st) {
        let hcp = sorted_hcp.unwrap_or(raw_hcp);
        bd * num_hole_card_pairs * k + hcp * k
    } else {
        let composite = bd * num_hole_card_pairs + raw_hcp;
        buckets.bucket(st, composite) * k
    }
}

pub trait CfrValues {
    /// Regret matching over the `k` stored regrets at `(nt, offset)`:
    /// `p_i = max(0, r_i) / sum(max(0, r_j))`, or all mass on `dsi` if every
    /// regret is `<= 0`. `pa` is accepted for parity with spec.md §6's
    /// `RMProbs` signature though this store does not key by player.
    fn rm_probs(&self, st: Street, pa: usize, nt: u32, offset: usize, k: usize, dsi: usize) -> Result<Vec<f64>>;
}

#[derive(Debug, Default)]
pub struct TableCfrValues {
    /// `regrets[nt]` is a flat vector covering every `(offset, k)` slice
    /// used at that nonterminal.
    regrets: HashMap<u32, Vec<f64>>,
}

impl TableCfrValues {
    /// `CFRValues::Read(dir, it, tree, discriminator, ...)` (spec.md §6):
    /// loads `<dir>/<it>.<discriminator>.json`, a flat JSON object mapping
    /// the string form of each nonterminal id to its regret vector.
    pub fn read(dir: &Path, it: i32, discriminator: &str) -> Result<Self> {
        let path = dir.join(format!("{}.{}.json", it, discriminator));
        let text = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("failed to read cfr values {}: {}", path.display(), e)))?;
        let raw: HashMap<String, Vec<f64>> = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("malformed cfr values {}: {}", path.display(), e)))?;
        let mut regrets = HashMap::with_capacity(raw.len());
        for (k, v) in raw {
            let nt: u32 = k
                .parse()
                .map_err(|_| Error::Config(format!("non-integer nonterminal id key {:?} in {}", k, path.display())))?;
            regrets.insert(nt, v);
        }
        Ok(TableCfrValues {
            regrets,
        })
    }

    pub fn from_regrets(regrets: HashMap<u32, Vec<f64>>) -> Self {
        TableCfrValues {
            regrets,
        }
    }
}

impl CfrValues for TableCfrValues {
    fn rm_probs(&self, _st: Street, _pa: usize, nt: u32, offset: usize, k: usize, dsi: usize) -> Result<Vec<f64>> {
        let stored = self
            .regrets
            .get(&nt)
            .ok_or_else(|| Error::Config(format!("no stored regrets for nonterminal {}", nt)))?;
        if offset + k > stored.len() {
            return Err(Error::Config(format!(
                "regret slice [{}, {}) out of bounds for nonterminal {} (len {})",
                offset,
                offset + k,
                nt,
                stored.len()
            )));
        }
        let slice = &stored[offset..offset + k];
        let positive_sum: f64 = slice.iter().map(|r| r.max(0.0)).sum();
        let mut probs = vec![0.0; k];
        if positive_sum > 0.0 {
            for (i, r) in slice.iter().enumerate() {
                probs[i] = r.max(0.0) / positive_sum;
            }
        } else {
            probs[dsi] = 1.0;
        }
        Ok(probs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rm_probs_normalizes_positive_regrets() {
        let mut regrets = HashMap::new();
        regrets.insert(7u32, vec![1.0, 3.0, 0.0]);
        let values = TableCfrValues::from_regrets(regrets);
        let probs = values.rm_probs(0, 0, 7, 0, 3, 0).unwrap();
        assert!((probs[0] - 0.25).abs() < 1e-9);
        assert!((probs[1] - 0.75).abs() < 1e-9);
        assert_eq!(probs[2], 0.0);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rm_probs_falls_back_to_default_when_all_regrets_are_non_positive() {
        let mut regrets = HashMap::new();
        regrets.insert(1u32, vec![-1.0, 0.0, -2.0]);
        let values = TableCfrValues::from_regrets(regrets);
        let probs = values.rm_probs(0, 0, 1, 0, 3, 1).unwrap();
        assert_eq!(probs, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn offset_uses_bucket_when_abstraction_present() {
        let mut table = HashMap::new();
        table.insert((1u8, 5usize), 42usize);
        let buckets = TableBuckets::new(table);
        assert_eq!(offset(&buckets, 1, 2, 3, 2, None, 4), 42 * 4);
    }

    #[test]
    fn offset_uses_sorted_hcp_when_no_abstraction_on_the_river() {
        let buckets = NoAbstractionBuckets;
        assert_eq!(offset(&buckets, 3, 1, 10, 7, Some(2), 4), 1 * 10 * 4 + 2 * 4);
    }
}
