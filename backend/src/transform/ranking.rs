//! Brand ordering of normalized studies.
//!
//! Each study is paired with its brand rank in a side list, the list is
//! stable-sorted, and the ranks are dropped again. The rank never becomes
//! part of the [`Study`] shape.
//!
//! ```text
//! [Taltz, ILUMYA, Other]  →  [(Taltz, 999), (ILUMYA, 1), (Other, 999)]
//!                         →  [(ILUMYA, 1), (Taltz, 999), (Other, 999)]
//!                         →  [ILUMYA, Taltz, Other]
//! ```

use crate::models::{BrandSortMap, Study};

/// Order studies by brand rank, keeping row order among equal ranks.
pub fn sort_by_brand_rank(studies: Vec<Study>, ranks: &BrandSortMap) -> Vec<Study> {
    let mut ranked: Vec<(Study, f64)> = studies
        .into_iter()
        .map(|study| {
            let rank = ranks.rank_of(&study.brand);
            (study, rank)
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    ranked.into_iter().map(|(study, _)| study).collect()
}
