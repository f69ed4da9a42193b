//! Weighted prize draw over an immutable catalog snapshot.

use rand::Rng;
use scratchwin_core::Prize;

/// Sum of weights, as the draw sees it
pub fn total_weight(catalog: &[Prize]) -> f64 {
    catalog.iter().map(|p| f64::from(p.probability)).sum()
}

/// Draw one prize. An empty catalog yields the sentinel prize.
pub fn select<R: Rng>(catalog: &[Prize], rng: &mut R) -> Prize {
    let unit: f64 = rng.random();
    let r = unit * total_weight(catalog);

    match pick(catalog, r) {
        Some(prize) => {
            tracing::debug!("Drew prize {} ('{}') at r={:.3}", prize.id, prize.title, r);
            prize.clone()
        }
        None => {
            tracing::debug!("Catalog is empty, returning sentinel prize");
            Prize::sentinel()
        }
    }
}

/// Walk the cumulative weights and return the first prize whose running sum
/// reaches `r`. When nothing does, the first prize is returned.
/// `None` only for an empty catalog.
pub fn pick(catalog: &[Prize], r: f64) -> Option<&Prize> {
    let mut acc = 0.0;
    for prize in catalog {
        acc += f64::from(prize.probability);
        if r <= acc {
            return Some(prize);
        }
    }

    catalog.first()
}
