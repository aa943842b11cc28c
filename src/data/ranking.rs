use std::collections::BTreeMap;

use super::model::{CountryRanks, Resort};

/// Rank `values` so the largest gets 1.0. Tied values share the mean of the
/// positions they occupy, so `[5, 7, 7]` ranks as `[3.0, 1.5, 1.5]`.
pub fn rank_descending(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end are tied; their 1-based ranks are start+1..=end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}

/// Compute the four per-country ranks for every resort.
///
/// The result is parallel to `resorts`. Rows are grouped by country and each
/// metric is ranked independently within its group.
pub fn compute_ranks(resorts: &[Resort]) -> Vec<CountryRanks> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, resort) in resorts.iter().enumerate() {
        groups.entry(resort.country.as_str()).or_default().push(i);
    }

    let mut ranks = vec![CountryRanks::default(); resorts.len()];
    for members in groups.values() {
        let elevation = rank_group(resorts, members, |r| r.highest_point);
        let price = rank_group(resorts, members, |r| r.price);
        let slopes = rank_group(resorts, members, |r| r.total_slopes);
        let cannons = rank_group(resorts, members, |r| r.snow_cannons);

        for (k, &i) in members.iter().enumerate() {
            ranks[i] = CountryRanks {
                elevation: elevation[k],
                price: price[k],
                slopes: slopes[k],
                cannons: cannons[k],
            };
        }
    }
    ranks
}

fn rank_group(resorts: &[Resort], members: &[usize], key: impl Fn(&Resort) -> f64) -> Vec<f64> {
    let values: Vec<f64> = members.iter().map(|&i| key(&resorts[i])).collect();
    rank_descending(&values)
}
