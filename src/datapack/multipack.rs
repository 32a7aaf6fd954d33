use std::collections::BTreeMap;

use crate::error::Result;
use super::datapack_struct::DataPack;
use super::selection::{groupings, pairing_distances};


/// A mapping from groupings (documents) to single document datapacks.
pub type Multipack = BTreeMap<String, DataPack>;


/// Split a stacked datapack into one datapack per grouping.
/// A pairing whose EDUs disagree on their grouping is an error.
pub fn multipack_from_stacked(dpack: &DataPack) -> Result<Multipack> {
    groupings(dpack.pairings())?
        .into_iter()
        .map(|(grouping, indices)| {
            let sub = dpack.selected(&indices)?;
            Ok((grouping, sub))
        })
        .collect()
}


/// For each target label in the multipack, the maximal left and
/// right pairing distances over all of its datapacks.
pub fn mpack_pairing_distances(mpack: &Multipack)
    -> BTreeMap<usize, (usize, usize)>
{
    let mut distances = BTreeMap::<usize, (usize, usize)>::new();
    for dpack in mpack.values() {
        for (label, (left, right)) in pairing_distances(dpack) {
            let entry = distances.entry(label).or_insert((0, 0));
            entry.0 = entry.0.max(left);
            entry.1 = entry.1.max(right);
        }
    }
    distances
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::{UNKNOWN, UNRELATED};
    use crate::datapack::{Edu, Pairing, FeatureMatrix};

    fn doc(name: &str, n: usize) -> DataPack {
        let root = Edu::fake_root();
        let edus = (0..n)
            .map(|i| Edu::new(format!("{name}_{i}"), 10 * i, 10 * i + 5).grouping(name))
            .collect::<Vec<_>>();
        let mut pairings = edus.iter()
            .map(|e| Pairing::new(root.clone(), e.clone()))
            .collect::<Vec<_>>();
        pairings.extend(
            edus.windows(2).map(|w| Pairing::new(w[1].clone(), w[0].clone()))
        );
        let rows = vec![vec![1.0]; pairings.len()];
        let target = vec![2; pairings.len()];
        let labels = [UNKNOWN, UNRELATED, "Elaboration"]
            .iter().map(|s| s.to_string()).collect();
        DataPack::load(
            edus,
            pairings,
            FeatureMatrix::from_dense(&rows).unwrap(),
            target,
            labels,
            vec![],
        ).unwrap()
    }

    #[test]
    fn test_split_stacked() {
        let stacked = DataPack::vstack(&[doc("a", 2), doc("b", 3)]).unwrap();
        let mpack = multipack_from_stacked(&stacked).unwrap();
        assert_eq!(mpack.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(mpack["a"].len(), 3);
        assert_eq!(mpack["b"].len(), 5);
        assert_eq!(mpack["b"].edus().len(), 3);
    }

    #[test]
    fn test_distances_take_the_maximum() {
        let mut mpack = Multipack::new();
        mpack.insert("a".into(), doc("a", 2));
        mpack.insert("b".into(), doc("b", 4));
        let dist = mpack_pairing_distances(&mpack);
        assert_eq!(dist[&2], (0, 3));
    }
}
