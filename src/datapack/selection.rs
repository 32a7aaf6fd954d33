//! Row selections and task views of a datapack.
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::common::constants::{UNKNOWN, UNRELATED};
use super::edu::Pairing;
use super::datapack_struct::DataPack;


/// Given a list of EDU pairings, return a map from grouping names
/// to the rows of the pairings in that grouping.
///
/// An EDU without grouping (the fake root) adopts the grouping of
/// the other EDU. Pairings where neither EDU has a grouping are
/// filed under the empty name `""`.
pub fn groupings(pairings: &[Pairing]) -> Result<BTreeMap<String, Vec<usize>>> {
    let mut res = BTreeMap::<String, Vec<usize>>::new();
    for (i, pairing) in pairings.iter().enumerate() {
        let (edu1, edu2) = (pairing.source(), pairing.target());
        let grouping = match (edu1.grouping_name(), edu2.grouping_name()) {
            (Some(g1), Some(g2)) if g1 != g2 => {
                return Err(Error::GroupingConflict {
                    source_edu: edu1.id().to_string(),
                    source_group: g1.to_string(),
                    target_edu: edu2.id().to_string(),
                    target_group: g2.to_string(),
                });
            },
            (Some(g), _) | (None, Some(g)) => g,
            (None, None) => "",
        };
        res.entry(grouping.to_string()).or_default().push(i);
    }
    Ok(res)
}


/// Return only the pairings whose target is not `UNRELATED`.
pub fn attached_only(dpack: &DataPack) -> Result<DataPack> {
    let unrelated = dpack.unrelated();
    let indices = dpack.target().iter()
        .enumerate()
        .filter_map(|(i, &y)| (y != unrelated).then_some(i))
        .collect::<Vec<_>>();
    dpack.selected(&indices)
}


/// Adapt a datapack to the attachment task.
///
/// The returned datapack has the label vocabulary
/// `[UNKNOWN, UNRELATED]`: attached pairings get `UNKNOWN` and the
/// others `UNRELATED`. The second value holds the binary targets,
/// `+1` for attached and `-1` for unrelated pairings.
pub fn for_attachment(dpack: &DataPack) -> Result<(DataPack, Vec<f64>)> {
    let unrelated = dpack.unrelated();
    let (target, binary) = dpack.target().iter()
        .map(|&y| if y == unrelated { (1, -1f64) } else { (0, 1f64) })
        .unzip::<_, _, Vec<usize>, Vec<f64>>();
    let labels = vec![UNKNOWN.to_string(), UNRELATED.to_string()];

    let dpack = dpack.with_target(target, labels)?;
    Ok((dpack, binary))
}


/// Rows of the pairings that leave the fake root.
pub fn idxes_fakeroot(dpack: &DataPack) -> Vec<usize> {
    dpack.pairings().iter()
        .enumerate()
        .filter_map(|(i, p)| p.source().is_fake_root().then_some(i))
        .collect()
}


/// Rows of the pairings between EDUs of the same sentence
/// (subgrouping). Pairings from the fake root are included
/// only when `include_fake_root` is set.
pub fn idxes_intra(dpack: &DataPack, include_fake_root: bool) -> Vec<usize> {
    idxes_by(dpack, include_fake_root, |p| {
        p.source().grouping_name() == p.target().grouping_name()
            && p.source().subgrouping_name() == p.target().subgrouping_name()
    })
}


/// Rows of the pairings between EDUs of different sentences.
/// Pairings from the fake root are included
/// only when `include_fake_root` is set.
pub fn idxes_inter(dpack: &DataPack, include_fake_root: bool) -> Vec<usize> {
    idxes_by(dpack, include_fake_root, |p| {
        p.source().grouping_name() != p.target().grouping_name()
            || p.source().subgrouping_name() != p.target().subgrouping_name()
    })
}


fn idxes_by<F>(dpack: &DataPack, include_fake_root: bool, keep: F)
    -> Vec<usize>
    where F: Fn(&Pairing) -> bool
{
    dpack.pairings().iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let ok = if p.source().is_fake_root() {
                include_fake_root
            } else {
                keep(p)
            };
            ok.then_some(i)
        })
        .collect()
}


/// Select only the pairings that are at most `window` EDUs apart
/// (adjacent EDUs are `0` apart). `None` keeps every pairing.
///
/// Only meaningful for single document datapacks.
pub fn select_window(dpack: &DataPack, window: Option<usize>) -> Result<DataPack> {
    let Some(window) = window else {
        return Ok(dpack.clone());
    };
    let position = dpack.edu_positions();
    let indices = dpack.pairings().iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let gap = position[p.target().id()]
                .abs_diff(position[p.source().id()]);
            (gap.saturating_sub(1) <= window).then_some(i)
        })
        .collect::<Vec<_>>();
    dpack.selected(&indices)
}


/// For each target label of the datapack, the maximal left and right
/// distances (in EDUs; adjacent EDUs are `0` apart) of its pairings.
///
/// Only meaningful for single document datapacks.
pub fn pairing_distances(dpack: &DataPack) -> BTreeMap<usize, (usize, usize)> {
    let position = dpack.edu_positions();
    let mut distances = BTreeMap::<usize, (usize, usize)>::new();
    for (p, &label) in dpack.pairings().iter().zip(dpack.target()) {
        let src = position[p.source().id()];
        let tgt = position[p.target().id()];
        let entry = distances.entry(label).or_insert((0, 0));
        if tgt < src {
            entry.0 = entry.0.max(src - tgt - 1);
        } else {
            entry.1 = entry.1.max(tgt.saturating_sub(src).saturating_sub(1));
        }
    }
    distances
}
