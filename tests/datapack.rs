use miniattach::prelude::*;
use miniattach::datapack::{
    multipack_from_stacked,
    for_attachment,
    select_window,
    groupings,
};


fn labels() -> Vec<String> {
    ["__UNK__", "UNRELATED", "ROOT", "elaboration"].iter()
        .map(|s| s.to_string())
        .collect()
}


/// A document of `n` EDUs in grouping `doc`, with a pairing from
/// the fake root to every EDU and between consecutive EDUs.
fn document(doc: &str, n: usize) -> DataPack {
    let root = Edu::fake_root();
    let edus = (1..=n)
        .map(|i| Edu::new(format!("{doc}_e{i}"), i * 10, i * 10 + 5).grouping(doc))
        .collect::<Vec<_>>();

    let mut pairings = Vec::new();
    let mut target = Vec::new();
    for (i, edu) in edus.iter().enumerate() {
        pairings.push(Pairing::new(root.clone(), edu.clone()));
        target.push(if i == 0 { 2 } else { 1 });
        if i + 1 < n {
            pairings.push(Pairing::new(edu.clone(), edus[i + 1].clone()));
            target.push(3);
        }
    }
    let m = pairings.len();
    let rows = (0..m).map(|i| vec![i as f64, 1.0]).collect::<Vec<_>>();
    let data = FeatureMatrix::from_dense(&rows).unwrap();

    let mut nodes = vec![root];
    nodes.extend(edus);
    DataPack::load(nodes, pairings, data, target, labels(), vec![]).unwrap()
}


fn weighted(dpack: &DataPack) -> DataPack {
    let attach = (0..dpack.len()).map(|i| i as f64 / 10.0).collect();
    dpack.set_graph(Graph::unlabelled(attach, dpack.labels().len())).unwrap()
}


#[cfg(test)]
pub mod datapack_tests {
    use super::*;

    #[test]
    fn selected_with_inverse_permutation() {
        let dpack = weighted(&document("d1", 4));
        let n = dpack.len();
        let perm = (0..n).rev().collect::<Vec<_>>();
        let mut inverse = vec![0; n];
        perm.iter().enumerate().for_each(|(i, &p)| { inverse[p] = i; });

        let back = dpack.selected(&perm).unwrap().selected(&inverse).unwrap();
        assert_eq!(back, dpack);
    }

    #[test]
    fn selected_keeps_rows_in_order() {
        let dpack = document("d1", 3);
        let sub = dpack.selected(&[2, 0]).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.pairings()[0], dpack.pairings()[2]);
        assert_eq!(sub.target(), &[dpack.target()[2], dpack.target()[0]]);
        assert_eq!(sub.data().row(0), dpack.data().row(2));
    }

    #[test]
    fn set_graph_checks_the_length() {
        let dpack = document("d1", 3);
        let res = dpack.set_graph(Graph::unlabelled(vec![0.5; 2], 4));
        assert!(matches!(res, Err(Error::ShapeMismatch(_))));
        assert!(dpack.graph().is_none());
    }

    #[test]
    fn vstack_then_split() {
        let d1 = weighted(&document("d1", 3));
        let d2 = weighted(&document("d2", 2));
        let stacked = DataPack::vstack(&[d1.clone(), d2.clone()]).unwrap();
        assert_eq!(stacked.len(), d1.len() + d2.len());
        assert_eq!(stacked.graph().unwrap().len(), stacked.len());

        let mpack = multipack_from_stacked(&stacked).unwrap();
        assert_eq!(mpack.keys().collect::<Vec<_>>(), vec!["d1", "d2"]);
        assert_eq!(mpack["d1"].pairings(), d1.pairings());
        assert_eq!(mpack["d2"].target(), d2.target());
    }

    #[test]
    fn vstack_rejects_other_labels() {
        let d1 = document("d1", 2);
        let root = Edu::fake_root();
        let e1 = Edu::new("x", 0, 1);
        let other = DataPack::load(
            vec![root.clone(), e1.clone()],
            vec![Pairing::new(root, e1)],
            FeatureMatrix::from_dense(&[[0.0, 1.0]]).unwrap(),
            vec![2],
            ["__UNK__", "UNRELATED", "ROOT"].map(String::from).to_vec(),
            vec![],
        ).unwrap();
        let res = DataPack::vstack(&[d1, other]);
        assert!(matches!(res, Err(Error::VocabularyMismatch(_))));
    }

    #[test]
    fn vstack_of_nothing() {
        assert!(matches!(DataPack::vstack(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn binary_view_for_attachment() {
        let dpack = document("d1", 3);
        let (binary, y) = for_attachment(&dpack).unwrap();
        assert_eq!(binary.labels(), &["__UNK__".to_string(), "UNRELATED".to_string()]);
        let expected = dpack.target()
            .iter()
            .map(|&t| if t == dpack.unrelated() { -1.0 } else { 1.0 })
            .collect::<Vec<_>>();
        assert_eq!(y, expected);
    }

    #[test]
    fn window_keeps_close_pairings() {
        let dpack = document("d1", 4);
        // Adjacent EDUs are at distance 0; the fake root is far away
        // from every EDU but the first.
        let close = select_window(&dpack, Some(0)).unwrap();
        assert!(close.pairings()
            .iter()
            .all(|p| !p.source().is_fake_root() || p.target().id() == "d1_e1"));
        let all = select_window(&dpack, None).unwrap();
        assert_eq!(all.len(), dpack.len());
    }

    #[test]
    fn groupings_of_a_stack() {
        let stacked = DataPack::vstack(&[document("a", 2), document("b", 3)]).unwrap();
        let groups = groupings(stacked.pairings()).unwrap();
        assert_eq!(groups["a"].len(), 3);
        assert_eq!(groups["b"].len(), 5);
    }
}
