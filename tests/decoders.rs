use std::collections::HashSet;
use miniattach::prelude::*;


const LABELS: [&str; 5] = [
    "__UNK__", "UNRELATED", "ROOT", "elaboration", "narration"
];


fn labels() -> Vec<String> {
    LABELS.iter().map(|s| s.to_string()).collect()
}


fn edus(n: usize) -> Vec<Edu> {
    (1..=n)
        .map(|i| Edu::new(format!("e{i}"), i * 10, i * 10 + 5))
        .collect()
}


/// Every pairing from the fake root and between two distinct EDUs,
/// scored by `score(source position, target position)`.
fn complete_document<F>(n: usize, score: F) -> DataPack
    where F: Fn(usize, usize) -> f64
{
    let root = Edu::fake_root();
    let edus = edus(n);
    let mut nodes = vec![root.clone()];
    nodes.extend(edus.iter().cloned());

    let mut pairings = Vec::new();
    let mut attach = Vec::new();
    for (s, source) in nodes.iter().enumerate() {
        for (t, target) in nodes.iter().enumerate().skip(1) {
            if s == t { continue; }
            pairings.push(Pairing::new(source.clone(), target.clone()));
            attach.push(score(s, t));
        }
    }
    let m = pairings.len();
    let data = FeatureMatrix::from_dense(&vec![vec![1.0]; m]).unwrap();
    let dpack = DataPack::load(nodes, pairings, data, vec![1; m], labels(), vec![])
        .unwrap();
    dpack.set_graph(Graph::unlabelled(attach, LABELS.len())).unwrap()
}


/// Checks that `edges` form a tree over the `n` EDUs
/// rooted at the fake root.
fn assert_tree(edges: &[Edge], n: usize) {
    assert_eq!(edges.len(), n);
    let targets = edges.iter()
        .map(|e| e.target.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(targets.len(), n, "a node has several parents: {edges:?}");
    assert!(!targets.contains("ROOT"));

    for edge in edges {
        let mut node = edge.target.as_str();
        let mut steps = 0;
        while node != "ROOT" {
            node = edges.iter()
                .find(|e| e.target == node)
                .map(|e| e.source.as_str())
                .unwrap();
            steps += 1;
            assert!(steps <= n, "cycle through {}", edge.target);
        }
    }
}


#[cfg(test)]
pub mod local_tests {
    use super::*;

    fn three_pairings(attach: Vec<f64>) -> DataPack {
        let root = Edu::fake_root();
        let e = edus(2);
        let pairings = vec![
            Pairing::new(root.clone(), e[0].clone()),
            Pairing::new(root.clone(), e[1].clone()),
            Pairing::new(e[0].clone(), e[1].clone()),
        ];
        let data = FeatureMatrix::from_dense(&[[1.0], [1.0], [1.0]]).unwrap();
        let dpack = DataPack::load(
            vec![root, e[0].clone(), e[1].clone()],
            pairings,
            data,
            vec![2, 1, 3],
            labels(),
            vec![],
        ).unwrap();
        dpack.set_graph(Graph::unlabelled(attach, LABELS.len())).unwrap()
    }

    #[test]
    fn threshold_on_probabilities() {
        let dpack = three_pairings(vec![0.6, 0.4, 0.9]);
        let accepted = LocalDecoder::init().decode(&dpack).unwrap();
        let indices = accepted.iter().map(|a| a.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn threshold_is_strict() {
        let dpack = three_pairings(vec![0.5, 0.50001, 0.2]);
        let accepted = LocalDecoder::init().decode(&dpack).unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].index, 1);
    }

    #[test]
    fn raw_scores_accept_non_negative() {
        let dpack = three_pairings(vec![-0.1, 0.0, 2.0]);
        let accepted = LocalDecoder::init()
            .use_prob(false)
            .decode(&dpack)
            .unwrap();
        let indices = accepted.iter().map(|a| a.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn transform_rejects_the_others() {
        let dpack = three_pairings(vec![0.6, 0.4, 0.9]);
        let decoded = LocalDecoder::init().transform(&dpack).unwrap();
        let prediction = &decoded.graph().unwrap().prediction;
        assert_eq!(prediction[1], dpack.unrelated());
        assert_ne!(prediction[0], dpack.unrelated());
        assert_ne!(prediction[2], dpack.unrelated());
        assert_eq!(decoded.prediction_to_edges().unwrap().len(), 2);
    }

    #[test]
    fn no_graph_is_an_error() {
        let root = Edu::fake_root();
        let e1 = Edu::new("e1", 0, 4);
        let data = FeatureMatrix::from_dense(&[[1.0]]).unwrap();
        let dpack = DataPack::load(
            vec![root.clone(), e1.clone()],
            vec![Pairing::new(root, e1)],
            data,
            vec![2],
            labels(),
            vec![],
        ).unwrap();
        let res = LocalDecoder::init().decode(&dpack);
        assert_eq!(res, Err(Error::MissingGraph));
    }
}


#[cfg(test)]
pub mod last_tests {
    use super::*;

    #[test]
    fn chain_in_document_order() {
        // Scores favour anything but the chain.
        let dpack = complete_document(4, |s, t| if t == s + 1 { 0.1 } else { 0.9 });
        let edges = LastDecoder::init().decode_edges(&dpack).unwrap();
        let pairs = edges.iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![("ROOT", "e1"), ("e1", "e2"), ("e2", "e3"), ("e3", "e4")]
        );
    }

    #[test]
    fn missing_consecutive_pairing() {
        let root = Edu::fake_root();
        let e = edus(3);
        let pairings = vec![
            Pairing::new(root.clone(), e[0].clone()),
            Pairing::new(e[0].clone(), e[2].clone()),
            Pairing::new(root.clone(), e[1].clone()),
        ];
        let data = FeatureMatrix::from_dense(&[[1.0], [1.0], [1.0]]).unwrap();
        let dpack = DataPack::load(e.clone(), pairings, data, vec![2, 3, 2], labels(), vec![])
            .unwrap()
            .set_graph(Graph::unlabelled(vec![0.5; 3], LABELS.len()))
            .unwrap();

        let res = LastDecoder::init().decode(&dpack);
        assert_eq!(
            res,
            Err(Error::MissingPairing {
                source_edu: "e1".into(),
                target_edu: "e2".into(),
            })
        );
    }
}


#[cfg(test)]
pub mod greedy_tests {
    use super::*;

    #[test]
    fn greedy_returns_a_tree() {
        let scores = |s: usize, t: usize| ((s * 7 + t * 3) % 11) as f64 / 11.0;
        for n in 1..=6 {
            let dpack = complete_document(n, scores);
            let edges = GreedyDecoder::init().decode_edges(&dpack).unwrap();
            assert_tree(&edges, n);
        }
    }

    #[test]
    fn greedy_takes_the_best_edges_first() {
        // e1 -> e2 and e2 -> e1 are the two best edges;
        // the second would close a cycle.
        let dpack = complete_document(2, |s, t| match (s, t) {
            (1, 2) => 0.9,
            (2, 1) => 0.8,
            _ => 0.1,
        });
        let edges = GreedyDecoder::init().decode_edges(&dpack).unwrap();
        let pairs = edges.iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect::<HashSet<_>>();
        assert!(pairs.contains(&("e1", "e2")));
        assert!(pairs.contains(&("ROOT", "e1")));
    }

    #[test]
    fn decoded_labels_are_never_unrelated() {
        let dpack = complete_document(3, |s, t| (s + t) as f64);
        let edges = GreedyDecoder::init().decode_edges(&dpack).unwrap();
        assert!(edges.iter().all(|e| e.label != "UNRELATED"));
    }
}


#[cfg(test)]
pub mod config_tests {
    use super::*;

    #[test]
    fn every_decoder_from_json() {
        let dpack = complete_document(3, |s, t| if s + 1 == t { 0.9 } else { 0.2 });
        for name in ["local", "last", "greedy", "mst", "astar"] {
            let json = format!(r#"{{"decoder": "{name}"}}"#);
            let config = DecoderConfig::from_json_str(&json).unwrap();
            let decoder = config.build().unwrap();
            let edges = decoder.decode_edges(&dpack).unwrap();
            assert!(!edges.is_empty(), "{name} accepted nothing");
        }
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        let config = DecoderConfig {
            threshold: Some(f64::NAN),
            ..DecoderConfig::default()
        };
        assert!(matches!(config.build(), Err(Error::InvalidConfig(_))));
    }
}
