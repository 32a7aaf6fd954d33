use miniattach::prelude::*;


const LABELS: [&str; 5] = [
    "__UNK__", "UNRELATED", "ROOT", "elaboration", "narration"
];


fn document(graph: impl FnOnce(usize) -> Graph) -> DataPack {
    let root = Edu::fake_root();
    let e1 = Edu::new("e1", 0, 4);
    let e2 = Edu::new("e2", 5, 9);
    let pairings = vec![
        Pairing::new(root.clone(), e1.clone()),
        Pairing::new(root.clone(), e2.clone()),
        Pairing::new(e1.clone(), e2.clone()),
    ];
    let data = FeatureMatrix::from_dense(&[[1.0], [1.0], [1.0]]).unwrap();
    let labels = LABELS.iter().map(|s| s.to_string()).collect();
    DataPack::load(vec![root, e1, e2], pairings, data, vec![2, 1, 4], labels, vec![])
        .unwrap()
        .set_graph(graph(LABELS.len()))
        .unwrap()
}


fn decoded() -> DataPack {
    let dpack = document(|n| Graph::unlabelled(vec![0.9, 0.2, 0.8], n));
    MstDecoder::init().transform(&dpack).unwrap()
}


fn keyed_scores() -> KeyedLabelScores {
    let mut scores = KeyedLabelScores::new();
    scores.insert("ROOT", "e1", vec![0.0, 0.0, 0.9, 0.05, 0.05]);
    scores.insert("ROOT", "e2", vec![0.0, 0.2, 0.6, 0.1, 0.1]);
    scores.insert("e1", "e2", vec![0.0, 0.1, 0.0, 0.3, 0.6]);
    scores
}


#[cfg(test)]
pub mod labeller_tests {
    use super::*;

    #[test]
    fn post_labelling_from_a_classifier() {
        let edges = SimpleLabeller::init()
            .label_with(&decoded(), &keyed_scores())
            .unwrap();
        assert_eq!(
            edges,
            vec![
                Edge::new("ROOT", "e1", "ROOT"),
                Edge::new("e1", "e2", "narration"),
            ]
        );
    }

    #[test]
    fn rejected_edges_stay_rejected() {
        let dpack = SimpleLabeller::multiply(&decoded(), &keyed_scores()).unwrap();
        let labelled = SimpleLabeller::init().transform(&dpack).unwrap();
        let prediction = &labelled.graph().unwrap().prediction;
        assert_eq!(prediction[1], labelled.unrelated());
    }

    #[test]
    fn fused_mode_keeps_the_decoded_labels() {
        let dpack = SimpleLabeller::multiply(&decoded(), &keyed_scores()).unwrap();
        let edges = SimpleLabeller::init()
            .mode(LabelMode::Fused)
            .label(&dpack)
            .unwrap();
        assert!(edges.iter().all(|e| e.label == "__UNK__"));
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn missing_pair_is_reported() {
        let mut scores = KeyedLabelScores::new();
        scores.insert("ROOT", "e1", vec![0.0, 0.0, 0.9, 0.05, 0.05]);
        let res = SimpleLabeller::init().label_with(&decoded(), &scores);
        let Err(Error::LabelMismatch(msg)) = &res else {
            panic!("expected a label mismatch, got {res:?}");
        };
        assert!(msg.contains("ROOT -> e2"));
    }

    #[test]
    fn wrong_number_of_labels() {
        let mut scores = keyed_scores();
        scores.insert("e1", "e2", vec![0.5, 0.5]);
        let res = SimpleLabeller::multiply(&decoded(), &scores);
        assert!(matches!(res, Err(Error::LabelMismatch(_))));
    }

    #[test]
    fn scored_rows_are_multiplied() {
        let dpack = document(|_| Graph::new(
            vec![0; 3],
            vec![0.9, 0.2, 0.8],
            vec![vec![0.1, 0.1, 0.1, 0.5, 0.2]; 3],
        ));
        let mut scores = KeyedLabelScores::new();
        for (s, t) in [("ROOT", "e1"), ("ROOT", "e2"), ("e1", "e2")] {
            scores.insert(s, t, vec![1.0, 1.0, 1.0, 0.1, 1.0]);
        }
        let multiplied = SimpleLabeller::multiply(&dpack, &scores).unwrap();
        let row = &multiplied.graph().unwrap().label[2];
        assert!((row[3] - 0.05).abs() < 1e-12);
        assert_eq!(multiplied.graph().unwrap().best_label(2), 4);
    }

    #[test]
    fn label_rows_match_the_vocabulary() {
        let dpack = decoded();
        let graph = dpack.graph().unwrap().clone();
        let narrow = graph.clone().with_label(vec![vec![0.5, 0.5]; 3]);
        assert!(matches!(dpack.set_graph(narrow), Err(Error::ShapeMismatch(_))));
        let short = graph.with_label(vec![vec![0.2; LABELS.len()]; 2]);
        assert!(matches!(dpack.set_graph(short), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn labelling_needs_a_graph() {
        let root = Edu::fake_root();
        let e1 = Edu::new("e1", 0, 4);
        let labels = LABELS.iter().map(|s| s.to_string()).collect();
        let dpack = DataPack::load(
            vec![root.clone(), e1.clone()],
            vec![Pairing::new(root, e1)],
            FeatureMatrix::from_dense(&[[1.0]]).unwrap(),
            vec![2],
            labels,
            vec![],
        ).unwrap();
        assert_eq!(SimpleLabeller::init().label(&dpack), Err(Error::MissingGraph));
    }
}
