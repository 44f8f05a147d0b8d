use melosync::features::{
    FEATURE_WIDTH, KEY_CARDINALITY, NUMERIC_FEATURES, build_feature_matrix,
};
use melosync::types::{AudioFeatures, BeatStats, SegmentStats, TrackInfo};

// Helper function to create a test track with a given key and tempo;
// every other feature gets a fixed value so single columns can be varied
fn create_test_track(id: &str, key: i64, tempo: f64) -> TrackInfo {
    TrackInfo {
        id: id.to_string(),
        name: format!("{}_name", id),
        artists: vec!["Test Artist".to_string()],
        genre: Some("pop".to_string()),
        popularity: 60.0,
        duration_ms: 210_000.0,
        features: AudioFeatures {
            tempo,
            key,
            mode: 1,
            key_confidence: 0.8,
            energy: 0.7,
            danceability: 0.6,
            valence: 0.5,
            instrumentalness: 0.1,
            acousticness: 0.2,
            loudness: -7.0,
            segments: SegmentStats {
                count: 700.0,
                average_duration: 0.3,
            },
            beats: BeatStats {
                count: 400.0,
                regularity: 0.9,
            },
        },
    }
}

#[test]
fn test_empty_batch_yields_empty_matrix() {
    let matrix = build_feature_matrix(&[]);
    assert!(matrix.is_empty());
    assert!(matrix.track_ids.is_empty());
}

#[test]
fn test_row_width_is_fixed() {
    let tracks = vec![create_test_track("t1", 0, 120.0)];
    let matrix = build_feature_matrix(&tracks);

    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix.rows[0].len(), FEATURE_WIDTH);
    assert_eq!(FEATURE_WIDTH, NUMERIC_FEATURES.len() + KEY_CARDINALITY);
}

#[test]
fn test_schema_stability_across_batch_sizes() {
    // the same track must encode to the same width and the same key
    // column whether it arrives alone or among tracks with other keys
    let alone = build_feature_matrix(&[create_test_track("t1", 7, 120.0)]);

    let mut batch = vec![create_test_track("t1", 7, 120.0)];
    for i in 0..KEY_CARDINALITY {
        batch.push(create_test_track(&format!("other{}", i), i as i64, 100.0 + i as f64));
    }
    let together = build_feature_matrix(&batch);

    assert_eq!(alone.rows[0].len(), together.rows[0].len());

    let key_block_start = NUMERIC_FEATURES.len();
    for offset in 0..KEY_CARDINALITY {
        let expected = if offset == 7 { 1.0 } else { 0.0 };
        assert_eq!(alone.rows[0][key_block_start + offset], expected);
        assert_eq!(together.rows[0][key_block_start + offset], expected);
    }
}

#[test]
fn test_min_max_scaling_bounds() {
    // tempo is the third numeric column; 100 maps to 0.0 and 140 to 1.0
    let tracks = vec![
        create_test_track("slow", 0, 100.0),
        create_test_track("mid", 0, 120.0),
        create_test_track("fast", 0, 140.0),
    ];
    let matrix = build_feature_matrix(&tracks);

    let tempo_col = NUMERIC_FEATURES.iter().position(|n| *n == "tempo").unwrap();
    assert_eq!(matrix.rows[0][tempo_col], 0.0);
    assert_eq!(matrix.rows[1][tempo_col], 0.5);
    assert_eq!(matrix.rows[2][tempo_col], 1.0);
    for row in &matrix.rows {
        for col in 0..NUMERIC_FEATURES.len() {
            assert!(row[col] >= 0.0 && row[col] <= 1.0);
        }
    }
}

#[test]
fn test_degenerate_column_maps_to_zero() {
    // both tracks share every numeric value, so min == max for every
    // column and the documented fallback maps them all to 0.0
    let tracks = vec![
        create_test_track("t1", 2, 120.0),
        create_test_track("t2", 5, 120.0),
    ];
    let matrix = build_feature_matrix(&tracks);

    for row in &matrix.rows {
        for col in 0..NUMERIC_FEATURES.len() {
            assert_eq!(row[col], 0.0);
        }
    }

    // the one-hot key block is unaffected by the numeric degeneracy
    let key_block_start = NUMERIC_FEATURES.len();
    assert_eq!(matrix.rows[0][key_block_start + 2], 1.0);
    assert_eq!(matrix.rows[1][key_block_start + 5], 1.0);
}

#[test]
fn test_key_one_hot_has_single_hot_position() {
    let tracks = vec![create_test_track("t1", 11, 120.0)];
    let matrix = build_feature_matrix(&tracks);

    let key_block: &[f64] = &matrix.rows[0][NUMERIC_FEATURES.len()..];
    assert_eq!(key_block.len(), KEY_CARDINALITY);
    assert_eq!(key_block.iter().sum::<f64>(), 1.0);
    assert_eq!(key_block[11], 1.0);
}

#[test]
fn test_unknown_key_yields_all_zero_block() {
    // a key outside the 0-11 universe encodes as an all-zero block
    let tracks = vec![create_test_track("t1", -1, 120.0)];
    let matrix = build_feature_matrix(&tracks);

    let key_block: &[f64] = &matrix.rows[0][NUMERIC_FEATURES.len()..];
    assert_eq!(key_block.iter().sum::<f64>(), 0.0);
}

#[test]
fn test_track_ids_row_aligned() {
    let tracks = vec![
        create_test_track("first", 0, 100.0),
        create_test_track("second", 1, 110.0),
        create_test_track("third", 2, 120.0),
    ];
    let matrix = build_feature_matrix(&tracks);

    assert_eq!(matrix.track_ids, vec!["first", "second", "third"]);
    assert_eq!(matrix.rows.len(), matrix.track_ids.len());
}
