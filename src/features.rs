//! Feature normalization for the mood transition models.
//!
//! Raw SoundStat track payloads are turned into a fixed-width numeric
//! matrix: continuous features are min-max scaled per batch to [0,1] and
//! the musical key is one-hot encoded against its fixed universe of twelve
//! values. The column layout is determined by the trained models and must
//! be reproduced exactly on every call, regardless of which keys or value
//! ranges appear in a given batch.

use crate::types::TrackInfo;

/// Names of the continuous feature columns, in matrix column order.
pub const NUMERIC_FEATURES: [&str; 14] = [
    "popularity",
    "duration_ms",
    "tempo",
    "key_confidence",
    "energy",
    "danceability",
    "valence",
    "instrumentalness",
    "acousticness",
    "loudness",
    "segments_count",
    "segments_avg_duration",
    "beats_count",
    "beats_regularity",
];

/// Number of possible musical keys (pitch classes 0-11).
pub const KEY_CARDINALITY: usize = 12;

/// Total width of a feature row: continuous columns followed by the
/// one-hot key block.
pub const FEATURE_WIDTH: usize = NUMERIC_FEATURES.len() + KEY_CARDINALITY;

/// A model-ready feature matrix with its row-aligned track id list.
///
/// Row `i` of `rows` holds the feature vector of `track_ids[i]`. Every row
/// has exactly [`FEATURE_WIDTH`] columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub track_ids: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn empty() -> Self {
        Self {
            track_ids: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Extracts the raw continuous feature values of a track, in column order.
fn numeric_row(track: &TrackInfo) -> [f64; NUMERIC_FEATURES.len()] {
    let f = &track.features;
    [
        track.popularity,
        track.duration_ms,
        f.tempo,
        f.key_confidence,
        f.energy,
        f.danceability,
        f.valence,
        f.instrumentalness,
        f.acousticness,
        f.loudness,
        f.segments.count,
        f.segments.average_duration,
        f.beats.count,
        f.beats.regularity,
    ]
}

/// Builds a model-ready feature matrix from a batch of track payloads.
///
/// Continuous columns are min-max scaled over the batch to [0,1]. A column
/// with a single distinct value in the batch is mapped to constant 0.0,
/// the documented fallback for the degenerate min == max case. The key is
/// one-hot encoded against all twelve pitch classes, so the matrix width
/// never varies with batch composition; a key outside 0-11 yields an
/// all-zero key block for that row.
///
/// This is a pure function of the input batch. An empty batch produces an
/// empty matrix, not an error.
pub fn build_feature_matrix(tracks: &[TrackInfo]) -> FeatureMatrix {
    if tracks.is_empty() {
        return FeatureMatrix::empty();
    }

    let raw: Vec<[f64; NUMERIC_FEATURES.len()]> = tracks.iter().map(numeric_row).collect();

    // per-column min/max over the batch
    let mut mins = [f64::INFINITY; NUMERIC_FEATURES.len()];
    let mut maxs = [f64::NEG_INFINITY; NUMERIC_FEATURES.len()];
    for row in &raw {
        for (col, value) in row.iter().enumerate() {
            mins[col] = mins[col].min(*value);
            maxs[col] = maxs[col].max(*value);
        }
    }

    let mut rows = Vec::with_capacity(tracks.len());
    for (track, raw_row) in tracks.iter().zip(raw.iter()) {
        let mut row = Vec::with_capacity(FEATURE_WIDTH);
        for (col, value) in raw_row.iter().enumerate() {
            let span = maxs[col] - mins[col];
            if span == 0.0 {
                row.push(0.0);
            } else {
                row.push((value - mins[col]) / span);
            }
        }

        // fixed-universe one-hot key block
        let key = track.features.key;
        for candidate in 0..KEY_CARDINALITY {
            if key == candidate as i64 {
                row.push(1.0);
            } else {
                row.push(0.0);
            }
        }

        rows.push(row);
    }

    FeatureMatrix {
        track_ids: tracks.iter().map(|t| t.id.clone()).collect(),
        rows,
    }
}
