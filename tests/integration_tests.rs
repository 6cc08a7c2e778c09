//! Integration tests for cross-similarity computation

use stratum_csm::features::chroma::rotate_sequence;
use stratum_csm::features::embedding::to_time_embedding;
use stratum_csm::features::transposition::optimal_transposition_index;
use stratum_csm::{
    cross_similarity_matrix, Combination, CrossSimilarityConfig, FrameBuffer,
    SerialCrossSimilarity, SimilarityError, SimilarityScheme, StreamStatus,
};

/// Synthetic chord progression: I-IV-V-I, four frames per chord, in `key`
fn progression(n_frames: usize, key: usize) -> Vec<Vec<f32>> {
    let roots = [0, 5, 7, 0];
    (0..n_frames)
        .map(|i| {
            let root = roots[(i / 4) % roots.len()] + key;
            let mut chroma = vec![0.03f32; 12];
            chroma[root % 12] = 1.0;
            chroma[(root + 4) % 12] = 0.55 + 0.05 * (i % 4) as f32;
            chroma[(root + 7) % 12] = 0.75;
            chroma
        })
        .collect()
}

fn unit_frame() -> Vec<f32> {
    let mut frame = vec![0.0f32; 12];
    frame[3] = 1.0;
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_unit_frames_all_match() {
        let frames = vec![unit_frame(); 5];
        let config = CrossSimilarityConfig {
            embed_dimension: 1,
            oti_binary: true,
            noti: 0,
            ..Default::default()
        };

        let csm = cross_similarity_matrix(&frames, &frames, &config)
            .expect("Binary similarity should succeed");

        assert_eq!((csm.rows(), csm.cols()), (5, 5));
        assert!(csm.values().iter().flatten().all(|&v| v == 1.0));
    }

    #[test]
    fn test_empty_query_rejected() {
        let reference = progression(16, 0);
        for oti_binary in [false, true] {
            let config = CrossSimilarityConfig {
                oti_binary,
                ..Default::default()
            };
            let result = cross_similarity_matrix(&[], &reference, &config);
            assert!(matches!(result, Err(SimilarityError::EmptyInput(_))));
        }
    }

    #[test]
    fn test_degenerate_embedding() {
        let frames = progression(3, 0);
        assert!(matches!(
            to_time_embedding(&frames, 3, 1),
            Err(SimilarityError::DegenerateInput(_))
        ));

        let config = CrossSimilarityConfig {
            embed_dimension: 3,
            tau: 1,
            ..Default::default()
        };
        assert!(matches!(
            cross_similarity_matrix(&frames, &frames, &config),
            Err(SimilarityError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_oti_self_alignment() {
        let frames = progression(32, 0);
        assert_eq!(optimal_transposition_index(&frames, &frames, 12), 0);

        let cover = rotate_sequence(&frames, 4);
        let oti = optimal_transposition_index(&frames, &cover, 12);
        assert_eq!(oti, 8);
        assert_eq!(rotate_sequence(&cover, oti), frames);
    }

    #[test]
    fn test_batch_is_idempotent() {
        let query = progression(40, 0);
        let reference = progression(40, 2);
        let config = CrossSimilarityConfig::default();

        let first = cross_similarity_matrix(&query, &reference, &config).unwrap();
        let second = cross_similarity_matrix(&query, &reference, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.scheme(), SimilarityScheme::EuclideanCrossRecurrence);
        assert_eq!((first.rows(), first.cols()), (31, 31));
    }

    #[test]
    fn test_default_config_songs_of_different_lengths() {
        let query = progression(40, 0);
        let reference = progression(36, 5);
        let csm = cross_similarity_matrix(&query, &reference, &CrossSimilarityConfig::default())
            .expect("Default Euclidean scheme should accept any lengths");
        assert_eq!((csm.rows(), csm.cols()), (31, 27));
        assert!(csm.is_binary());
    }

    #[test]
    fn test_matrix_product_needs_equal_lengths() {
        let config = CrossSimilarityConfig {
            combination: Combination::MatrixProduct,
            ..Default::default()
        };
        let square = cross_similarity_matrix(&progression(40, 0), &progression(40, 2), &config)
            .unwrap();
        assert_eq!(square.scheme(), SimilarityScheme::EuclideanProduct);
        assert_eq!((square.rows(), square.cols()), (31, 31));

        assert!(matches!(
            cross_similarity_matrix(&progression(40, 0), &progression(36, 2), &config),
            Err(SimilarityError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_cover_in_another_key_recurs_on_diagonal() {
        let original = progression(48, 0);
        let cover = progression(48, 9);
        let config = CrossSimilarityConfig {
            embed_dimension: 4,
            kappa: 0.1,
            combination: Combination::CrossRecurrence,
            ..Default::default()
        };

        let csm = cross_similarity_matrix(&original, &cover, &config).unwrap();
        assert!(csm.is_binary());
        for i in 0..csm.rows() {
            assert_eq!(csm.get(i, i), Some(1.0), "diagonal entry {i} should recur");
        }
    }

    #[test]
    fn test_binary_scheme_shape_and_values() {
        let query = progression(20, 0);
        let reference = progression(13, 3);
        let config = CrossSimilarityConfig {
            oti_binary: true,
            to_blocked: false,
            ..Default::default()
        };
        let csm = cross_similarity_matrix(&query, &reference, &config).unwrap();
        assert_eq!((csm.rows(), csm.cols()), (20, 13));
        assert!(csm.values().iter().flatten().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_config_from_parameters_drives_pipeline() {
        let config = CrossSimilarityConfig::from_json_str(
            r#"{"embedDimension": 2, "otiBinary": false, "optimiseThreshold": true, "combination": "crossRecurrence"}"#,
        )
        .unwrap();
        let frames = progression(12, 0);
        let csm = SerialCrossSimilarity::new(config)
            .unwrap()
            .compute(&frames, &frames)
            .unwrap();
        assert_eq!((csm.rows(), csm.cols()), (10, 10));

        let err = CrossSimilarityConfig::from_json_str(r#"{"optimiseThreshold": "maybe"}"#);
        assert!(matches!(err, Err(SimilarityError::Configuration(_))));
    }

    #[test]
    fn test_streaming_drains_short_stream() {
        let reference = progression(10, 0);
        let config = CrossSimilarityConfig {
            embed_dimension: 4,
            oti_binary: true,
            ..Default::default()
        };
        assert_eq!(config.min_frames(), 5);

        let mut stream = SerialCrossSimilarity::new(config)
            .unwrap()
            .streaming(reference)
            .unwrap();

        let mut input = FrameBuffer::new();
        input.extend(progression(3, 0));
        assert_eq!(stream.process(&mut input).unwrap(), StreamStatus::NeedMoreInput);

        input.close();
        match stream.process(&mut input).unwrap() {
            StreamStatus::Produced(csm) => {
                // One embedded query row against 10 - 4 embedded reference rows
                assert_eq!((csm.rows(), csm.cols()), (1, 6));
                assert!(csm.is_binary());
            }
            other => panic!("expected a final matrix, got {other:?}"),
        }
        assert_eq!(stream.process(&mut input).unwrap(), StreamStatus::NoInput);
    }

    #[test]
    fn test_streaming_euclidean_drains_short_stream() {
        let reference = progression(10, 0);
        let config = CrossSimilarityConfig {
            embed_dimension: 4,
            ..Default::default()
        };
        let mut stream = SerialCrossSimilarity::new(config)
            .unwrap()
            .streaming(reference)
            .unwrap();

        let mut input = FrameBuffer::new();
        input.extend(progression(3, 0));
        assert_eq!(stream.process(&mut input).unwrap(), StreamStatus::NeedMoreInput);

        input.close();
        match stream.process(&mut input).unwrap() {
            StreamStatus::Produced(csm) => {
                assert_eq!((csm.rows(), csm.cols()), (1, 6));
                assert_eq!(csm.scheme(), SimilarityScheme::EuclideanCrossRecurrence);
                assert!(csm.is_binary());
            }
            other => panic!("expected a final matrix, got {other:?}"),
        }
        assert_eq!(stream.process(&mut input).unwrap(), StreamStatus::NoInput);
    }

    #[test]
    fn test_streaming_rejects_matrix_product() {
        let config = CrossSimilarityConfig {
            embed_dimension: 4,
            combination: Combination::MatrixProduct,
            ..Default::default()
        };
        let result = SerialCrossSimilarity::new(config)
            .unwrap()
            .streaming(progression(10, 0));
        assert!(matches!(result, Err(SimilarityError::Configuration(_))));
    }

    #[test]
    fn test_streaming_run_to_end_counts_steps() {
        let config = CrossSimilarityConfig {
            embed_dimension: 3,
            oti: false,
            combination: Combination::CrossRecurrence,
            ..Default::default()
        };
        let mut stream = SerialCrossSimilarity::new(config)
            .unwrap()
            .streaming(progression(24, 0))
            .unwrap();

        let mut input = FrameBuffer::with_capacity(16);
        input.extend(progression(16, 0));
        input.close();

        let matrices = stream.run_to_end(&mut input).unwrap();
        // Window 4, hop 1: 13 full windows, then a 3-frame drain
        assert_eq!(matrices.len(), 14);
        assert!(matrices.iter().all(|m| m.rows() == 1 && m.cols() == 21));
    }
}
