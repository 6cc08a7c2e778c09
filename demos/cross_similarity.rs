//! Example: Cross-similarity between a synthetic song and a transposed cover
//!
//! Usage: cargo run --example cross_similarity [params.json]
//!
//! The optional JSON file holds a parameter map such as
//! `{"embedDimension": 4, "combination": "crossRecurrence"}`.

use std::env;
use std::fs;

use stratum_csm::{cross_similarity_matrix, CrossSimilarityConfig};

/// I-vi-IV-V progression, eight frames per chord
fn progression(n_frames: usize, key: usize) -> Vec<Vec<f32>> {
    let roots = [0, 9, 5, 7];
    (0..n_frames)
        .map(|i| {
            let root = roots[(i / 8) % roots.len()] + key;
            let minor = roots[(i / 8) % roots.len()] == 9;
            let mut chroma = vec![0.02f32; 12];
            chroma[root % 12] = 1.0;
            chroma[(root + if minor { 3 } else { 4 }) % 12] = 0.6;
            chroma[(root + 7) % 12] = 0.8;
            chroma
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => CrossSimilarityConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => CrossSimilarityConfig::default(),
    };

    let original = progression(64, 0);
    let cover = progression(64, 5);

    let csm = cross_similarity_matrix(&original, &cover, &config)?;

    println!("Cross-similarity ({:?}):", csm.scheme());
    println!("  Shape: {} x {}", csm.rows(), csm.cols());
    println!("  Density: {:.3}", csm.density());
    for row in csm.values().iter().take(32) {
        let line: String = row
            .iter()
            .take(64)
            .map(|&v| if v > 0.0 { '#' } else { '.' })
            .collect();
        println!("  {}", line);
    }

    Ok(())
}
