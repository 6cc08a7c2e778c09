//! Example: Stream query frames against a fixed reference
//!
//! Frames arrive in small bursts; each completed window yields one matrix.

use stratum_csm::{CrossSimilarityConfig, FrameBuffer, SerialCrossSimilarity, StreamStatus};

fn chroma(root: usize) -> Vec<f32> {
    let mut frame = vec![0.02f32; 12];
    frame[root % 12] = 1.0;
    frame[(root + 4) % 12] = 0.6;
    frame[(root + 7) % 12] = 0.8;
    frame
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CrossSimilarityConfig {
        embed_dimension: 4,
        oti_binary: true,
        ..Default::default()
    };

    let reference: Vec<Vec<f32>> = (0..48).map(|i| chroma([0, 5, 7, 0][(i / 6) % 4])).collect();
    let mut stream = SerialCrossSimilarity::new(config)?.streaming(reference)?;

    let query: Vec<Vec<f32>> = (0..23).map(|i| chroma([2, 7, 9, 2][(i / 6) % 4])).collect();
    let mut input = FrameBuffer::new();
    let mut produced = 0;

    for burst in query.chunks(3) {
        input.extend(burst.iter().cloned());
        while let StreamStatus::Produced(csm) = stream.process(&mut input)? {
            produced += 1;
            println!(
                "step {:>3}: {} x {}, matches {:.2}",
                produced,
                csm.rows(),
                csm.cols(),
                csm.density()
            );
        }
    }

    input.close();
    for csm in stream.run_to_end(&mut input)? {
        produced += 1;
        println!("drain {:>2}: {} x {}, matches {:.2}", produced, csm.rows(), csm.cols(), csm.density());
    }

    println!("Produced {} matrices", produced);
    Ok(())
}
