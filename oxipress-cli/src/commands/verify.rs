//! Verify command implementation.

use crate::utils::read_input;
use oxipress_engine::{Algorithm, Engine};
use std::path::Path;

pub fn cmd_verify(input: &Path, algorithm: Option<Algorithm>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, data) = read_input(input)?;
    let engine = Engine::default();
    let algorithms: Vec<Algorithm> = match algorithm {
        Some(algorithm) => vec![algorithm],
        None => Algorithm::ALL.to_vec(),
    };

    println!("Verifying: {}", input.display());

    let mut failures = 0;
    for algorithm in algorithms {
        let validation = engine.verify(algorithm, &data)?;
        if validation.success {
            println!("  {:<20} OK", algorithm.name());
        } else {
            failures += 1;
            println!(
                "  {:<20} FAILED: {}",
                algorithm.name(),
                validation.error_message.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if failures > 0 {
        return Err(format!("{} algorithm(s) failed verification", failures).into());
    }
    println!("All round trips passed");
    Ok(())
}
