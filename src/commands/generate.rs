//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Starlog;

/// Generate the static site from the content API
pub async fn run(app: &Starlog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(app)?;
    generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
