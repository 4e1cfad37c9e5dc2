use rbfica::pipeline::{PipelineConfig, run_pipeline};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PipelineConfig {
        verbose: true,
        ..PipelineConfig::default()
    };

    match run_pipeline(&config) {
        Ok(report) => {
            info!(
                best_width = report.best_width,
                best_fitness = report.best_fitness,
                train_mse = report.train_mse,
                test_mse = report.test_mse,
                "Kernel width selected"
            );
            println!("Train accuracy: {:.2}%", report.train_accuracy * 100.0);
            println!("Test accuracy: {:.2}%", report.test_accuracy * 100.0);
            println!("{}", report.test_confusion.summary());
        }
        Err(e) => {
            error!(error = %e, "Pipeline failed");
            std::process::exit(1);
        }
    }
}
