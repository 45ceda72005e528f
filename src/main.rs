use clap::Parser;
use letters_chunker::core::{writer, ConfigProvider};
use letters_chunker::utils::{logger, messages, validation::Validate};
use letters_chunker::{ChunkPipeline, CliConfig, EtlEngine, EtlError, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting letters-chunker");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<(), EtlError> {
    let base_dir = cli.base_dir()?;
    let settings = cli.resolve()?;
    settings.validate()?;

    tracing::info!(
        "Base directory {}, input {}, chunk size {}",
        base_dir.display(),
        settings.input_path().display(),
        settings.chunk_size()
    );

    let storage = LocalStorage::new(base_dir);
    let pipeline = ChunkPipeline::new(storage, settings);
    let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor);

    if cli.dry_run {
        let plan = engine.plan().await?;
        let config = engine.pipeline().config();
        for chunk in &plan.chunks {
            let path = config.output_dir().join(chunk.file_name());
            println!(
                "{}",
                messages::dry_run_chunk(config.locale(), &path.display().to_string(), chunk.len())
            );
        }
        println!("{}", String::from_utf8_lossy(&writer::encode_metadata(&plan.metadata)?));
        return Ok(());
    }

    let summary = engine.run().await?;
    tracing::info!("Metadata saved to {}", summary.metadata_path.display());
    Ok(())
}
