#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use clap::Parser;
use copymill::backend::OpenRouterBackend;
use copymill::cli::{Cli, Command};
use copymill::content::fallback;
use copymill::{
    Config, ContentPipeline, LinkExtractor, ProductInfo, Result, TargetPersona, Tone,
};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();

    match cli.command {
        Command::Serve { host, port } => copymill::gateway::run_gateway(&host, port, &config).await,
        Command::Extract { url } => {
            let extractor = LinkExtractor::new(&config.extract);
            let data = extractor.extract(&url).await?;
            println!("{}", data.context);
            Ok(())
        }
        Command::Personas {
            name,
            link,
            description,
        } => {
            let pipeline = build_pipeline(&config);
            let personas = pipeline
                .generate_personas(&product(name, link, description))
                .await;
            print_json(&personas)
        }
        Command::Generate {
            name,
            link,
            description,
            persona,
            tone,
            format,
        } => {
            let pipeline = build_pipeline(&config);
            let persona = persona
                .map(|title| cli_persona(title, tone))
                .unwrap_or_else(|| fallback::personas().remove(0));
            let post = pipeline
                .generate_post(&product(name, link, description), &persona, tone, format)
                .await;
            print_json(&post)
        }
    }
}

fn build_pipeline(config: &Config) -> ContentPipeline {
    let backend = Arc::new(OpenRouterBackend::new(
        config.backend.api_key.as_deref(),
        &config.backend.model,
        config.backend.temperature,
    ));
    ContentPipeline::new(backend)
}

fn product(name: String, link: String, description: String) -> ProductInfo {
    ProductInfo {
        name,
        link,
        description,
        ..ProductInfo::default()
    }
}

fn cli_persona(title: String, tone: Tone) -> TargetPersona {
    TargetPersona {
        id: "cli".to_string(),
        description: String::new(),
        icon: String::new(),
        recommended_tone: tone,
        title,
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| copymill::MillError::Other(err.into()))?;
    println!("{rendered}");
    Ok(())
}
