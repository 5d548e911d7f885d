//! aztts - 命令行合成
//!
//! 用法: aztts [--config <file>] <text>
//! 合成成功后在标准输出打印音频文件路径

use std::path::PathBuf;

use aztts::application::ports::TtsProvider;
use aztts::config::{load_config, load_config_from_path, print_config, LogConfig};
use aztts::provider::AzureTtsProvider;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "aztts", version, about = "Synthesize text to an audio file with Azure TTS")]
struct Cli {
    /// 配置文件路径（默认搜索 config.toml / config.local.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 要合成的文本
    text: String,
}

fn init_tracing(log: &LogConfig) {
    let filter = format!("{},aztts={}", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path.as_path())),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    print_config(&config);

    let provider = AzureTtsProvider::new(&config.provider).await?;
    tracing::info!(
        provider = provider.display_name(),
        backend = provider.backend_name(),
        temp_dir = %provider.temp_dir().display(),
        "Provider ready"
    );

    let path = provider.get_audio(&cli.text).await?;
    println!("{}", path.display());

    Ok(())
}
