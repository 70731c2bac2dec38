//! AliceGlow 콘솔 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 로그인 (토큰은 ~/.aliceglow/storage.json 에 저장)
//! glow login -e alice@aliceglow.com -p ********
//!
//! # 대시보드 / 상품 목록
//! glow dashboard
//! glow products list --format json
//!
//! # 판매 등록 (상품ID:수량)
//! glow sales create -c "Maria Silva" --item 1:2 --item 8:1
//!
//! # 백엔드 없이 둘러보기
//! glow --demo users list
//! ```

use clap::Parser;
use glow_cli::cli::Cli;
use glow_cli::commands;
use glow_cli::{report, Console, OutputFormat};
use glow_core::{init_logging, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if cli.demo {
        config.session.demo_mode = true;
    }
    config.validate()?;

    init_logging(cli.log_config(&config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    info!(config = %cli.config, demo = config.session.demo_mode, "Starting glow");

    let format = OutputFormat::parse(&cli.format)?;
    let console = Console::open(&config)?;

    match commands::run(&console, cli.command, format).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            let (message, code) = report(&e);
            eprintln!("{}", message);
            std::process::exit(code);
        }
    }
}
