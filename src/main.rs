use clap::Parser;
use tracing_subscriber::EnvFilter;

use pixel_cipher::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_digest, handle_encode},
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Encode(args) => handle_encode(args).map(|_| ()),
        Commands::Decode(args) => handle_decode(args).map(|_| ()),
        Commands::Digest(args) => handle_digest(args).map(|_| ()),
    }
}
