/// 人流计数 (People Counter)
///
/// 区域占用与入场统计
///
/// 系统架构:
/// 1. 读取线程: 解析检测模型输出 (JSON Lines)
/// 2. 主线程:   区域分类 → 入场计数 → 逐帧写入 CSV 日志
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use people_counter::config::{CounterConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_PATH};
use people_counter::input::{spawn_reader, DEFAULT_CHANNEL_CAPACITY};
use people_counter::{pipeline, DashboardSummary, FrameCounter, MetricsLog};

/// 人流计数参数
#[derive(Parser, Debug)]
#[command(author, version, about = "人流计数 - 区域占用与入场统计", long_about = None)]
struct Cli {
    /// 输出调试日志 (也可通过 RUST_LOG 设置)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 处理检测流并写入逐帧日志
    Run(RunArgs),
    /// 汇总已完成的日志 (JSON 输出)
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// 检测流文件 (JSON Lines, 每行一帧)
    #[arg(short, long)]
    detections: PathBuf,

    /// 配置文件 (不存在时创建默认配置)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 日志文件 (覆盖配置中的 log_path)
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// 入场距离阈值,像素 (覆盖配置)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// 读取线程 → 处理线程 通道容量
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    channel_capacity: usize,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// 日志文件
    #[arg(short, long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// 格式化输出
    #[arg(long)]
    pretty: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => run(args),
        Command::Summary(args) => summary(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    info!("🚀 人流计数启动");

    let mut config = CounterConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    config.apply_overrides(args.log.as_deref(), args.threshold);
    config.log_summary();

    let (classifier, tracker) = config.build().context("invalid counter configuration")?;
    let mut counter = FrameCounter::new(classifier, tracker);

    info!("📹 检测流: {}", args.detections.display());
    let (frames, reader) = spawn_reader(&args.detections, args.channel_capacity)
        .with_context(|| format!("failed to open {}", args.detections.display()))?;

    let mut log = MetricsLog::create(&config.log_path)
        .with_context(|| format!("failed to create log {}", config.log_path))?;

    let result = pipeline::run(&mut counter, frames.iter(), &mut log);

    // 先关闭接收端, 读取线程不会阻塞在发送上
    drop(frames);
    reader
        .join()
        .map_err(|_| anyhow!("detection reader thread panicked"))?;

    let stats = result.context("frame processing stopped")?;
    log.finish().context("failed to close log")?;

    info!(
        "✅ 处理完成: {} 帧 | 累计入场 {} | 区域内最多 {} 人",
        stats.frames, stats.entries_total, stats.max_in_zone
    );
    info!("💾 日志已保存到: {}", config.log_path);
    Ok(())
}

fn summary(args: SummaryArgs) -> Result<()> {
    println!("{}", summary_json(&args)?);
    Ok(())
}

fn summary_json(args: &SummaryArgs) -> Result<String> {
    let summary = DashboardSummary::from_log(&args.log)
        .with_context(|| format!("failed to summarize {}", args.log.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    Ok(json)
}
