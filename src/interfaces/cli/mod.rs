/// CLI Interface Module
///
/// Command-line front end for the order manager.
///
/// ## Responsibilities
/// - Parse command-line arguments
/// - Initialize logging
/// - Dispatch to the application service
/// - Report failures on stderr with a non-zero exit status

pub mod repl;

use crate::application::{services::seeded_rng, OrderService};
use crate::infrastructure::ReportFormat;
use crate::shared::AppResult;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// 订单管理器命令行配置
#[derive(Parser, Debug, Clone)]
#[command(name = "limit-order-manager")]
#[command(version = "0.1.0")]
#[command(about = "内存限价订单管理器", long_about = None)]
pub struct CliConfig {
    /// 日志级别（RUST_LOG 优先）
    #[arg(short = 'l', long, global = true, default_value = "warn", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// 预分配的订单容量
    #[arg(short = 'c', long, global = true, default_value_t = 0)]
    pub capacity: usize,

    /// 输出格式
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 从CSV文件加载订单并打印快照
    Load {
        file: PathBuf,
    },

    /// 生成随机订单并打印快照
    Generate {
        count: usize,

        /// 随机种子（可复现）
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 运行性能测试
    Benchmark {
        count: usize,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// 打印快照（可选输出到文件）
    Snapshot {
        /// 预先加载的CSV文件
        #[arg(short, long)]
        input: Option<PathBuf>,

        output: Option<PathBuf>,
    },

    /// 打印统计信息
    Stats {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// 交互模式
    Interactive {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Runs the CLI application
///
/// Parses arguments from the process environment and executes the chosen
/// command against stdin / stdout.
pub fn run() -> ExitCode {
    let config = CliConfig::parse();
    init_logging(&config.log_level);
    tracing::debug!("配置: {:?}", config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match execute(&config, stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Executes `config.command` with explicit input and output streams
pub fn execute<R: BufRead, W: Write>(config: &CliConfig, input: R, out: &mut W) -> AppResult<()> {
    let mut service = OrderService::with_capacity(config.capacity);
    let format = config.format;

    match &config.command {
        Command::Load { file } => {
            if format == ReportFormat::Text {
                writeln!(out, "Loading orders from {}...", file.display())?;
            }
            let report = service.load_csv(file)?;
            if format == ReportFormat::Text {
                writeln!(
                    out,
                    "Loaded {} orders ({} duplicates, {} malformed lines skipped).",
                    report.accepted, report.duplicates, report.malformed
                )?;
            }
            service.write_snapshot(out, format)?;
        }
        Command::Generate { count, seed } => {
            if format == ReportFormat::Text {
                writeln!(out, "Generating {} random orders...", count)?;
            }
            let added = service.generate_random(*count, &mut seeded_rng(*seed));
            if format == ReportFormat::Text {
                writeln!(out, "Generated {} orders successfully.", added)?;
            }
            service.write_snapshot(out, format)?;
        }
        Command::Benchmark { count, seed } => {
            let report = service.run_benchmark(*count, *seed);
            match format {
                ReportFormat::Text => {
                    writeln!(out, "\n=== PERFORMANCE BENCHMARK ===")?;
                    writeln!(out, "Testing with {} orders", count)?;
                    writeln!(out, "Order addition took {} microseconds", report.generation.as_micros())?;
                    writeln!(
                        out,
                        "Snapshot rendering took {} microseconds ({} rows)",
                        report.snapshot.as_micros(),
                        report.snapshot_rows
                    )?;
                    writeln!(
                        out,
                        "Order cancellation took {} microseconds ({} cancelled)",
                        report.cancellation.as_micros(),
                        report.cancelled
                    )?;
                    service.write_stats(out, format)?;
                }
                ReportFormat::Json => {
                    let value = serde_json::json!({
                        "orders": count,
                        "generated": report.generated,
                        "generation_us": report.generation.as_micros() as u64,
                        "snapshot_rows": report.snapshot_rows,
                        "snapshot_us": report.snapshot.as_micros() as u64,
                        "cancelled": report.cancelled,
                        "cancellation_us": report.cancellation.as_micros() as u64,
                        "stats": report.stats,
                    });
                    serde_json::to_writer_pretty(&mut *out, &value)?;
                    writeln!(out)?;
                }
            }
        }
        Command::Snapshot { input: preload, output } => {
            load_optional(&mut service, preload.as_deref())?;
            match output {
                Some(path) => {
                    service.write_snapshot_to_file(path, format)?;
                    writeln!(out, "Snapshot saved to {}", path.display())?;
                }
                None => service.write_snapshot(out, format)?,
            }
        }
        Command::Stats { input: preload } => {
            load_optional(&mut service, preload.as_deref())?;
            service.write_stats(out, format)?;
        }
        Command::Interactive { input: preload } => {
            load_optional(&mut service, preload.as_deref())?;
            repl::Repl::new(&mut service, format).run(input, out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_optional(service: &mut OrderService, path: Option<&Path>) -> AppResult<()> {
    if let Some(path) = path {
        service.load_csv(path)?;
    }
    Ok(())
}

/// 初始化日志系统
///
/// Logs go to stderr so report output on stdout stays machine-readable.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(args: &[&str], stdin: &str) -> String {
        let config = CliConfig::parse_from(args);
        let mut out = Vec::new();
        execute(&config, stdin.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lom_cli_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_cli_config_default() {
        let config = CliConfig::parse_from(["limit-order-manager", "stats"]);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.capacity, 0);
        assert_eq!(config.format, ReportFormat::Text);
        assert_eq!(config.command, Command::Stats { input: None });
    }

    #[test]
    fn test_cli_config_custom() {
        let config = CliConfig::parse_from([
            "limit-order-manager",
            "generate", "500",
            "--seed", "9",
            "--log-level", "debug",
            "--capacity", "1024",
            "--format", "json",
        ]);

        assert_eq!(config.command, Command::Generate { count: 500, seed: Some(9) });
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.format, ReportFormat::Json);
    }

    #[test]
    fn test_cli_config_short_flags() {
        let config = CliConfig::parse_from([
            "limit-order-manager",
            "-l", "error",
            "-c", "64",
            "-f", "json",
            "snapshot", "-i", "orders.csv", "out.txt",
        ]);

        assert_eq!(config.log_level, "error");
        assert_eq!(config.capacity, 64);
        assert_eq!(
            config.command,
            Command::Snapshot {
                input: Some(PathBuf::from("orders.csv")),
                output: Some(PathBuf::from("out.txt")),
            }
        );
    }

    #[test]
    fn test_cli_rejects_unknown_log_level() {
        let result = CliConfig::try_parse_from(["limit-order-manager", "-l", "loud", "stats"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_command() {
        let csv = temp_path("load.csv");
        std::fs::write(&csv, "id,price,quantity,side\n1,150.50,100,0\n2,151.25,200,1\noops\n").unwrap();

        let out = run_with(&["limit-order-manager", "load", csv.to_str().unwrap()], "");
        std::fs::remove_file(&csv).ok();

        assert!(out.contains("Loaded 2 orders (0 duplicates, 1 malformed lines skipped)."));
        assert!(out.contains("Total Active Orders: 2"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let config = CliConfig::parse_from(["limit-order-manager", "load", "/no/such/file.csv"]);
        let mut out = Vec::new();
        assert!(execute(&config, "".as_bytes(), &mut out).is_err());
    }

    #[test]
    fn test_generate_json() {
        let out = run_with(&["limit-order-manager", "-f", "json", "generate", "20", "--seed", "3"], "");
        let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.len(), 20);
    }

    #[test]
    fn test_benchmark_text() {
        let out = run_with(&["limit-order-manager", "benchmark", "50", "--seed", "1"], "");
        assert!(out.contains("=== PERFORMANCE BENCHMARK ==="));
        assert!(out.contains("(50 cancelled)"));
        assert!(out.contains("Active Orders: 0"));
    }

    #[test]
    fn test_snapshot_to_file() {
        let csv = temp_path("snap.csv");
        let target = temp_path("snap.txt");
        std::fs::write(&csv, "1,150.50,100,0\n").unwrap();

        let out = run_with(
            &[
                "limit-order-manager",
                "snapshot",
                "--input", csv.to_str().unwrap(),
                target.to_str().unwrap(),
            ],
            "",
        );
        let written = std::fs::read_to_string(&target).unwrap();
        std::fs::remove_file(&csv).ok();
        std::fs::remove_file(&target).ok();

        assert!(out.starts_with("Snapshot saved to"));
        assert!(written.contains("Total Active Orders: 1"));
    }

    #[test]
    fn test_interactive_reads_stdin() {
        let out = run_with(&["limit-order-manager", "interactive"], "add 5 10.0 1 sell\nstats\nquit\n");
        assert!(out.contains("Order added successfully."));
        assert!(out.contains("Active Orders: 1"));
    }
}
