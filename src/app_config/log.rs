use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber, Layer, Registry};

use super::settings::AppConfig;

const LOG_DIR: &str = "log_files";

// 设置日志
//
// LOCAL 输出到 stderr，stdout 留给报表 JSON；其余环境按天滚动写入 info/error 文件。
// 返回的 guard 需要持有到进程结束，否则缓冲中的日志会丢失
pub fn setup_logging(config: &AppConfig) -> anyhow::Result<Vec<WorkerGuard>> {
    if config.is_local() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(true)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_level(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        return Ok(Vec::new());
    }

    let info_file = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "info.log");
    let error_file = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "error.log");

    let (info_non_blocking, info_guard) = tracing_appender::non_blocking(info_file);
    let (error_non_blocking, error_guard) = tracing_appender::non_blocking(error_file);

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .json()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(info_non_blocking)
                .with_filter(EnvFilter::new("info")),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .with_writer(error_non_blocking)
                .with_filter(EnvFilter::new("error")),
        );

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(vec![info_guard, error_guard])
}
