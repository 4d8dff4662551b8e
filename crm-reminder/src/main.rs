use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use tokio_cron_scheduler::{Job, JobScheduler};

use crm_reminder::reminder::{send_order_reminders, DEFAULT_LOG_FILE};

#[derive(Parser)]
#[command(name = "crm-reminder")]
#[command(about = "CRM 订单提醒任务", long_about = None)]
struct Cli {
    /// CRM API 地址
    #[arg(long, default_value = "http://localhost:8000")]
    api_base: String,

    /// 提醒日志文件路径
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 立即执行一次订单提醒（适合放进 crontab）
    Run,
    /// 常驻运行，按 cron 表达式定时执行
    Schedule {
        /// cron 表达式（默认每天 08:00）
        #[arg(long, default_value = "0 0 8 * * *")]
        cron: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            send_order_reminders(&cli.api_base, &cli.log_file).await?;
        }
        Commands::Schedule { cron } => {
            let mut scheduler = JobScheduler::new().await?;

            let api_base = cli.api_base.clone();
            let log_file = cli.log_file.clone();
            let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
                let api_base = api_base.clone();
                let log_file = log_file.clone();
                Box::pin(async move {
                    if let Err(err) = send_order_reminders(&api_base, &log_file).await {
                        error!("order reminder run failed: {err:#}");
                    }
                })
            })?;

            scheduler.add(job).await?;
            scheduler.start().await?;
            info!("reminder scheduler started, cron: {cron}");

            tokio::signal::ctrl_c().await?;
            scheduler.shutdown().await?;
        }
    }

    Ok(())
}
