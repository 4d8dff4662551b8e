use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use log::{error, info};
use serde::Deserialize;

pub const DEFAULT_LOG_FILE: &str = "/tmp/order_reminders_log.txt";
pub const REMINDER_WINDOW_DAYS: i64 = 7;

/// 提醒只关心订单号和客户邮箱，其余字段忽略
#[derive(Debug, Deserialize)]
pub struct OrderReminder {
    pub id: String,
    pub customer: CustomerRef,
}

#[derive(Debug, Deserialize)]
pub struct CustomerRef {
    pub email: String,
}

/// 查询最近 7 天的订单，把提醒逐行追加到日志文件
pub async fn send_order_reminders(api_base: &str, log_file: &str) -> Result<()> {
    let since = Utc::now() - Duration::days(REMINDER_WINDOW_DAYS);
    let url = format!("{}/api/v1/orders", api_base.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .query(&[("since", since.to_rfc3339())])
        .send()
        .await
        .context("request to CRM API failed")?;

    let log_path = shellexpand::tilde(log_file).to_string();
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(Path::new(&log_path))
        .with_context(|| format!("cannot open log file {}", log_path))?;

    if response.status().is_success() {
        let orders: Vec<OrderReminder> = response
            .json()
            .await
            .context("invalid order list in response")?;

        info!(
            "fetched {} orders from the last {} days",
            orders.len(),
            REMINDER_WINDOW_DAYS
        );

        for order in &orders {
            writeln!(
                log,
                "{} - Reminder for Order ID {}, Customer: {}",
                Utc::now().to_rfc3339(),
                order.id,
                order.customer.email
            )?;
        }
    } else {
        error!("failed to fetch orders: {}", response.status());
        writeln!(
            log,
            "{} - ERROR: Failed to fetch orders. Status: {}",
            Utc::now().to_rfc3339(),
            response.status().as_u16()
        )?;
    }

    println!("Order reminders processed!");

    Ok(())
}
