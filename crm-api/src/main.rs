use crm_api::config::Config;
use crm_api::error::AppError;
use crm_api::infrastructure::database::init_mysql;
use crm_api::logging::init_logging;
use crm_api::server::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_logging(&config)?;

    tracing::info!("Starting CRM API service");

    // 初始化数据库连接
    let db = init_mysql(&config).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    // 创建并启动服务器
    let app = create_app(state).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);

    axum::serve(listener, app).await?;
    Ok(())
}
