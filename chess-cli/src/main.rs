use anyhow::Result;
use chess_cli::{App, CliSettings};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // 先读设置，日志级别来自设置文件
    let path = CliSettings::settings_path();
    let loaded = path.as_deref().map(CliSettings::load_from);
    let settings = match &loaded {
        Some(Ok(Some(settings))) => settings.clone(),
        _ => CliSettings::default(),
    };

    // 初始化日志（RUST_LOG 优先），输出到 stderr，不干扰棋盘
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level.directive()))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match (&path, loaded) {
        (None, _) => warn!("无法获取配置目录，使用默认设置"),
        (Some(path), Some(Ok(Some(_)))) => info!("已加载设置: {:?}", path),
        (Some(_), Some(Err(e))) => warn!("{:#}，使用默认设置", e),
        (Some(_), _) => info!("设置文件不存在，使用默认设置"),
    }

    info!("国际象棋终端启动");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    App::new(settings).run(stdin.lock(), stdout.lock())
}
