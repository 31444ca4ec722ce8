use crate::ai::{GenerationService, HttpGenerationClient};
use crate::config::AppConfig;
use crate::errors::LearnHubError;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub generator: Arc<dyn GenerationService>,
}

/// 创建生成服务客户端
fn create_generator() -> Result<Arc<dyn GenerationService>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let client = HttpGenerationClient::from_config()?;
    warn!(
        "Generation service configured at {} (timeout {}s)",
        config.ai.base_url, config.ai.timeout_secs
    );
    Ok(Arc::new(client))
}

// 开发构建输出带颜色的错误
fn report_startup_error(err: &LearnHubError) {
    #[cfg(debug_assertions)]
    eprintln!("{}", err.format_colored());
    error!("Storage initialization failed: {}", err.format_simple());
}

/// 准备服务器启动的上下文
/// 包括存储和生成服务客户端
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = match crate::storage::create_storage().await {
        Ok(storage) => storage,
        Err(e) => {
            report_startup_error(&e);
            std::process::exit(1);
        }
    };
    warn!("Storage backend initialized and migrations completed");

    let generator = create_generator().expect("Failed to create generation client");
    debug!("Generation endpoints: quiz, curriculum, lesson plan");

    StartupContext { storage, generator }
}
