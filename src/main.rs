use std::process::ExitCode;
use std::sync::Arc;

use mint_editor::app::{self, Application, RunSignal};
use mint_editor::config::Config;
use mint_editor::editor::InstanceHandle;
use mint_editor::logging::{Logger, LoggerOptions};

fn main() -> ExitCode {
    // Config problems are not fatal; the logger is not up yet, so report on stderr
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {:#}", e);
        Config::default()
    });

    let logger = Arc::new(Logger::new(LoggerOptions::from_config(&config)));
    let mut application = Application::new(logger, &config, InstanceHandle::current());

    if !application.is_usable() {
        app::notify_operator("Failed to initialize logger!");
        return ExitCode::FAILURE;
    }

    if let Some(stop) = application.stop_handle() {
        if let Err(e) = spawn_interrupt_listener(stop) {
            application
                .logger()
                .warning(format!("Ctrl-C handling unavailable: {}", e));
        }
    }

    application.run();
    drop(application);

    ExitCode::SUCCESS
}

/// Request a stop when the process receives Ctrl-C
fn spawn_interrupt_listener(stop: RunSignal) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("interrupt-listener".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop.request_stop();
                }
            });
        })?;

    Ok(())
}
