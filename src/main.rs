use shellmind::agent::{AgentController, AgentOptions};
use shellmind::config::SessionConfig;
use shellmind::llm::ChatClient;
use shellmind::shell::{HostEnvironment, HostShell};
use shellmind::telemetry::{init_telemetry, shutdown_telemetry};
use shellmind::ui::Console;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = SessionConfig::from_env()?;

    init_telemetry("shellmind", config.otlp_endpoint.as_deref())?;
    tracing::info!(
        model = %config.model,
        timeout_secs = config.timeout.as_secs(),
        max_retries = config.max_retries,
        "Starting session"
    );

    let client = ChatClient::new(
        config.api_url.clone(),
        config.model.clone(),
        Some(config.api_token.clone()),
        config.timeout,
    )?;

    let mut agent = AgentController::new(
        client,
        HostShell::new(),
        &HostEnvironment::capture(),
        AgentOptions::from(&config),
    );
    let mut console = Console::new();

    let turns = shellmind::repl::run(&mut agent, &mut console).await;

    tracing::info!(turns, "Session finished");
    shutdown_telemetry();
    Ok(())
}
