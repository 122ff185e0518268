//! `replypilot` 바이너리 진입점.

use replypilot::domain::reply::ReplyOutcome;
use replypilot::interface::cli::{Cli, CliAction};

#[tokio::main]
async fn main() {
    let action = Cli::parse_action();

    // 서버는 기본적으로 진행 로그를 보여주고, 일회성 명령은 경고만 출력한다.
    let default_filter = match action {
        CliAction::Serve { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let result = match action {
        CliAction::Serve { addr, store } => replypilot::serve(addr, &store).await,
        CliAction::Reply { review_id, store } => {
            replypilot::reply_now(review_id, &store).await.map(|outcome| {
                println!("{outcome}");
                if matches!(outcome, ReplyOutcome::Failed(_)) {
                    std::process::exit(1);
                }
            })
        }
        CliAction::TestPrompt {
            product_id,
            review,
            store,
        } => match replypilot::test_prompt(product_id, &review, &store).await {
            Ok(preview) => serde_json::to_string_pretty(&preview)
                .map(|json| println!("{json}"))
                .map_err(anyhow::Error::from),
            Err(err) => Err(err),
        },
        CliAction::InspectConfig => {
            replypilot::inspect_config_pretty_json().map(|json| println!("{json}"))
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
