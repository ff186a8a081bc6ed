use std::sync::Arc;

use tower_http::cors::CorsLayer;

use obesity_triage::config::AppConfig;
use obesity_triage::interview::manager::InterviewManager;
use obesity_triage::interview::routes::{interview_routes, InterviewRouteState};
use obesity_triage::model::ModelBundle;
use obesity_triage::surface::{run_interview, TerminalSurface};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    let serve = std::env::args().any(|a| a == "serve");

    eprintln!("🧒 Obesity Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Artifacts: {}", config.artifact_dir.display());

    // Artifacts are mandatory — without a complete bundle no interview can run.
    let bundle = match ModelBundle::load(&config.artifact_dir) {
        Ok(bundle) => Arc::new(bundle),
        Err(e) => {
            eprintln!("Error: failed to load model artifacts: {e}");
            eprintln!("  Set OBESITY_TRIAGE_ARTIFACTS to the artifact directory.");
            std::process::exit(1);
        }
    };
    if let Some(fidelity) = bundle.surrogate.fidelity {
        eprintln!("   Surrogate fidelity to the final classifier: {:.2}%", fidelity * 100.0);
    }

    let manager = Arc::new(InterviewManager::new(bundle));

    if serve {
        serve_api(manager, config.port).await
    } else {
        run_terminal_interview(manager).await
    }
}

/// REST mode: sessions driven over HTTP.
async fn serve_api(manager: Arc<InterviewManager>, port: u16) -> anyhow::Result<()> {
    let app = interview_routes(InterviewRouteState { manager }).layer(CorsLayer::permissive());
    let addr = format!("0.0.0.0:{port}");
    eprintln!("   API: http://{addr}/api/interview");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Local mode: a single interview over the terminal.
async fn run_terminal_interview(manager: Arc<InterviewManager>) -> anyhow::Result<()> {
    eprintln!("   Answer the questions; press Enter to accept a default.\n");

    let mut session = manager.detached_session();
    let mut surface = TerminalSurface::new();
    match run_interview(&mut session, &mut surface).await {
        Ok(outcome) => {
            println!("\n🏷️  Final prediction: {}", outcome.prediction.label);
            if let Some(bmi) = session.bmi_preview() {
                println!("   Provisional BMI (for context only): {bmi:.1}");
            }
            println!("\n🧭 Recommendations");
            println!("   Food / Drink: {}", outcome.recommendations.food_drink);
            println!("   Exercise:     {}", outcome.recommendations.exercise);
            println!("   Other:        {}", outcome.recommendations.other);
            println!("   Note: {}", outcome.recommendations.note);
            println!("\n{}", session.cursor().explain());
            Ok(())
        }
        Err(e) => {
            // The prediction failing is a plain message, not a crash; the
            // answers are still intact if the user wants to retry.
            eprintln!("Prediction failed: {e}");
            Ok(())
        }
    }
}
