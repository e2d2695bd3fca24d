use std::process::ExitCode;

use qr_camera_backend::{logging, Config, ProcessEnv, Profile};
use serde::Serialize;

#[derive(Serialize)]
struct Effective<'a> {
    profile: Profile,
    #[serde(flatten)]
    config: &'a Config,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let profile = match std::env::args().nth(1) {
        Some(name) => name.parse(),
        None => Profile::from_env(&ProcessEnv),
    };
    let profile = match profile {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    logging::init(profile.debug_enabled());
    let config = Config::from_env(profile);

    tracing::info!(
        %profile,
        debug = config.debug(),
        origins = ?config.cors_origins(),
        "Configuration resolved"
    );

    match serde_json::to_string_pretty(&Effective {
        profile,
        config: &config,
    }) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize configuration: {}", e);
            ExitCode::FAILURE
        }
    }
}
