use std::{env, process::ExitCode, sync::Arc};

use anyhow::Result;
use log::info;
use m3u_merge::{
    AppState, CONFIG_PATH_VAR, error_with_log, load_config_from,
    pipeline::{Pipeline, RunSummary},
};

async fn app_entry() -> Result<RunSummary> {
    let mut config = load_config_from(env::var_os(CONFIG_PATH_VAR))?;
    config.override_output_dir(env::var_os("OUTPUT_DIR"));

    let app_state = AppState::new(config)?;
    let pipeline = Pipeline::new(Arc::clone(&app_state.config), app_state.fetcher())?;

    Ok(pipeline.run().await?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match app_entry().await.map_err(error_with_log!("Fatal error")) {
        Ok(summary) => {
            info!(
                "Wrote {} lines from {:?} to {}",
                summary.lines,
                summary.succeeded,
                summary.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(()) => ExitCode::FAILURE,
    }
}
