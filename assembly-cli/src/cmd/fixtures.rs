use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assembly_exec::AssemblyClient;
use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::cmd::config::{build_client, load_params};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ClientArgs, OutputArgs, ParamsArgs};

/// Parameters that most services accept, so a single call has a fair chance of returning data.
const SAMPLE_PARAMS: [(&str, &str); 3] = [("pSize", "1"), ("AGE", "21"), ("UNIT_CD", "100021")];

#[derive(Debug, Default, Serialize)]
struct FixturesSummary {
    saved: Vec<String>,
    skipped: Vec<String>,
    failed: BTreeMap<String, String>,
}

enum Outcome {
    Saved,
    Skipped,
    Failed(String),
}

pub async fn fixtures_cmd(
    dir: &Path,
    concurrency: usize,
    delay_ms: u64,
    params: ParamsArgs,
    output: OutputArgs,
    client: ClientArgs,
) -> i32 {
    let mut query: BTreeMap<String, String> = SAMPLE_PARAMS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    match load_params(&params) {
        Ok(extra) => query.extend(extra),
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    }

    let client = match build_client(&client) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };

    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to create {}: {e}", dir.display()),
        );
        return exit_codes::RUNTIME_ERROR;
    }

    let services: Vec<(String, String)> = client
        .services()
        .services()
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();

    let permits = Semaphore::new(concurrency.max(1));
    let delay = Duration::from_millis(delay_ms);
    let tasks = services.iter().map(|(id, name)| {
        let path = fixture_path(dir, name);
        let (client, permits, query) = (&client, &permits, &query);
        async move {
            let outcome = save_fixture(client, permits, delay, id, &path, query).await;
            (name.clone(), outcome)
        }
    });

    let mut summary = FixturesSummary::default();
    for (name, outcome) in join_all(tasks).await {
        match outcome {
            Outcome::Saved => summary.saved.push(name),
            Outcome::Skipped => summary.skipped.push(name),
            Outcome::Failed(e) => {
                summary.failed.insert(name, e);
            }
        }
    }

    if output.format == OutputFormat::Text {
        if !output.quiet {
            println!(
                "saved {}, skipped {}, failed {}",
                summary.saved.len(),
                summary.skipped.len(),
                summary.failed.len()
            );
            for (name, e) in &summary.failed {
                println!("  {name}: {e}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &summary);
    }
    exit_codes::SUCCESS
}

async fn save_fixture(
    client: &AssemblyClient,
    permits: &Semaphore,
    delay: Duration,
    service_id: &str,
    path: &Path,
    query: &BTreeMap<String, String>,
) -> Outcome {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        info!(service_id, path = %path.display(), "fixture exists, skipping");
        return Outcome::Skipped;
    }

    let Ok(_permit) = permits.acquire().await else {
        return Outcome::Failed("permit pool closed".to_string());
    };
    let result = client.get_json(service_id, query).await;
    tokio::time::sleep(delay).await;

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            warn!(service_id, error = %e, "fixture request failed");
            return Outcome::Failed(e.to_string());
        }
    };
    let text = match serde_json::to_string_pretty(&body) {
        Ok(t) => t,
        Err(e) => return Outcome::Failed(e.to_string()),
    };
    match tokio::fs::write(path, text).await {
        Ok(()) => {
            info!(service_id, path = %path.display(), "saved fixture");
            Outcome::Saved
        }
        Err(e) => {
            warn!(service_id, path = %path.display(), error = %e, "failed to write fixture");
            Outcome::Failed(e.to_string())
        }
    }
}

fn fixture_path(dir: &Path, name: &str) -> PathBuf {
    let file: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    dir.join(format!("{file}.json"))
}
