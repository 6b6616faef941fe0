use serde::Serialize;

use crate::cmd::config::{build_client, exit_code_for};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ClientArgs, OutputArgs};

#[derive(Debug, Serialize)]
struct Resolved {
    service_id: String,
    name: Option<String>,
    endpoint: String,
    endpoint_url: String,
}

pub async fn resolve_cmd(service: &str, output: OutputArgs, client: ClientArgs) -> i32 {
    let client = match build_client(&client) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };

    let service_id = match client.resolve_service(service) {
        Ok(id) => id,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_code_for(&e);
        }
    };
    let spec = match client.spec(&service_id).await {
        Ok(s) => s,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_code_for(&e);
        }
    };

    let result = Resolved {
        name: client.services().services().name(&service_id).map(str::to_string),
        service_id,
        endpoint: spec.endpoint.clone(),
        endpoint_url: spec.endpoint_url.clone(),
    };

    if output.format == OutputFormat::Text {
        if !output.quiet {
            println!("{}\t{}", result.service_id, result.endpoint);
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}
