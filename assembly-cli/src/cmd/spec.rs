use crate::cmd::config::{build_client, exit_code_for};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ClientArgs, OutputArgs};

pub async fn spec_cmd(service: &str, output: OutputArgs, client: ClientArgs) -> i32 {
    let client = match build_client(&client) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };

    let spec = match client.spec(service).await {
        Ok(s) => s,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_code_for(&e);
        }
    };

    if output.format == OutputFormat::Text {
        if output.quiet {
            return exit_codes::SUCCESS;
        }
        println!("service:  {}", spec.service_id);
        println!("endpoint: {}", spec.endpoint);
        println!("url:      {}", spec.endpoint_url);
        for (title, params) in [("basic", &spec.basic_params), ("request", &spec.request_params)] {
            println!("{title} parameters:");
            for p in params {
                let flag = if p.required { "*" } else { " " };
                println!("  {flag} {:<12} {:<8} {}", p.name, p.type_label, p.description);
            }
        }
    } else {
        print_result(output.format, output.quiet, spec.as_ref());
    }
    exit_codes::SUCCESS
}
