use crate::cmd::config::{build_client, exit_code_for};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ClientArgs, OutputArgs};

pub async fn cache_clear_cmd(service: &str, output: OutputArgs, client: ClientArgs) -> i32 {
    let client = match build_client(&client) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };

    if let Err(e) = client.invalidate(service).await {
        print_error(output.format, output.quiet, &e.to_string());
        return exit_code_for(&e);
    }

    if output.format == OutputFormat::Text {
        if !output.quiet {
            println!("cleared {service}");
        }
    } else {
        print_result(output.format, output.quiet, &serde_json::json!({ "cleared": service }));
    }
    exit_codes::SUCCESS
}
