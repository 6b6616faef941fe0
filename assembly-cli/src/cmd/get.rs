use assembly_exec::{ApiResponse, ResponseFormat};

use crate::cmd::config::{build_client, exit_code_for, load_params};
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{ClientArgs, OutputArgs, ParamsArgs};

#[allow(clippy::too_many_arguments)]
pub async fn get_cmd(
    service: &str,
    xml: bool,
    page: Option<u32>,
    size: Option<u32>,
    params: ParamsArgs,
    output: OutputArgs,
    client: ClientArgs,
) -> i32 {
    let mut query = match load_params(&params) {
        Ok(p) => p,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };
    if let Some(page) = page {
        query.insert("pIndex".to_string(), page.to_string());
    }
    if let Some(size) = size {
        query.insert("pSize".to_string(), size.to_string());
    }

    let client = match build_client(&client) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };

    let format = if xml {
        ResponseFormat::Xml
    } else {
        ResponseFormat::Json
    };
    match client.get_data(service, &query, format).await {
        Ok(ApiResponse::Xml(body)) => {
            if !output.quiet {
                println!("{body}");
            }
            exit_codes::SUCCESS
        }
        Ok(ApiResponse::Json(body)) => {
            print_result(output.format, output.quiet, &body);
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_code_for(&e)
        }
    }
}
