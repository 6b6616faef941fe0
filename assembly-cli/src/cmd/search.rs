use serde::Serialize;

use crate::cmd::config::load_services;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ClientArgs, OutputArgs};

#[derive(Debug, Serialize)]
struct ServiceEntry {
    id: String,
    name: String,
}

pub fn search_cmd(keyword: &str, output: OutputArgs, client: ClientArgs) -> i32 {
    let resolver = match load_services(&client) {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::USAGE_ERROR;
        }
    };

    let entries: Vec<ServiceEntry> = resolver
        .search(keyword)
        .into_iter()
        .map(|(id, name)| ServiceEntry { id, name })
        .collect();

    if output.format == OutputFormat::Text {
        if !output.quiet {
            for e in &entries {
                println!("{}\t{}", e.id, e.name);
            }
        }
    } else {
        print_result(output.format, output.quiet, &entries);
    }
    exit_codes::SUCCESS
}
