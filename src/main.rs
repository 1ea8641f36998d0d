// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod inputs;
mod ui;

use cli::{CliArgs, Command, PullRequestArgs};
use config::ReportConfig;
use inputs::{InputSpec, directory_names, read_raw_output};
use migration_reporter::response::{
    DriftResponse, MigrationExecutionResponse, MigrationLintResponse, MigrationRunListResponse,
};
use migration_reporter::text_builder::{RunContext, TextBuilder};
use std::fs;
use std::path::Path;

/// Exit code when the report shows something a reviewer must act on
const EXIT_NEEDS_ATTENTION: i32 = 2;

fn main() {
    env_logger::init();

    let args = CliArgs::parse_args();

    let config = match config::resolve_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let (text, exit_code) = match render(&args.command, &config) {
        Ok(result) => result,
        Err(e) => {
            ui::print_error(&e);
            std::process::exit(1);
        }
    };

    if let Err(e) = write_report(args.output.as_deref(), &text) {
        ui::print_error(&e);
        std::process::exit(1);
    }

    std::process::exit(exit_code);
}

/// Render the report for one subcommand, returning the text and exit code
fn render(command: &Command, config: &ReportConfig) -> Result<(String, i32), String> {
    let formatter = config.dialect.formatter();

    match command {
        Command::Run(run) => {
            let responses = run
                .dirs
                .iter()
                .map(|spec| match read_raw_output(spec) {
                    Ok(raw) => MigrationExecutionResponse::build(&raw),
                    Err(e) => MigrationExecutionResponse::from_error(&e),
                })
                .collect();
            let response = MigrationRunListResponse::build(responses);
            let context = run_context(&run.dirs, run.dry_run, &run.pull_request);
            let text = TextBuilder::new(formatter, &context).render_run(&response);
            Ok((text, if response.has_errors() { EXIT_NEEDS_ATTENTION } else { 0 }))
        }
        Command::Lint(lint) => {
            let results: Vec<MigrationLintResponse> = lint
                .dirs
                .iter()
                .map(|spec| match read_raw_output(spec) {
                    Ok(raw) => MigrationLintResponse::build(&raw, &spec.dir, &config.skip_policy),
                    Err(e) => MigrationLintResponse::from_error(&e, &spec.dir),
                })
                .collect();
            let context = run_context(&lint.dirs, false, &PullRequestArgs::default());
            let text = TextBuilder::new(formatter, &context).render_lint(&results);
            let blocking = results.iter().filter(|r| r.is_blocking()).count();
            if blocking > 0 {
                ui::status(&format!("{} of {} databases have blocking lint errors", blocking, results.len()));
            }
            Ok((text, if blocking > 0 { EXIT_NEEDS_ATTENTION } else { 0 }))
        }
        Command::Drift(drift) => {
            let responses: Vec<DriftResponse> = drift
                .dirs
                .iter()
                .map(|spec| match read_raw_output(spec) {
                    Ok(raw) => DriftResponse::build(&raw),
                    Err(e) => DriftResponse::from_error(&e),
                })
                .collect();
            let context = run_context(&drift.dirs, false, &PullRequestArgs::default());
            let text = TextBuilder::new(formatter, &context).render_drift(&responses);
            let clean = responses.iter().all(|r| matches!(r, DriftResponse::NoDrift));
            Ok((text, if clean { 0 } else { EXIT_NEEDS_ATTENTION }))
        }
        Command::Ticket(ticket) => {
            let body = fs::read_to_string(&ticket.body_file)
                .map_err(|e| format!("Failed to read {}: {}", ticket.body_file.display(), e))?;
            let context = run_context(&[], false, &ticket.pull_request);
            let builder = TextBuilder::new(formatter, &context);
            let title = builder.title(&config.ticket_prefix).map_err(|e| e.to_string())?;
            let description = builder.description(body.trim_end()).map_err(|e| e.to_string())?;
            Ok((format!("{}\n{}", title, description), 0))
        }
    }
}

fn run_context(dirs: &[InputSpec], dry_run: bool, pr: &PullRequestArgs) -> RunContext {
    RunContext {
        dry_run,
        directories: directory_names(dirs),
        repo: pr.repo.clone(),
        repo_url: pr.repo_url.clone(),
        pr_number: pr.pr_number,
        pr_url: pr.pr_url.clone(),
        run_url: pr.run_url.clone().unwrap_or_else(|| pr.pr_url.clone()),
        author: pr.author.clone(),
        timestamp: chrono::Utc::now(),
    }
}

/// Write the report to a file, or stdout when no path is given
fn write_report(output: Option<&Path>, text: &str) -> Result<(), String> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text)).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            ui::status(&format!("Report saved to: {}", path.display()));
            Ok(())
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
