// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Rolodex CLI entrypoint.
//!
//! Runs the interactive contact table against the built-in demo account,
//! or against another seeded account selected with `--parent <id>`.

use std::error::Error;

use rolodex::model::ParentId;
use rolodex::remote::SharedSource;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--parent <account-id>]\n\nOpens the contact table for one account. Without --parent the built-in\ndemo account is used; with it, the account must exist in the seeded\ndemo store."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    parent: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--parent" => {
                if options.parent.is_some() {
                    return Err(());
                }
                let parent = args.next().ok_or(())?;
                options.parent = Some(parent);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "rolodex".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let parent_id = match options.parent {
            Some(raw) => ParentId::new(raw)?,
            None => rolodex::model::fixtures::demo_parent_id(),
        };

        rolodex::tui::run(SharedSource::demo(), parent_id)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("rolodex: {err}");
        std::process::exit(1);
    }
}
