//! The interactive session: one command per line, recipe reprinted after
//! every change. Errors are printed and the loop carries on.

use std::io::{BufRead, Write};

use clap::{CommandFactory, Parser};
use colored::Colorize;

use dough_session::{Edit, FermentationMethod, Field, Session};
use dough_store::RecipeStore;

use crate::cli::{split_line, SessionCommand, SessionLine};
use crate::commands::{print_calculation, print_names};

const PROMPT: &str = "dough> ";

enum Flow {
    Continue,
    Quit,
}

pub fn run<S: RecipeStore>(
    session: &mut Session<'_, S>,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "{}", "Pizza dough calculator".bold())?;
    writeln!(out, "Type {} for commands, {} to leave.\n", "help".cyan(), "quit".cyan())?;
    show(session, out)?;

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let words = match split_line(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                report(out, &e)?;
                continue;
            }
        };
        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                writeln!(out, "{}", e.render().to_string().trim_end())?;
                continue;
            }
        };

        match handle(session, parsed.command, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => report(out, &e)?,
        }
    }
    Ok(())
}

fn handle<S: RecipeStore>(
    session: &mut Session<'_, S>,
    command: SessionCommand,
    out: &mut impl Write,
) -> anyhow::Result<Flow> {
    match command {
        SessionCommand::Set { field, value } => {
            let edit = Edit::parse(field, &value)?;
            let applied = session.apply(edit).map(|_| ());
            match applied {
                Ok(()) => show(session, out)?,
                Err(e) => report(out, &e)?,
            }
        }
        SessionCommand::Show => show(session, out)?,
        SessionCommand::Save { name, no_clobber } => {
            let saved = if no_clobber {
                session.create(&name)?
            } else {
                session.save(&name)?
            };
            writeln!(out, "{} Saved {}", "✓".green().bold(), saved.name.yellow())?;
        }
        SessionCommand::Load { name } => {
            let saved = session.load(&name)?;
            writeln!(out, "Loaded {}", saved.name.yellow())?;
            show(session, out)?;
        }
        SessionCommand::List => print_names(out, &session.list()?)?,
        SessionCommand::Delete { name } => {
            if session.delete(&name)? {
                writeln!(out, "Deleted {}", name.yellow())?;
            } else {
                writeln!(out, "No recipe named {}", name.yellow())?;
            }
        }
        SessionCommand::Export {
            name,
            path,
            export_format,
        } => {
            session.export(&name, &path, export_format)?;
            writeln!(
                out,
                "{} Exported {} to {}",
                "✓".green().bold(),
                name.yellow(),
                path.display()
            )?;
        }
        SessionCommand::Import {
            path,
            name,
            no_clobber,
        } => {
            let saved = session.import(&path, name.as_deref(), no_clobber)?;
            writeln!(
                out,
                "{} Imported {} from {}",
                "✓".green().bold(),
                saved.name.yellow(),
                path.display()
            )?;
            show(session, out)?;
        }
        SessionCommand::Help => help(session, out)?,
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Print the current recipe, or why it does not compute.
fn show<S: RecipeStore>(session: &Session<'_, S>, out: &mut impl Write) -> anyhow::Result<()> {
    match session.latest() {
        Ok(calc) => print_calculation(out, session.inputs(), calc)?,
        Err(e) => report(out, e)?,
    }
    let idle = match session.inputs().fermentation_method {
        FermentationMethod::Room => Some(("cold", session.cold_stage())),
        FermentationMethod::Fridge => Some(("room", session.room_stage())),
        FermentationMethod::Both => None,
    };
    if let Some((which, stage)) = idle {
        writeln!(out, "{}", format!("(unused {which} stage: {stage})").dimmed())?;
    }
    Ok(())
}

fn help<S: RecipeStore>(session: &Session<'_, S>, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", SessionLine::command().render_help())?;
    writeln!(out, "\nFields for {}:", "set".cyan())?;
    for field in Field::ALL {
        writeln!(out, "  {:<12} e.g. set {} {}", field, field, field.example())?;
    }

    // Values that hit the table exactly need no interpolation.
    let model = session.calculator().model();
    let inputs = session.inputs();
    let temperatures = model.temperatures(inputs.fermentation_method);
    writeln!(
        out,
        "\nTable temperatures ({}): {} °C",
        inputs.fermentation_method,
        join(&temperatures)
    )?;
    let stage = inputs.primary_stage();
    writeln!(
        out,
        "Table durations near {:.1}°C: {} hours",
        stage.temperature_celsius,
        join(&model.durations_at(stage.temperature_celsius))
    )?;
    Ok(())
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn report(out: &mut impl Write, err: &dyn std::fmt::Display) -> std::io::Result<()> {
    writeln!(out, "{} {err}", "error:".red().bold())
}
