use std::io::{self, Write};

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use dough_calc::Calculator;
use dough_session::{
    CalcError, Calculation, FermentationMethod, RecipeInputs, RecipeOutputs, SavedRecipe, Session,
    StoreError,
};
use dough_store::{FsRecipeStore, RecipeStore};
use dough_yeast::YeastModel;

use crate::cli::{Cli, Command, OutputFormat, RecipeArgs, TableArgs};
use crate::config::AppConfig;
use crate::repl;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref());

    let custom;
    let model = match &config.yeast_table {
        Some(path) => {
            custom = YeastModel::from_path(path)
                .with_context(|| format!("loading yeast table {}", path.display()))?;
            &custom
        }
        None => YeastModel::builtin(),
    };

    let store_dir = config.store_dir(cli.store.as_deref());
    let store = FsRecipeStore::open(&store_dir)
        .with_context(|| format!("opening recipe store {}", store_dir.display()))?;
    let mut session = Session::new(
        Calculator::new(model),
        store,
        config.default_recipe.to_inputs(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match cli.command {
        None | Some(Command::Session) => {
            let stdin = io::stdin();
            repl::run(&mut session, stdin.lock(), &mut out)
        }
        Some(Command::Compute(args)) => {
            apply_flags(&mut session, &args)?;
            print_session(&mut out, &session, format)
        }
        Some(Command::Save(args)) => {
            apply_flags(&mut session, &args.recipe)?;
            let saved = if args.no_clobber {
                session.create(&args.name)?
            } else {
                session.save(&args.name)?
            };
            match format {
                OutputFormat::Text => writeln!(
                    out,
                    "{} Saved {} to {}",
                    "✓".green().bold(),
                    saved.name.yellow(),
                    session.store().path_for(&saved.name).display()
                )?,
                OutputFormat::Json => print_json(&mut out, &saved)?,
            }
            Ok(())
        }
        Some(Command::Load(args)) => {
            let saved = session.load(&args.name)?;
            match format {
                OutputFormat::Text => {
                    writeln!(
                        out,
                        "{} (saved {})",
                        saved.name.yellow().bold(),
                        saved.created_at.format("%Y-%m-%d %H:%M UTC")
                    )?;
                    print_session(&mut out, &session, format)
                }
                OutputFormat::Json => print_json(&mut out, &recomputed(&saved, &session)?),
            }
        }
        Some(Command::List) => {
            let names = session.list()?;
            match format {
                OutputFormat::Text => print_names(&mut out, &names)?,
                OutputFormat::Json => print_json(&mut out, &names)?,
            }
            Ok(())
        }
        Some(Command::Delete(args)) => {
            if !session.delete(&args.name)? {
                return Err(StoreError::NotFound { name: args.name }.into());
            }
            writeln!(out, "Deleted recipe {}", args.name.yellow())?;
            Ok(())
        }
        Some(Command::Export(args)) => {
            session.export(&args.name, &args.path, args.export_format)?;
            writeln!(
                out,
                "{} Exported {} as {} to {}",
                "✓".green().bold(),
                args.name.yellow(),
                args.export_format,
                args.path.display()
            )?;
            Ok(())
        }
        Some(Command::Import(args)) => {
            let saved = session.import(&args.path, args.name.as_deref(), args.no_clobber)?;
            match format {
                OutputFormat::Text => {
                    writeln!(
                        out,
                        "{} Imported {} from {}",
                        "✓".green().bold(),
                        saved.name.yellow(),
                        args.path.display()
                    )?;
                    print_session(&mut out, &session, format)
                }
                OutputFormat::Json => print_json(&mut out, &recomputed(&saved, &session)?),
            }
        }
        Some(Command::Table(args)) => print_table(&mut out, model, &args, format),
    }
}

/// Apply recipe flags to the session, stopping at the first rejected edit.
pub fn apply_flags<S: RecipeStore>(
    session: &mut Session<'_, S>,
    args: &RecipeArgs,
) -> Result<(), CalcError> {
    for edit in args.edits(session.inputs().fermentation_method) {
        session.apply(edit)?;
    }
    Ok(())
}

/// Machine-readable view of one calculation.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    inputs: &'a RecipeInputs,
    outputs: &'a RecipeOutputs,
    yeast_percent: f64,
    notices: Vec<String>,
}

fn recomputed<'a, S: RecipeStore>(
    saved: &'a SavedRecipe,
    session: &'a Session<'_, S>,
) -> anyhow::Result<Report<'a>> {
    let calc = session.latest().map_err(Clone::clone)?;
    Ok(Report {
        name: Some(&saved.name),
        inputs: session.inputs(),
        outputs: &calc.outputs,
        yeast_percent: calc.yeast_percent,
        notices: session.notices(),
    })
}

/// Print the session's current recipe, or the reason it does not compute.
pub fn print_session<S: RecipeStore>(
    out: &mut impl Write,
    session: &Session<'_, S>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let calc = session.latest().map_err(Clone::clone)?;
    match format {
        OutputFormat::Text => print_calculation(out, session.inputs(), calc)?,
        OutputFormat::Json => print_json(
            out,
            &Report {
                name: session.current_name(),
                inputs: session.inputs(),
                outputs: &calc.outputs,
                yeast_percent: calc.yeast_percent,
                notices: session.notices(),
            },
        )?,
    }
    Ok(())
}

pub fn print_calculation(
    out: &mut impl Write,
    inputs: &RecipeInputs,
    calc: &Calculation,
) -> io::Result<()> {
    writeln!(
        out,
        "{} · {} ({:.3}% of flour)",
        inputs.fermentation_method.label().bold(),
        inputs.yeast_type.label().cyan(),
        calc.yeast_percent
    )?;
    writeln!(out, "{}", dough_calc::recipe_card(inputs, &calc.outputs))?;
    for clamp in &calc.clamped {
        writeln!(
            out,
            "{} {}",
            "warning:".yellow().bold(),
            dough_session::describe_clamp(clamp)
        )?;
    }
    Ok(())
}

pub fn print_names(out: &mut impl Write, names: &[String]) -> io::Result<()> {
    if names.is_empty() {
        writeln!(out, "No saved recipes.")?;
    }
    for name in names {
        writeln!(out, "  {}", name.yellow())?;
    }
    Ok(())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{text}")?;
    Ok(())
}

fn print_table(
    out: &mut impl Write,
    model: &YeastModel,
    args: &TableArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let table = model.table();
    let rows = match args.method {
        Some(method) => table.rows_for(method),
        None => table.rows().iter().collect(),
    };

    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "method": row.method,
                        "temperature_celsius": row.temperature_celsius,
                        "hours": row.hours,
                    })
                })
                .collect();
            print_json(
                out,
                &serde_json::json!({
                    "reference_yeast": table.reference_yeast(),
                    "yeast_percent": table.yeast_percent(),
                    "rows": rows,
                }),
            )
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "Hours to full fermentation by {} dose (% of flour)",
                table.reference_yeast().label()
            )?;
            write!(out, "{:>10}", "°C")?;
            for dose in table.yeast_percent() {
                write!(out, "{:>7}", format!("{dose}%"))?;
            }
            writeln!(out)?;
            for row in rows {
                let label = format!("{:.1} {}", row.temperature_celsius, short(row.method));
                write!(out, "{label:>10}")?;
                for hours in &row.hours {
                    write!(out, "{hours:>7.1}")?;
                }
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn short(method: FermentationMethod) -> &'static str {
    match method {
        FermentationMethod::Room => "R",
        FermentationMethod::Fridge => "F",
        FermentationMethod::Both => "B",
    }
}
