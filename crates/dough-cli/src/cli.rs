use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use dough_session::{Edit, ExportFormat, FermentationMethod, Field, YeastType};

#[derive(Parser)]
#[command(
    name = "dough",
    about = "Pizza dough calculator: ingredient weights and yeast dose from time and temperature",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Recipe store directory
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Configuration file (default: <config dir>/dough/dough.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Edit a recipe interactively (the default)
    Session,
    /// Compute a recipe and print it
    Compute(RecipeArgs),
    /// Compute a recipe and save it under a name
    Save(SaveArgs),
    /// Load a saved recipe and print it, recomputed
    Load(NameArgs),
    /// List saved recipes
    List,
    /// Delete a saved recipe
    Delete(NameArgs),
    /// Write a saved recipe to a file
    Export(ExportArgs),
    /// Store a recipe read from a TOML or JSON file
    Import(ImportArgs),
    /// Print the yeast reference table
    Table(TableArgs),
}

/// Recipe fields. Anything not given comes from the configured default
/// recipe.
#[derive(Args, Clone, Debug, Default)]
pub struct RecipeArgs {
    /// Total dough weight in grams
    #[arg(long, value_name = "GRAMS", conflicts_with = "balls")]
    pub dough_weight: Option<f64>,
    /// Number of dough balls
    #[arg(long, requires = "ball_weight")]
    pub balls: Option<u32>,
    /// Weight of one dough ball in grams
    #[arg(long, value_name = "GRAMS", requires = "balls")]
    pub ball_weight: Option<f64>,
    /// Water, % of flour
    #[arg(long, value_name = "PERCENT")]
    pub hydration: Option<f64>,
    /// Salt, % of flour
    #[arg(long, value_name = "PERCENT")]
    pub salt: Option<f64>,
    /// Oil, % of flour
    #[arg(long, value_name = "PERCENT")]
    pub oil: Option<f64>,
    /// room, fridge or both
    #[arg(long)]
    pub method: Option<FermentationMethod>,
    /// Proof temperature in °C (the room stage for `both`)
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub temperature: Option<f64>,
    /// Proof time in hours (the room stage for `both`)
    #[arg(long)]
    pub hours: Option<f64>,
    /// Cold stage temperature in °C
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub cold_temperature: Option<f64>,
    /// Cold stage time in hours
    #[arg(long)]
    pub cold_hours: Option<f64>,
    /// fresh, active-dry or instant
    #[arg(long)]
    pub yeast: Option<YeastType>,
}

impl RecipeArgs {
    /// The edits these flags make to a recipe currently using `method`.
    ///
    /// The method goes first so `--temperature`/`--hours` land on the right
    /// stage; sizing goes last so it sees the final percentages.
    pub fn edits(&self, method: FermentationMethod) -> Vec<Edit> {
        let method = self.method.unwrap_or(method);
        let single_cold = method == FermentationMethod::Fridge;
        let mut edits = Vec::new();

        if let Some(m) = self.method {
            edits.push(Edit::Method(m));
        }
        if let Some(t) = self.temperature {
            edits.push(if single_cold {
                Edit::ColdTemperature(t)
            } else {
                Edit::RoomTemperature(t)
            });
        }
        if let Some(h) = self.hours {
            edits.push(if single_cold {
                Edit::ColdHours(h)
            } else {
                Edit::RoomHours(h)
            });
        }
        edits.extend(self.cold_temperature.map(Edit::ColdTemperature));
        edits.extend(self.cold_hours.map(Edit::ColdHours));
        edits.extend(self.hydration.map(Edit::Hydration));
        edits.extend(self.salt.map(Edit::Salt));
        edits.extend(self.oil.map(Edit::Oil));
        edits.extend(self.yeast.map(Edit::Yeast));
        edits.extend(self.dough_weight.map(Edit::DoughWeight));
        if let (Some(count), Some(ball_weight_grams)) = (self.balls, self.ball_weight) {
            edits.push(Edit::Balls {
                count,
                ball_weight_grams,
            });
        }
        edits
    }
}

#[derive(Args)]
pub struct SaveArgs {
    pub name: String,
    /// Fail if a recipe with this name already exists
    #[arg(long)]
    pub no_clobber: bool,
    #[command(flatten)]
    pub recipe: RecipeArgs,
}

#[derive(Args)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Args)]
pub struct ExportArgs {
    pub name: String,
    pub path: PathBuf,
    /// toml, json or text
    #[arg(long = "as", value_name = "FORMAT", default_value = "toml")]
    pub export_format: ExportFormat,
}

#[derive(Args)]
pub struct ImportArgs {
    pub path: PathBuf,
    /// Store under this name instead of the one in the file
    #[arg(long = "as", value_name = "NAME")]
    pub name: Option<String>,
    /// Fail if a recipe with this name already exists
    #[arg(long)]
    pub no_clobber: bool,
}

#[derive(Args)]
pub struct TableArgs {
    /// Only rows for this method
    #[arg(long)]
    pub method: Option<FermentationMethod>,
}

/// One line typed into the interactive session.
#[derive(Parser)]
#[command(
    name = "dough",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Change one field and recompute
    Set {
        field: Field,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print the current recipe
    Show,
    /// Save the current recipe
    Save {
        name: String,
        #[arg(long)]
        no_clobber: bool,
    },
    /// Replace the current recipe with a saved one
    Load { name: String },
    /// List saved recipes
    #[command(alias = "ls")]
    List,
    /// Delete a saved recipe
    #[command(alias = "rm")]
    Delete { name: String },
    /// Write a saved recipe to a file
    Export {
        name: String,
        path: PathBuf,
        #[arg(long = "as", value_name = "FORMAT", default_value = "toml")]
        export_format: ExportFormat,
    },
    /// Store a recipe file and make it the current recipe
    Import {
        path: PathBuf,
        #[arg(long = "as", value_name = "NAME")]
        name: Option<String>,
        #[arg(long)]
        no_clobber: bool,
    },
    /// List the commands and editable fields
    Help,
    /// Leave the session
    #[command(alias = "exit", alias = "q")]
    Quit,
}

/// Split a session line into words. Double quotes group words containing
/// spaces.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".into());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_subcommand() {
        let cli = Cli::try_parse_from(["dough"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "dough", "list", "--store", "/tmp/recipes", "--format", "json", "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::List)));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/recipes")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_compute_flags() {
        let cli = Cli::try_parse_from([
            "dough", "compute", "--balls", "6", "--ball-weight", "280", "--hydration", "70",
            "--method", "cold", "--yeast", "ady",
        ])
        .unwrap();
        let Some(Command::Compute(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.balls, Some(6));
        assert_eq!(args.ball_weight, Some(280.0));
        assert_eq!(args.method, Some(FermentationMethod::Fridge));
        assert_eq!(args.yeast, Some(YeastType::ActiveDry));
    }

    #[test]
    fn balls_need_a_weight() {
        assert!(Cli::try_parse_from(["dough", "compute", "--balls", "4"]).is_err());
        assert!(Cli::try_parse_from([
            "dough", "compute", "--balls", "4", "--ball-weight", "250", "--dough-weight", "900",
        ])
        .is_err());
    }

    #[test]
    fn unknown_yeast_is_rejected() {
        assert!(Cli::try_parse_from(["dough", "compute", "--yeast", "sourdough"]).is_err());
    }

    #[test]
    fn parse_save_no_clobber() {
        let cli =
            Cli::try_parse_from(["dough", "save", "friday", "--no-clobber", "--salt", "3"]).unwrap();
        let Some(Command::Save(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.name, "friday");
        assert!(args.no_clobber);
        assert_eq!(args.recipe.salt, Some(3.0));
    }

    #[test]
    fn parse_export_as() {
        let cli =
            Cli::try_parse_from(["dough", "export", "friday", "out.txt", "--as", "text"]).unwrap();
        let Some(Command::Export(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.export_format, ExportFormat::Text);
        assert_eq!(args.path, PathBuf::from("out.txt"));

        let cli = Cli::try_parse_from(["dough", "export", "friday", "out.toml"]).unwrap();
        let Some(Command::Export(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.export_format, ExportFormat::Toml);
    }

    #[test]
    fn parse_import() {
        let cli = Cli::try_parse_from(["dough", "import", "friday.json", "--as", "saturday"])
            .unwrap();
        let Some(Command::Import(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.path, PathBuf::from("friday.json"));
        assert_eq!(args.name.as_deref(), Some("saturday"));
        assert!(!args.no_clobber);

        let line = SessionLine::try_parse_from(["import", "a.toml", "--no-clobber"]).unwrap();
        assert!(matches!(
            line.command,
            SessionCommand::Import { name: None, no_clobber: true, .. }
        ));
    }

    #[test]
    fn parse_table_method() {
        let cli = Cli::try_parse_from(["dough", "table", "--method", "fridge"]).unwrap();
        let Some(Command::Table(args)) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.method, Some(FermentationMethod::Fridge));
    }

    #[test]
    fn temperature_flags_follow_method() {
        let args = RecipeArgs {
            temperature: Some(5.0),
            hours: Some(72.0),
            ..Default::default()
        };
        assert_eq!(
            args.edits(FermentationMethod::Fridge),
            vec![Edit::ColdTemperature(5.0), Edit::ColdHours(72.0)]
        );
        assert_eq!(
            args.edits(FermentationMethod::Both),
            vec![Edit::RoomTemperature(5.0), Edit::RoomHours(72.0)]
        );

        let switched = RecipeArgs {
            method: Some(FermentationMethod::Fridge),
            ..args
        };
        assert_eq!(
            switched.edits(FermentationMethod::Room),
            vec![
                Edit::Method(FermentationMethod::Fridge),
                Edit::ColdTemperature(5.0),
                Edit::ColdHours(72.0),
            ]
        );
    }

    #[test]
    fn sizing_edits_come_last() {
        let args = RecipeArgs {
            balls: Some(2),
            ball_weight: Some(300.0),
            hydration: Some(60.0),
            ..Default::default()
        };
        let edits = args.edits(FermentationMethod::Room);
        assert_eq!(edits.first(), Some(&Edit::Hydration(60.0)));
        assert_eq!(
            edits.last(),
            Some(&Edit::Balls {
                count: 2,
                ball_weight_grams: 300.0
            })
        );
    }

    #[test]
    fn parse_session_lines() {
        let line = SessionLine::try_parse_from(["set", "hydration", "70"]).unwrap();
        assert!(matches!(
            line.command,
            SessionCommand::Set { field: Field::Hydration, ref value } if value == "70"
        ));

        let line = SessionLine::try_parse_from(["save", "friday", "--no-clobber"]).unwrap();
        assert!(matches!(line.command, SessionCommand::Save { no_clobber: true, .. }));

        let line = SessionLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, SessionCommand::Quit));

        let line = SessionLine::try_parse_from(["help"]).unwrap();
        assert!(matches!(line.command, SessionCommand::Help));

        assert!(SessionLine::try_parse_from(["set", "sugar", "3"]).is_err());
        assert!(SessionLine::try_parse_from(["bake"]).is_err());
    }

    #[test]
    fn split_line_handles_quotes() {
        assert_eq!(
            split_line("  save \"new york\"  ").unwrap(),
            vec!["save", "new york"]
        );
        assert_eq!(split_line("set balls 4x250").unwrap(), vec!["set", "balls", "4x250"]);
        assert_eq!(split_line("export a \"\"").unwrap(), vec!["export", "a", ""]);
        assert!(split_line("save \"open").is_err());
        assert!(split_line("   ").unwrap().is_empty());
    }
}
