use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use student_cleaner::cleaner::{DatasetCleaner, clean_file};
use student_cleaner::config::CleanerConfig;

#[derive(Parser)]
#[command(
    name = "student_cleaner",
    about = "Clean a student performance CSV dataset"
)]
pub struct Cli {
    /// Directory for program_logging.log and warnings.log
    #[arg(long, global = true, env = "STUDENT_CLEANER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full cleaning pipeline and write the cleaned CSV
    Clean {
        /// Path to the raw CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Destination of the cleaned CSV. Defaults to `cleaned_<input name>` next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a JSON cleaning configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load and rename a dataset, then print its profile as JSON
    Inspect {
        /// Path to the CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Path to a JSON cleaning configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as JSON
    Config,
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Clean {
            input,
            output,
            config,
        } => handle_clean(&input, output, config.as_deref()),
        Commands::Inspect { input, config } => handle_inspect(&input, config.as_deref()),
        Commands::Config => {
            println!("{}", CleanerConfig::default().to_json()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CleanerConfig> {
    match path {
        Some(path) => CleanerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CleanerConfig::default()),
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "output.csv".to_owned());
    input.with_file_name(format!("cleaned_{name}"))
}

fn handle_clean(input: &Path, output: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let output = output.unwrap_or_else(|| default_output_path(input));

    println!("Cleaning {} -> {}", input.display(), output.display());
    let report = clean_file(input, &output, &config).map_err(|e| {
        tracing::error!("File processing ERROR occurred: [{e}]");
        e
    })?;

    println!("{report}");
    for warning in &report.warnings {
        println!(
            "  row {} [{}] {:?}: {}",
            warning.row, warning.column, warning.value, warning.kind
        );
    }
    Ok(())
}

fn handle_inspect(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut cleaner = DatasetCleaner::load(input, config)?;
    cleaner.rename_columns()?;
    let info = cleaner.dataset_info()?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/Students_Performance.csv")),
            PathBuf::from("data/cleaned_students_performance.csv")
        );
    }

    #[test]
    fn test_cli_parses_clean() {
        let cli = Cli::try_parse_from([
            "student_cleaner",
            "clean",
            "--input",
            "raw.csv",
            "--output",
            "out.csv",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Clean { output: Some(_), config: None, .. })
        ));
    }
}
