use clap::{Parser, Subcommand};
use crf_mapgen::generate::BuildContext;
use crf_mapgen::{config, driver, output, scan, switch};
use std::path::PathBuf;

/// Shared flags for commands that generate files.
#[derive(clap::Args, Clone)]
struct GenerateArgs {
    /// Fail on duplicate output file names instead of warning
    #[arg(long)]
    strict: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Called once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "crf-mapgen")]
#[command(about = "Generate CRF mapping templates and the FHIR export manifest")]
#[command(long_about = "\
Generate CRF mapping templates and the FHIR export manifest

Your source tree is the data source. Numbered directories run in order, a
directory holding category.toml is one category, and every spreadsheet row
becomes one Groovy template plus one manifest mapping.

Source structure:

  generator/
  ├── generator.toml                 # Root config (optional, cascades to groups)
  ├── 000-Constant/
  │   ├── category.toml              # Static files only
  │   └── patient.groovy             # Copied verbatim, gets its own mapping
  ├── 010-Anamnesis/                 # Group (numbered = built)
  │   ├── 010-Diabetes/
  │   │   ├── category.toml          # Template, row source, FHIR target
  │   │   ├── template_Diabetes      # ##FIELD## placeholders
  │   │   └── values_Diabetes.xlsx   # Header row + one row per output file
  │   └── 030-History-of-Travel/     # Iteration source: ##iter## = 0..count-1
  ├── 030-Laboratory-Values/
  │   ├── generator.toml             # Group config (select_from = LABOR_MAPPING)
  │   └── Messprofile_old/           # No number prefix = skipped
  └── 040-Consent/010-Policy/        # [switch] only: see 'crf-mapgen switch'

Output (--output, cleared on build):

  crf/
  ├── conditionDiabetes_e10.groovy   # <file_name_root><lowercase id>.<ext>
  └── ExportResourceMappingConfig.json

Run 'crf-mapgen gen-config' to generate a documented generator.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "generator", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "crf", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every category and write the manifest
    Build(GenerateArgs),
    /// Validate the source tree and all row sources without writing
    Check(GenerateArgs),
    /// Generate one category into the output directory and print its mappings
    Category {
        /// Category directory, relative to --source
        dir: PathBuf,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Print the Groovy switch function of a category
    Switch {
        /// Category directory, relative to --source
        dir: PathBuf,
    },
    /// Print a stock generator.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    crf_mapgen::init_tracing();

    match cli.command {
        Command::Build(args) => {
            println!("==> Scanning {}", cli.source.display());
            let plan = scan::scan(&cli.source)?;
            output::print_plan_output(&plan);

            println!("==> Generating → {}", cli.output.display());
            let ctx = BuildContext::from_plan(&plan).strict(args.strict);
            let report = driver::build_with(&ctx, &plan, &cli.output)?;
            output::print_build_output(&report);
        }
        Command::Check(args) => {
            println!("==> Checking {}", cli.source.display());
            let plan = scan::scan(&cli.source)?;
            output::print_plan_output(&plan);
            let ctx = BuildContext::from_plan(&plan).strict(args.strict);
            let report = driver::check(&ctx, &plan)?;
            output::print_check_output(&report);
            println!("==> Source is valid");
        }
        Command::Category { dir, args } => {
            let category = scan::scan_category(&cli.source, &cli.source.join(dir))?;
            let ctx = BuildContext::new(&cli.source).strict(args.strict);
            let result = driver::run_category(&ctx, &category, &cli.output)?;
            println!("{}", serde_json::to_string_pretty(result.entries())?);
        }
        Command::Switch { dir } => {
            let category = scan::scan_category(&cli.source, &cli.source.join(dir))?;
            println!("{}", switch::category_switch(&category)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
