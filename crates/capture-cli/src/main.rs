use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use qa_capture::{
    Answer, FormController, ItemPath, NodeValidation, Primitive, Questionnaire,
    QuestionnaireResponse, ValidationConfig, ValidationReport, ValidatorRegistry, model_schema,
    render_json_ui, render_text,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Questionnaire capture CLI",
    long_about = "Reconciles questionnaire responses, renders the flattened form, and runs constraint validators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Print an empty response that mirrors the questionnaire.
    Init {
        /// Path to the questionnaire JSON.
        #[arg(long, value_name = "QUESTIONNAIRE")]
        questionnaire: PathBuf,
    },
    /// Reconcile a response with its questionnaire and validate every item.
    Check {
        /// Path to the questionnaire JSON.
        #[arg(long, value_name = "QUESTIONNAIRE")]
        questionnaire: PathBuf,
        /// Path to the response JSON.
        #[arg(long, value_name = "RESPONSE")]
        response: PathBuf,
        /// Optional validator configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
    /// Render the flattened form with current answers and validation messages.
    Render {
        /// Path to the questionnaire JSON.
        #[arg(long, value_name = "QUESTIONNAIRE")]
        questionnaire: PathBuf,
        /// Optional response JSON; an empty response is used when omitted.
        #[arg(long, value_name = "RESPONSE")]
        response: Option<PathBuf>,
        /// Optional validator configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Set the answer of one item and write the updated response.
    Answer {
        /// Path to the questionnaire JSON.
        #[arg(long, value_name = "QUESTIONNAIRE")]
        questionnaire: PathBuf,
        /// Optional response JSON; an empty response is used when omitted.
        #[arg(long, value_name = "RESPONSE")]
        response: Option<PathBuf>,
        /// Item path as dot-separated indices, e.g. 0.1.
        #[arg(long, value_name = "PATH")]
        path: ItemPath,
        /// Answer value as tagged JSON, e.g. '{"integer": 5}'.
        #[arg(long, value_name = "JSON")]
        value: String,
        /// Optional validator configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Write the updated response here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the JSON Schemas of the questionnaire, response, and config documents.
    Schema,
}

fn main() -> CliResult<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { questionnaire } => run_init(questionnaire),
        Command::Check {
            questionnaire,
            response,
            config,
        } => run_check(questionnaire, response, config),
        Command::Render {
            questionnaire,
            response,
            config,
            format,
        } => run_render(questionnaire, response, config, format),
        Command::Answer {
            questionnaire,
            response,
            path,
            value,
            config,
            out,
        } => run_answer(questionnaire, response, path, value, config, out),
        Command::Schema => run_schema(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err).into())
}

fn load_registry(config: Option<&Path>) -> CliResult<ValidatorRegistry> {
    let config = match config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
            ValidationConfig::from_json(&raw)?
        }
        None => ValidationConfig::default(),
    };
    let registry = ValidatorRegistry::from_config(&config);
    debug!("validators: {:?}", registry.extension_urls());
    Ok(registry)
}

fn load_controller(
    questionnaire: &Path,
    response: Option<&Path>,
    config: Option<&Path>,
) -> CliResult<FormController> {
    let questionnaire: Questionnaire = read_json(questionnaire)?;
    let response = response
        .map(read_json::<QuestionnaireResponse>)
        .transpose()?;
    let registry = load_registry(config)?;
    // Display text keeps the offending linkIds readable on exit.
    FormController::with_registry(questionnaire, response, registry)
        .map_err(|err| err.to_string().into())
}

fn run_init(questionnaire_path: PathBuf) -> CliResult<()> {
    let questionnaire: Questionnaire = read_json(&questionnaire_path)?;
    let response = qa_capture::synthesize(&questionnaire);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_check(
    questionnaire_path: PathBuf,
    response_path: PathBuf,
    config_path: Option<PathBuf>,
) -> CliResult<()> {
    let mut controller = load_controller(
        &questionnaire_path,
        Some(&response_path),
        config_path.as_deref(),
    )?;
    println!("Structure: ok");

    let report = controller.validate_all();
    println!(
        "Validation result: {}",
        if report.valid { "valid" } else { "invalid" }
    );
    describe_report(&report);

    if report.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_report(report: &ValidationReport) {
    let failures: Vec<&NodeValidation> = report.failures().collect();
    if failures.is_empty() {
        return;
    }
    println!("Errors:");
    for node in failures {
        for message in node.messages() {
            println!("  {} ({}) - {}", node.path, node.link_id, message);
        }
    }
}

fn run_render(
    questionnaire_path: PathBuf,
    response_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let mut controller = load_controller(
        &questionnaire_path,
        response_path.as_deref(),
        config_path.as_deref(),
    )?;
    if response_path.is_some() {
        controller.validate_all();
    }

    let items = controller.view_items();
    match format {
        RenderMode::Text => println!(
            "{}",
            render_text(controller.questionnaire().title.as_deref(), &items)
        ),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&items))?),
    }
    Ok(())
}

fn run_answer(
    questionnaire_path: PathBuf,
    response_path: Option<PathBuf>,
    path: ItemPath,
    raw_value: String,
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
) -> CliResult<()> {
    let value: Primitive = serde_json::from_str(&raw_value).map_err(|err| {
        format!(
            "invalid answer value '{}': {} (expected e.g. {{\"integer\": 5}})",
            raw_value, err
        )
    })?;
    let mut controller = load_controller(
        &questionnaire_path,
        response_path.as_deref(),
        config_path.as_deref(),
    )?;

    let results = controller
        .on_answer_changed(&path, vec![Answer::new(value)])
        .map_err(|err| err.to_string())?;
    let invalid: Vec<&NodeValidation> = results.iter().filter(|node| !node.is_valid()).collect();
    for node in &invalid {
        for message in node.messages() {
            eprintln!("  {} ({}) - {}", node.path, node.link_id, message);
        }
    }

    let rendered = serde_json::to_string_pretty(controller.response())?;
    match out {
        Some(out) => {
            fs::write(&out, format!("{rendered}\n"))?;
            eprintln!("Response written to {}", out.display());
        }
        None => println!("{rendered}"),
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err("answer failed validation".into())
    }
}

fn run_schema() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&model_schema()?)?);
    Ok(())
}
