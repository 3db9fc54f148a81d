use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use stress_predictor::config::{DEFAULT_MODEL_PATH, DEFAULT_SCHEMA_PATH};
use stress_predictor::presenter::{render_form, render_header};
use stress_predictor::{
    command::USAGE, AppConfig, Classifier, Command, Predictor, RuntimeConfig, Session, StressError,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ONNX classifier artifact
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Path to the JSON schema document (feature names and stats)
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    /// Expected SHA-256 of the model artifact
    #[arg(long)]
    model_sha256: Option<String>,

    /// Intra-op threads for ONNX Runtime (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    intra_threads: usize,
}

impl Args {
    fn into_config(self) -> AppConfig {
        AppConfig {
            model_path: self.model,
            schema_path: self.schema,
            model_sha256: self.model_sha256,
            runtime: RuntimeConfig {
                intra_threads: self.intra_threads,
                ..RuntimeConfig::default()
            },
        }
    }
}

fn main() -> ExitCode {
    stress_predictor::init_logger();
    let config = Args::parse().into_config();

    let app = match config.load() {
        Ok(app) => app,
        Err(e) => {
            report_startup_error(&e);
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded model '{}'", app.classifier.model_path());

    let session = Session::new(Predictor::new(&app.schema, &app.classifier));
    match run(session, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Terminal error: {:#}", e);
            eprintln!("Lỗi: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn report_startup_error(err: &StressError) {
    error!("Startup failed: {}", err);
    eprintln!("Lỗi: {}", err);
    if let StressError::ConfigNotFound { resource, .. } = err {
        eprintln!("{}", resource.hint());
    }
}

fn run<C, R, W>(mut session: Session<'_, C>, mut input: R, mut out: W) -> anyhow::Result<()>
where
    C: Classifier + ?Sized,
    R: BufRead,
    W: Write,
{
    write!(out, "{}\n{}\n{}\n", render_header(), render_form(session.form()), USAGE)
        .context("failed to draw the form")?;

    // Invalid UTF-8 is decoded lossily so a bad line becomes an inline error.
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).context("failed to read input")? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Set { address, value }) => match session.set_value(&address, value) {
                Ok(applied) if applied != value => {
                    writeln!(out, "Giá trị đã được giới hạn thành {}", applied)?;
                }
                Ok(_) => {}
                Err(e) => writeln!(out, "{}", e)?,
            },
            Ok(Command::Predict) => {
                if let Some(text) = session.trigger().render() {
                    write!(out, "{}", text)?;
                }
            }
            Ok(Command::Show) => {
                write!(out, "{}", render_form(session.form()))?;
                if let Some(text) = session.state().render() {
                    write!(out, "\n{}", text)?;
                }
            }
            Ok(Command::Reset) => {
                session.reset();
                write!(out, "{}", render_form(session.form()))?;
            }
            Ok(Command::Help) => writeln!(out, "{}", USAGE)?,
            Ok(Command::Quit) => break,
            Err(message) => writeln!(out, "{}", message)?,
        }
        out.flush()?;
    }

    Ok(())
}
