use metalens::metadata::export::{
    ExportFormat, export_file_name, parse_export_format, render_metadata,
};
use metalens::metadata::report::AnalysisReport;
use metalens::privacy::has_location_findings;
use metalens::{ExtractionOptions, MetadataError, PrivacyFinding, analyze, extract_file};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Uso: metalens <archivo> [--config opciones.json] [--format json|txt] \
[--max-size BYTES] [--no-pdf-fallback] [--save DIRECTORIO] [--report]";
const HELP: &str = "MetaLens: metadata y privacidad de imágenes y PDFs";

struct CliArgs {
    path: PathBuf,
    format: ExportFormat,
    options: ExtractionOptions,
    save_dir: Option<PathBuf>,
    report: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if args.report {
                print_json(&AnalysisReport::error(error.to_string()));
            } else {
                eprintln!("Error: {error}");
            }
            // 1 para errores de entrada, 3 para fallas internas.
            ExitCode::from(if error.is_client_error() { 1 } else { 3 })
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Las opciones que siguen a `--config` sobrescriben los valores del archivo.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut path = None;
    let mut format = ExportFormat::Txt;
    let mut options = ExtractionOptions::default();
    let mut save_dir = None;
    let mut report = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("Falta el valor de --config")?;
                options = load_options(Path::new(&value))?;
            }
            "--format" => {
                let value = args.next().ok_or("Falta el valor de --format")?;
                format = parse_export_format(&value).map_err(|error| error.to_string())?;
            }
            "--max-size" => {
                let value = args.next().ok_or("Falta el valor de --max-size")?;
                options.max_file_size = value
                    .parse()
                    .map_err(|_| format!("Tamaño inválido: {value}"))?;
            }
            "--no-pdf-fallback" => options.pdf_fallback = false,
            "--save" => {
                let value = args.next().ok_or("Falta el valor de --save")?;
                save_dir = Some(PathBuf::from(value));
            }
            "--report" => report = true,
            "-h" | "--help" => return Err(HELP.into()),
            flag if flag.starts_with("--") => return Err(format!("Opción desconocida: {flag}")),
            _ if path.is_some() => return Err(format!("Argumento inesperado: {arg}")),
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    Ok(CliArgs {
        path: path.ok_or("Falta la ruta del archivo")?,
        format,
        options,
        save_dir,
        report,
    })
}

fn load_options(path: &Path) -> Result<ExtractionOptions, String> {
    let contents = fs::read_to_string(path)
        .map_err(|error| format!("No se pudo leer {}: {error}", path.display()))?;
    ExtractionOptions::from_json(&contents).map_err(|error| error.to_string())
}

fn run(args: &CliArgs) -> Result<(), MetadataError> {
    debug!(path = %args.path.display(), "reading file");
    let metadata = extract_file(&args.path, &args.options)?;
    let findings = analyze(&metadata);
    info!(
        fields = metadata.len(),
        findings = findings.len(),
        "metadata analyzed"
    );

    if args.report {
        let report = AnalysisReport::success(file_name(&args.path), metadata, findings);
        print_json(&report);
        return Ok(());
    }

    let rendered = render_metadata(&metadata, args.format)?;
    if let Some(dir) = &args.save_dir {
        let target = dir.join(export_file_name(&file_name(&args.path), args.format));
        fs::write(&target, &rendered)?;
        info!(path = %target.display(), "metadata exported");
    }
    print!("{rendered}");

    if let Some(failure) = findings.iter().find(|finding| finding.is_error()) {
        warn!(reason = %failure.description, "privacy analysis incomplete");
        println!("\n{}", failure.description);
        return Ok(());
    }

    if findings.is_empty() {
        println!("\nNo se encontraron campos sensibles.");
        return Ok(());
    }

    println!("\nPosibles riesgos de privacidad ({}):", findings.len());
    for finding in &findings {
        print_finding(finding);
    }
    if has_location_findings(&findings) {
        println!(
            "\nEl archivo revela una ubicación. \
             Considera limpiar la metadata antes de compartirlo."
        );
    }
    Ok(())
}

fn print_finding(finding: &PrivacyFinding) {
    println!(
        "  - {}: {} [{}]",
        finding.field, finding.description, finding.value
    );
}

fn print_json(report: &AnalysisReport) {
    match report.to_json() {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("Error al serializar el reporte: {error}"),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
