use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nbt::decode_document;
use tools::{
    document_to_json, inspect_level_dat, is_zip_payload, render_document_pretty, InspectReport,
    McworldArchive,
};
use world::{
    convert_level_dat, convert_world, detect_header, LevelDatHeader, NoProgress, ProgressSink,
    Stage, WorldArchive, LEVEL_DAT_ENTRY,
};

#[derive(Parser)]
#[command(
    name = "edustrip",
    version,
    about = "Convert Education Edition worlds to standard Bedrock"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Strip the Education Edition keys from a world.
    Convert {
        /// Path to a .mcworld archive or a bare level.dat file.
        input: PathBuf,
        /// Where to write the converted world. Defaults to `<input>-converted`
        /// next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Suppress progress output on stderr.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Summarize a world's level.dat without modifying anything.
    Inspect {
        /// Path to a .mcworld archive or a bare level.dat file.
        input: PathBuf,
    },
    /// Print the decoded level.dat tag tree.
    Dump {
        /// Path to a .mcworld archive or a bare level.dat file.
        input: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DumpFormat::Pretty)]
        format: DumpFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DumpFormat {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            input,
            output,
            quiet,
        } => convert(&input, output, quiet),
        Command::Inspect { input } => inspect(&input),
        Command::Dump { input, format } => dump(&input, format),
    }
}

fn convert(input: &Path, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let output = output.unwrap_or_else(|| default_output_path(input));

    let mut printer = |stage: Stage| eprintln!("{stage}");
    let mut silent = NoProgress;
    let sink: &mut dyn ProgressSink = if quiet { &mut silent } else { &mut printer };

    let (converted, removed, header) = if is_zip_payload(&bytes) {
        let archive = McworldArchive::open(bytes).context("open world archive")?;
        let outcome = convert_world(archive, sink)?;
        (outcome.bytes, outcome.removed, outcome.header)
    } else {
        let outcome = convert_level_dat(&bytes, sink)?;
        (outcome.bytes, outcome.removed, outcome.header)
    };

    report_conversion(header, &removed);
    fs::write(&output, converted).with_context(|| format!("write {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let level_dat = load_level_dat(input)?;
    let report = inspect_level_dat(&level_dat)?;
    print_inspect_report(&report);
    Ok(())
}

fn dump(input: &Path, format: DumpFormat) -> Result<()> {
    let level_dat = load_level_dat(input)?;
    let (_, body) = detect_header(&level_dat);
    let (document, _) = decode_document(body).context("decode level.dat")?;
    match format {
        DumpFormat::Pretty => print!("{}", render_document_pretty(&document)),
        DumpFormat::Json => {
            let json =
                serde_json::to_string_pretty(&document_to_json(&document)).context("serialize json")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Reads `input`, pulling level.dat out of the archive when the input is
/// a zip payload.
fn load_level_dat(input: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    if !is_zip_payload(&bytes) {
        return Ok(bytes);
    }
    let mut archive = McworldArchive::open(bytes).context("open world archive")?;
    let level_dat = archive
        .read_entry(LEVEL_DAT_ENTRY)
        .context("read level.dat from the archive")?;
    Ok(level_dat)
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("world");
    let name = match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}-converted.{ext}"),
        None => format!("{stem}-converted"),
    };
    input.with_file_name(name)
}

fn report_conversion(header: Option<LevelDatHeader>, removed: &[&'static str]) {
    if let Some(header) = header {
        println!(
            "detected header: version {}, payload {} bytes",
            header.version, header.payload_len
        );
    }
    if removed.is_empty() {
        println!("no Education Edition keys found");
    }
    for key in removed {
        println!("removed {key}");
    }
}

fn counted(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn print_inspect_report(report: &InspectReport) {
    if let Some(header) = report.header {
        println!(
            "header: version {}, payload {} bytes",
            header.version, header.payload_len
        );
    } else {
        println!("header: none");
    }
    let root_entries = counted(report.entries.len(), "entry", "entries");
    if report.root_name.is_empty() {
        println!("root: unnamed compound, {root_entries}");
    } else {
        println!("root: compound {:?}, {root_entries}", report.root_name);
    }
    for entry in &report.entries {
        println!(
            "  {}: {} ({})",
            entry.name,
            entry.kind,
            counted(entry.payload_bytes, "byte", "bytes")
        );
    }
    if report.education_keys.is_empty() {
        println!("education keys: none");
    } else {
        println!("education keys: {}", report.education_keys.join(", "));
    }
    if report.trailing_bytes > 0 {
        println!("trailing bytes: {}", report.trailing_bytes);
    }
}
