use bitqr::output::{render_text, write_to_file};
use bitqr::{decode, encode, EcLevel, QrMatrix, QrOptions};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "BitQR encode/decode tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and print (or save) the module matrix
    Encode {
        /// Payload text
        payload: String,
        /// Fixed version 1-40 (default: smallest that fits)
        #[arg(long)]
        version: Option<u8>,
        /// Error correction level: L, M, Q or H
        #[arg(long, default_value = "L")]
        ec_level: char,
        /// Fixed mask pattern 0-7 (default: lowest penalty)
        #[arg(long)]
        mask: Option<u8>,
        /// Quiet zone width in modules
        #[arg(long, default_value_t = 4)]
        quiet_zone: usize,
        /// Invert dark and light modules
        #[arg(long)]
        invert: bool,
        /// Write `#`/`.` rows to a file instead of printing blocks
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Decode a matrix from its `#`/`.` text form
    Decode {
        /// Path to the text matrix
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            payload,
            version,
            ec_level,
            mask,
            quiet_zone,
            invert,
            out,
        } => encode_cmd(&payload, version, ec_level, mask, quiet_zone, invert, out.as_deref()),
        Command::Decode { input } => decode_cmd(&input),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(
    payload: &str,
    version: Option<u8>,
    ec_level: char,
    mask: Option<u8>,
    quiet_zone: usize,
    invert: bool,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = QrOptions::new()
        .with_ec_level(EcLevel::from_letter(ec_level)?)
        .with_quiet_zone_size(quiet_zone)?
        .with_invert_matrix(invert);
    if let Some(v) = version {
        options = options.with_version(v)?;
    }
    if let Some(m) = mask {
        options = options.with_mask_pattern(m)?;
    }

    let matrix = encode(payload, &options)?;
    match out {
        Some(path) => {
            write_to_file(path, matrix.without_quiet_zone().to_text().as_bytes())?;
            eprintln!(
                "wrote version {} matrix to {}",
                matrix.version().number(),
                path.display()
            );
        }
        None => print!("{}", render_text(&matrix, &options)),
    }
    Ok(())
}

fn decode_cmd(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(input)?;
    let matrix = QrMatrix::from_text(&text)?;
    println!("{}", decode(&matrix)?);
    Ok(())
}
