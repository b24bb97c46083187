//! RTTEX CLI - Command-line tool for converting RTTEX game textures.
//!
//! This is the main entry point for the rttex command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use rttex::pack::DEFAULT_LEVEL;
use rttex::prelude::*;

/// rttex - RTTEX texture conversion tool
#[derive(Parser)]
#[command(name = "rttex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an RTTEX texture to an image
    Decode {
        /// Input RTTEX file
        #[arg(short, long)]
        input: PathBuf,

        /// Output image file (format from extension)
        #[arg(short, long)]
        output: PathBuf,

        /// Keep the power-of-two padding instead of cropping
        #[arg(long)]
        keep_padding: bool,
    },

    /// Convert an image to an RTTEX texture
    Encode {
        /// Input image file
        #[arg(short, long)]
        input: PathBuf,

        /// Output RTTEX file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        encode: EncodeArgs,
    },

    /// Show the headers of an RTTEX file
    Info {
        /// Input RTTEX file
        #[arg(short, long)]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert every matching file in a directory
    Batch {
        /// Conversion direction
        #[arg(short, long, value_enum)]
        direction: Direction,

        /// Input directory
        #[arg(short, long, env = "RTTEX_INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "RTTEX_OUTPUT_DIR")]
        output: PathBuf,

        /// File name pattern (default: *.rttex or *.png)
        #[arg(short, long)]
        filter: Option<String>,

        /// Keep the power-of-two padding when decoding
        #[arg(long)]
        keep_padding: bool,

        #[command(flatten)]
        encode: EncodeArgs,
    },
}

#[derive(clap::Args, Clone, Copy)]
struct EncodeArgs {
    /// zlib compression level
    #[arg(long, env = "RTTEX_LEVEL", default_value_t = DEFAULT_LEVEL,
          value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// Store the texture without compression
    #[arg(long)]
    store: bool,

    /// Flatten transparency onto an opaque color (RRGGBB)
    #[arg(long, value_parser = parse_hex_color)]
    flatten: Option<[u8; 3]>,
}

impl EncodeArgs {
    fn options(&self) -> EncodeOptions {
        EncodeOptions {
            compression: if self.store {
                CompressionType::None
            } else {
                CompressionType::Zlib
            },
            level: self.level,
            flatten: self.flatten,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// RTTEX to image
    Decode,
    /// Image to RTTEX
    Encode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Decode {
            input,
            output,
            keep_padding,
        } => {
            cmd_decode(&input, &output, keep_padding)?;
        }
        Commands::Encode {
            input,
            output,
            encode,
        } => {
            cmd_encode(&input, &output, &encode.options())?;
        }
        Commands::Info { input, json } => {
            cmd_info(&input, json)?;
        }
        Commands::Batch {
            direction,
            input,
            output,
            filter,
            keep_padding,
            encode,
        } => {
            cmd_batch(
                direction,
                &input,
                &output,
                filter.as_deref(),
                keep_padding,
                &encode.options(),
            )?;
        }
    }

    Ok(())
}

fn cmd_decode(input: &Path, output: &Path, keep_padding: bool) -> Result<()> {
    println!("Decoding: {} -> {}", input.display(), output.display());

    let options = DecodeOptions {
        crop: !keep_padding,
    };
    let texture = decode_file(&ImageRasterCodec::new(), input, output, &options)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    println!(
        "Wrote {}x{} image ({} channels)",
        if keep_padding { texture.width } else { texture.original_width },
        if keep_padding { texture.height } else { texture.original_height },
        texture.channels()
    );

    Ok(())
}

fn cmd_encode(input: &Path, output: &Path, options: &EncodeOptions) -> Result<()> {
    println!("Encoding: {} -> {}", input.display(), output.display());

    let size = encode_file(&ImageRasterCodec::new(), input, output, options)
        .with_context(|| format!("Failed to encode {}", input.display()))?;

    println!("Wrote {} bytes", size);

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let info = inspect(&data).context("Failed to parse RTTEX file")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("File:        {}", input.display());
    println!("Size:        {} bytes (CRC32C {:#010x})", info.container_size, info.checksum);

    match &info.envelope {
        Some(envelope) => println!(
            "Envelope:    {} v{}, {:?}, {} -> {} bytes",
            envelope.header.tag_str(),
            envelope.header.version,
            envelope.compression,
            envelope.compressed_size,
            envelope.decompressed_size
        ),
        None => println!("Envelope:    none"),
    }

    let texture = &info.texture;
    println!("Texture:     {} v{}", texture.header.tag_str(), texture.header.version);
    println!("Dimensions:  {}x{}", texture.width, texture.height);
    println!("Original:    {}x{}", texture.original_width, texture.original_height);
    println!("Format:      {}", texture.format);
    println!("Alpha:       {}", texture.uses_alpha);
    println!("Compressed:  {}", texture.already_compressed);
    println!(
        "Mipmaps:     {} ({} not read)",
        texture.mipmap_count, info.ignored_mip_levels
    );
    println!(
        "Mip 0:       {}x{}, {} bytes",
        info.mip.width, info.mip.height, info.mip.data_size
    );

    Ok(())
}

fn cmd_batch(
    direction: Direction,
    input: &Path,
    output: &Path,
    filter: Option<&str>,
    keep_padding: bool,
    encode_options: &EncodeOptions,
) -> Result<()> {
    let (default_filter, extension) = match direction {
        Direction::Decode => ("*.rttex", "png"),
        Direction::Encode => ("*.png", "rttex"),
    };
    let pattern = input.join(filter.unwrap_or(default_filter));
    let pattern = pattern.to_string_lossy();

    let files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid filter pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    println!("Converting {} files...", files.len());
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let codec = ImageRasterCodec::new();
    let decode_options = DecodeOptions {
        crop: !keep_padding,
    };

    let start = Instant::now();
    let failures: Vec<(PathBuf, String)> = files
        .par_iter()
        .filter_map(|path| {
            let stem = path.file_stem().unwrap_or(path.as_os_str());
            let target = output.join(format!("{}.{}", stem.to_string_lossy(), extension));

            let result = match direction {
                Direction::Decode => {
                    decode_file(&codec, path, &target, &decode_options).map(|_| ())
                }
                Direction::Encode => {
                    encode_file(&codec, path, &target, encode_options).map(|_| ())
                }
            };
            pb.inc(1);

            result.err().map(|e| (path.clone(), e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done");

    for (path, error) in &failures {
        tracing::error!("{}: {}", path.display(), error);
    }
    println!(
        "Converted {} files in {:?} ({} errors)",
        files.len() - failures.len(),
        start.elapsed(),
        failures.len()
    );

    Ok(())
}

/// Parse an `RRGGBB` hex color, with or without a leading `#`.
fn parse_hex_color(s: &str) -> std::result::Result<[u8; 3], String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got {:?}", s));
    }

    let mut color = [0u8; 3];
    for (i, channel) in color.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| format!("invalid hex color {:?}", s))?;
    }
    Ok(color)
}
