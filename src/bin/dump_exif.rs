use clap::Parser;
use exif_reader::jpeg::{self, ContainerError};
use exif_reader::yaml::ExifYamlDumper;
use exif_reader::ExifProfile;
use log::{error, info};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Dump the Exif metadata of a JPEG image (or of a bare Exif / TIFF block) in a human readable
/// yaml-like representation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// input file to get the metadata from
    file: PathBuf,
    /// treat the input as a bare Exif block instead of searching it for a JPEG APP1 segment
    #[arg(short = 'r', long, action)]
    raw: bool,
    /// write the embedded thumbnail to this path
    #[arg(short = 't', long)]
    thumbnail: Option<PathBuf>,
    /// print only the number of entries and the thumbnail location
    #[arg(short = 's', long, action)]
    summary: bool,
    /// prefix every value with its Exif data type
    #[arg(long, action)]
    types: bool,
}

#[derive(Error, Debug)]
enum DumpError {
    #[error("could not read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("the exif data does not contain a thumbnail")]
    NoThumbnail,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), DumpError> {
    let data = fs::read(&args.file).map_err(|source| DumpError::Read {
        path: args.file.clone(),
        source,
    })?;
    let exif_block = if args.raw || !jpeg::is_jpeg(&data) {
        &data[..]
    } else {
        jpeg::find_exif_segment(&data)?
    };
    info!("decoding {} bytes of exif data", exif_block.len());
    let profile = ExifProfile::from_bytes(exif_block);

    if args.summary {
        let thumbnail = profile.thumbnail_locator();
        println!("entries: {}", profile.values().len());
        println!("thumbnail: offset {} length {}", thumbnail.offset, thumbnail.length);
    } else {
        let dumper = ExifYamlDumper {
            dump_types: args.types,
        };
        print!("{}", dumper.dump_profile(&profile));
    }

    if let Some(path) = &args.thumbnail {
        let thumbnail = profile.thumbnail_data().ok_or(DumpError::NoThumbnail)?;
        fs::write(path, thumbnail).map_err(|source| DumpError::Write {
            path: path.clone(),
            source,
        })?;
        info!("wrote {} byte thumbnail to {}", thumbnail.len(), path.display());
    }
    Ok(())
}
