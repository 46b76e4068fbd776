//! geosite-gen: CLI tool for building the rule database from a data directory.

use clap::{Parser, Subcommand};
use geosite::{parse_export_lists, GeoSiteReader, Generator, GeneratorConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "geosite-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Build a geosite rule database from list files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve all lists and write the binary database
    Generate {
        /// YAML or JSON config file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to the data directory
        #[arg(long)]
        datapath: Option<PathBuf>,

        /// Name of the generated dat file
        #[arg(long)]
        outputname: Option<String>,

        /// Directory to place all generated files
        #[arg(long)]
        outputdir: Option<PathBuf>,

        /// Lists to flatten and export as plaintext, separated by ','
        #[arg(long)]
        exportlists: Option<String>,

        /// Also write a sha256sum file next to the output
        #[arg(long)]
        checksum: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the contents of a generated dat file
    Inspect {
        /// Input dat file
        input: PathBuf,

        /// Print the rules of a single entry
        #[arg(short, long)]
        list: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match &cli.command {
        Commands::Generate { verbose: true, .. } => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Generate {
            config,
            datapath,
            outputname,
            outputdir,
            exportlists,
            checksum,
            verbose: _,
        } => generate(config, datapath, outputname, outputdir, exportlists, checksum),
        Commands::Inspect { input, list } => inspect(&input, list.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate(
    config_path: Option<PathBuf>,
    datapath: Option<PathBuf>,
    outputname: Option<String>,
    outputdir: Option<PathBuf>,
    exportlists: Option<String>,
    checksum: bool,
) -> geosite::Result<()> {
    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(datapath) = datapath {
        config.data_path = datapath;
    }
    if let Some(outputname) = outputname {
        config.output_name = outputname;
    }
    if let Some(outputdir) = outputdir {
        config.output_dir = outputdir;
    }
    if let Some(exportlists) = exportlists {
        config.export_lists = parse_export_lists(&exportlists);
    }
    config.write_checksum |= checksum;

    let summary = Generator::new(config).run()?;
    let name = summary
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("{} has been generated successfully.", name);
    Ok(())
}

fn inspect(input: &Path, list: Option<&str>) -> geosite::Result<()> {
    let reader = GeoSiteReader::open(input)?;

    match list {
        Some(code) => {
            let entry = reader
                .entry(code)
                .ok_or_else(|| geosite::Error::UnknownList(code.to_string()))?;
            for domain in &entry.domains {
                let mut line = format!("{}{}", domain.domain_type.list_prefix(), domain.value);
                for attribute in &domain.attributes {
                    line.push_str(" @");
                    line.push_str(attribute);
                }
                println!("{}", line);
            }
            for cidr in &entry.cidrs {
                println!("{}/{}", cidr.addr()?, cidr.prefix);
            }
        }
        None => {
            println!("{} entries in {:?}", reader.len(), input);
            for entry in reader.entries() {
                println!(
                    "  {:<32} {:>8} domains {:>8} cidrs",
                    entry.country_code,
                    entry.domains.len(),
                    entry.cidrs.len()
                );
            }
        }
    }

    Ok(())
}
