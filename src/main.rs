// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use bucket_transfer::storage::{StorageConfig, StorageType};
use bucket_transfer::{StorageResult, TransferGateway, TriggerFile};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bucket-transfer")]
#[command(about = "Download and upload files against object storage buckets", long_about = None)]
struct Cli {
    #[arg(long, default_value = "gcs", help = "Storage backend: gcs or local")]
    storage: StorageType,

    #[arg(long, help = "JSON storage config file; takes precedence over --storage")]
    config: Option<PathBuf>,

    #[arg(short = 'o', long = "option", value_parser = parse_key_value, help = "Backend option as key=value, repeatable")]
    options: Vec<(String, String)>,

    #[arg(long, help = "Concurrent transfers for upload-dir")]
    max_workers: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Download one object into a local directory")]
    Download {
        #[arg(long)]
        bucket: String,
        #[arg(long, help = "Object key within the bucket")]
        object: String,
        #[arg(long)]
        output_dir: PathBuf,
        #[arg(long, help = "Local file name (default: last segment of the key)")]
        file_name: Option<String>,
    },
    #[command(about = "Upload one file; fails if the object already exists")]
    Upload {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        file: PathBuf,
        #[arg(long, help = "Destination object key")]
        destination: String,
    },
    #[command(name = "upload-dir", about = "Upload a directory tree, skipping existing objects")]
    UploadDir {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        source: PathBuf,
        #[arg(long, help = "Key prefix the tree is placed under")]
        target_dir: String,
        #[arg(long, value_parser = ["json"], help = "Output format: json (default: plain)")]
        output: Option<String>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn build_config(cli: &Cli) -> StorageResult<StorageConfig> {
    let config = match &cli.config {
        Some(path) => StorageConfig::from_json_file(path)?,
        None => match cli.storage {
            StorageType::Gcs => StorageConfig::gcs(),
            StorageType::Local => StorageConfig::local(),
        },
    };
    Ok(config.with_options(cli.options.iter().cloned().collect()))
}

fn build_gateway(cli: &Cli) -> StorageResult<TransferGateway> {
    let mut builder = TransferGateway::builder(build_config(cli)?);
    if let Some(max_workers) = cli.max_workers {
        builder = builder.with_max_workers(max_workers);
    }
    Ok(builder.build())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let gateway = build_gateway(&cli)?;
    info!("Starting bucket-transfer with {:?}", gateway);

    match cli.command {
        Commands::Download {
            bucket,
            object,
            output_dir,
            file_name,
        } => {
            let file = match file_name {
                Some(name) => TriggerFile::with_file_name(object, name),
                None => TriggerFile::new(object),
            };
            match gateway.download_gcs_file(&file, &output_dir, &bucket).await? {
                Some(path) => println!("{}", path.display()),
                None => {
                    eprintln!("Object \"{}\" not found in bucket \"{}\"", file, bucket);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Upload {
            bucket,
            file,
            destination,
        } => match gateway.upload_gcs_file(&file, &destination, &bucket).await {
            Ok(()) => println!("{}", destination),
            Err(e) if e.is_already_exists() => {
                eprintln!(
                    "Object \"{}\" already exists in bucket \"{}\"; not overwritten",
                    destination, bucket
                );
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::UploadDir {
            bucket,
            source,
            target_dir,
            output,
        } => {
            let summary = gateway.upload_gcs_dir(&source, &bucket, &target_dir).await?;
            if matches!(output.as_deref(), Some("json")) {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary);
                for (path, error) in &summary.failed {
                    println!("failed: {} ({})", path, error);
                }
            }
            if !summary.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
