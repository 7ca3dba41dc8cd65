//! Runner: resolves configuration, builds the client and dispatches commands

use crate::cli::args::{Args, Command};
use crate::config::{CREDENTIALS_FILE, RegistryConfig};
use crate::error::{RegistryError, Result};
use crate::logging::Logger;
use crate::registry::{ImageRegistry, RegistryClient};
use chrono::SecondsFormat;
use std::path::Path;

pub struct Runner {
    args: Args,
    output: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Result<Self> {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        Ok(Self { args, output })
    }

    /// Replace the logger chosen from the command line flags
    pub fn with_output(mut self, output: Logger) -> Self {
        self.output = output;
        self
    }

    pub fn output(&self) -> &Logger {
        &self.output
    }

    pub async fn run(&self) -> Result<()> {
        self.args.validate().map_err(RegistryError::InvalidArgument)?;

        let config = self.load_config()?;
        self.output.verbose(&format!(
            "Registry: {} (repository {})",
            config.host(),
            config.repository()
        ));

        let client = RegistryClient::builder(config)
            .with_output(self.output.clone())
            .build()?;

        let rendered = self.execute(&client).await?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
        Ok(())
    }

    fn load_config(&self) -> Result<RegistryConfig> {
        if let Some(path) = &self.args.credentials {
            self.output
                .verbose(&format!("Loading credentials from {}", path.display()));
            return RegistryConfig::load(path);
        }

        if Path::new(CREDENTIALS_FILE).exists() {
            self.output
                .verbose(&format!("Loading credentials from {}", CREDENTIALS_FILE));
            return RegistryConfig::load_default();
        }

        self.output.verbose(&format!(
            "{} not found, reading NEXUS_* environment variables",
            CREDENTIALS_FILE
        ));
        RegistryConfig::from_env().map_err(|e| {
            RegistryError::Configuration(format!(
                "{} file not found and environment incomplete: {}",
                CREDENTIALS_FILE, e
            ))
        })
    }

    /// Run the selected command and return what should be printed on stdout.
    /// Diagnostics go through the logger, never into the returned text.
    pub async fn execute(&self, registry: &dyn ImageRegistry) -> Result<String> {
        match &self.args.command {
            Command::Images => {
                let images = registry.list_images().await?;
                Ok(images.join("\n"))
            }
            Command::Tags { image } => {
                let tags = registry.list_tags_by_image(image).await?;
                Ok(tags.join("\n"))
            }
            Command::Manifest { image, tag } => {
                let manifest = registry.fetch_manifest(image, tag).await?;
                self.output.verbose(&format!(
                    "{}:{} has {} layers, {} total",
                    image,
                    tag,
                    manifest.layers.len(),
                    self.output.format_size(manifest.total_size().max(0) as u64)
                ));
                Ok(serde_json::to_string_pretty(&manifest)?)
            }
            Command::Info { image, tag } => {
                let info = registry.fetch_legacy_manifest_info(image, tag).await?;
                let mut lines = vec![
                    format!("name: {}", info.name),
                    format!("tag: {}", info.tag),
                    format!("schema_version: {}", info.schema_version),
                    format!("created: {}", info.created),
                    format!(
                        "created_at: {}",
                        info.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
                    ),
                ];
                if !info.architecture.is_empty() {
                    lines.push(format!("architecture: {}", info.architecture));
                }
                Ok(lines.join("\n"))
            }
            Command::Digest { image, tag } => {
                let digest = registry.resolve_tag_digest(image, tag).await?;
                if digest.is_empty() {
                    return Err(RegistryError::MissingDigest {
                        image: image.clone(),
                        reference: tag.clone(),
                    });
                }
                Ok(digest)
            }
            Command::Delete { image, tag, .. } => {
                registry.delete_image_by_tag(image, tag).await?;
                Ok(String::new())
            }
        }
    }
}
