use std::path::PathBuf;

use artgen_client::{ImageModel, ImageQuality, ImageSize};
use clap::{Parser, Subcommand};

/// artgen image generator
#[derive(Debug, Parser)]
#[command(name = "artgen", about = "Generate images from a prompt through the artgen backend")]
pub struct Args {
    /// Path to configuration file; built-in defaults when absent
    #[arg(short, long, env = "ARTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit the form once and save every generated image
    Generate {
        /// What to draw
        #[arg(short, long)]
        prompt: String,

        /// Model id, e.g. `dall-e-3`
        #[arg(short, long)]
        model: Option<ImageModel>,

        /// Size, e.g. `1024x1024`
        #[arg(short, long)]
        size: Option<ImageSize>,

        /// Quality, e.g. `hd`
        #[arg(short, long)]
        quality: Option<ImageQuality>,

        /// Number of images, passed through as typed
        #[arg(short = 'n', long)]
        count: Option<String>,
    },

    /// List the sizes and qualities a model offers
    Options {
        #[arg(short, long)]
        model: ImageModel,
    },

    /// Probe the backend health endpoint
    Health,
}
