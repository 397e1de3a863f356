use crate::content::types::{ContentFormat, Tone};
use clap::{Parser, Subcommand};

/// `copymill` - Marketing copy generation from product pages.
#[derive(Parser, Debug)]
#[command(name = "copymill")]
#[command(version = "0.1.0")]
#[command(about = "Generate marketing blog posts and social threads.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8787")]
        port: u16,
    },

    /// Fetch a product page and print its context digest
    Extract {
        /// Absolute http/https URL of the product page
        url: String,
    },

    /// Propose target-reader personas for a product
    Personas {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product page URL
        #[arg(long, default_value = "")]
        link: String,

        /// Product description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Generate a post for a product
    Generate {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product page URL
        #[arg(long, default_value = "")]
        link: String,

        /// Product description
        #[arg(long, default_value = "")]
        description: String,

        /// Persona title to aim at (a generic reader when omitted)
        #[arg(long)]
        persona: Option<String>,

        /// Tone of voice (professional, friendly, heartfelt)
        #[arg(long, default_value = "friendly")]
        tone: Tone,

        /// Primary output format (blog, thread)
        #[arg(long, default_value = "blog")]
        format: ContentFormat,
    },
}
