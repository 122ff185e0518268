//! CLI 명령 파싱 모듈.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::review::{CommentId, ProductId};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STORE_PATH: &str = ".replypilot/store.json";

#[derive(Debug, Parser)]
#[command(name = "replypilot")]
#[command(about = "Automatic replies to approved product reviews")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the event intake and operator HTTP server
    Serve {
        /// Listen address
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
        /// Store snapshot file
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: PathBuf,
    },
    /// Generate and post a reply for one review now (ignores delay and enabled flag)
    Reply {
        review_id: CommentId,
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: PathBuf,
    },
    /// Preview the prompt and generated reply for a sample review without posting
    TestPrompt {
        #[arg(long)]
        product_id: Option<ProductId>,
        /// Sample customer review text
        #[arg(long)]
        review: String,
        #[arg(long, default_value = DEFAULT_STORE_PATH)]
        store: PathBuf,
    },
    /// Show effective merged config and credential sources
    Config,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Serve {
        addr: SocketAddr,
        store: PathBuf,
    },
    Reply {
        review_id: CommentId,
        store: PathBuf,
    },
    TestPrompt {
        product_id: Option<ProductId>,
        review: String,
        store: PathBuf,
    },
    InspectConfig,
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Serve { addr, store } => CliAction::Serve { addr, store },
            Commands::Reply { review_id, store } => CliAction::Reply { review_id, store },
            Commands::TestPrompt {
                product_id,
                review,
                store,
            } => CliAction::TestPrompt {
                product_id,
                review,
                store,
            },
            Commands::Config => CliAction::InspectConfig,
        }
    }
}
