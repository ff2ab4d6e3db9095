use crate::api::{self, Filter, Gender};
use crate::fetch::Target;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "duofetch")]
#[command(about = "Fetch random user profiles over two HTTP client stacks and compare their latency")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the profile API
    #[arg(long, global = true, env = "DUOFETCH_API_URL", default_value = api::DEFAULT_API_URL)]
    pub api_url: String,

    /// Gender to request (default: any)
    #[arg(long, short = 'g', global = true, value_enum)]
    pub gender: Option<GenderArg>,

    /// Nationality code to request (see `duofetch countries`)
    #[arg(long, short = 'c', global = true, default_value = "US")]
    pub country: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// One-shot fetch without the interactive screen
    Fetch {
        /// Transport path(s) to exercise
        #[arg(long, value_enum, default_value = "both")]
        via: Via,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the nationality codes the API supports
    Countries,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum GenderArg {
    Female,
    Male,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Via {
    Reqwest,
    Ureq,
    Both,
}

impl From<Via> for Target {
    fn from(via: Via) -> Target {
        match via {
            Via::Reqwest => Target::Reqwest,
            Via::Ureq => Target::Ureq,
            Via::Both => Target::Both,
        }
    }
}

impl Cli {
    /// Filter assembled from the global flags. Values are relayed as
    /// given; unsupported country codes go to the server unchanged.
    pub fn filter(&self) -> Filter {
        Filter {
            gender: match self.gender {
                None => Gender::Any,
                Some(GenderArg::Female) => Gender::Female,
                Some(GenderArg::Male) => Gender::Male,
            },
            country: self.country.clone(),
        }
    }
}
