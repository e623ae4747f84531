use clap::{Args, Parser, Subcommand};
use signup_flow::SignUpValues;

pub mod commands;

#[derive(Parser)]
#[command(name = "signup-flow")]
#[command(about = "Create an account on the social network and sign straight in")]
#[command(long_about = "signup-flow validates sign-up details, creates the account on the account service, \
                       opens a session and confirms it. Start with 'signup-flow register'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account, sign in and confirm the session
    Register {
        #[command(flatten)]
        details: SignUpArgs,
    },
    /// Check sign-up details against the form rules without contacting the service
    Validate {
        #[command(flatten)]
        details: SignUpArgs,
    },
    /// Report whether a session is authenticated
    Status {
        /// Session secret returned by an earlier sign-in
        #[arg(long, env = "SIGNUP_FLOW_SESSION", hide_env_values = true)]
        session: Option<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct SignUpArgs {
    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Public username
    #[arg(long, default_value = "")]
    pub username: String,
    /// Account email address
    #[arg(long, default_value = "")]
    pub email: String,
    /// Account password
    #[arg(long, env = "SIGNUP_FLOW_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,
}

impl From<SignUpArgs> for SignUpValues {
    fn from(args: SignUpArgs) -> Self {
        SignUpValues {
            name: args.name,
            username: args.username,
            email: args.email,
            password: args.password,
        }
    }
}
