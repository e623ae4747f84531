use anyhow::Result;
use signup_flow::SignupConfig;

use super::Command;

pub struct ShowConfigCommand {
    config: SignupConfig,
}

impl ShowConfigCommand {
    pub fn new(config: SignupConfig) -> Self {
        Self { config }
    }
}

impl Command for ShowConfigCommand {
    async fn execute(&self) -> Result<()> {
        print!("{}", self.config.to_toml()?);
        Ok(())
    }
}
