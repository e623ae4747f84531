use anyhow::{bail, Result};
use signup_flow::{SignUpSchema, SignUpValues, Validator};

use super::{print_field_errors, Command};

pub struct ValidateCommand {
    values: SignUpValues,
}

impl ValidateCommand {
    pub fn new(values: SignUpValues) -> Self {
        Self { values }
    }
}

impl Command for ValidateCommand {
    async fn execute(&self) -> Result<()> {
        match SignUpSchema.validate(&self.values) {
            Ok(input) => {
                println!("✅ All fields valid for {} (@{})", input.name, input.username);
                Ok(())
            }
            Err(errors) => {
                print_field_errors(&errors);
                bail!("{errors}")
            }
        }
    }
}
