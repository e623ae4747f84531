use anyhow::Result;
use signup_flow::{Field, ValidationErrors};

pub mod register;
pub mod show_config;
pub mod status;
pub mod validate;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Print one line per failing field, in form order
pub fn print_field_errors(errors: &ValidationErrors) {
    println!("❌ Sign-up details need attention:");
    for field in Field::ALL {
        if let Some(message) = errors.get(field) {
            println!("   → {}: {}", field.label(), message);
        }
    }
}

pub async fn show_how_to_get_started() -> Result<()> {
    println!("📝 signup-flow - Create new account");
    println!();
    println!("To use Social Network enter your details:");
    println!("  🚀 signup-flow register --name <NAME> --username <USERNAME> --email <EMAIL> --password <PASSWORD>");
    println!("  ✅ signup-flow validate ...      # Check details without creating an account");
    println!("  🔐 signup-flow status --session <SECRET>");
    println!("  ⚙️  signup-flow config            # Show effective configuration");
    println!();
    println!("💡 Already have an account? Log In");
    Ok(())
}
