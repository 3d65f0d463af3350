use anyhow::Context;
use clap::Args;

use crate::auth::JwtKeys;
use crate::cli::{utils::output_value, OutputFormat};
use crate::config::AppConfig;
use crate::types::Role;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "Caller email, becomes the token subject")]
    pub email: String,

    #[arg(long, help = "ADMIN or STUDENT")]
    pub role: Role,

    #[arg(long, help = "Lifetime in hours (defaults to the configured expiry)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let keys = JwtKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)
        .context("JWT_SECRET must be set to mint tokens")?;
    let hours = args.hours.unwrap_or(config.security.jwt_expiry_hours);
    let token = keys.issue_with_expiry(&args.email, args.role, hours)?;
    output_value(output_format, "token", &token)
}
