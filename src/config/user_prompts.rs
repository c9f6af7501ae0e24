//! User interaction and prompts
//!
//! Handles stdin prompts for first-run configuration and for the OAuth
//! verifier code during interactive authorization.

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

async fn read_trimmed_line() -> Result<String, AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}

/// Prompts for the Yahoo application consumer key and secret.
///
/// # Returns
/// * `Ok((key, secret))` - The trimmed user input
/// * `Err(AppError)` - Error reading from stdin
pub async fn prompt_for_consumer_credentials() -> Result<(String, String), AppError> {
    println!("Please enter your Yahoo app consumer key: ");
    let key = read_trimmed_line().await?;
    println!("Please enter your Yahoo app consumer secret: ");
    let secret = read_trimmed_line().await?;
    Ok((key, secret))
}

/// Shows the authorization URL and waits for the verifier code the user
/// copies back from the browser.
pub async fn prompt_for_verifier_code(authorization_url: &str) -> Result<String, AppError> {
    println!("Open the following URL in your browser and approve access:");
    println!("{authorization_url}");
    println!("Enter the verifier code shown after approval: ");
    read_trimmed_line().await
}
