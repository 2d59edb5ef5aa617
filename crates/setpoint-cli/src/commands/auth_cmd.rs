//! `auth` subcommands: sign in, sign out, session status.

use std::path::Path;

use crate::commands::common;
use crate::error::CliError;

pub async fn run_login(db_path: &Path, email: &str) -> Result<(), CliError> {
    let password = common::read_password()?;
    let client = common::auth_client(db_path)?;
    let session = client
        .sign_in(email, &password)
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?;

    println!(
        "Signed in as {} ({})",
        session.user.email.as_deref().unwrap_or("unknown"),
        session.user.id
    );
    Ok(())
}

pub async fn run_logout(db_path: &Path) -> Result<(), CliError> {
    let client = common::auth_client(db_path)?;
    let Some(session) = client
        .restore_session()
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?
    else {
        println!("Not signed in.");
        return Ok(());
    };

    client
        .sign_out(&session.access_token)
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?;
    println!("Signed out.");
    Ok(())
}

pub async fn run_status(db_path: &Path) -> Result<(), CliError> {
    let client = common::auth_client(db_path)?;
    match client
        .restore_session()
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?
    {
        Some(session) => println!(
            "Signed in as {} ({})",
            session.user.email.as_deref().unwrap_or("unknown"),
            session.user.id
        ),
        None => println!("Not signed in."),
    }
    Ok(())
}
