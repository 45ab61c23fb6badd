//! Sign-in command.

use pocket_store_client::config::ClientConfig;
use pocket_store_client::{App, Result};

use crate::output;

/// Sign in and print the profile.
pub async fn login(config: &ClientConfig, username: &str, password: &str) -> Result<()> {
    let app = App::from_config(config)?;

    let mut login = app.login_screen();
    login.set_username(username);
    login.set_password(password);
    login.submit().await?;

    let profile = app.profile_screen()?;
    output::heading("Profile");
    output::profile(&profile);
    Ok(())
}
