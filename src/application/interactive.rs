use std::path;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;

use super::app::App;
use crate::domain::models::SelectedFile;

pub async fn login_with_password(app: &App, username: Option<String>) -> Result<()> {
    let theme = ColorfulTheme::default();
    let username = match username {
        Some(username) => username,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    app.session.login(&username, &password).await;
    return Ok(());
}

/// Starts a third-party login and waits for the user to paste back the URL
/// the identity provider redirected them to.
pub async fn login_with_google(app: &App) -> Result<()> {
    if !app.session.start_google_login().await {
        return Ok(());
    }

    let redirect_url = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Paste the URL you were redirected to")
        .allow_empty(true)
        .interact_text()?;

    if !app.session.complete_google_login(&redirect_url) {
        app.session.toggle_sections();
    }

    return Ok(());
}

async fn ask(app: &App) -> Result<()> {
    let theme = ColorfulTheme::default();
    let file_path = Input::<String>::with_theme(&theme)
        .with_prompt("File")
        .allow_empty(true)
        .interact_text()?;

    let file = if file_path.trim().is_empty() {
        None
    } else {
        Some(SelectedFile::from_path(path::PathBuf::from(file_path.trim())))
    };
    app.questions.select_file(file);

    let question = Input::<String>::with_theme(&theme)
        .with_prompt("Question")
        .allow_empty(true)
        .interact_text()?;

    app.questions.submit_question(&question).await;
    return Ok(());
}

/// Runs until the user quits. Mirrors the page: logged out users only see
/// the login options, logged in users can ask questions or log out.
pub async fn start(app: &App) -> Result<()> {
    app.session.toggle_sections();

    loop {
        let theme = ColorfulTheme::default();
        if !app.session.is_authenticated() {
            let items = vec!["Log in", "Log in with Google", "Quit"];
            let idx = Select::with_theme(&theme)
                .with_prompt("What would you like to do?")
                .default(0)
                .items(&items)
                .interact_opt()?;

            match idx {
                Some(0) => login_with_password(app, None).await?,
                Some(1) => login_with_google(app).await?,
                _ => return Ok(()),
            }
            continue;
        }

        let items = vec!["Ask a question", "Log out", "Quit"];
        let idx = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .default(0)
            .items(&items)
            .interact_opt()?;

        match idx {
            Some(0) => ask(app).await?,
            Some(1) => {
                app.session.logout();
                app.screen.alert("You have been logged out.");
            }
            _ => return Ok(()),
        }
    }
}
