#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::app::App;
use super::interactive;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::OutputFormat;
use crate::domain::models::SelectedFile;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Log in with a username and password. Prompts for anything not provided.")
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .help("Account username.")
                .num_args(1),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .env("ASKDOC_PASSWORD")
                .hide_env_values(true)
                .help("Account password.")
                .num_args(1),
        );
}

fn subcommand_google_callback() -> Command {
    return Command::new("google-callback")
        .about("Completes a Google login with the URL the browser was redirected to.")
        .arg(
            Arg::new("url")
                .long("url")
                .help("Redirect URL carrying the access_token query parameter.")
                .num_args(1)
                .required(true),
        );
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Upload a file and ask a question about it.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Path to the document to ask about.")
                .num_args(1),
        )
        .arg(
            Arg::new("question")
                .short('q')
                .long("question")
                .help("Question to ask about the document.")
                .num_args(1),
        );
}

pub fn build() -> Command {
    return Command::new("askdoc")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(Command::new("start").about("Start an interactive session. This is the default."))
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Remove the stored access token."))
        .subcommand(Command::new("status").about("Show whether you are logged in."))
        .subcommand(Command::new("google-login").about("Log in through Google."))
        .subcommand(subcommand_google_callback())
        .subcommand(subcommand_ask())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("ASKDOC_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("ASKDOC_API_URL")
                .num_args(1)
                .help(format!("Base URL of the question-answering service. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Output.to_string())
                .short('o')
                .long(ConfigKey::Output.to_string())
                .env("ASKDOC_OUTPUT")
                .num_args(1)
                .help(format!("Output format for answers. [default: {}]", Config::default(ConfigKey::Output)))
                .value_parser(PossibleValuesParser::new(OutputFormat::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("ASKDOC_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds for a response from the service. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TokenFile.to_string())
                .long(ConfigKey::TokenFile.to_string())
                .env("ASKDOC_TOKEN_FILE")
                .num_args(1)
                .help(format!("File the access token is stored in. [default: {}]", Config::default(ConfigKey::TokenFile)))
                .global(true),
        );
}

async fn run_ask(app: &App, matches: &ArgMatches) -> Result<bool> {
    app.session.toggle_sections();
    if !app.session.is_authenticated() {
        return Ok(false);
    }

    let file = matches
        .get_one::<String>("file")
        .map(|e| return SelectedFile::from_path(path::PathBuf::from(e)));
    app.questions.select_file(file);

    let question = matches
        .get_one::<String>("question")
        .map(|e| return e.to_string())
        .unwrap_or_default();

    let outcome = app.questions.submit_question(&question).await;
    tracing::debug!(state = %app.questions.state(), "Submission finished");
    return Ok(outcome.is_success());
}

/// Parses arguments and runs the requested command. Returns false when the
/// command finished but didn't succeed, such as a rejected login.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(true);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(true);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(true);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(true);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(true);
            }
        },
        _ => {}
    }

    let mut arg_matches = vec![&matches];
    if let Some((_, subcmd_matches)) = matches.subcommand() {
        arg_matches.push(subcmd_matches);
    }
    Config::load(build(), arg_matches).await?;

    let app = App::from_config()?;

    match matches.subcommand() {
        Some(("login", subcmd_matches)) => {
            let username = subcmd_matches.get_one::<String>("username").cloned();
            match subcmd_matches.get_one::<String>("password") {
                Some(password) => {
                    let username = match username {
                        Some(username) => username,
                        None => bail!("A username is required when passing a password"),
                    };
                    app.session.login(&username, password).await;
                }
                None => interactive::login_with_password(&app, username).await?,
            }
            return Ok(app.session.is_authenticated());
        }
        Some(("logout", _)) => {
            app.session.logout();
            app.screen.alert("You have been logged out.");
        }
        Some(("status", _)) => {
            app.session.toggle_sections();
            println!("Session: {}", app.session.session_state());
        }
        Some(("google-login", _)) => {
            interactive::login_with_google(&app).await?;
            return Ok(app.session.is_authenticated());
        }
        Some(("google-callback", subcmd_matches)) => {
            let url = subcmd_matches
                .get_one::<String>("url")
                .map(|e| return e.to_string())
                .unwrap_or_default();
            if !app.session.complete_google_login(&url) {
                app.session.toggle_sections();
            }
            return Ok(app.session.is_authenticated());
        }
        Some(("ask", subcmd_matches)) => {
            return run_ask(&app, subcmd_matches).await;
        }
        _ => {
            interactive::start(&app).await?;
        }
    }

    return Ok(true);
}
