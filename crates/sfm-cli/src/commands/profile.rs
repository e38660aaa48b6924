//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sfm_client::ClientConfig;
use std::path::Path;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, config_path, name, formatter),
        ProfileAction::Set {
            name,
            url,
            lang,
            csrf_token,
            timeout,
            save_form_key,
        } => {
            let mut client = ClientConfig::new(url)
                .with_lang(lang)
                .with_csrf_token(csrf_token)
                .with_timeout_secs(timeout);
            if let Some(key) = save_form_key {
                client = client.with_save_form_key(key);
            }
            set_profile(config, config_path, name, client, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, config_path, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    println!("Available profiles:");
    for name in names {
        let profile = &config.profiles[name];
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_client(&profile.client, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_client(&profile.client, "  ");

    Ok(())
}

fn print_client(client: &ClientConfig, indent: &str) {
    println!("{}URL: {}", indent, client.base_url);
    println!("{}Language: {}", indent, client.lang);
    println!("{}Timeout: {}s", indent, client.timeout_secs);
    if !client.csrf_token.is_empty() {
        println!("{}CSRF token: set", indent);
    }
    if let Some(key) = &client.save_form_key {
        println!("{}Save form key: {}", indent, key);
    }
}

/// Switch to a different profile.
fn switch_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save_to(config_path)?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    client: ClientConfig,
    formatter: &Formatter,
) -> Result<()> {
    client.validate().map_err(CliError::InvalidInput)?;

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), Profile { client });
    config.save_to(config_path)?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save_to(config_path)?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}
