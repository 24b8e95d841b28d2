//! Config subcommand handlers.

use std::io::BufRead;

use pipa_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{active_profile_name, available_profiles};
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

/// Copy of the config with plaintext communities masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.community.is_some() {
            profile.community = Some(MASK.into());
        }
    }
    cfg
}

fn read_community_from_stdin() -> Result<String, CliError> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init {
            community_env,
            default,
        } => {
            let host = global.host.clone().ok_or_else(|| CliError::Validation {
                field: "host".into(),
                reason: "pass the codec address with --host".into(),
            })?;

            let mut cfg = pipa_config::load_config()?;
            let profile_name = active_profile_name(global, &cfg);
            let previous = cfg.profiles.remove(&profile_name);
            let make_default = default || cfg.profiles.is_empty();

            let profile = Profile {
                host,
                community: previous.as_ref().and_then(|p| p.community.clone()),
                community_env: community_env
                    .or_else(|| previous.as_ref().and_then(|p| p.community_env.clone())),
                version: global.snmp_version,
                retries: global.retries,
                timeout: global.timeout,
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            if make_default {
                cfg.default_profile = Some(profile_name.clone());
            }

            pipa_config::save_config(&cfg)?;

            let path = pipa_config::config_path();
            note(global, &format!("✓ Profile '{profile_name}' written to {}", path.display()));
            note(
                global,
                &format!("  Store its community with: pipa config set-community --profile {profile_name}"),
            );
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&pipa_config::load_config()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n({e})")),
                |c| {
                    let mut names: Vec<_> = c.profiles.keys().cloned().collect();
                    names.sort();
                    names.join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", pipa_config::config_path().display());
            Ok(())
        }

        // ── Set community ───────────────────────────────────────────
        ConfigCommand::SetCommunity {
            community,
            plaintext,
        } => {
            let community = match community {
                Some(c) => c,
                None => read_community_from_stdin()?,
            };
            if community.is_empty() {
                return Err(CliError::Validation {
                    field: "community".into(),
                    reason: "community cannot be empty".into(),
                });
            }

            let mut cfg = pipa_config::load_config()?;
            let profile_name = active_profile_name(global, &cfg);

            if plaintext {
                let available = available_profiles(&cfg);
                let profile = cfg.profiles.get_mut(&profile_name).ok_or_else(|| {
                    CliError::ProfileNotFound {
                        name: profile_name.clone(),
                        available,
                    }
                })?;
                profile.community = Some(community);
                pipa_config::save_config(&cfg)?;
                note(global, &format!("✓ Community saved in plaintext for profile '{profile_name}'"));
            } else {
                pipa_config::store_community(&profile_name, &community)?;
                note(global, &format!("✓ Community stored in system keyring for profile '{profile_name}'"));
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = pipa_config::load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                note(global, "No profiles configured. Run: pipa --host <HOST> config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = pipa_config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            pipa_config::save_config(&cfg)?;
            note(global, &format!("✓ Default profile set to '{name}'"));
            Ok(())
        }
    }
}
