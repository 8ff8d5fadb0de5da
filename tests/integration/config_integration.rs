//! Integration tests for configuration flowing into commands

use super::test_utils::{with_env_var, write_site};
use walrus_deploy::cli::{Commands, ConfigCommands, RunContext, TerminalPrompter};
use walrus_deploy::config::{ConfigLoader, Network};
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_site_ignore_list_applies_to_scan() {
    let temp_dir = TempDir::new().unwrap();
    let site = temp_dir.path().join("site");
    write_site(&site, &[("index.html", b"x"), (".git/config", b"y")]);
    let config_path = write_config(&temp_dir, "[site]\nignore = [\".git\"]\n");

    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    let ctx = RunContext::with_config(config, config_path, Box::new(TerminalPrompter));
    let out = ctx
        .execute(&Commands::Scan {
            dir: site,
            format: "json".to_string(),
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["path"], "index.html");
}

#[test]
fn test_config_get_reports_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        "env = \"devnet\"\nwalrus_publisher_url = \"https://publisher.example\"\n",
    );

    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    assert_eq!(config.env, Network::Devnet);
    let ctx = RunContext::with_config(config, config_path.clone(), Box::new(TerminalPrompter));

    let get = |key: &str| {
        ctx.execute(&Commands::Config {
            command: ConfigCommands::Get {
                key: key.to_string(),
            },
        })
        .unwrap()
    };
    assert_eq!(get("env"), "devnet");
    assert_eq!(get("walrus_publisher_url"), "https://publisher.example");
    assert_eq!(get("sui_rpc_url"), "(unset)");

    let path = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Path,
        })
        .unwrap();
    assert_eq!(path, config_path.display().to_string());
}

#[test]
fn test_config_set_keeps_existing_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "env = \"devnet\"\n[site]\nignore = [\"drafts\"]\n");
    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    let ctx = RunContext::with_config(config, config_path.clone(), Box::new(TerminalPrompter));

    ctx.execute(&Commands::Config {
        command: ConfigCommands::Set {
            key: "keystore.kdf_iterations".to_string(),
            value: "5000".to_string(),
        },
    })
    .unwrap();

    let saved = ConfigLoader::load_from_file(&config_path).unwrap();
    assert_eq!(saved.env, Network::Devnet);
    assert_eq!(saved.site.ignore, vec!["drafts"]);
    assert_eq!(saved.keystore.kdf_iterations, 5000);
}

#[test]
fn test_config_set_rejects_invalid_value_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "env = \"devnet\"\n");
    let before = std::fs::read_to_string(&config_path).unwrap();
    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    let ctx = RunContext::with_config(config, config_path.clone(), Box::new(TerminalPrompter));

    let result = ctx.execute(&Commands::Config {
        command: ConfigCommands::Set {
            key: "keystore.kdf_iterations".to_string(),
            value: "0".to_string(),
        },
    });

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), before);
}

#[test]
fn test_config_set_does_not_persist_environment_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "env = \"mainnet\"\n");

    with_env_var(
        "WALRUS_WALRUS_AGGREGATOR_URL",
        "https://aggregator.from-env.example",
        || {
            let config = ConfigLoader::load_from_file(&config_path).unwrap();
            assert_eq!(
                config.walrus_aggregator_url.as_deref(),
                Some("https://aggregator.from-env.example")
            );
            let ctx =
                RunContext::with_config(config, config_path.clone(), Box::new(TerminalPrompter));
            ctx.execute(&Commands::Config {
                command: ConfigCommands::Set {
                    key: "sui_rpc_url".to_string(),
                    value: "https://rpc.example".to_string(),
                },
            })
            .unwrap();
        },
    );

    let written = std::fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("https://rpc.example"));
    assert!(!written.contains("from-env"), "file gained env value:\n{}", written);
    assert!(written.contains("mainnet"));
}

#[test]
fn test_changed_kdf_setting_still_unlocks_existing_keystore() {
    use walrus_deploy::keystore::{KdfParams, Keystore, SecretMaterial};

    let temp_dir = TempDir::new().unwrap();
    let keystore_path = temp_dir.path().join("walrus.keystore");
    let secret = SecretMaterial::generate();
    Keystore::with_kdf(&keystore_path, KdfParams { iterations: 10 })
        .save(&secret, Some("right"))
        .unwrap();

    let mut config = walrus_deploy::config::WalrusConfig::default();
    config.keystore.path = keystore_path.clone();
    config.set("keystore.kdf_iterations", "20").unwrap();

    let loaded = Keystore::from_config(&config.keystore)
        .load(Some("right"))
        .unwrap()
        .unwrap();
    assert_eq!(loaded, secret);
}
