//! Argument vector for the tool's "create login item" subcommand

use super::ExporterConfig;
use super::record::CredentialRecord;

/// Arguments for `<tool> item create` creating a login item from `record`.
///
/// Flags use the `--flag=value` form so a value starting with `-` can never
/// be read as another flag. Field assignments (`username=`, `password=`)
/// come last.
pub fn create_login_args(record: &CredentialRecord, config: &ExporterConfig) -> Vec<String> {
    let mut args = vec![
        "item".to_string(),
        "create".to_string(),
        "--category=login".to_string(),
        format!("--title={}", record.title),
    ];

    if let Some(vault) = config.vault.as_deref().filter(|v| !v.trim().is_empty()) {
        args.push(format!("--vault={}", vault));
    }
    if let Some(url) = record.website_url() {
        args.push(format!("--url={}", url));
    }
    if config.json_output {
        args.push("--format=json".to_string());
    }

    if let Some(username) = record.username_value() {
        args.push(format!("username={}", username));
    }
    args.push(format!("password={}", record.password));

    args
}
