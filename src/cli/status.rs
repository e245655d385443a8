//! `status` and `host` commands.

use owo_colors::OwoColorize;

use crate::cli::common::Stamp;

/// Print the resolved asset host.
pub fn print_host(stamp: &Stamp) {
    println!("{}", stamp.policy.resolve_host());
}

/// Print the effective versioning settings.
pub fn print_status(stamp: &Stamp) {
    print!("{}", render_status(stamp));
}

fn render_status(stamp: &Stamp) -> String {
    let config = stamp.config.load();
    let token = stamp.token.current();

    let active = if stamp.policy.is_active() {
        "yes".green().bold().to_string()
    } else {
        "no".red().bold().to_string()
    };
    let version = if token.is_empty() {
        format!("{} ({} unset)", "-".dimmed(), config.versioning.env)
    } else {
        format!("{} ({})", token, config.versioning.env)
    };
    let source = if config.config_path.as_os_str().is_empty() {
        "defaults".dimmed().to_string()
    } else {
        config.config_path.display().to_string()
    };

    let rows = [
        ("active", active),
        ("host", stamp.policy.resolve_host()),
        ("version", version),
        ("strategy", config.versioning.strategy.name().to_string()),
        ("config", source),
    ];

    rows.iter()
        .map(|(label, value)| format!("{label:<9}{value}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetsConfig;
    use crate::versioning::VersionToken;

    fn line<'a>(out: &'a str, label: &str) -> &'a str {
        out.lines()
            .find(|l| l.starts_with(label))
            .unwrap_or_else(|| panic!("missing {label} in {out}"))
    }

    #[test]
    fn test_render_status_active() {
        let mut config = AssetsConfig {
            package_assets: true,
            s3_cloudfront_host: Some("d1.cloudfront.net".into()),
            ..AssetsConfig::default()
        };
        config.versioning.trace = false;
        let stamp = Stamp::new(config, VersionToken::new("42"));

        let out = render_status(&stamp);
        assert!(line(&out, "active").contains("yes"));
        assert_eq!(line(&out, "host"), "host     d1.cloudfront.net");
        assert_eq!(line(&out, "version"), "version  42 (RAILS_ASSET_ID)");
        assert_eq!(line(&out, "strategy"), "strategy prefix");
        assert!(line(&out, "config").contains("defaults"));
    }

    #[test]
    fn test_render_status_inactive() {
        let mut config = AssetsConfig {
            s3_bucket: Some("media".into()),
            ..AssetsConfig::default()
        };
        config.versioning.trace = false;
        let stamp = Stamp::new(config, VersionToken::empty());

        let out = render_status(&stamp);
        assert!(line(&out, "active").contains("no"));
        assert_eq!(line(&out, "host"), "host     media.s3.amazonaws.com");
        assert!(line(&out, "version").contains("RAILS_ASSET_ID unset"));
    }
}
