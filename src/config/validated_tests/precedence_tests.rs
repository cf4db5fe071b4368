//! Tests for CLI vs TOML precedence rules.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::expand_tilde;

use super::*;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_token_overrides_toml() {
        let toml = toml(
            r#"
            [telegram]
            token = "toml-token"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--token", "cli-token"]), Some(&toml)).unwrap();

        assert_eq!(config.token, "cli-token");
    }

    #[test]
    fn cli_router_and_interval_override_toml() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"

            [router]
            address = "10.0.0.1"
            poll_interval = 30
        "#,
        );

        let config = ValidatedConfig::from_raw(
            &cli(&["--router", "192.168.0.254", "--poll-interval", "5"]),
            Some(&toml),
        )
        .unwrap();

        assert_eq!(config.router_address, "192.168.0.254");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn cli_state_file_overrides_toml() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"

            [state]
            file = "/from/toml.json"
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--state-file", "/from/cli.json"]), Some(&toml))
                .unwrap();

        assert_eq!(config.state_file, PathBuf::from("/from/cli.json"));
    }
}

mod access_list {
    use super::*;

    #[test]
    fn cli_access_list_replaces_toml() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"
            access_list = ["Alice", "Bob"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["-a", "Carol"]), Some(&toml)).unwrap();

        assert!(config.access_list.permits("Carol"));
        assert!(!config.access_list.permits("Alice"));
    }

    #[test]
    fn toml_access_list_used_without_cli() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"
            access_list = ["Alice"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.access_list.permits("Alice"));
        assert!(!config.access_list.permits("Mallory"));
    }

    #[test]
    fn empty_toml_access_list_permits_everyone() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"
            access_list = []
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.access_list.is_open());
        assert!(config.access_list.permits("Anyone"));
    }
}

mod toml_paths {
    use super::*;

    #[test]
    fn toml_alias_table_expands_home() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"

            [router]
            alias_table = "~/aliases.json"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.alias_table, Some(expand_tilde("~/aliases.json")));
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/etc/aliases.json"), PathBuf::from("/etc/aliases.json"));
    }
}

mod debug_flag {
    use super::*;

    #[test]
    fn toml_debug_enables_without_cli() {
        let toml = toml(
            r#"
            [telegram]
            token = "t"

            [log]
            debug = true
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.debug);
    }

    #[test]
    fn cli_debug_enables_without_toml() {
        let config = ValidatedConfig::from_raw(&cli(&["--token", "t", "-d"]), None).unwrap();

        assert!(config.debug);
    }
}
