// ABOUTME: Property tests for argument assembly.
// ABOUTME: Checks port handling and that planning is a pure function of its inputs.

use proptest::prelude::*;
use rsync_deploy::config::DeployConfig;
use rsync_deploy::deploy::{DeployContext, Planned, plan};

fn ready(config: &DeployConfig) -> Vec<Vec<String>> {
    match plan(&DeployContext::new("/public"), config).unwrap() {
        Planned::Ready(plan) => plan.iter().map(|i| i.arguments.clone()).collect(),
        Planned::Unconfigured(missing) => panic!("unexpected: {missing}"),
    }
}

fn config_strategy() -> impl Strategy<Value = DeployConfig> {
    (
        proptest::option::of(any::<i64>()),
        proptest::option::of("[a-z/_]{1,16}"),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(port, key, rsh, delete, verbose, create_before_update)| DeployConfig {
            port,
            key,
            rsh,
            delete,
            verbose,
            create_before_update,
            ..DeployConfig::new("example.com", "user", "/rootDir")
        })
}

proptest! {
    #[test]
    fn planning_is_deterministic(config in config_strategy()) {
        prop_assert_eq!(ready(&config), ready(&config));
    }

    #[test]
    fn paths_are_always_last(config in config_strategy()) {
        for args in ready(&config) {
            let n = args.len();
            prop_assert_eq!(&args[n - 2], "/public");
            prop_assert_eq!(&args[n - 1], "user@example.com:/rootDir");
            prop_assert_eq!(&args[0], "-az");
        }
    }

    #[test]
    fn out_of_range_port_never_emitted(port in prop_oneof![i64::MIN..=0i64, 65536i64..=i64::MAX]) {
        let config = DeployConfig {
            port: Some(port),
            ..DeployConfig::new("example.com", "user", "/rootDir")
        };
        for args in ready(&config) {
            prop_assert!(!args.iter().any(|a| a.contains("-p ")));
            prop_assert!(!args.contains(&"-e".to_string()));
        }
    }

    #[test]
    fn valid_port_always_emitted(port in 1i64..=65535) {
        let config = DeployConfig {
            port: Some(port),
            ..DeployConfig::new("example.com", "user", "/rootDir")
        };
        let expected = format!("ssh -p {port}");
        for args in ready(&config) {
            prop_assert!(args.contains(&expected));
        }
    }
}
