// ABOUTME: Integration tests for logging configuration read from the environment
// ABOUTME: Environment-mutating tests run serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use caretrack_seed::logging::{LogFormat, LoggingConfig, SERVICE_NAME};
use serial_test::serial;

fn clear_env() {
    for key in ["RUST_LOG", "LOG_FORMAT", "LOG_INCLUDE_LOCATION", "SERVICE_NAME"] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_logging_config_defaults() {
    clear_env();

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.service_name, SERVICE_NAME);
    assert!(!config.include_location);
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
}

#[test]
fn test_env_filter_quiets_http_stack() {
    let config = LoggingConfig {
        level: "debug".to_owned(),
        ..LoggingConfig::default()
    };

    let filter = config.env_filter().to_string();

    assert!(filter.contains("hyper=warn"));
    assert!(filter.contains("reqwest=warn"));
    assert!(filter.contains("caretrack_seed=debug"));
}

#[test]
#[serial]
fn test_second_init_is_an_error() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };

    config.init().unwrap();
    assert!(config.init().is_err());
}
